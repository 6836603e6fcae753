//! TIFF, and the raw formats built on it.
//!
//! A TIFF file *is* an Exif blob, so there's nothing to dig out. The other
//! kinds of metadata hang off IFD0 tags:
//!
//! - IPTC in `0x83BB`, or in the Photoshop resources of `0x8649`,
//! - XMP in `0x02BC`,
//! - and an ICC profile in `0x8773`.
//!
//! Olympus ORF (`IIRO`/`MMOR`) and Panasonic RW2 (`IIU\0`) only change the
//! magic number, so they're read the same way.

use crate::{
    MetadataProvider,
    error::{Error, Warning, warn},
    exif::{
        ExifData, ExifKey, IfdId, Value, error::ExifFatalError, value::WireValue as _, writer,
    },
    iptc::irb,
    providers::{RawBlobs, shared::tiff_structure},
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
};

const IPTC_NAA: ExifKey = ExifKey::new(IfdId::Image, 0x83BB);
const XML_PACKET: ExifKey = ExifKey::new(IfdId::Image, 0x02BC);
const IMAGE_RESOURCES: ExifKey = ExifKey::new(IfdId::Image, 0x8649);
const ICC_PROFILE: ExifKey = ExifKey::new(IfdId::Image, 0x8773);

/// Byte order marker and magic number, for every flavor we read.
const HEADERS: &[[u8; 4]] = &[
    *b"II*\0",
    *b"MM\0*",
    *b"IIRO", // olympus
    *b"MMOR",
    *b"IIU\0", // panasonic
];

/// A TIFF (or TIFF-based raw) file.
#[derive(Clone, Debug)]
pub struct Tiff {
    blobs: RawBlobs,
}

/// A tag's bytes as they sit in the file.
fn tag_bytes(exif: &ExifData, key: &ExifKey) -> Option<Vec<u8>> {
    exif.find_key(key)
        .map(|d| d.value().serialize(exif.byte_order()))
        .filter(|b| !b.is_empty())
}

/// IPTC from `0x83BB`, or failing that, from the resources in `0x8649`.
fn find_iptc(exif: &ExifData, warnings: &mut Vec<Warning>) -> Option<Vec<u8>> {
    if let Some(iptc) = tag_bytes(exif, &IPTC_NAA) {
        return Some(iptc);
    }

    let resources = tag_bytes(exif, &IMAGE_RESOURCES)?;
    match irb::parse(&resources, warnings) {
        Ok(resources) => irb::find(&resources, irb::IPTC).map(|r| r.data.clone()),
        Err(e) => {
            warn(warnings, format!("couldn't read tag `0x8649`. err: {e}"));
            None
        }
    }
}

impl MetadataProvider for Tiff {
    type ConstructionError = ExifFatalError;

    const FORMAT: &'static str = "TIFF";

    fn magic_number(input: &[u8]) -> bool {
        input
            .get(..4)
            .is_some_and(|h| HEADERS.iter().any(|known| known == h))
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let input = input.as_ref();
        let (exif, mut warnings) = ExifData::parse(input)?;

        let blobs = RawBlobs {
            iptc: find_iptc(&exif, &mut warnings),
            xmp: tag_bytes(&exif, &XML_PACKET),
            icc: tag_bytes(&exif, &ICC_PROFILE),
            exif: Some(input.to_vec()),
            xmp_extended: None,
            comment: None,
            warnings,
        };

        log::debug!("TIFF has `{}` Exif datums", exif.len());
        Ok(Self { blobs })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        let mut warnings = Vec::new();
        let mut exif = update.exif.clone();

        // these live in the Exif itself, so they're just more tags
        let apply =
            |exif: &mut ExifData, key: ExifKey, change: Change<Vec<u8>>, ty: fn(Vec<u8>) -> Value| {
                match change {
                    Change::Keep => (),
                    Change::Remove => {
                        exif.erase(&key);
                    }
                    Change::Set(bytes) => exif.set(key, ty(bytes)),
                }
            };

        let iptc = update.iptc_change();
        let resources = (exif.find_key(&IPTC_NAA).is_none())
            .then(|| tag_bytes(&exif, &IMAGE_RESOURCES))
            .flatten();
        match resources {
            // keep the IPTC where it was found
            Some(old) if !iptc.is_keep() => {
                let mut resources = irb::parse(&old, &mut warnings)?;
                irb::set(&mut resources, irb::IPTC, iptc.resolve(None).cloned());
                let block = irb::serialize(&resources);
                apply(&mut exif, IMAGE_RESOURCES, Change::Set(block), Value::Byte);
            }
            _ => apply(&mut exif, IPTC_NAA, iptc, Value::Undefined),
        }

        let xmp = match update.xmp_change()? {
            Change::Keep => Change::Keep,
            Change::Remove => Change::Remove,
            Change::Set(packet) => Change::Set(packet.into_bytes()),
        };
        apply(&mut exif, XML_PACKET, xmp, Value::Byte);
        apply(&mut exif, ICC_PROFILE, update.icc_change(), Value::Undefined);

        if exif.is_pristine() {
            log::debug!("TIFF is unchanged");
            return Ok(WriteOutcome {
                bytes: input.to_vec(),
                strategy: WriteStrategy::NonIntrusive,
                warnings,
            });
        }
        if exif.is_empty() {
            return Err(Error::Provider {
                format: Self::FORMAT,
                message: "a TIFF can't be written without any Exif".into(),
            });
        }

        let (mut bytes, strategy) = writer::serialize_with(&exif, &update.options, &mut warnings)?;

        // raw flavors keep their own magic number
        if let (Some(old), Some(new)) = (input.get(..4), bytes.get_mut(..4))
            && old[..2] == new[..2]
        {
            new.copy_from_slice(old);
        }

        log::debug!("rewrote TIFF: `{}` -> `{}` bytes", input.len(), bytes.len());
        Ok(WriteOutcome {
            bytes,
            strategy,
            warnings,
        })
    }

    fn structure(&self, input: &[u8], _recursive: bool) -> Vec<String> {
        tiff_structure(input, 0)
    }
}
