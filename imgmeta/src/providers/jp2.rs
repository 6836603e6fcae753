//! JPEG 2000 (JP2/JPX) files.
//!
//! These are boxes, laid out like BMFF. Metadata is in top-level `uuid`
//! boxes, each one named by what it holds:
//!
//! - `JpgTiffExif->JP2` holds a TIFF blob,
//! - `be7acfcb-…` holds an XMP packet,
//! - and `33c7a4d2-…` holds IPTC-IIM.
//!
//! An ICC profile can be in the `colr` box inside `jp2h`. We only read that
//! one.

use crate::{
    MetadataProvider,
    error::{Error, Warning, warn},
    providers::{
        RawBlobs,
        shared::{
            bmff::{self, BoxType, XMP_UUID},
            strip_exif_header, tiff_structure,
        },
    },
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
};

/// The signature box every JP2 starts with.
const SIGNATURE: &[u8] = &[
    0x00, 0x00, 0x00, 0x0C, b'j', b'P', b' ', b' ', 0x0D, 0x0A, 0x87, 0x0A,
];

const EXIF_UUID: [u8; 16] = *b"JpgTiffExif->JP2";

/// `33c7a4d2-b81d-4723-a0ba-f1a3e097ad38`
const IPTC_UUID: [u8; 16] = [
    0x33, 0xc7, 0xa4, 0xd2, 0xb8, 0x1d, 0x47, 0x23, 0xa0, 0xba, 0xf1, 0xa3, 0xe0, 0x97, 0xad,
    0x38,
];

/// `colr` methods that carry a profile (restricted and any ICC).
const ICC_METHODS: [u8; 2] = [2, 3];

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum Jp2ConstructionError {
    /// The signature box was missing.
    NoSignature,

    /// There was no `jp2h` header box.
    NoHeaderBox,
}

impl core::fmt::Display for Jp2ConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoSignature => f.write_str("The JPEG 2000 signature box wasn't found."),
            Self::NoHeaderBox => f.write_str("The JPEG 2000 file has no `jp2h` box."),
        }
    }
}

impl core::error::Error for Jp2ConstructionError {}

/// A top-level box's place in the file.
#[derive(Clone, Debug, PartialEq)]
struct Placed {
    ty: BoxType,
    offset: usize,
    len: usize,
}

/// A JPEG 2000 file.
#[derive(Clone, Debug)]
pub struct Jp2 {
    boxes: Vec<Placed>,
    blobs: RawBlobs,
}

/// The ICC profile in `jp2h/colr`, if it has one.
fn colr_profile(jp2h: &bmff::BmffBox<'_>, warnings: &mut Vec<Warning>) -> Option<Vec<u8>> {
    let children = jp2h.children(warnings);
    let colr = bmff::find(&children, b"colr")?;
    let (&method, rest) = colr.payload.split_first()?;
    if !ICC_METHODS.contains(&method) {
        return None;
    }

    // precedence and approximation come before the profile
    rest.get(2..).map(<[u8]>::to_vec)
}

impl MetadataProvider for Jp2 {
    type ConstructionError = Jp2ConstructionError;

    const FORMAT: &'static str = "JPEG 2000";

    fn magic_number(input: &[u8]) -> bool {
        input.starts_with(SIGNATURE)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();
        if !file.starts_with(SIGNATURE) {
            return Err(Jp2ConstructionError::NoSignature);
        }

        let mut warnings = Vec::new();
        let found = bmff::boxes(file, 0, &mut warnings);
        let jp2h = bmff::find(&found, b"jp2h").ok_or(Jp2ConstructionError::NoHeaderBox)?;

        let mut blobs = RawBlobs {
            icc: colr_profile(jp2h, &mut warnings),
            ..Default::default()
        };
        for b in &found {
            let BoxType::Uuid(uuid) = b.header.box_type else {
                continue;
            };
            let slot = match uuid {
                EXIF_UUID => &mut blobs.exif,
                XMP_UUID => &mut blobs.xmp,
                IPTC_UUID => &mut blobs.iptc,
                _ => continue,
            };

            if slot.is_some() {
                warn(
                    &mut warnings,
                    format!("ignoring a duplicate `{}` box at `{}`", b.header.box_type, b.offset),
                );
                continue;
            }
            *slot = Some(if uuid == EXIF_UUID {
                strip_exif_header(b.payload).to_vec()
            } else {
                b.payload.to_vec()
            });
        }
        blobs.warnings = warnings;

        let boxes = found
            .iter()
            .map(|b| Placed {
                ty: b.header.box_type,
                offset: b.offset,
                len: b.len(),
            })
            .collect();

        Ok(Self { boxes, blobs })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        let mut warnings = Vec::new();

        let exif = match update.exif_change(&mut warnings)? {
            Change::Keep => Change::Keep,
            Change::Remove => Change::Remove,
            Change::Set((tiff, _)) => Change::Set(tiff),
        };
        let xmp = match update.xmp_change()? {
            Change::Keep => Change::Keep,
            Change::Remove => Change::Remove,
            Change::Set(packet) => Change::Set(packet.into_bytes()),
        };
        let iptc = update.iptc_change();

        if !update.icc_change().is_keep() {
            warn(&mut warnings, "ICC profiles in JPEG 2000 files can't be changed");
        }

        let changes = [(EXIF_UUID, exif), (IPTC_UUID, iptc), (XMP_UUID, xmp)];
        if changes.iter().all(|(_, c)| c.is_keep()) {
            log::debug!("JPEG 2000 file is unchanged");
            return Ok(WriteOutcome {
                bytes: input.to_vec(),
                strategy: WriteStrategy::NonIntrusive,
                warnings,
            });
        }

        let changed = |ty: &BoxType| {
            changes
                .iter()
                .any(|(uuid, c)| !c.is_keep() && *ty == BoxType::Uuid(*uuid))
        };

        let mut out = Vec::with_capacity(input.len());
        for b in &self.boxes {
            if !changed(&b.ty) {
                out.extend_from_slice(&input[b.offset..b.offset + b.len]);
            }

            // new boxes go right after the header
            if b.ty.is(b"jp2h") {
                for (uuid, change) in &changes {
                    if let Change::Set(payload) = change {
                        bmff::write_box(&mut out, BoxType::Uuid(*uuid), payload);
                    }
                }
            }
        }

        log::debug!(
            "rewrote JPEG 2000 file: `{}` -> `{}` bytes",
            input.len(),
            out.len()
        );
        Ok(WriteOutcome {
            bytes: out,
            strategy: WriteStrategy::Intrusive,
            warnings,
        })
    }

    fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut lines = vec![" address | box        |   length".to_string()];
        lines.extend(bmff::tree(input, 0, 0, &mut warnings));

        if recursive
            && let Some(b) = self.boxes.iter().find(|b| b.ty == BoxType::Uuid(EXIF_UUID))
        {
            // skip the 24-byte header to get to the TIFF
            let payload = &input[b.offset + 24..b.offset + b.len];
            lines.extend(tiff_structure(strip_exif_header(payload), 2));
        }
        lines
    }
}
