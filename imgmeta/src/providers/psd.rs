//! Photoshop documents (PSD, and big PSB ones).
//!
//! A PSD has four sections after its 26-byte header, and each one starts with
//! its length:
//!
//! 1. color mode data,
//! 2. image resources,
//! 3. layer and mask info,
//! 4. and image data (which runs to the end).
//!
//! All the metadata lives in the image resources, as resource blocks. We only
//! ever rewrite that section. Everything else is copied.

use winnow::{
    ModalResult, Parser as _,
    binary::{be_u16, be_u32},
    error::ContextError,
    token::{literal, take},
};

use crate::{
    MetadataProvider,
    error::{Error, Warning},
    iptc::irb,
    providers::{
        RawBlobs,
        shared::{desc, strip_exif_header, tiff_structure},
    },
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
};

const HEADER_LEN: usize = 26;

/// Resource `0x0425`, an MD5 of the IPTC. It's stale once IPTC changes.
const IPTC_DIGEST: u16 = 0x0425;

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum PsdConstructionError {
    /// The header was missing or had an unknown version.
    BadHeader,

    /// A section's length ran past the end of the file.
    Truncated {
        /// Which section was cut off.
        section: &'static str,
    },

    /// The image resources couldn't be read at all.
    BadResources,
}

impl core::fmt::Display for PsdConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadHeader => f.write_str("The PSD header was missing or malformed."),
            Self::Truncated { section } => {
                write!(f, "The PSD's {section} section runs past the end of the file.")
            }
            Self::BadResources => f.write_str("The PSD's image resources couldn't be read."),
        }
    }
}

impl core::error::Error for PsdConstructionError {}

/// A Photoshop document.
#[derive(Clone, Debug)]
pub struct Psd {
    /// Where the image resource section's length field is.
    resources_at: usize,

    /// How long the image resource section is, without its length field.
    resources_len: usize,

    resources: Vec<irb::Resource>,
    blobs: RawBlobs,
}

fn header(input: &mut &[u8]) -> ModalResult<u16, ContextError> {
    literal(b"8BPS").context(desc("PSD signature")).parse_next(input)?;
    let version = be_u16.context(desc("PSD version")).parse_next(input)?;
    take(HEADER_LEN - 6).void().parse_next(input)?;
    Ok(version)
}

/// A length-prefixed section. Returns its payload.
fn section<'i>(input: &mut &'i [u8]) -> ModalResult<&'i [u8], ContextError> {
    let len = be_u32.context(desc("section length")).parse_next(input)?;
    take(len).context(desc("section data")).parse_next(input)
}

impl MetadataProvider for Psd {
    type ConstructionError = PsdConstructionError;

    const FORMAT: &'static str = "PSD";

    fn magic_number(input: &[u8]) -> bool {
        input.starts_with(b"8BPS")
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();
        let mut input = file;

        let version = header(&mut input).map_err(|_| PsdConstructionError::BadHeader)?;
        if !matches!(version, 1 | 2) {
            log::error!("PSD version should be `1` or `2` (PSB), but was `{version}`");
            return Err(PsdConstructionError::BadHeader);
        }

        section(&mut input).map_err(|_| PsdConstructionError::Truncated {
            section: "color mode data",
        })?;

        let resources_at = file.len() - input.len();
        let block = section(&mut input).map_err(|_| PsdConstructionError::Truncated {
            section: "image resources",
        })?;

        let mut warnings: Vec<Warning> = Vec::new();
        let resources = irb::parse(block, &mut warnings).map_err(|e| {
            log::error!("couldn't read PSD image resources. err: {e}");
            PsdConstructionError::BadResources
        })?;

        let data = |id| irb::find(&resources, id).map(|r| r.data.clone());
        let blobs = RawBlobs {
            exif: data(irb::EXIF).map(|b| strip_exif_header(&b).to_vec()),
            iptc: data(irb::IPTC),
            xmp: data(irb::XMP),
            icc: data(irb::ICC),
            warnings,
            ..Default::default()
        };

        log::debug!("PSD has `{}` image resources", resources.len());
        Ok(Self {
            resources_at,
            resources_len: block.len(),
            resources,
            blobs,
        })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        let mut warnings = Vec::new();
        let mut resources = self.resources.clone();
        let mut changed = false;

        let mut apply = |id: u16, change: Change<Vec<u8>>| {
            if change.is_keep() {
                return;
            }
            changed = true;
            irb::set(&mut resources, id, change.resolve(None).cloned());
        };

        apply(
            irb::EXIF,
            match update.exif_change(&mut warnings)? {
                Change::Keep => Change::Keep,
                Change::Remove => Change::Remove,
                Change::Set((tiff, _)) => Change::Set(tiff),
            },
        );

        let iptc = update.iptc_change();
        if !iptc.is_keep() {
            apply(IPTC_DIGEST, Change::Remove);
        }
        apply(irb::IPTC, iptc);

        apply(
            irb::XMP,
            match update.xmp_change()? {
                Change::Keep => Change::Keep,
                Change::Remove => Change::Remove,
                Change::Set(packet) => Change::Set(packet.into_bytes()),
            },
        );
        apply(irb::ICC, update.icc_change());

        if !changed {
            log::debug!("PSD is unchanged");
            return Ok(WriteOutcome {
                bytes: input.to_vec(),
                strategy: WriteStrategy::NonIntrusive,
                warnings,
            });
        }

        let block = irb::serialize(&resources);
        let len = u32::try_from(block.len()).map_err(|_| Error::Provider {
            format: Self::FORMAT,
            message: "image resources are too large".into(),
        })?;

        let after = self.resources_at + 4 + self.resources_len;
        let mut out = Vec::with_capacity(input.len() + block.len());
        out.extend_from_slice(&input[..self.resources_at]);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend(block);
        out.extend_from_slice(&input[after..]);

        log::debug!("rewrote PSD: `{}` -> `{}` bytes", input.len(), out.len());
        Ok(WriteOutcome {
            bytes: out,
            strategy: WriteStrategy::Intrusive,
            warnings,
        })
    }

    fn structure(&self, _input: &[u8], recursive: bool) -> Vec<String> {
        let mut lines = vec!["  id    | name             |   length".to_string()];
        for r in &self.resources {
            lines.push(format!(
                "0x{:04x} | {:<16} | {:8}",
                r.id,
                String::from_utf8_lossy(&r.name),
                r.data.len()
            ));
            if recursive && r.id == irb::EXIF {
                lines.extend(tiff_structure(strip_exif_header(&r.data), 2));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{exif::ExifData, iptc::IptcData, util::logger, write::WriteOptions, xmp::XmpData};

    /// A tiny PSD with the given resources.
    fn psd(resources: &[irb::Resource]) -> Vec<u8> {
        let block = irb::serialize(resources);
        [
            b"8BPS".as_slice(),
            &1_u16.to_be_bytes(),              // version
            &[0; 6],                           // reserved
            &3_u16.to_be_bytes(),              // channels
            &1_u32.to_be_bytes(),              // height
            &1_u32.to_be_bytes(),              // width
            &8_u16.to_be_bytes(),              // depth
            &3_u16.to_be_bytes(),              // mode (rgb)
            &0_u32.to_be_bytes(),              // color mode data
            &(block.len() as u32).to_be_bytes(), // image resources
            &block,
            &0_u32.to_be_bytes(), // layers
            &[0, 0, 1, 2, 3],     // image data
        ]
        .concat()
    }

    #[test]
    fn reads_resources() {
        logger();
        let mut iptc = IptcData::new();
        iptc.set_str("Iptc.Application2.Keywords", "psd").unwrap();
        let file = psd(&[
            irb::Resource::new(0x03ED, vec![0; 16]),
            irb::Resource::new(irb::IPTC, iptc.to_bytes()),
            irb::Resource::new(irb::XMP, b"<x:xmpmeta/>".to_vec()),
        ]);

        let psd = Psd::new(&file).unwrap();
        assert_eq!(psd.blobs().iptc, Some(iptc.to_bytes()));
        assert_eq!(psd.blobs().xmp.as_deref(), Some(b"<x:xmpmeta/>".as_slice()));
        assert_eq!(psd.blobs().exif, None);
    }

    #[test]
    fn rejects_bad_versions() {
        let mut file = psd(&[]);
        file[5] = 7;
        assert_eq!(Psd::new(&file).unwrap_err(), PsdConstructionError::BadHeader);

        let file = psd(&[]);
        assert_eq!(
            Psd::new(&file[..30].to_vec()).unwrap_err(),
            PsdConstructionError::Truncated {
                section: "image resources"
            }
        );
    }

    #[test]
    fn writes_resources_and_copies_the_rest() {
        logger();
        let other = irb::Resource::new(0x03ED, vec![1; 16]);
        let file = psd(&[other.clone(), irb::Resource::new(IPTC_DIGEST, vec![0; 16])]);
        let psd = Psd::new(&file).unwrap();

        let mut exif = ExifData::new();
        exif.set_str("Exif.Image.Software", "imgmeta").unwrap();
        let mut iptc = IptcData::new();
        iptc.set_str("Iptc.Application2.Keywords", "psd").unwrap();
        let xmp = XmpData::new();

        let outcome = psd
            .write(
                &file,
                &MetadataUpdate {
                    exif: &exif,
                    iptc: &iptc,
                    xmp: &xmp,
                    icc: None,
                    comment: None,
                    options: WriteOptions::default(),
                    original: psd.blobs(),
                },
            )
            .unwrap();
        assert_eq!(outcome.strategy, WriteStrategy::Intrusive);

        let again = Psd::new(&outcome.bytes).unwrap();
        let ids: Vec<u16> = again.resources.iter().map(|r| r.id).collect();
        assert_eq!(ids, [0x03ED, irb::EXIF, irb::IPTC]);
        assert_eq!(again.resources[0], other);
        assert_eq!(again.blobs().iptc, Some(iptc.to_bytes()));

        // layers and image data are copied as-is
        assert!(outcome.bytes.ends_with(&[0, 0, 0, 0, 0, 0, 1, 2, 3]));
    }
}
