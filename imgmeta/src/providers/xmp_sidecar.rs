//! XMP sidecar files (`.xmp`), which are just a packet on their own.

use crate::{
    MetadataProvider,
    error::{Error, warn},
    providers::RawBlobs,
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
    xmp::XmpData,
};

const STARTS: [&[u8]; 3] = [b"<?xpacket", b"<x:xmpmeta", b"<rdf:RDF"];

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum XmpSidecarConstructionError {
    /// The file didn't start like an XMP packet.
    NotXmp,
}

impl core::fmt::Display for XmpSidecarConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("The file doesn't start with an XMP packet.")
    }
}

impl core::error::Error for XmpSidecarConstructionError {}

/// Skips a byte order mark, whitespace and an `<?xml ...?>` declaration.
fn content_start(input: &[u8]) -> &[u8] {
    let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
    let input = input.trim_ascii_start();

    if input.starts_with(b"<?xml ")
        && let Some(end) = input.windows(2).position(|w| w == b"?>")
    {
        return input[end + 2..].trim_ascii_start();
    }
    input
}

/// An XMP sidecar file.
#[derive(Clone, Debug)]
pub struct XmpSidecar {
    blobs: RawBlobs,
}

impl MetadataProvider for XmpSidecar {
    type ConstructionError = XmpSidecarConstructionError;

    const FORMAT: &'static str = "XMP";

    fn magic_number(input: &[u8]) -> bool {
        let start = content_start(input);
        STARTS.iter().any(|s| start.starts_with(s))
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();
        if !Self::magic_number(file) {
            return Err(XmpSidecarConstructionError::NotXmp);
        }

        Ok(Self {
            blobs: RawBlobs {
                xmp: Some(file.to_vec()),
                ..Default::default()
            },
        })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        let mut warnings = Vec::new();
        if !update.exif_change(&mut warnings)?.is_keep() || !update.iptc_change().is_keep() {
            warn(
                &mut warnings,
                "XMP sidecars can only hold XMP; other changes were dropped",
            );
        }

        let bytes = match update.xmp_change()? {
            Change::Keep => input.to_vec(),
            Change::Remove => XmpData::new().to_packet()?.into_bytes(),
            Change::Set(packet) => packet.into_bytes(),
        };

        Ok(WriteOutcome {
            bytes,
            strategy: WriteStrategy::Intrusive,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_packets() {
        assert!(XmpSidecar::magic_number(b"<?xpacket begin=\"\"?>"));
        assert!(XmpSidecar::magic_number(b"\xEF\xBB\xBF\n  <x:xmpmeta xmlns:x=\"adobe:ns:meta/\">"));
        assert!(XmpSidecar::magic_number(
            b"<?xml version=\"1.0\"?>\n<rdf:RDF xmlns:rdf=\"\">"
        ));
        assert!(!XmpSidecar::magic_number(b"<html>"));
        assert_eq!(
            XmpSidecar::new(&b"<svg/>".to_vec()).unwrap_err(),
            XmpSidecarConstructionError::NotXmp
        );
    }
}
