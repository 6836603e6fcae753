//! JPEG is an older image format designed with old-school compression in mind.
//!
//! Metadata lives in "marker segments" before the image data:
//!
//! - Exif in `APP1`, after `Exif\0\0`,
//! - XMP in `APP1` too, with ExtendedXMP spread over more `APP1`s,
//! - IPTC in `APP13`, wrapped in Photoshop resource blocks,
//! - ICC profiles in `APP2`, in numbered chunks,
//! - and comments in `COM`.
//!
//! Each segment holds at most 64 KiB, which is why some of these get split.

use crate::{
    MetadataProvider,
    error::Error,
    providers::{
        RawBlobs,
        shared::{preview, tiff_structure},
    },
    write::{MetadataUpdate, WriteOutcome},
};

mod error;
mod parse;
mod write;

pub use error::JpegConstructionError;

/// A JPEG file.
#[derive(Clone, Debug)]
pub struct Jpeg {
    layout: parse::Layout,
    blobs: RawBlobs,
}

impl MetadataProvider for Jpeg {
    type ConstructionError = JpegConstructionError;

    const FORMAT: &'static str = "JPEG";

    fn magic_number(input: &[u8]) -> bool {
        parse::magic_number(input)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let input = input.as_ref();
        let layout = parse::layout(input)?;
        let blobs = parse::extract(input, &layout);

        log::debug!(
            "JPEG has `{}` segments before its image data",
            layout.segments.len()
        );
        Ok(Self { layout, blobs })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        write::write(input, &self.layout, update)
    }

    fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
        let mut lines = vec![" address | marker       |  length | data".to_string()];

        for s in &self.layout.segments {
            let payload = s.payload(input);
            let length = if s.marker == parse::SOI { 0 } else { payload.len() + 2 };
            lines.push(format!(
                "{:8} | 0xff{:02x} {:<6} | {:7} | {}",
                s.offset,
                s.marker,
                parse::marker_name(s.marker),
                length,
                preview(payload, 32)
            ));

            if recursive && s.kind(input) == parse::SegmentKind::Exif {
                lines.extend(tiff_structure(&payload[parse::EXIF_SIG.len()..], 2));
            }
        }

        lines.push(format!(
            "{:8} | 0xff{:02x} {:<6} | {:>7} | (image data)",
            self.layout.scan,
            input.get(self.layout.scan + 1).copied().unwrap_or(parse::EOI),
            parse::marker_name(input.get(self.layout.scan + 1).copied().unwrap_or(parse::EOI)),
            ""
        ));
        lines
    }
}
