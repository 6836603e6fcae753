//! # Shared
//!
//! Stuff that's shared between multiple container formats.
//!
//! For example, HEIC, AVIF, JPEG XL, and CR3 all use BMFF boxes, and JP2
//! uses nearly the same box layout. Rewriting that underlying behavior for
//! each one does nothing except create bugs.

use winnow::error::{StrContext, StrContextValue};

use crate::exif::ifd::IfdReader;
use imgmeta_types::exif::tags;

pub mod bmff;

/// Creates a string description for `winnow` context.
pub const fn desc(s: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(s))
}

/// The prefix some containers put before a TIFF blob.
pub const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Finds where the TIFF header starts in an Exif blob.
///
/// Containers disagree on whether `Exif\0\0` comes first, so we accept both.
pub fn strip_exif_header(blob: &[u8]) -> &[u8] {
    blob.strip_prefix(EXIF_HEADER).unwrap_or(blob)
}

/// Shows a few bytes as printable text, like `Exif..II*.`.
pub fn preview(bytes: &[u8], max: usize) -> String {
    bytes
        .iter()
        .take(max)
        .map(|b| {
            if b.is_ascii_graphic() || *b == b' ' {
                *b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// Lists every IFD in a TIFF blob, one line per entry.
pub fn tiff_structure(blob: &[u8], indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);

    let order = match blob.get(..2) {
        Some(b"II") => imgmeta_types::exif::Endianness::Little,
        Some(b"MM") => imgmeta_types::exif::Endianness::Big,
        _ => return vec![format!("{pad}(not a TIFF blob)")],
    };
    let Some(first) = blob.get(4..8).and_then(|b| order.read_u32(b)) else {
        return vec![format!("{pad}(truncated TIFF header)")];
    };

    let mut reader = IfdReader::new(blob);
    reader.read_chain(first as usize, order);

    let mut lines = Vec::new();
    for node in &reader.nodes {
        lines.push(format!(
            "{pad}STRUCTURE OF IFD `{}` at `{}`",
            node.group, node.pos
        ));
        lines.push(format!(
            "{pad} address |    tag                              |      type |    count |     offset | value"
        ));
        for e in &node.entries {
            let type_name = imgmeta_types::exif::PrimitiveTy::try_from(e.type_id)
                .map(|t| t.name().to_string())
                .unwrap_or_else(|_| format!("type {}", e.type_id));
            let offset = if e.inline {
                String::new()
            } else {
                (e.data_pos - node.base).to_string()
            };

            lines.push(format!(
                "{pad}{:8} | 0x{:04x} {:<28} | {:>9} | {:>8} | {:>10} | {}",
                e.pos,
                e.tag,
                tags::tag_name(node.group, e.tag),
                type_name,
                e.count,
                offset,
                preview(&e.data, 24)
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exif_headers_are_optional() {
        assert_eq!(strip_exif_header(b"Exif\0\0II*\0"), b"II*\0");
        assert_eq!(strip_exif_header(b"MM\0*"), b"MM\0*");
    }

    #[test]
    fn previews_hide_binary() {
        assert_eq!(preview(b"Exif\0\0II*\0", 8), "Exif..II");
    }
}
