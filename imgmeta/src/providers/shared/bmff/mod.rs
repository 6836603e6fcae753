//! This module contains helpers for members of the ISO base media file
//! format (ISOBMFF), or just "BMFF."
//!
//! HEIC, AVIF, the JPEG XL container, and CR3 are all BMFF. JPEG 2000 uses
//! the same box layout, so it borrows the walker here too.
//!
//! A few rules hold for every box we read:
//!
//! - a box may end exactly at the end of its parent, but never past it,
//! - a size of `0` means "until the end",
//! - and a size of `1` means a 64-bit size follows the type.

use winnow::{
    ModalResult, Parser as _,
    binary::{be_u32, be_u64},
    error::ContextError,
    token::take,
};

use crate::{
    error::{Warning, warn},
    providers::shared::desc,
};

pub mod ftyp;
pub mod meta;

/// Boxes that hold nothing but other boxes.
const CONTAINERS: &[[u8; 4]] = &[
    *b"moov", *b"trak", *b"mdia", *b"minf", *b"stbl", *b"dinf", *b"iprp", *b"ipco", *b"jp2h",
    *b"res ", *b"edts", *b"udta",
];

/// Canon's CR3 metadata box: `85c0b687-820f-11e0-8111-f4ce462b6a48`.
pub const CANON_UUID: [u8; 16] = [
    0x85, 0xc0, 0xb6, 0x87, 0x82, 0x0f, 0x11, 0xe0, 0x81, 0x11, 0xf4, 0xce, 0x46, 0x2b, 0x6a,
    0x48,
];

/// The XMP `uuid` box, shared by CR3 and JP2: `be7acfcb-97a9-42e8-9c71-999491e3afac`.
pub const XMP_UUID: [u8; 16] = [
    0xbe, 0x7a, 0xcf, 0xcb, 0x97, 0xa9, 0x42, 0xe8, 0x9c, 0x71, 0x99, 0x94, 0x91, 0xe3, 0xaf,
    0xac,
];

/// A box's header says:
///
/// - what "type" it is (might be UUID)
/// - and how large it is
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoxHeader {
    /// How long the header is.
    pub header_len: u8,

    /// How large the box is. This includes the header's size.
    pub box_size: BoxSize,

    /// The box's type.
    pub box_type: BoxType,
}

impl BoxHeader {
    /// Finds payload's length (which is everything after the header).
    ///
    /// This is optional since with an EOF case, we don't know how much is
    /// left. We just know to take the rest of the slice.
    pub fn payload_len(&self) -> Option<u64> {
        match self.box_size {
            BoxSize::Small(n) => Some((n.saturating_sub(self.header_len as u32)) as u64),
            BoxSize::Large(n) => Some(n.saturating_sub(self.header_len as u64)),
            BoxSize::Eof => None,
        }
    }
}

/// A BMFF box's type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxType {
    /// Uses a short ID. No UUID.
    Id([u8; 4]),

    /// The short ID was b'uuid', so the box's actual type is defined by this
    /// UUID.
    Uuid([u8; 16]),
}

impl BoxType {
    pub fn is(&self, id: &[u8; 4]) -> bool {
        matches!(self, BoxType::Id(own) if own == id)
    }
}

impl core::fmt::Display for BoxType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoxType::Id(id) => f.write_str(&fourcc(id)),
            BoxType::Uuid(uuid) => {
                f.write_str("uuid ")?;
                for (i, b) in uuid.iter().enumerate() {
                    if matches!(i, 4 | 6 | 8 | 10) {
                        f.write_str("-")?;
                    }
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// The size of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxSize {
    /// The box is small. u32::MAX is its maximum length.
    Small(u32),

    /// We got a big box of 64-bit size!
    Large(u64),

    /// This is the last box in the file, so it continues until the very end of
    /// the file.
    Eof,
}

/// Shows a four-character code, with anything unprintable as `.`.
pub fn fourcc(id: &[u8; 4]) -> String {
    id.iter()
        .map(|b| if b.is_ascii_graphic() || *b == b' ' { *b as char } else { '.' })
        .collect()
}

/// Finds the next header in the input and parses it out.
///
/// This function assumes the byte slice starts at a header.
pub fn parse_header(input: &mut &[u8]) -> ModalResult<BoxHeader, ContextError> {
    // we track how much we took, since that's the header's length
    let start_len = input.len();

    let raw_size: u32 = be_u32.context(desc("box size")).parse_next(input)?;
    let raw_type: [u8; 4] = take(4_usize)
        .context(desc("box type"))
        .parse_next(input)?
        .try_into()
        .map_err(|_| winnow::error::ErrMode::Cut(ContextError::new()))?;

    let size: BoxSize = match raw_size {
        // special case: a largesize follows the type
        1_u32 => BoxSize::Large(be_u64.context(desc("box size (large)")).parse_next(input)?),

        // special case: when it's zero, read to EOF (this is the end!)
        0_u32 => BoxSize::Eof,

        _ => BoxSize::Small(raw_size),
    };

    let ty = if &raw_type == b"uuid" {
        let uuid: [u8; 16] = take(16_usize)
            .context(desc("box uuid"))
            .parse_next(input)?
            .try_into()
            .map_err(|_| winnow::error::ErrMode::Cut(ContextError::new()))?;
        BoxType::Uuid(uuid)
    } else {
        BoxType::Id(raw_type)
    };

    Ok(BoxHeader {
        header_len: (start_len.saturating_sub(input.len())) as u8,
        box_size: size,
        box_type: ty,
    })
}

/// One box, borrowed from the input it was found in.
#[derive(Clone, Debug)]
pub struct BmffBox<'i> {
    pub header: BoxHeader,

    /// Where the box starts, from the start of the file.
    pub offset: usize,

    /// Everything after the header.
    pub payload: &'i [u8],
}

impl<'i> BmffBox<'i> {
    /// Where the payload starts, from the start of the file.
    pub fn payload_offset(&self) -> usize {
        self.offset + self.header.header_len as usize
    }

    /// The whole box's length, header included.
    pub fn len(&self) -> usize {
        self.header.header_len as usize + self.payload.len()
    }

    /// Whether this box only holds other boxes.
    pub fn is_container(&self) -> bool {
        match self.header.box_type {
            BoxType::Id(id) => CONTAINERS.contains(&id) || &id == b"meta",
            BoxType::Uuid(uuid) => uuid == CANON_UUID,
        }
    }

    /// The bytes holding the child boxes, and where they start in the file.
    ///
    /// `meta` is a full box, so its four version/flags bytes are skipped.
    pub fn inner(&self) -> Option<(&'i [u8], usize)> {
        if self.header.box_type.is(b"meta") {
            return Some((self.payload.get(4..)?, self.payload_offset() + 4));
        }
        Some((self.payload, self.payload_offset()))
    }

    /// The child boxes, for container boxes.
    pub fn children(&self, warnings: &mut Vec<Warning>) -> Vec<BmffBox<'i>> {
        match self.inner() {
            Some((inner, base)) => boxes(inner, base, warnings),
            None => {
                warn(warnings, "`meta` box is too short for its version and flags");
                Vec::new()
            }
        }
    }
}

/// Walks the sibling boxes in `input`.
///
/// `base` is where `input` starts in the file, so box offsets come out
/// absolute. Walking stops at the first box that can't be read.
pub fn boxes<'i>(input: &'i [u8], base: usize, warnings: &mut Vec<Warning>) -> Vec<BmffBox<'i>> {
    let mut found = Vec::new();
    let mut rest: &[u8] = input;

    while !rest.is_empty() {
        let offset = base + (input.len() - rest.len());

        let header = match parse_header(&mut rest) {
            Ok(h) => h,
            Err(e) => {
                warn(warnings, format!("unreadable box header at `{offset}`. err: {e}"));
                break;
            }
        };

        let len = match header.payload_len() {
            Some(len) => len,
            None => rest.len() as u64,
        };

        // boxes can't claim less than their own header
        if let BoxSize::Small(n) = header.box_size
            && (n as u64) < header.header_len as u64
        {
            warn(warnings, format!("box at `{offset}` has an invalid size `{n}`"));
            break;
        }

        // but they can end right at the end
        if len > rest.len() as u64 {
            warn(
                warnings,
                format!(
                    "box `{}` at `{offset}` wants `{len}` bytes, but only `{}` are left",
                    header.box_type,
                    rest.len()
                ),
            );
            break;
        }

        let (payload, after) = rest.split_at(len as usize);
        log::trace!("found box `{}` at `{offset}` ({len} bytes)", header.box_type);
        found.push(BmffBox {
            header,
            offset,
            payload,
        });
        rest = after;
    }

    found
}

/// Finds the first box of a type among some siblings.
pub fn find<'b, 'i>(boxes: &'b [BmffBox<'i>], id: &[u8; 4]) -> Option<&'b BmffBox<'i>> {
    boxes.iter().find(|b| b.header.box_type.is(id))
}

/// Writes a box with a 32-bit size (or a 64-bit one, if it must).
pub fn write_box(out: &mut Vec<u8>, ty: BoxType, payload: &[u8]) {
    let type_len = match ty {
        BoxType::Id(_) => 4,
        BoxType::Uuid(_) => 20,
    };
    let small = 4 + type_len + payload.len();

    let large = u32::try_from(small).is_err();
    if large {
        out.extend_from_slice(&1_u32.to_be_bytes());
    } else {
        out.extend_from_slice(&(small as u32).to_be_bytes());
    }

    match ty {
        BoxType::Id(id) => out.extend_from_slice(&id),
        BoxType::Uuid(uuid) => {
            out.extend_from_slice(b"uuid");
            out.extend_from_slice(&uuid);
        }
    }

    if large {
        out.extend_from_slice(&(small as u64 + 8).to_be_bytes());
    }
    out.extend_from_slice(payload);
}

/// Prints a box tree, one line per box.
pub fn tree(input: &[u8], base: usize, depth: usize, warnings: &mut Vec<Warning>) -> Vec<String> {
    let mut lines = Vec::new();
    for b in boxes(input, base, warnings) {
        lines.push(format!(
            "{:indent$}{:>8} | {:<10} | {:>8}",
            "",
            b.offset,
            b.header.box_type.to_string(),
            b.len(),
            indent = depth * 2
        ));
        if b.is_container()
            && depth < 16
            && let Some((inner, inner_base)) = b.inner()
        {
            lines.extend(tree(inner, inner_base, depth + 1, warnings));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    fn boxed(ty: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_box(&mut out, BoxType::Id(*ty), payload);
        out
    }

    #[test]
    fn walks_siblings() {
        logger();
        let mut file = boxed(b"ftyp", b"heic\0\0\0\0mif1");
        file.extend(boxed(b"free", &[0; 3]));

        let mut warnings = Vec::new();
        let found = boxes(&file, 0, &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].header.box_type, BoxType::Id(*b"ftyp"));
        assert_eq!(found[0].payload, b"heic\0\0\0\0mif1");
        assert_eq!(found[1].offset, 20);
        assert_eq!(found[1].len(), 11);
    }

    #[test]
    fn size_zero_runs_to_the_end() {
        logger();
        let file = [
            0_u32.to_be_bytes().as_slice(), // size: to EOF
            b"mdat",                        // type
            &[1, 2, 3, 4, 5],               // payload
        ]
        .concat();

        let found = boxes(&file, 0, &mut Vec::new());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].header.box_size, BoxSize::Eof);
        assert_eq!(found[0].payload, &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn large_sizes_are_read() {
        logger();
        let file = [
            1_u32.to_be_bytes().as_slice(), // size: see largesize
            b"mdat",                        // type
            &18_u64.to_be_bytes(),          // largesize, header included
            &[9, 9],                        // payload
        ]
        .concat();

        let found = boxes(&file, 0, &mut Vec::new());
        assert_eq!(found[0].header.header_len, 16);
        assert_eq!(found[0].payload, &[9, 9]);
    }

    #[test]
    fn boxes_past_the_end_stop_the_walk() {
        logger();
        let mut file = boxed(b"free", &[]);
        file.extend(
            [
                100_u32.to_be_bytes().as_slice(), // size: way past the end
                b"mdat",                          // type
            ]
            .concat(),
        );

        let mut warnings = Vec::new();
        let found = boxes(&file, 0, &mut warnings);
        assert_eq!(found.len(), 1);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn uuid_boxes() {
        let mut out = Vec::new();
        write_box(&mut out, BoxType::Uuid(XMP_UUID), b"<x/>");
        let found = boxes(&out, 0, &mut Vec::new());
        assert_eq!(found[0].header.box_type, BoxType::Uuid(XMP_UUID));
        assert_eq!(found[0].payload, b"<x/>");
        assert!(
            found[0]
                .header
                .box_type
                .to_string()
                .starts_with("uuid be7acfcb-97a9-42e8")
        );
    }
}
