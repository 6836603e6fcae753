//! Finds, decodes, and re-encodes vendor MakerNotes.
//!
//! A MakerNote is a blob in `Exif.Photo.MakerNote` that most vendors fill
//! with an IFD of their own. Each vendor puts it somewhere slightly
//! different, though! Some prefix a signature, some carry their own TIFF
//! header, and some count offsets from the MakerNote's start instead of the
//! parent TIFF header. The [`ROWS`] table describes each layout.
//!
//! A few entries inside those IFDs are binary arrays (like Canon's camera
//! settings), which we split into one datum per element. Nikon and Sony
//! encrypt some of theirs.

use std::sync::LazyLock;

use imgmeta_types::exif::{
    Endianness, PrimitiveCount, PrimitiveTy, Value,
    ifd::IfdId,
    tags::{self, TagInfo},
};

use crate::{
    error::{Warning, warn},
    exif::{
        ifd::{IfdNode, IfdReader, RawEntry},
        value::WireValue as _,
    },
};

/// Where the MakerNote's IFD starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IfdAt {
    /// At a fixed offset from the MakerNote's start.
    Offset(usize),

    /// After a full TIFF header at this offset.
    TiffHeader(usize),

    /// At the little-endian `u32` stored at this offset.
    Pointer(usize),
}

/// How the MakerNote's byte order is found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OrderRule {
    /// Same as the parent TIFF.
    Parent,

    /// An `II`/`MM` marker at this offset, or the parent's if it's missing.
    Marker(usize),

    Fixed(Endianness),
}

/// What offsets inside the MakerNote are relative to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BaseRule {
    /// The parent TIFF header.
    Parent,

    /// The MakerNote's first byte.
    Start,

    /// A position inside the MakerNote's header.
    Header(usize),
}

/// One known MakerNote layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MakerNoteRow {
    pub group: IfdId,

    /// Prefix to match. When empty, `makes` decides.
    pub signature: &'static [u8],

    /// `Exif.Image.Make` prefixes for rows without a signature.
    pub makes: &'static [&'static str],

    pub ifd_at: IfdAt,
    pub order: OrderRule,
    pub base: BaseRule,

    /// Whether the IFD ends with a next pointer.
    pub next_pointer: bool,
}

const fn row(
    group: IfdId,
    signature: &'static [u8],
    makes: &'static [&'static str],
    ifd_at: IfdAt,
    order: OrderRule,
    base: BaseRule,
) -> MakerNoteRow {
    MakerNoteRow {
        group,
        signature,
        makes,
        ifd_at,
        order,
        base,
        next_pointer: true,
    }
}

/// Every layout we can decode.
///
/// Signature rows are tried first, in order. Then rows keyed by make.
pub(crate) static ROWS: &[MakerNoteRow] = &[
    row(
        IfdId::Nikon3,
        b"Nikon\0\x02",
        &[],
        IfdAt::TiffHeader(10),
        OrderRule::Marker(10),
        BaseRule::Header(10),
    ),
    row(
        IfdId::Nikon2,
        b"Nikon\0\x01",
        &[],
        IfdAt::Offset(8),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Olympus2,
        b"OLYMPUS\0",
        &[],
        IfdAt::Offset(12),
        OrderRule::Marker(8),
        BaseRule::Start,
    ),
    row(
        IfdId::Olympus2,
        b"OM SYSTEM\0",
        &[],
        IfdAt::Offset(16),
        OrderRule::Marker(12),
        BaseRule::Start,
    ),
    row(
        IfdId::Olympus,
        b"OLYMP\0",
        &[],
        IfdAt::Offset(8),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Pentax,
        b"AOC\0",
        &[],
        IfdAt::Offset(6),
        OrderRule::Marker(4),
        BaseRule::Parent,
    ),
    row(
        IfdId::PentaxDng,
        b"PENTAX \0",
        &[],
        IfdAt::Offset(10),
        OrderRule::Marker(8),
        BaseRule::Start,
    ),
    row(
        IfdId::Sony1,
        b"SONY DSC \0\0\0",
        &[],
        IfdAt::Offset(12),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Sony1,
        b"SONY CAM \0\0\0",
        &[],
        IfdAt::Offset(12),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Sony1,
        b"SONY MOBILE\0",
        &[],
        IfdAt::Offset(12),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Fujifilm,
        b"FUJIFILM",
        &[],
        IfdAt::Pointer(8),
        OrderRule::Fixed(Endianness::Little),
        BaseRule::Start,
    ),
    MakerNoteRow {
        group: IfdId::Panasonic,
        signature: b"Panasonic\0\0\0",
        makes: &[],
        ifd_at: IfdAt::Offset(12),
        order: OrderRule::Parent,
        base: BaseRule::Parent,
        next_pointer: false,
    },
    // no signature from here on
    row(
        IfdId::Nikon1,
        b"",
        &["NIKON"],
        IfdAt::Offset(0),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Canon,
        b"",
        &["Canon"],
        IfdAt::Offset(0),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Pentax,
        b"",
        &["PENTAX", "ASAHI"],
        IfdAt::Offset(0),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Sony2,
        b"",
        &["SONY"],
        IfdAt::Offset(0),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
    row(
        IfdId::Samsung2,
        b"",
        &["SAMSUNG"],
        IfdAt::Offset(0),
        OrderRule::Parent,
        BaseRule::Parent,
    ),
];

/// Picks the row describing a MakerNote, if any.
pub(crate) fn find_row(makernote: &[u8], make: &str) -> Option<&'static MakerNoteRow> {
    let make = make.trim();

    ROWS.iter()
        .filter(|r| !r.signature.is_empty())
        .find(|r| makernote.starts_with(r.signature))
        .or_else(|| {
            ROWS.iter()
                .filter(|r| r.signature.is_empty())
                .find(|r| r.makes.iter().any(|m| make.starts_with(m)))
        })
}

/// The rows whose MakerNote can be made from scratch.
///
/// Only Canon's is just an IFD with no header, so it's the only one we're
/// willing to invent.
pub(crate) fn row_for_new(group: IfdId) -> Option<&'static MakerNoteRow> {
    match group {
        IfdId::Canon => ROWS.iter().find(|r| r.group == IfdId::Canon),
        _ => None,
    }
}

/// Everything needed to put a decoded MakerNote back together.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MakerNoteLayout {
    pub row: &'static MakerNoteRow,

    /// The bytes before the IFD, kept as they were.
    pub header: Vec<u8>,

    pub order: Endianness,

    /// Absolute position of the MakerNote's first byte.
    pub pos: usize,

    /// The MakerNote's size on disk.
    pub size: usize,

    /// The MakerNote IFD's index in the reader's arena.
    pub node: usize,
}

impl MakerNoteLayout {
    pub fn group(&self) -> IfdId {
        self.row.group
    }

    /// A fresh layout for a MakerNote that never existed on disk.
    pub fn new_for(row: &'static MakerNoteRow, order: Endianness) -> Self {
        Self {
            row,
            header: Vec::new(),
            order,
            pos: 0,
            size: 0,
            node: usize::MAX,
        }
    }

    /// What to add to a MakerNote-local offset (counted from the MakerNote's
    /// first byte) so it's right for this layout's base, once the MakerNote
    /// lands at `new_pos` in the parent TIFF.
    pub fn offset_shift(&self, new_pos: usize) -> i64 {
        match self.row.base {
            BaseRule::Parent => new_pos as i64,
            BaseRule::Start => 0,
            BaseRule::Header(h) => -(h as i64),
        }
    }
}

/// Tries to decode the MakerNote in `entry`.
///
/// On success, the MakerNote's IFD is in the reader's arena. Otherwise, the
/// MakerNote should stay a raw datum.
pub(crate) fn decode(
    reader: &mut IfdReader<'_>,
    entry: &RawEntry,
    parent_order: Endianness,
    make: &str,
) -> Option<MakerNoteLayout> {
    let mn = entry.data.as_slice();

    let Some(row) = find_row(mn, make) else {
        log::debug!("no MakerNote layout matches make `{make}`; keeping it raw");
        return None;
    };
    log::trace!("MakerNote looks like `{}`", row.group);

    let marker = |at: usize| match mn.get(at..at + 2) {
        Some(b"II") => Some(Endianness::Little),
        Some(b"MM") => Some(Endianness::Big),
        _ => None,
    };

    let order = match row.order {
        OrderRule::Parent => parent_order,
        OrderRule::Marker(at) => marker(at).unwrap_or(parent_order),
        OrderRule::Fixed(o) => o,
    };

    let base = match row.base {
        BaseRule::Parent => 0,
        BaseRule::Start => entry.data_pos,
        BaseRule::Header(h) => entry.data_pos + h,
    };

    let ifd_rel = match row.ifd_at {
        IfdAt::Offset(o) => o,
        IfdAt::TiffHeader(h) => {
            if marker(h).is_none() {
                log::warn!("`{}` MakerNote has no byte order marker", row.group);
                return None;
            }
            h + order.read_u32(mn.get(h + 4..)?)? as usize
        }
        IfdAt::Pointer(at) => Endianness::Little.read_u32(mn.get(at..)?)? as usize,
    };

    if ifd_rel >= mn.len() {
        log::warn!(
            "`{}` MakerNote's IFD would start past its end (`{ifd_rel}` >= `{}`)",
            row.group,
            mn.len()
        );
        return None;
    }

    let node = reader.read_ifd(
        entry.data_pos + ifd_rel,
        row.group,
        order,
        base,
        2,
        row.next_pointer,
    )?;

    Some(MakerNoteLayout {
        row,
        header: mn[..ifd_rel].to_vec(),
        order,
        pos: entry.data_pos,
        size: mn.len(),
        node,
    })
}

/*
 *
 *
 *  binary arrays
 *
 *
 */

/// The encryption on a binary array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cipher {
    None,
    Nikon { serial: u32, count: u32 },
    Sony,
}

impl Cipher {
    pub fn decrypt(&self, bytes: &mut [u8]) {
        match self {
            Cipher::None => (),
            Cipher::Nikon { serial, count } => nikon_crypt(bytes, *serial, *count),
            Cipher::Sony => bytes.iter_mut().for_each(|b| *b = SONY_DECIPHER[*b as usize]),
        }
    }

    pub fn encrypt(&self, bytes: &mut [u8]) {
        match self {
            // xor stream, so it's its own inverse
            Cipher::Nikon { serial, count } => nikon_crypt(bytes, *serial, *count),
            Cipher::Sony => bytes.iter_mut().for_each(|b| *b = sony_encipher(*b)),
            Cipher::None => (),
        }
    }
}

/// How elements are laid out in an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArrayKind {
    /// Every element has this type, and the tag is the element's index.
    Uniform(PrimitiveTy),

    /// Elements come from the group's tag table, and each tag is a byte
    /// offset.
    Table,
}

/// One element of a decoded array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Element {
    pub tag: u16,
    pub offset: usize,
    pub type_id: u16,
    pub count: u32,
}

impl Element {
    pub fn size(&self) -> usize {
        PrimitiveTy::try_from(self.type_id)
            .map(|t| t.size_bytes() as usize)
            .unwrap_or(1)
            * self.count as usize
    }
}

/// A MakerNote entry that we split into elements.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ArrayLayout {
    /// The array's own group, like `CanonCs`.
    pub group: IfdId,

    /// The MakerNote group holding the entry.
    pub parent: IfdId,

    /// The entry's tag in the MakerNote IFD.
    pub tag: u16,

    pub type_id: u16,
    pub order: Endianness,

    /// Absolute position of the entry's data.
    pub data_pos: usize,

    /// The decrypted bytes.
    pub plain: Vec<u8>,

    pub kind: ArrayKind,
    pub cipher: Cipher,
    pub elements: Vec<Element>,
}

impl ArrayLayout {
    /// Each element's tag and value.
    pub fn values(&self) -> impl Iterator<Item = (usize, u16, Value)> + '_ {
        self.elements.iter().enumerate().map(|(i, el)| {
            let bytes = &self.plain[el.offset..el.offset + el.size()];
            (i, el.tag, Value::parse(bytes, el.type_id, el.count, self.order))
        })
    }

    /// Builds the entry's bytes from (possibly edited) element values.
    ///
    /// Values that don't match their element's size are dropped with a
    /// warning. For uniform arrays, new indices grow the array.
    pub fn recompose<'v>(
        &self,
        values: impl Iterator<Item = (u16, &'v Value)>,
        cipher: Cipher,
        warnings: &mut Vec<Warning>,
    ) -> Vec<u8> {
        let mut out = self.plain.clone();

        for (tag, value) in values {
            let bytes = value.serialize(self.order);

            let (offset, size) = match (self.kind, self.elements.iter().find(|e| e.tag == tag)) {
                (_, Some(el)) => (el.offset, el.size()),
                (ArrayKind::Uniform(ty), None) => {
                    let size = ty.size_bytes() as usize;
                    (tag as usize * size, size)
                }
                (ArrayKind::Table, None) => {
                    warn(
                        warnings,
                        format!(
                            "`Exif.{}.{}` isn't part of the array; dropping it",
                            self.group,
                            tags::tag_name(self.group, tag)
                        ),
                    );
                    continue;
                }
            };

            if bytes.len() != size {
                warn(
                    warnings,
                    format!(
                        "`Exif.{}.{}` must be `{size}` bytes, but it's `{}`; dropping it",
                        self.group,
                        tags::tag_name(self.group, tag),
                        bytes.len()
                    ),
                );
                continue;
            }

            if out.len() < offset + size {
                out.resize(offset + size, 0);
            }
            out[offset..offset + size].copy_from_slice(&bytes);
        }

        cipher.encrypt(&mut out);
        out
    }
}

/// The group and layout for a MakerNote entry that's really an array.
fn select_array(
    parent: IfdId,
    tag: u16,
    data: &[u8],
    model: &str,
) -> Option<(IfdId, ArrayKind, bool)> {
    let uniform = |group: IfdId| {
        let ty = tags::TABLES
            .iter()
            .find(|(g, _)| *g == group)
            .and_then(|(_, table)| table.first())
            .map(|t| t.ty)
            .unwrap_or(PrimitiveTy::Short);
        Some((group, ArrayKind::Uniform(ty), false))
    };

    match (parent.table(), tag) {
        (IfdId::Canon, 0x0001) => uniform(IfdId::CanonCs),
        (IfdId::Canon, 0x0004) => uniform(IfdId::CanonSi),
        (IfdId::Canon, 0x000F) => uniform(IfdId::CanonCf),

        (IfdId::Nikon3, 0x0098) => {
            let group = match data.get(..4)? {
                b"0100" => IfdId::NikonLd1,
                b"0101" => IfdId::NikonLd2,
                b"0201" | b"0202" | b"0203" => IfdId::NikonLd3,
                b"0204" => IfdId::NikonLd4,
                other => {
                    log::debug!("unknown Nikon lens data version `{other:?}`");
                    return None;
                }
            };
            Some((group, ArrayKind::Table, data.starts_with(b"02")))
        }

        (IfdId::Sony1, 0x9402) if data.len() >= 0x2E && !model.starts_with("DSC-") => {
            Some((IfdId::Sony2Fp, ArrayKind::Table, true))
        }
        (IfdId::Sony1, 0x2010)
            if data.len() >= 0x21B
                && ["ILCE-", "ILCA-", "NEX-", "SLT-", "DSC-RX"]
                    .iter()
                    .any(|m| model.starts_with(m)) =>
        {
            Some((IfdId::Sony2010e, ArrayKind::Table, true))
        }
        (IfdId::Sony1, 0x9400) if data.len() >= 0x2B => {
            Some((IfdId::SonyMisc3c, ArrayKind::Table, true))
        }

        _ => None,
    }
}

/// The Nikon decryption key, from the serial number and shutter count.
pub(crate) fn nikon_key(serial: Option<&str>, shutter_count: Option<u32>, model: &str) -> Cipher {
    let serial = serial
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(if model.contains("D50") { 0x22 } else { 0x60 });

    Cipher::Nikon {
        serial,
        count: shutter_count.unwrap_or(0),
    }
}

/// Finds the serial number and shutter count in a Nikon3 IFD.
fn nikon_key_from_node(node: &IfdNode, model: &str) -> Cipher {
    let serial = node
        .entry(0x001D)
        .map(|e| Value::parse(&e.data, e.type_id, e.count, node.order))
        .and_then(|v| match v {
            Value::Ascii(s) => Some(s),
            _ => None,
        });

    let count = node
        .entry(0x00A7)
        .and_then(|e| node.order.read_u32(&e.data));

    nikon_key(serial.as_deref(), count, model)
}

/// Splits the arrays found in a MakerNote's IFD.
pub(crate) fn decode_arrays(node: &IfdNode, model: &str) -> Vec<ArrayLayout> {
    let mut out = Vec::new();

    for entry in &node.entries {
        let Some((group, kind, encrypted)) = select_array(node.group, entry.tag, &entry.data, model)
        else {
            continue;
        };

        let cipher = match (encrypted, node.group.table()) {
            (false, _) => Cipher::None,
            (true, IfdId::Nikon3) => nikon_key_from_node(node, model),
            (true, _) => Cipher::Sony,
        };

        let mut plain = entry.data.clone();
        cipher.decrypt(&mut plain);

        let elements = match kind {
            ArrayKind::Uniform(ty) => {
                let size = ty.size_bytes() as usize;
                (0..plain.len() / size)
                    .map(|i| Element {
                        tag: i as u16,
                        offset: i * size,
                        type_id: ty.wire_id(),
                        count: 1,
                    })
                    .collect()
            }
            ArrayKind::Table => table_elements(group, plain.len()),
        };

        log::trace!(
            "split `{}` entry `{:#06x}` into `{}` elements of `{group}`",
            node.group,
            entry.tag,
            elements.len()
        );
        out.push(ArrayLayout {
            group,
            parent: node.group,
            tag: entry.tag,
            type_id: entry.type_id,
            order: node.order,
            data_pos: entry.data_pos,
            plain,
            kind,
            cipher,
            elements,
        });
    }

    out
}

/// Elements from a byte-offset tag table that fit in `len` bytes.
fn table_elements(group: IfdId, len: usize) -> Vec<Element> {
    let Some((_, table)) = tags::TABLES.iter().find(|(g, _)| *g == group) else {
        return Vec::new();
    };

    let mut infos: Vec<&TagInfo> = table.iter().collect();
    infos.sort_by_key(|t| t.id);

    infos
        .into_iter()
        .filter_map(|t| {
            let count = match t.count {
                PrimitiveCount::Known(n) => n,
                PrimitiveCount::Any => return None,
            };
            let el = Element {
                tag: t.id,
                offset: t.id as usize,
                type_id: t.ty.wire_id(),
                count,
            };
            (el.offset + el.size() <= len).then_some(el)
        })
        .collect()
}

/*
 *
 *
 *  ciphers
 *
 *
 */

#[rustfmt::skip]
static NIKON_XLAT: [[u8; 256]; 2] = [
    [
        0xc1,0xbf,0x6d,0x0d,0x59,0xc5,0x13,0x9d,0x83,0x61,0x6b,0x4f,0xc7,0x7f,0x3d,0x3d,
        0x53,0x59,0xe3,0xc7,0xe9,0x2f,0x95,0xa7,0x95,0x1f,0xdf,0x7f,0x2b,0x29,0xc7,0x0d,
        0xdf,0x07,0xef,0x71,0x89,0x3d,0x13,0x3d,0x3b,0x13,0xfb,0x0d,0x89,0xc1,0x65,0x1f,
        0xb3,0x0d,0x6b,0x29,0xe3,0xfb,0xef,0xa3,0x6b,0x47,0x7f,0x95,0x35,0xa7,0x47,0x4f,
        0xc7,0xf1,0x59,0x95,0x35,0x11,0x29,0x61,0xf1,0x3d,0xb3,0x2b,0x0d,0x43,0x89,0xc1,
        0x9d,0x9d,0x89,0x65,0xf1,0xe9,0xdf,0xbf,0x3d,0x7f,0x53,0x97,0xe5,0xe9,0x95,0x17,
        0x1d,0x3d,0x8b,0xfb,0xc7,0xe3,0x67,0xa7,0x07,0xf1,0x71,0xa7,0x53,0xb5,0x29,0x89,
        0xe5,0x2b,0xa7,0x17,0x29,0xe9,0x4f,0xc5,0x65,0x6d,0x6b,0xef,0x0d,0x89,0x49,0x2f,
        0xb3,0x43,0x53,0x65,0x1d,0x49,0xa3,0x13,0x89,0x59,0xef,0x6b,0xef,0x65,0x1d,0x0b,
        0x59,0x13,0xe3,0x4f,0x9d,0xb3,0x29,0x43,0x2b,0x07,0x1d,0x95,0x59,0x59,0x47,0xfb,
        0xe5,0xe9,0x61,0x47,0x2f,0x35,0x7f,0x17,0x7f,0xef,0x7f,0x95,0x95,0x71,0xd3,0xa3,
        0x0b,0x71,0xa3,0xad,0x0b,0x3b,0xb5,0xfb,0xa3,0xbf,0x4f,0x83,0x1d,0xad,0xe9,0x2f,
        0x71,0x65,0xa3,0xe5,0x07,0x35,0x3d,0x0d,0xb5,0xe9,0xe5,0x47,0x3b,0x9d,0xef,0x35,
        0xa3,0xbf,0xb3,0xdf,0x53,0xd3,0x97,0x53,0x49,0x71,0x07,0x35,0x61,0x71,0x2f,0x43,
        0x2f,0x11,0xdf,0x17,0x97,0xfb,0x95,0x3b,0x7f,0x6b,0xd3,0x25,0xbf,0xad,0xc7,0xc5,
        0xc5,0xb5,0x8b,0xef,0x2f,0xd3,0x07,0x6b,0x25,0x49,0x95,0x25,0x49,0x6d,0x71,0xc7,
    ],
    [
        0xa7,0xbc,0xc9,0xad,0x91,0xdf,0x85,0xe5,0xd4,0x78,0xd5,0x17,0x46,0x7c,0x29,0x4c,
        0x4d,0x03,0xe9,0x25,0x68,0x11,0x86,0xb3,0xbd,0xf7,0x6f,0x61,0x22,0xa2,0x26,0x34,
        0x2a,0xbe,0x1e,0x46,0x14,0x68,0x9d,0x44,0x18,0xc2,0x40,0xf4,0x7e,0x5f,0x1b,0xad,
        0x0b,0x94,0xb6,0x67,0xb4,0x0b,0xe1,0xea,0x95,0x9c,0x66,0xdc,0xe7,0x5d,0x6c,0x05,
        0xda,0xd5,0xdf,0x7a,0xef,0xf6,0xdb,0x1f,0x82,0x4c,0xc0,0x68,0x47,0xa1,0xbd,0xee,
        0x39,0x50,0x56,0x4a,0xdd,0xdf,0xa5,0xf8,0xc6,0xda,0xca,0x90,0xca,0x01,0x42,0x9d,
        0x8b,0x0c,0x73,0x43,0x75,0x05,0x94,0xde,0x24,0xb3,0x80,0x34,0xe5,0x2c,0xdc,0x9b,
        0x3f,0xca,0x33,0x45,0xd0,0xdb,0x5f,0xf5,0x52,0xc3,0x21,0xda,0xe2,0x22,0x72,0x6b,
        0x3e,0xd0,0x5b,0xa8,0x87,0x8c,0x06,0x5d,0x0f,0xdd,0x09,0x19,0x93,0xd0,0xb9,0xfc,
        0x8b,0x0f,0x84,0x60,0x33,0x1c,0x9b,0x45,0xf1,0xf0,0xa3,0x94,0x3a,0x12,0x77,0x33,
        0x4d,0x44,0x78,0x28,0x3c,0x9e,0xfd,0x65,0x57,0x16,0x94,0x6b,0xfb,0x59,0xd0,0xc8,
        0x22,0x36,0xdb,0xd2,0x63,0x98,0x43,0xa1,0x04,0x87,0x86,0xf7,0xa6,0x26,0xbb,0xd6,
        0x59,0x4d,0xbf,0x6a,0x2e,0xaa,0x2b,0xef,0xe6,0x78,0xb6,0x4e,0xe0,0x2f,0xdc,0x7c,
        0xbe,0x57,0x19,0x32,0x7e,0x2a,0xd0,0xb8,0xba,0x29,0x00,0x3c,0x52,0x7d,0xa8,0x49,
        0x3b,0x2d,0xeb,0x25,0x49,0xfa,0xa3,0xaa,0x39,0xa7,0xc5,0xa7,0x50,0x11,0x36,0xfb,
        0xc6,0x67,0x4a,0xf5,0xa5,0x12,0x65,0x7e,0xb0,0xdf,0xaf,0x4e,0xb3,0x61,0x7f,0x2f,
    ],
];

/// Nikon's stream cipher. Bytes 0..4 (the version) are left alone.
fn nikon_crypt(bytes: &mut [u8], serial: u32, count: u32) {
    let key = count.to_le_bytes().iter().fold(0_u8, |acc, b| acc ^ b);

    let ci = NIKON_XLAT[0][(serial & 0xff) as usize];
    let mut cj = NIKON_XLAT[1][key as usize];
    let mut ck: u8 = 0x60;

    for b in bytes.iter_mut().skip(4) {
        cj = cj.wrapping_add(ci.wrapping_mul(ck));
        ck = ck.wrapping_add(1);
        *b ^= cj;
    }
}

/// Sony's substitution: `b³ mod 249`, leaving `249..=255` alone.
const fn sony_encipher(b: u8) -> u8 {
    if b >= 249 {
        return b;
    }
    let b = b as u32;
    ((b * b * b) % 249) as u8
}

static SONY_DECIPHER: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut table = [0_u8; 256];
    for b in 0..=255_u8 {
        table[sony_encipher(b) as usize] = b;
    }
    table
});

#[cfg(test)]
mod tests {
    use imgmeta_types::exif::{Endianness, Value, ifd::IfdId};

    use super::*;
    use crate::util::logger;

    #[test]
    fn rows_are_picked_by_signature_then_make() {
        logger();

        let nikon = find_row(b"Nikon\0\x02\x10\0\0MM\0*\0\0\0\x08", "NIKON CORPORATION").unwrap();
        assert_eq!(nikon.group, IfdId::Nikon3);

        // no signature, so make decides
        assert_eq!(find_row(b"\x01\x00", "NIKON").unwrap().group, IfdId::Nikon1);
        assert_eq!(find_row(b"\x10\x00", "Canon").unwrap().group, IfdId::Canon);
        assert_eq!(find_row(b"\x10\x00", "ASAHI Optical").unwrap().group, IfdId::Pentax);

        // signatures don't care about make
        assert_eq!(
            find_row(b"SONY DSC \0\0\0....", "Unknown").unwrap().group,
            IfdId::Sony1
        );
        assert_eq!(find_row(b"OLYMPUS\0II\x03\0", "").unwrap().group, IfdId::Olympus2);
        assert_eq!(find_row(b"OLYMP\0\x01\0", "").unwrap().group, IfdId::Olympus);

        assert!(find_row(b"whatever", "Leica").is_none());
    }

    #[test]
    fn sony_cipher_inverts() {
        logger();
        let original: Vec<u8> = (0..=255).collect();

        let mut bytes = original.clone();
        Cipher::Sony.encrypt(&mut bytes);
        assert_ne!(bytes, original);
        assert_eq!(bytes[2], 8); // 2^3
        assert_eq!(bytes[250], 250); // untouched

        Cipher::Sony.decrypt(&mut bytes);
        assert_eq!(bytes, original);
    }

    #[test]
    fn nikon_cipher_skips_version_and_inverts() {
        logger();
        let original = b"0204 some lens data!".to_vec();
        let cipher = nikon_key(Some("3012345"), Some(1234), "NIKON D7000");

        let mut bytes = original.clone();
        cipher.encrypt(&mut bytes);
        assert_eq!(&bytes[..4], b"0204");
        assert_ne!(bytes, original);

        cipher.decrypt(&mut bytes);
        assert_eq!(bytes, original);
    }

    #[test]
    fn nikon_serial_falls_back_by_model() {
        assert_eq!(
            nikon_key(Some("not a number"), None, "NIKON D50"),
            Cipher::Nikon {
                serial: 0x22,
                count: 0
            }
        );
        assert_eq!(
            nikon_key(None, Some(9), "NIKON D3"),
            Cipher::Nikon {
                serial: 0x60,
                count: 9
            }
        );
    }

    #[test]
    fn canon_arrays_recompose_and_grow() {
        logger();
        let node = IfdNode {
            group: IfdId::Canon,
            pos: 0,
            order: Endianness::Little,
            base: 0,
            entries: vec![RawEntry {
                tag: 0x0001,
                type_id: 3,
                count: 3,
                pos: 2,
                data_pos: 100,
                inline: false,
                data: vec![6, 0, 2, 0, 0xff, 0xff],
            }],
            next: None,
        };

        let arrays = decode_arrays(&node, "Canon EOS 5D");
        assert_eq!(arrays.len(), 1);
        let cs = &arrays[0];
        assert_eq!(cs.group, IfdId::CanonCs);

        let values: Vec<_> = cs.values().map(|(_, tag, v)| (tag, v)).collect();
        assert_eq!(values[1], (1, Value::SShort(vec![2])));
        assert_eq!(values[2], (2, Value::SShort(vec![-1])));

        let mut warnings = Vec::new();
        let edited = [(1, Value::SShort(vec![1])), (4, Value::SShort(vec![7]))];
        let bytes = cs.recompose(
            edited.iter().map(|(t, v)| (*t, v)),
            Cipher::None,
            &mut warnings,
        );
        assert_eq!(bytes, [6, 0, 1, 0, 0xff, 0xff, 0, 0, 7, 0]);
        assert!(warnings.is_empty());

        // a long doesn't fit in a short slot
        let bad = [(1, Value::Long(vec![1]))];
        cs.recompose(bad.iter().map(|(t, v)| (*t, v)), Cipher::None, &mut warnings);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn nikon_lens_data_is_decrypted_by_table() {
        logger();
        let cipher = nikon_key(Some("12345"), Some(42), "NIKON D300");

        // version, then lens id at byte 0x0C... we just need enough bytes for
        // the table's first few elements
        let mut data = b"0204".to_vec();
        data.extend((0..60).map(|i| i as u8));
        let plain = data.clone();
        cipher.encrypt(&mut data);

        let node = IfdNode {
            group: IfdId::Nikon3,
            pos: 0,
            order: Endianness::Big,
            base: 0,
            entries: vec![
                RawEntry {
                    tag: 0x001D,
                    type_id: 2,
                    count: 6,
                    pos: 0,
                    data_pos: 0,
                    inline: false,
                    data: b"12345\0".to_vec(),
                },
                RawEntry {
                    tag: 0x0098,
                    type_id: 7,
                    count: data.len() as u32,
                    pos: 12,
                    data_pos: 200,
                    inline: false,
                    data,
                },
                RawEntry {
                    tag: 0x00A7,
                    type_id: 4,
                    count: 1,
                    pos: 24,
                    data_pos: 32,
                    inline: true,
                    data: 42_u32.to_be_bytes().to_vec(),
                },
            ],
            next: None,
        };

        let arrays = decode_arrays(&node, "NIKON D300");
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].group, IfdId::NikonLd4);
        assert_eq!(arrays[0].plain, plain);

        let (_, tag, version) = arrays[0].values().next().unwrap();
        assert_eq!(tag, 0);
        assert_eq!(version, Value::Undefined(b"0204".to_vec()));
    }

    #[test]
    fn offset_shift_follows_base_rule() {
        let parent = MakerNoteLayout::new_for(row_for_new(IfdId::Canon).unwrap(), Endianness::Little);
        assert_eq!(parent.offset_shift(500), 500);

        let nikon = MakerNoteLayout {
            row: &ROWS[0],
            ..parent.clone()
        };
        assert_eq!(nikon.offset_shift(500), -10);

        assert!(row_for_new(IfdId::Nikon3).is_none());
    }
}
