//! Reads IFD trees out of a TIFF blob.
//!
//! Every IFD we find is pushed into an arena (a plain `Vec`), and nodes point
//! at each other by index. A visited set, keyed by the IFD's absolute
//! position and byte order, stops us from following a loop forever.
//!
//! Nothing here is fatal. Broken entries, pointers, and directories are
//! recorded as warnings, and we keep whatever we could read.

use rustc_hash::FxHashSet;
use winnow::{Parser as _, binary::u16, binary::u32, error::EmptyError};

use imgmeta_types::exif::{Endianness, PrimitiveTy, ifd::IfdId, tags};

use crate::{
    error::{Warning, warn, warn_lossy},
    exif::value::winnow_order,
};

/// How deep sub-IFDs may nest below IFD 0.
pub(crate) const MAX_DEPTH: u8 = 6;

/// One 12-byte entry, plus the bytes it points at.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawEntry {
    pub tag: u16,
    pub type_id: u16,
    pub count: u32,

    /// Absolute position of the entry itself.
    pub pos: usize,

    /// Absolute position of the entry's data.
    pub data_pos: usize,

    /// Whether the data lives in the entry's value field.
    pub inline: bool,

    /// The data. Might be shorter than `count` says if it ran out of bounds.
    pub data: Vec<u8>,
}

impl RawEntry {
    /// The element size for this entry's wire type. Unknown types are
    /// treated as bytes.
    pub fn element_size(&self) -> usize {
        PrimitiveTy::try_from(self.type_id)
            .map(|t| t.size_bytes() as usize)
            .unwrap_or(1)
    }

    /// How many whole elements we actually have.
    pub fn available(&self) -> u32 {
        (self.data.len() / self.element_size()) as u32
    }

    /// The size of the slot this entry's data occupies in the blob.
    pub fn slot(&self) -> usize {
        if self.inline { 4 } else { self.data.len() }
    }

    /// Reads the data as a list of offsets (or other integers).
    pub fn integers(&self, order: Endianness) -> Vec<u32> {
        match self.type_id {
            3 | 8 => self
                .data
                .chunks_exact(2)
                .filter_map(|c| order.read_u16(c).map(u32::from))
                .collect(),
            1 | 6 | 7 => self.data.iter().map(|b| *b as u32).collect(),
            _ => self
                .data
                .chunks_exact(4)
                .filter_map(|c| order.read_u32(c))
                .collect(),
        }
    }
}

/// One directory in the arena.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct IfdNode {
    pub group: IfdId,

    /// Absolute position of the entry count.
    pub pos: usize,

    pub order: Endianness,

    /// Offsets in this IFD are relative to this absolute position.
    pub base: usize,

    pub entries: Vec<RawEntry>,

    /// Absolute position of the next IFD, if it's usable.
    pub next: Option<usize>,
}

impl IfdNode {
    pub fn entry(&self, tag: u16) -> Option<&RawEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }
}

/// Walks IFDs, filling an arena.
#[derive(Debug)]
pub(crate) struct IfdReader<'a> {
    blob: &'a [u8],
    pub nodes: Vec<IfdNode>,
    visited: FxHashSet<(usize, Endianness)>,
    pub warnings: Vec<Warning>,
    sub_images: u8,
}

impl<'a> IfdReader<'a> {
    pub fn new(blob: &'a [u8]) -> Self {
        Self {
            blob,
            nodes: Vec::new(),
            visited: FxHashSet::default(),
            warnings: Vec::new(),
            sub_images: 0,
        }
    }

    /// Reads the main chain (IFD 0, IFD 1, ...), with every sub-IFD.
    pub fn read_chain(&mut self, first: usize, order: Endianness) {
        let mut next = Some(first);
        let mut index = 0_usize;

        while let Some(pos) = next {
            let Some(group) = IfdId::main_chain(index) else {
                warn(
                    &mut self.warnings,
                    format!("Ignoring IFDs after IFD {}", index.saturating_sub(1)),
                );
                break;
            };

            let Some(node) = self.read_tree(pos, group, order, 0, 0, true) else {
                break;
            };

            next = self.nodes[node].next;
            index += 1;
        }
    }

    /// Reads one IFD, then recurses into its sub-IFDs.
    ///
    /// Returns the node's index in the arena.
    pub fn read_tree(
        &mut self,
        pos: usize,
        group: IfdId,
        order: Endianness,
        base: usize,
        depth: u8,
        has_next: bool,
    ) -> Option<usize> {
        let index = self.read_ifd(pos, group, order, base, depth, has_next)?;

        // makernote IFDs don't have registry pointers
        if group.is_makernote() {
            return Some(index);
        }

        let pointers: Vec<(IfdId, Vec<u32>)> = self.nodes[index]
            .entries
            .iter()
            .filter_map(|e| {
                tags::sub_ifd_target(group, e.tag).map(|target| (target, e.integers(order)))
            })
            .collect();

        for (target, offsets) in pointers {
            for offset in offsets {
                let target = match target {
                    IfdId::SubImage(_) => {
                        self.sub_images = self.sub_images.saturating_add(1);
                        IfdId::SubImage(self.sub_images)
                    }
                    other => other,
                };

                log::trace!("following `{target}` pointer to `{offset}`");
                self.read_tree(base + offset as usize, target, order, base, depth + 1, true);
            }
        }

        Some(index)
    }

    /// Reads a single IFD into the arena, without following any pointers.
    pub fn read_ifd(
        &mut self,
        pos: usize,
        group: IfdId,
        order: Endianness,
        base: usize,
        depth: u8,
        has_next: bool,
    ) -> Option<usize> {
        if depth > MAX_DEPTH {
            warn_lossy(
                &mut self.warnings,
                format!("maximum IFD depth exceeded; not reading `{group}`"),
            );
            return None;
        }

        if !self.visited.insert((pos, order)) {
            warn_lossy(
                &mut self.warnings,
                format!("IFD loop detected; `{group}` at offset `{pos}` was already read"),
            );
            return None;
        }

        let e = winnow_order(order);
        let blob = self.blob;
        let input = &mut blob.get(pos..).unwrap_or_default();

        let Ok(count) = u16::<_, EmptyError>(e).parse_next(input) else {
            warn_lossy(
                &mut self.warnings,
                format!("IFD exceeds data buffer; `{group}` at offset `{pos}` has no entry count"),
            );
            return None;
        };

        let table_len = 2 + count as usize * 12 + if has_next { 4 } else { 0 };
        if pos.saturating_add(table_len) > self.blob.len() {
            warn_lossy(
                &mut self.warnings,
                format!("IFD exceeds data buffer; `{group}` at offset `{pos}` claims `{count}` entries"),
            );
            return None;
        }

        log::trace!("reading `{count}` entries from `{group}` at `{pos}` ({order})");
        let mut entries: Vec<RawEntry> = Vec::with_capacity(count as usize);
        let mut seen = FxHashSet::default();
        for i in 0..count as usize {
            let entry_pos = pos + 2 + i * 12;
            if let Some(entry) = self.read_entry(input, entry_pos, group, order, base) {
                if !seen.insert(entry.tag) {
                    warn(
                        &mut self.warnings,
                        format!(
                            "duplicate tag `{}` in `{group}`",
                            tags::tag_name(group, entry.tag)
                        ),
                    );
                }
                entries.push(entry);
            }
        }

        let next = if has_next {
            match u32::<_, EmptyError>(e).parse_next(input) {
                Ok(0) | Err(_) => None,
                Ok(n) if base.saturating_add(n as usize) >= self.blob.len() => {
                    warn(
                        &mut self.warnings,
                        format!("Next pointer is out of bounds; ignored (`{group}` points to `{n}`)"),
                    );
                    None
                }
                Ok(n) => Some(base + n as usize),
            }
        } else {
            None
        };

        self.nodes.push(IfdNode {
            group,
            pos,
            order,
            base,
            entries,
            next,
        });
        Some(self.nodes.len() - 1)
    }

    /// Reads one 12-byte entry. The input must be positioned at it.
    fn read_entry(
        &mut self,
        input: &mut &[u8],
        pos: usize,
        group: IfdId,
        order: Endianness,
        base: usize,
    ) -> Option<RawEntry> {
        let e = winnow_order(order);

        // the table's size was checked, so these can't fail
        let (tag, type_id, count, value_or_offset) = (u16(e), u16(e), u32(e), u32(e))
            .parse_next(input)
            .map_err(|_: EmptyError| {
                log::error!("entry at `{pos}` was cut short, even though the table fit");
            })
            .ok()?;

        let name = tags::tag_name(group, tag);
        let ty = PrimitiveTy::try_from(type_id).ok();
        if ty.is_none() {
            warn(
                &mut self.warnings,
                format!("unknown Exif (TIFF) type `{type_id}` for `{group}.{name}`; reading as bytes"),
            );
        }

        let element_size = ty.map(|t| t.size_bytes() as u64).unwrap_or(1);
        let Ok(size) = u32::try_from(count as u64 * element_size) else {
            warn_lossy(
                &mut self.warnings,
                format!("invalid size for `{group}.{name}`: `{count}` elements; skipping entry"),
            );
            return None;
        };

        // check what the registry expected
        if let Some(info) = tags::find(group, tag) {
            if let Some(ty) = ty
                && !types_compatible(info.ty, ty)
            {
                warn(
                    &mut self.warnings,
                    format!(
                        "invalid type value for `{group}.{name}`: found `{ty}`, expected `{}`",
                        info.ty
                    ),
                );
            }

            if !info.count.accepts(count) && info.ty != PrimitiveTy::Ascii {
                warn(
                    &mut self.warnings,
                    format!(
                        "`{group}.{name}` has `{count}` components, expected {:?}",
                        info.count
                    ),
                );
            }
        }

        if size <= 4 {
            let data_pos = pos + 8;
            return Some(RawEntry {
                tag,
                type_id,
                count,
                pos,
                data_pos,
                inline: true,
                data: self.blob[data_pos..data_pos + size as usize].to_vec(),
            });
        }

        let data_pos = base.saturating_add(value_or_offset as usize);
        let available = self.blob.len().saturating_sub(data_pos);
        let data = if available >= size as usize {
            self.blob[data_pos..data_pos + size as usize].to_vec()
        } else {
            // keep what's in bounds, as whole elements
            let kept = available - available % element_size as usize;
            warn_lossy(
                &mut self.warnings,
                format!(
                    "offset out of bounds; truncating the entry `{group}.{name}` \
                    (wanted `{size}` bytes at `{data_pos}`, kept `{kept}`)"
                ),
            );
            self.blob
                .get(data_pos..data_pos + kept)
                .map(<[u8]>::to_vec)
                .unwrap_or_default()
        };

        Some(RawEntry {
            tag,
            type_id,
            count,
            pos,
            data_pos,
            inline: false,
            data,
        })
    }
}

/// Whether a value found on disk is close enough to the registry's type.
fn types_compatible(registered: PrimitiveTy, found: PrimitiveTy) -> bool {
    use PrimitiveTy as Pt;

    registered == found
        || matches!(
            (registered, found),
            (Pt::Short | Pt::Long | Pt::SShort, Pt::Short | Pt::Long | Pt::SShort)
                | (Pt::Comment | Pt::Undefined | Pt::Byte, Pt::Undefined | Pt::Byte)
                | (Pt::Ascii, Pt::Undefined | Pt::Byte)
                | (Pt::Rational, Pt::SRational)
                | (Pt::SRational, Pt::Rational)
        )
}

#[cfg(test)]
mod tests {
    use imgmeta_types::exif::{Endianness, ifd::IfdId};

    use super::IfdReader;
    use crate::util::logger;

    /// A little-endian TIFF with IFD 0 at 8, holding `entries`.
    fn tiff(entries: &[(u16, u16, u32, u32)], next: u32) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(b"II"); // byte order
        v.extend_from_slice(&42_u16.to_le_bytes()); // magic
        v.extend_from_slice(&8_u32.to_le_bytes()); // ifd 0 offset
        v.extend_from_slice(&(entries.len() as u16).to_le_bytes()); // entry count
        for (tag, ty, count, value) in entries {
            v.extend_from_slice(&tag.to_le_bytes());
            v.extend_from_slice(&ty.to_le_bytes());
            v.extend_from_slice(&count.to_le_bytes());
            v.extend_from_slice(&value.to_le_bytes());
        }
        v.extend_from_slice(&next.to_le_bytes()); // next ifd
        v
    }

    #[test]
    fn reads_inline_and_offset_values() {
        logger();
        let mut blob = tiff(
            &[
                (0x0100, 3, 1, 1920),    // ImageWidth, inline
                (0x010F, 2, 6, 8 + 30), // Make, out of line
            ],
            0,
        );
        blob.extend_from_slice(b"Canon\0");

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        assert_eq!(r.nodes.len(), 1);
        let ifd0 = &r.nodes[0];
        assert_eq!(ifd0.group, IfdId::Image);
        assert_eq!(ifd0.entries[0].data, 1920_u16.to_le_bytes());
        assert!(ifd0.entries[0].inline);
        assert_eq!(ifd0.entries[1].data, b"Canon\0");
        assert!(r.warnings.is_empty(), "{:?}", r.warnings);
    }

    #[test]
    fn out_of_bounds_next_pointer_is_ignored() {
        logger();
        let blob = tiff(&[(0x0100, 3, 1, 1)], 0xFFFF);

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        assert_eq!(r.nodes.len(), 1);
        assert_eq!(r.nodes[0].next, None);
        assert!(
            r.warnings
                .iter()
                .any(|w| w.message.starts_with("Next pointer is out of bounds; ignored"))
        );
    }

    #[test]
    fn truncated_payloads_keep_whole_elements() {
        logger();
        // three shorts wanted at offset 26, but only 5 bytes are there
        let mut blob = tiff(&[(0x0102, 3, 3, 26)], 0);
        blob.extend_from_slice(&[8, 0, 8, 0, 8]);

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        assert_eq!(r.nodes[0].entries[0].data, [8, 0, 8, 0]);
        assert!(
            r.warnings
                .iter()
                .any(|w| w.message.starts_with("offset out of bounds; truncating the entry"))
        );
    }

    #[test]
    fn loops_are_stopped() {
        logger();
        // an Exif IFD pointer that points back at IFD 0
        let blob = tiff(&[(0x8769, 4, 1, 8)], 8);

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        assert_eq!(r.nodes.len(), 1);
        assert!(r.warnings.iter().any(|w| w.message.starts_with("IFD loop detected")));
    }

    #[test]
    fn oversized_tables_are_rejected() {
        logger();
        let mut blob = tiff(&[], 0);
        blob[8..10].copy_from_slice(&500_u16.to_le_bytes()); // claims 500 entries

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        assert!(r.nodes.is_empty());
        assert!(r.warnings[0].message.starts_with("IFD exceeds data buffer"));
    }

    #[test]
    fn unknown_types_and_huge_counts() {
        logger();
        let blob = tiff(
            &[
                (0x9999, 99, 2, 0),          // unknown type, 2 bytes inline
                (0x010E, 5, 0x4000_0000, 0), // rational count that overflows u32
            ],
            0,
        );

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        let entries = &r.nodes[0].entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].type_id, 99);
        assert!(r.warnings.iter().any(|w| w.message.starts_with("unknown Exif (TIFF) type")));
        assert!(r.warnings.iter().any(|w| w.message.starts_with("invalid size")));
    }

    #[test]
    fn duplicates_are_kept_and_reported() {
        logger();
        let blob = tiff(
            &[
                (0x0100, 3, 1, 1),
                (0x0101, 3, 1, 2),
                (0x0100, 3, 1, 3),
                (0x0100, 3, 1, 4),
            ],
            0,
        );

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        assert_eq!(r.nodes[0].entries.len(), 4);
        let duplicates = r
            .warnings
            .iter()
            .filter(|w| w.message.starts_with("duplicate tag"))
            .count();
        assert_eq!(duplicates, 2);
    }

    #[test]
    fn wide_ifds_without_duplicates() {
        logger();
        let entries: Vec<_> = (0..20_000_u16).map(|i| (0x1000 + i, 3, 1, i as u32)).collect();
        let blob = tiff(&entries, 0);

        let mut r = IfdReader::new(&blob);
        r.read_chain(8, Endianness::Little);

        assert_eq!(r.nodes[0].entries.len(), 20_000);
        assert!(!r.warnings.iter().any(|w| w.message.starts_with("duplicate tag")));
    }

    #[test]
    fn depth_is_limited() {
        logger();
        // IFD 0 -> Exif -> Interop is fine, but we start at a depth near the
        // limit to trip it
        let blob = tiff(&[(0x8769, 4, 1, 26)], 0);
        let mut blob = blob;
        blob.extend_from_slice(&0_u16.to_le_bytes()); // empty exif ifd
        blob.extend_from_slice(&0_u32.to_le_bytes());

        let mut r = IfdReader::new(&blob);
        r.read_tree(8, IfdId::Image, Endianness::Little, 0, 6, true);

        assert_eq!(r.nodes.len(), 1);
        assert!(r.warnings.iter().any(|w| w.message.starts_with("maximum IFD depth exceeded")));
    }
}
