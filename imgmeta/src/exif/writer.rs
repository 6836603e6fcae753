//! Turns an [`ExifData`] back into a TIFF blob.
//!
//! There are two ways to do that:
//!
//! - non-intrusive: copy the original blob and patch changed values where
//!   they already live. Only works when nothing moves.
//! - intrusive: rebuild every IFD from scratch.
//!
//! The cheaper one is always tried first.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use imgmeta_types::exif::{Endianness, PrimitiveTy, Value, ifd::IfdId, tags};

use crate::{
    error::{Error, Warning, warn},
    exif::{
        DataArea, ExifData, ExifKey, ExifSource, Exifdatum, Origin,
        makernote::{self, ArrayKind, ArrayLayout, Cipher, MakerNoteLayout},
        value::WireValue as _,
    },
    write::{WriteOptions, WriteStrategy},
};

/// Serializes with the default options.
pub(crate) fn serialize(
    exif: &ExifData,
    warnings: &mut Vec<Warning>,
) -> Result<(Vec<u8>, WriteStrategy), Error> {
    serialize_with(exif, &WriteOptions::default(), warnings)
}

/// Serializes, picking the strategy.
///
/// Empty data gives an empty blob, meaning "remove the Exif".
pub(crate) fn serialize_with(
    exif: &ExifData,
    options: &WriteOptions,
    warnings: &mut Vec<Warning>,
) -> Result<(Vec<u8>, WriteStrategy), Error> {
    if exif.is_empty() {
        log::debug!("no Exif datums left; nothing to serialize");
        return Ok((Vec::new(), WriteStrategy::Intrusive));
    }

    if let Some(source) = &exif.source {
        if exif.is_pristine() {
            log::debug!("Exif is unchanged; reusing the original bytes");
            return Ok((source.blob.clone(), WriteStrategy::NonIntrusive));
        }

        if options.non_intrusive {
            if let Some(patched) = non_intrusive(exif, source, warnings) {
                return Ok((patched, WriteStrategy::NonIntrusive));
            }
        }
    }

    let order = exif.byte_order.unwrap_or(options.byte_order);
    Builder::new(exif, order, warnings).build().map(|b| (b, WriteStrategy::Intrusive))
}

/*
 *
 *
 *  non-intrusive
 *
 *
 */

/// Tags whose values are positions in the blob. Changing these by hand
/// can't be patched.
fn is_structural(key: ExifKey) -> bool {
    tags::sub_ifd_target(key.group(), key.tag()).is_some()
        || (key.group() == IfdId::Photo && key.tag() == tags::MAKERNOTE_TAG)
        || (key.group().table() == IfdId::Image
            && tags::DATA_AREAS
                .iter()
                .any(|(o, c)| *o == key.tag() || *c == key.tag()))
}

/// Tries to patch the original blob in place.
///
/// Returns `None` when anything would have to move.
fn non_intrusive(
    exif: &ExifData,
    source: &ExifSource,
    warnings: &mut Vec<Warning>,
) -> Option<Vec<u8>> {
    let order = source.order;
    if exif.byte_order() != order {
        log::debug!("byte order changed; can't patch in place");
        return None;
    }

    // nothing added, nothing removed
    let origins = |datums: &mut dyn Iterator<Item = &Exifdatum>| {
        let mut v: Vec<(Origin, ExifKey)> = datums.filter_map(|d| d.origin.map(|o| (o, d.key))).collect();
        v.sort();
        v
    };
    if origins(&mut source.snapshot.iter()) != origins(&mut exif.iter()) {
        log::debug!("datums were added or removed; can't patch in place");
        return None;
    }
    let pseudo = |datums: &mut dyn Iterator<Item = &Exifdatum>| datums.filter(|d| d.origin.is_none()).count();
    if pseudo(&mut source.snapshot.iter()) != pseudo(&mut exif.iter()) {
        log::debug!("new datums were added; can't patch in place");
        return None;
    }

    let before: FxHashMap<Origin, &Exifdatum> = source
        .snapshot
        .iter()
        .filter_map(|d| d.origin.map(|o| (o, d)))
        .collect();

    let mut out = source.blob.clone();
    let mut dirty_arrays: FxHashSet<usize> = FxHashSet::default();

    for datum in exif.iter() {
        let Some(origin) = datum.origin else {
            continue;
        };
        if before.get(&origin).is_some_and(|old| old.value == datum.value) {
            continue;
        }

        match origin {
            Origin::Entry {
                entry,
                data,
                slot,
                type_id,
            } => {
                if datum.value.wire_id() != type_id {
                    log::debug!("`{}` changed type; can't patch in place", datum.key);
                    return None;
                }
                if is_structural(datum.key) {
                    log::debug!("`{}` is structural; can't patch in place", datum.key);
                    return None;
                }

                let bytes = datum.value.serialize(order);
                let inline = data == entry + 8;

                if bytes.len() <= 4 {
                    // small values always live in the entry itself
                    if !inline {
                        out[data..data + slot].fill(0);
                    }
                    let mut field = [0_u8; 4];
                    field[..bytes.len()].copy_from_slice(&bytes);
                    out[entry + 8..entry + 12].copy_from_slice(&field);
                } else if !inline && bytes.len() <= slot {
                    out[data..data + bytes.len()].copy_from_slice(&bytes);
                    out[data + bytes.len()..data + slot].fill(0);
                } else {
                    log::debug!(
                        "`{}` needs `{}` bytes, but its slot has `{slot}`; can't patch in place",
                        datum.key,
                        bytes.len()
                    );
                    return None;
                }

                out[entry + 4..entry + 8]
                    .copy_from_slice(&order.u32_bytes(datum.value.count() as u32));
                log::trace!("patched `{}` in place", datum.key);
            }

            Origin::Element { array, element } => {
                let el = source.arrays.get(array)?.elements.get(element)?;
                if datum.value.wire_id() != el.type_id || datum.value.size() != el.size() {
                    log::debug!("`{}` changed size; can't patch in place", datum.key);
                    return None;
                }
                dirty_arrays.insert(array);
            }
        }
    }

    // a new nikon key means re-encrypting, even if no element changed
    let ciphers: Vec<Cipher> = source
        .arrays
        .iter()
        .map(|layout| current_cipher(layout, exif, warnings))
        .collect();
    for (i, layout) in source.arrays.iter().enumerate() {
        if ciphers[i] != layout.cipher {
            dirty_arrays.insert(i);
        }
    }

    for index in dirty_arrays {
        let layout = &source.arrays[index];
        let values = exif.iter().filter_map(|d| match d.origin {
            Some(Origin::Element { array, .. }) if array == index => Some((d.tag(), d.value())),
            _ => None,
        });

        let bytes = layout.recompose(values, ciphers[index], warnings);
        if bytes.len() != layout.plain.len() {
            return None;
        }
        out[layout.data_pos..layout.data_pos + bytes.len()].copy_from_slice(&bytes);
        log::trace!("re-encoded `{}` in place", layout.group);
    }

    Some(out)
}

/// The cipher an array should be written with, given the current data.
fn current_cipher(layout: &ArrayLayout, exif: &ExifData, warnings: &mut Vec<Warning>) -> Cipher {
    match layout.cipher {
        Cipher::Nikon { .. } => {
            let serial = exif
                .find_key(&ExifKey::new(layout.parent, 0x001D))
                .and_then(|d| match d.value() {
                    Value::Ascii(s) => Some(s.as_str()),
                    _ => None,
                });
            let count = exif
                .find_key(&ExifKey::new(layout.parent, 0x00A7))
                .and_then(|d| d.to_long(0, warnings))
                .map(|c| c as u32);
            let model = exif
                .find_key(&ExifKey::new(IfdId::Image, 0x0110))
                .map(|d| d.value().to_string())
                .unwrap_or_default();

            makernote::nikon_key(serial, count, &model)
        }
        other => other,
    }
}

/*
 *
 *
 *  intrusive
 *
 *
 */

/// What an entry's value turns into once it's placed.
#[derive(Debug)]
enum Payload<'e> {
    Bytes(Vec<u8>),

    /// Pointers to these sub-IFDs, patched once they're written.
    Children(Vec<IfdId>),

    /// The MakerNote, built once its position is known.
    MakerNote,

    /// Offsets to a data area, patched at the very end.
    Area(&'e DataArea),
}

#[derive(Debug)]
struct OutEntry<'e> {
    tag: u16,
    type_id: u16,
    count: u32,
    payload: Payload<'e>,
}

impl<'e> OutEntry<'e> {
    fn from_value(tag: u16, value: &Value, order: Endianness) -> Self {
        Self {
            tag,
            type_id: value.wire_id(),
            count: value.count() as u32,
            payload: Payload::Bytes(value.serialize(order)),
        }
    }

    fn long_placeholder(tag: u16, count: usize, payload: Payload<'e>) -> Self {
        Self {
            tag,
            type_id: PrimitiveTy::Long.wire_id(),
            count: count as u32,
            payload,
        }
    }
}

/// Rounds up to an even offset.
const fn even(n: usize) -> usize {
    n + (n & 1)
}

/// Overwrites four bytes with a `u32`.
fn patch_u32(out: &mut [u8], at: usize, value: usize, order: Endianness) {
    out[at..at + 4].copy_from_slice(&order.u32_bytes(value as u32));
}

/// Writes an IFD tree from scratch.
struct Builder<'e, 'w> {
    exif: &'e ExifData,
    order: Endianness,
    out: Vec<u8>,
    warnings: &'w mut Vec<Warning>,

    /// The MakerNote to rebuild, if any.
    makernote: Option<(MakerNoteLayout, Vec<ArrayLayout>)>,

    /// Where each data area's offsets live, for patching at the end.
    areas: Vec<(usize, &'e DataArea)>,

    sub_images: Vec<IfdId>,
}

impl<'e, 'w> Builder<'e, 'w> {
    fn new(exif: &'e ExifData, order: Endianness, warnings: &'w mut Vec<Warning>) -> Self {
        let mut sub_images: Vec<IfdId> = exif
            .iter()
            .map(|d| d.group())
            .filter(|g| matches!(g, IfdId::SubImage(_)))
            .collect();
        sub_images.sort();
        sub_images.dedup();

        let makernote = plan_makernote(exif, order, warnings);

        Self {
            exif,
            order,
            out: Vec::new(),
            warnings,
            makernote,
            areas: Vec::new(),
            sub_images,
        }
    }

    fn has(&self, group: IfdId) -> bool {
        self.exif.iter().any(|d| d.group() == group)
    }

    fn build(mut self) -> Result<Vec<u8>, Error> {
        // tiff header. ifd 0 always follows right after
        self.out.extend_from_slice(&self.order.marker());
        self.out.extend_from_slice(&self.order.u16_bytes(42));
        self.out.extend_from_slice(&self.order.u32_bytes(8));

        let chain: Vec<IfdId> = (0..)
            .map_while(IfdId::main_chain)
            .filter(|g| *g == IfdId::Image || self.has(*g))
            .collect();

        let mut previous_next: Option<usize> = None;
        for group in chain {
            let (pos, next) = self.write_tree(group)?;
            if let Some(at) = previous_next {
                patch_u32(&mut self.out, at, pos, self.order);
            }
            previous_next = Some(next);
        }

        // data areas go last
        for (at, area) in core::mem::take(&mut self.areas) {
            for (i, part) in area.parts.iter().enumerate() {
                let pos = even(self.out.len());
                self.out.resize(pos, 0);
                self.out.extend_from_slice(part);
                patch_u32(&mut self.out, at + i * 4, pos, self.order);
            }
        }

        log::debug!("rebuilt Exif into `{}` bytes", self.out.len());
        Ok(self.out)
    }

    /// The entries for one IFD, sorted by tag. For duplicate tags, the last
    /// datum wins.
    fn entries(&self, group: IfdId) -> Vec<OutEntry<'e>> {
        let mut by_tag: BTreeMap<u16, OutEntry<'e>> = BTreeMap::new();

        for d in self.exif.iter().filter(|d| d.group() == group) {
            let structural = tags::sub_ifd_target(group, d.tag()).is_some()
                || (group == IfdId::Photo
                    && d.tag() == tags::MAKERNOTE_TAG
                    && self.makernote.is_some());
            if !structural {
                by_tag.insert(d.tag(), OutEntry::from_value(d.tag(), d.value(), self.order));
            }
        }

        // pointers to whatever children exist
        match group {
            IfdId::Image => {
                if self.has(IfdId::Photo) || self.has(IfdId::Iop) || self.makernote.is_some() {
                    by_tag.insert(
                        0x8769,
                        OutEntry::long_placeholder(0x8769, 1, Payload::Children(vec![IfdId::Photo])),
                    );
                }
                if self.has(IfdId::GpsInfo) {
                    by_tag.insert(
                        0x8825,
                        OutEntry::long_placeholder(0x8825, 1, Payload::Children(vec![IfdId::GpsInfo])),
                    );
                }
                if !self.sub_images.is_empty() {
                    by_tag.insert(
                        0x014A,
                        OutEntry::long_placeholder(
                            0x014A,
                            self.sub_images.len(),
                            Payload::Children(self.sub_images.clone()),
                        ),
                    );
                }
            }
            IfdId::Photo => {
                if self.has(IfdId::Iop) {
                    by_tag.insert(
                        0xA005,
                        OutEntry::long_placeholder(0xA005, 1, Payload::Children(vec![IfdId::Iop])),
                    );
                }
                if self.makernote.is_some() {
                    by_tag.insert(
                        tags::MAKERNOTE_TAG,
                        OutEntry {
                            tag: tags::MAKERNOTE_TAG,
                            type_id: PrimitiveTy::Undefined.wire_id(),
                            count: 0,
                            payload: Payload::MakerNote,
                        },
                    );
                }
            }
            _ => (),
        }

        // strips, tiles, and thumbnails are only kept while their offsets are
        for area in self.exif.data_areas.iter().filter(|a| a.group == group) {
            if !by_tag.contains_key(&area.offset_tag) {
                continue;
            }

            by_tag.insert(
                area.offset_tag,
                OutEntry::long_placeholder(area.offset_tag, area.parts.len(), Payload::Area(area)),
            );
            let lengths = Value::Long(area.parts.iter().map(|p| p.len() as u32).collect());
            by_tag.insert(
                area.count_tag,
                OutEntry::from_value(area.count_tag, &lengths, self.order),
            );
        }

        by_tag.into_values().collect()
    }

    /// Writes one IFD, then its children.
    ///
    /// Returns the IFD's position and where its next pointer lives.
    fn write_tree(&mut self, group: IfdId) -> Result<(usize, usize), Error> {
        let entries = self.entries(group);
        let order = self.order;

        let pos = even(self.out.len());
        let table_len = 2 + entries.len() * 12 + 4;
        self.out.resize(pos + table_len, 0);
        self.out[pos..pos + 2].copy_from_slice(&order.u16_bytes(entries.len() as u16));
        log::trace!("writing `{group}` with `{}` entries at `{pos}`", entries.len());

        let mut children: Vec<(usize, Vec<IfdId>)> = Vec::new();

        for (i, entry) in entries.into_iter().enumerate() {
            let entry_pos = pos + 2 + i * 12;

            let (count, bytes) = match &entry.payload {
                Payload::Bytes(bytes) => (entry.count, bytes.clone()),
                Payload::MakerNote => {
                    let at = even(self.out.len());
                    let bytes = self.build_makernote(at);
                    (bytes.len() as u32, bytes)
                }
                Payload::Children(_) | Payload::Area(_) => {
                    (entry.count, vec![0; entry.count as usize * 4])
                }
            };

            self.out[entry_pos..entry_pos + 2].copy_from_slice(&order.u16_bytes(entry.tag));
            self.out[entry_pos + 2..entry_pos + 4].copy_from_slice(&order.u16_bytes(entry.type_id));
            self.out[entry_pos + 4..entry_pos + 8].copy_from_slice(&order.u32_bytes(count));

            let value_pos = if bytes.len() <= 4 {
                self.out[entry_pos + 8..entry_pos + 8 + bytes.len()].copy_from_slice(&bytes);
                entry_pos + 8
            } else {
                let at = even(self.out.len());
                self.out.resize(at, 0);
                self.out.extend_from_slice(&bytes);
                patch_u32(&mut self.out, entry_pos + 8, at, order);
                at
            };

            match entry.payload {
                Payload::Children(groups) => children.push((value_pos, groups)),
                Payload::Area(area) => self.areas.push((value_pos, area)),
                Payload::Bytes(_) | Payload::MakerNote => (),
            }
        }

        for (value_pos, groups) in children {
            for (i, child) in groups.into_iter().enumerate() {
                let (child_pos, _) = self.write_tree(child)?;
                patch_u32(&mut self.out, value_pos + i * 4, child_pos, order);
            }
        }

        Ok((pos, pos + table_len - 4))
    }

    /// Builds the MakerNote as it'll sit at absolute position `at`.
    fn build_makernote(&mut self, at: usize) -> Vec<u8> {
        let Some((layout, arrays)) = &self.makernote else {
            return Vec::new();
        };
        let order = layout.order;
        let shift = layout.offset_shift(at);

        let mut by_tag: BTreeMap<u16, (u16, u32, Vec<u8>)> = BTreeMap::new();
        for d in self.exif.iter().filter(|d| d.group() == layout.group()) {
            by_tag.insert(
                d.tag(),
                (d.value().wire_id(), d.value().count() as u32, d.value().serialize(order)),
            );
        }

        for array in arrays {
            let values = self
                .exif
                .iter()
                .filter(|d| d.group() == array.group)
                .map(|d| (d.tag(), d.value()));
            let cipher = current_cipher(array, self.exif, self.warnings);
            let bytes = array.recompose(values, cipher, self.warnings);

            let element = PrimitiveTy::try_from(array.type_id)
                .map(|t| t.size_bytes() as usize)
                .unwrap_or(1);
            by_tag.insert(array.tag, (array.type_id, (bytes.len() / element) as u32, bytes));
        }

        let mut mn = layout.header.clone();
        let ifd = mn.len();
        let table_len = 2 + by_tag.len() * 12 + if layout.row.next_pointer { 4 } else { 0 };
        mn.resize(ifd + table_len, 0);
        mn[ifd..ifd + 2].copy_from_slice(&order.u16_bytes(by_tag.len() as u16));

        for (i, (tag, (type_id, count, bytes))) in by_tag.into_iter().enumerate() {
            let entry = ifd + 2 + i * 12;
            mn[entry..entry + 2].copy_from_slice(&order.u16_bytes(tag));
            mn[entry + 2..entry + 4].copy_from_slice(&order.u16_bytes(type_id));
            mn[entry + 4..entry + 8].copy_from_slice(&order.u32_bytes(count));

            if bytes.len() <= 4 {
                mn[entry + 8..entry + 8 + bytes.len()].copy_from_slice(&bytes);
            } else {
                let local = even(mn.len());
                mn.resize(local, 0);
                mn.extend_from_slice(&bytes);
                let offset = (local as i64 + shift) as u32;
                mn[entry + 8..entry + 12].copy_from_slice(&order.u32_bytes(offset));
            }
        }

        log::trace!(
            "rebuilt `{}` MakerNote: `{}` bytes at `{at}`",
            layout.group(),
            mn.len()
        );
        mn
    }
}

/// Decides which MakerNote (if any) gets written, and with which arrays.
fn plan_makernote(
    exif: &ExifData,
    order: Endianness,
    warnings: &mut Vec<Warning>,
) -> Option<(MakerNoteLayout, Vec<ArrayLayout>)> {
    let groups: Vec<IfdId> = {
        let mut g: Vec<IfdId> = exif
            .iter()
            .map(|d| d.group())
            .filter(|g| g.is_makernote() && *g != IfdId::MakerNote)
            .collect();
        g.sort();
        g.dedup();
        g
    };
    if groups.is_empty() {
        return None;
    }

    let existing = exif.source.as_ref().and_then(|s| {
        s.makernote
            .clone()
            .map(|layout| (layout, s.arrays.clone()))
    });

    let (layout, mut arrays) = match existing {
        Some(found) => found,
        None => {
            // only canon's can be made from nothing
            let Some(row) = groups
                .iter()
                .find_map(|g| makernote::row_for_new(parent_of(*g)))
            else {
                warn(
                    warnings,
                    format!("can't create a new `{}` MakerNote; dropping its tags", groups[0]),
                );
                return None;
            };
            (MakerNoteLayout::new_for(row, order), Vec::new())
        }
    };

    // uniform arrays can be made from nothing, too
    for group in &groups {
        if group.is_binary_array() && !arrays.iter().any(|a| a.group == *group) {
            match fresh_array(*group, layout.group(), layout.order) {
                Some(a) => arrays.push(a),
                None => warn(
                    warnings,
                    format!("can't create a new `{group}` array; dropping its tags"),
                ),
            }
        }
    }

    // arrays with nothing left in them are dropped
    arrays.retain(|a| exif.iter().any(|d| d.group() == a.group));

    for group in &groups {
        let known = *group == layout.group() || arrays.iter().any(|a| a.group == *group);
        if !known {
            warn(
                warnings,
                format!(
                    "`{group}` tags don't belong in a `{}` MakerNote; dropping them",
                    layout.group()
                ),
            );
        }
    }

    Some((layout, arrays))
}

/// The MakerNote group an array lives in.
fn parent_of(group: IfdId) -> IfdId {
    match group {
        IfdId::CanonCs | IfdId::CanonSi | IfdId::CanonCf => IfdId::Canon,
        IfdId::NikonLd1 | IfdId::NikonLd2 | IfdId::NikonLd3 | IfdId::NikonLd4 => IfdId::Nikon3,
        IfdId::Sony2Fp | IfdId::Sony2010e | IfdId::SonyMisc3c => IfdId::Sony1,
        other => other,
    }
}

/// An empty Canon array, ready to be filled by `recompose`.
fn fresh_array(group: IfdId, parent: IfdId, order: Endianness) -> Option<ArrayLayout> {
    let tag = match (parent, group) {
        (IfdId::Canon, IfdId::CanonCs) => 0x0001,
        (IfdId::Canon, IfdId::CanonSi) => 0x0004,
        (IfdId::Canon, IfdId::CanonCf) => 0x000F,
        _ => return None,
    };

    let ty = tags::TABLES
        .iter()
        .find(|(g, _)| *g == group)
        .and_then(|(_, t)| t.first())
        .map(|t| t.ty)
        .unwrap_or(PrimitiveTy::Short);

    Some(ArrayLayout {
        group,
        parent,
        tag,
        type_id: PrimitiveTy::Short.wire_id(),
        order,
        data_pos: 0,
        plain: Vec::new(),
        kind: ArrayKind::Uniform(ty),
        cipher: Cipher::None,
        elements: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use imgmeta_types::exif::{Charset, Comment, Endianness, Rational, Value, ifd::IfdId};

    use super::*;
    use crate::{
        exif::{DataArea, ExifData, ExifKey, Exifdatum},
        util::logger,
    };

    fn key(s: &str) -> ExifKey {
        s.parse().unwrap()
    }

    fn sample() -> ExifData {
        let mut exif = ExifData::new();
        exif.set_str("Exif.Image.Make", "Canon").unwrap();
        exif.set_str("Exif.Image.Software", "digiKam 0.9.0-svn").unwrap();
        exif.set_str("Exif.Photo.FNumber", "28/10").unwrap();
        exif.set_str("Exif.Photo.UserComment", "charset=Unicode clef 𝄞")
            .unwrap();
        exif.set_str("Exif.GPSInfo.GPSLatitude", "51/1 106969/10000 0/1")
            .unwrap();
        exif.set_str("Exif.Iop.InteroperabilityIndex", "R98").unwrap();
        exif.set_str("Exif.Thumbnail.Compression", "6").unwrap();
        exif
    }

    #[test]
    fn fresh_data_round_trips_in_both_orders() {
        logger();
        for order in [Endianness::Little, Endianness::Big] {
            let mut exif = sample();
            exif.set_byte_order(order);

            let mut warnings = Vec::new();
            let (bytes, strategy) = serialize(&exif, &mut warnings).unwrap();
            assert_eq!(strategy, WriteStrategy::Intrusive);
            assert_eq!(&bytes[..2], &order.marker());

            let (back, warnings) = ExifData::parse(&bytes).unwrap();
            assert!(warnings.is_empty(), "{warnings:?}");
            assert_eq!(back.byte_order(), order);

            for d in exif.iter() {
                assert_eq!(back.find_key(&d.key()).unwrap().value(), d.value(), "{}", d.key());
            }
            assert_eq!(
                back.get("Exif.Photo.UserComment").unwrap().value(),
                &Value::Comment(Comment::new(Charset::Unicode, "clef 𝄞"))
            );
        }
    }

    #[test]
    fn entries_are_sorted_and_last_duplicate_wins() {
        logger();
        let mut exif = ExifData::new();
        exif.add(Exifdatum::new(key("Exif.Image.Model"), Value::Ascii("first".into())));
        exif.add(Exifdatum::new(key("Exif.Image.Make"), Value::Ascii("make".into())));
        exif.add(Exifdatum::new(key("Exif.Image.Model"), Value::Ascii("second".into())));

        let bytes = exif.to_bytes().unwrap();
        let (back, _) = ExifData::parse(&bytes).unwrap();

        let tags: Vec<u16> = back.iter().map(|d| d.tag()).collect();
        assert_eq!(tags, [0x010F, 0x0110]);
        assert_eq!(
            back.get("Exif.Image.Model").unwrap().value(),
            &Value::Ascii("second".into())
        );
    }

    #[test]
    fn short_edits_patch_in_place() {
        logger();
        let bytes = sample().to_bytes().unwrap();
        let (mut exif, _) = ExifData::parse(&bytes).unwrap();

        exif.set(key("Exif.Image.Software"), Value::Ascii("GI".into()));
        exif.set(
            key("Exif.Photo.FNumber"),
            Value::Rational(vec![Rational::new(4, 1)]),
        );

        let mut warnings = Vec::new();
        let (patched, strategy) = serialize(&exif, &mut warnings).unwrap();
        assert_eq!(strategy, WriteStrategy::NonIntrusive);
        assert_eq!(patched.len(), bytes.len());

        let (back, _) = ExifData::parse(&patched).unwrap();
        assert_eq!(
            back.get("Exif.Image.Software").unwrap().value(),
            &Value::Ascii("GI".into())
        );
        assert_eq!(
            back.get("Exif.Photo.FNumber").unwrap().value(),
            &Value::Rational(vec![Rational::new(4, 1)])
        );
    }

    #[test]
    fn growing_values_rebuild() {
        logger();
        let bytes = sample().to_bytes().unwrap();
        let (mut exif, _) = ExifData::parse(&bytes).unwrap();

        let long = "x".repeat(300);
        exif.set(key("Exif.Image.Software"), Value::Ascii(long.clone()));

        let (rebuilt, strategy) = serialize(&exif, &mut Vec::new()).unwrap();
        assert_eq!(strategy, WriteStrategy::Intrusive);

        let (back, _) = ExifData::parse(&rebuilt).unwrap();
        assert_eq!(back.get("Exif.Image.Software").unwrap().value(), &Value::Ascii(long));
        assert_eq!(back.len(), exif.len());
    }

    #[test]
    fn non_intrusive_can_be_turned_off() {
        logger();
        let bytes = sample().to_bytes().unwrap();
        let (mut exif, _) = ExifData::parse(&bytes).unwrap();
        exif.set(key("Exif.Image.Software"), Value::Ascii("GI".into()));

        let options = WriteOptions {
            non_intrusive: false,
            ..WriteOptions::default()
        };
        let (_, strategy) = serialize_with(&exif, &options, &mut Vec::new()).unwrap();
        assert_eq!(strategy, WriteStrategy::Intrusive);
    }

    #[test]
    fn thumbnails_are_carried_along() {
        logger();
        let mut exif = sample();
        exif.set(key("Exif.Thumbnail.JPEGInterchangeFormat"), Value::Long(vec![0]));
        exif.set(key("Exif.Thumbnail.JPEGInterchangeFormatLength"), Value::Long(vec![0]));
        exif.data_areas.push(DataArea {
            group: IfdId::Thumbnail,
            offset_tag: 0x0201,
            count_tag: 0x0202,
            parts: vec![b"\xff\xd8 tiny jpeg \xff\xd9".to_vec()],
        });

        let bytes = exif.to_bytes().unwrap();
        let (back, warnings) = ExifData::parse(&bytes).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(back.thumbnail(), Some(b"\xff\xd8 tiny jpeg \xff\xd9".as_slice()));

        // erasing the offset drops the thumbnail
        let mut erased = back.clone();
        erased.erase(&key("Exif.Thumbnail.JPEGInterchangeFormat"));
        let (back, _) = ExifData::parse(&erased.to_bytes().unwrap()).unwrap();
        assert_eq!(back.thumbnail(), None);
    }

    #[test]
    fn canon_makernotes_are_created_and_patched() {
        logger();
        let mut exif = sample();
        exif.set_str("Exif.Canon.OwnerName", "Ravey McRaveface").unwrap();
        exif.set(ExifKey::new(IfdId::CanonCs, 0x0001), Value::SShort(vec![2]));
        exif.set(ExifKey::new(IfdId::CanonCs, 0x0016), Value::SShort(vec![747]));

        let mut warnings = Vec::new();
        let (bytes, _) = serialize(&exif, &mut warnings).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");

        let (mut back, warnings) = ExifData::parse(&bytes).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(
            back.get("Exif.Canon.OwnerName").unwrap().value(),
            &Value::Ascii("Ravey McRaveface".into())
        );
        assert_eq!(
            back.find_key(&ExifKey::new(IfdId::CanonCs, 0x0016)).unwrap().value(),
            &Value::SShort(vec![747])
        );
        assert!(back.get("Exif.MakerNote.ByteOrder").is_some());

        // same-size element edits stay in place
        back.set(ExifKey::new(IfdId::CanonCs, 0x0001), Value::SShort(vec![1]));
        let (patched, strategy) = serialize(&back, &mut Vec::new()).unwrap();
        assert_eq!(strategy, WriteStrategy::NonIntrusive);
        assert_eq!(patched.len(), bytes.len());

        let (again, _) = ExifData::parse(&patched).unwrap();
        assert_eq!(
            again.find_key(&ExifKey::new(IfdId::CanonCs, 0x0001)).unwrap().value(),
            &Value::SShort(vec![1])
        );
    }

    #[test]
    fn other_makernotes_cant_be_invented() {
        logger();
        let mut exif = sample();
        exif.set(ExifKey::new(IfdId::Nikon3, 0x0002), Value::Short(vec![0, 200]));

        let mut warnings = Vec::new();
        let (bytes, _) = serialize(&exif, &mut warnings).unwrap();
        assert_eq!(warnings.len(), 1);

        let (back, _) = ExifData::parse(&bytes).unwrap();
        assert!(back.iter().all(|d| !d.group().is_makernote()));
    }

    #[test]
    fn unknown_types_keep_their_id() {
        logger();
        let mut exif = ExifData::new();
        exif.set(
            ExifKey::new(IfdId::Image, 0xC000),
            Value::Unknown {
                type_id: 99,
                bytes: vec![1, 2, 3, 4, 5, 6],
            },
        );

        let (back, warnings) = ExifData::parse(&exif.to_bytes().unwrap()).unwrap();
        assert_eq!(warnings.len(), 1); // "unknown Exif (TIFF) type"
        assert_eq!(
            back.find_key(&ExifKey::new(IfdId::Image, 0xC000)).unwrap().value(),
            &Value::Unknown {
                type_id: 99,
                bytes: vec![1, 2, 3, 4, 5, 6]
            }
        );
    }
}
