//! Exif is a media metadata format primarily used by cameras.
//!
//! Unlike XMP, it's a structured binary format, so, while it's not as
//! "extensible," Exif does allow for proprietary extensions that are just
//! blobs of bytes.
//!
//! However, it's somewhat self-describing! Each entry in an IFD
//! (Image File Directory) contains a tag ID, primitive data type, and count
//! saying how many primitives are stored. That means we can round-trip
//! proprietary extensions without knowing how they're structured.
//!
//! Here, all of that is flattened into [`ExifData`]: an ordered list of
//! [`Exifdatum`], each keyed like `Exif.Photo.FNumber`. Vendor MakerNotes we
//! recognize are split into their own groups (like `Exif.Canon.*`).

use std::{str::FromStr, sync::Arc};

pub use imgmeta_types::exif::{
    Charset, Comment, Endianness, PrimitiveTy, Rational, SRational, Value, ifd::IfdId,
};

use imgmeta_types::exif::tags::{self, TagInfo};
use winnow::{
    Parser as _,
    binary::{u16, u32},
    error::EmptyError,
    token::take,
};

use self::{
    error::{ExifFatalError, ExifFatalResult},
    ifd::{IfdReader, RawEntry},
    makernote::{ArrayLayout, MakerNoteLayout},
    value::{WireValue as _, winnow_order},
};
use crate::error::{Error, Warning, warn, warn_lossy};

pub mod error;
pub(crate) mod ifd;
pub(crate) mod makernote;
pub mod print;
pub mod value;
pub(crate) mod writer;

/// Identifies one Exif tag in one group.
///
/// Its text form is `Exif.<group>.<tag name>`.
///
/// ```
/// use imgmeta::exif::{ExifKey, IfdId};
///
/// let key: ExifKey = "Exif.Photo.FNumber".parse().unwrap();
/// assert_eq!(key.group(), IfdId::Photo);
/// assert_eq!(key.tag(), 0x829D);
/// assert_eq!(key.to_string(), "Exif.Photo.FNumber");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExifKey {
    group: IfdId,
    tag: u16,
}

impl ExifKey {
    pub const fn new(group: IfdId, tag: u16) -> Self {
        Self { group, tag }
    }

    pub const fn group(&self) -> IfdId {
        self.group
    }

    pub const fn tag(&self) -> u16 {
        self.tag
    }

    /// The tag's name, or `0xNNNN` if it isn't registered.
    pub fn tag_name(&self) -> String {
        tags::tag_name(self.group, self.tag).into_owned()
    }

    /// What the registry knows about this tag.
    pub fn info(&self) -> Option<&'static TagInfo> {
        tags::find(self.group, self.tag)
    }
}

impl core::fmt::Display for ExifKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Exif.{}.{}",
            self.group,
            tags::tag_name(self.group, self.tag)
        )
    }
}

impl FromStr for ExifKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidKey { key: s.to_string() };

        let mut parts = s.splitn(3, '.');
        let (Some("Exif"), Some(group), Some(tag)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }

        let group = IfdId::from_group_name(group).ok_or_else(invalid)?;
        let tag = tags::tag_id(group, tag).ok_or_else(|| Error::UnknownKey { key: s.to_string() })?;

        Ok(Self { group, tag })
    }
}

/// Where a datum came from in the original blob.
///
/// The non-intrusive writer uses this to patch values in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Origin {
    /// A plain IFD entry.
    Entry {
        /// Absolute position of the 12-byte entry.
        entry: usize,

        /// Absolute position of the value bytes.
        data: usize,

        /// How many bytes the value may take without moving.
        slot: usize,

        type_id: u16,
    },

    /// One element of a decoded MakerNote array.
    Element { array: usize, element: usize },
}

/// One piece of Exif metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Exifdatum {
    key: ExifKey,
    value: Value,
    pub(crate) origin: Option<Origin>,
}

impl Exifdatum {
    pub fn new(key: ExifKey, value: Value) -> Self {
        Self {
            key,
            value,
            origin: None,
        }
    }

    pub fn key(&self) -> ExifKey {
        self.key
    }

    pub fn group(&self) -> IfdId {
        self.key.group
    }

    pub fn tag(&self) -> u16 {
        self.key.tag
    }

    pub fn tag_name(&self) -> String {
        self.key.tag_name()
    }

    /// The registry's short label, if the tag is known.
    pub fn title(&self) -> Option<&'static str> {
        self.key.info().map(|i| i.title)
    }

    /// The registry's long description, if the tag is known.
    pub fn description(&self) -> Option<&'static str> {
        self.key.info().map(|i| i.desc)
    }

    pub fn type_name(&self) -> String {
        self.value.type_name()
    }

    pub fn count(&self) -> usize {
        self.value.count()
    }

    pub fn size(&self) -> usize {
        self.value.size()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Component `i` as an integer.
    ///
    /// Ascii that isn't a number reads as `0`, and that's recorded in
    /// `warnings`.
    pub fn to_long(&self, i: usize, warnings: &mut Vec<Warning>) -> Option<i64> {
        self.value.try_to_long(i).unwrap_or_else(|e| {
            warn(warnings, format!("`{}`: {e}; using zero", self.key));
            Some(0)
        })
    }

    /// The interpreted value, using the other datums in `data` for context.
    pub fn print(&self, data: &ExifData) -> String {
        print::print(self, data)
    }
}

/// Bytes outside the IFD tree that an offset/length pair points at, like
/// image strips or the thumbnail.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DataArea {
    pub group: IfdId,
    pub offset_tag: u16,
    pub count_tag: u16,
    pub parts: Vec<Vec<u8>>,
}

/// What we remember about the blob an [`ExifData`] was read from.
#[derive(Debug, PartialEq)]
pub(crate) struct ExifSource {
    pub blob: Vec<u8>,
    pub order: Endianness,

    /// The datums as they were right after parsing.
    pub snapshot: Vec<Exifdatum>,

    pub makernote: Option<MakerNoteLayout>,
    pub arrays: Vec<ArrayLayout>,
}

/// All the Exif metadata in an image, in file order.
///
/// Keys can repeat: `add` always appends, while `set` changes the first
/// match (or appends if there's none).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExifData {
    datums: Vec<Exifdatum>,
    pub(crate) byte_order: Option<Endianness>,
    pub(crate) data_areas: Vec<DataArea>,
    pub(crate) source: Option<Arc<ExifSource>>,
}

impl ExifData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a datum, even if its key is already present.
    pub fn add(&mut self, datum: Exifdatum) {
        self.datums.push(datum);
    }

    /// Changes the first datum with this key, or appends a new one.
    pub fn set(&mut self, key: ExifKey, value: Value) {
        match self.datums.iter_mut().find(|d| d.key == key) {
            Some(d) => d.value = value,
            None => self.datums.push(Exifdatum::new(key, value)),
        }
    }

    /// Like [`ExifData::set`], but parses both the key and the value.
    ///
    /// The value's type comes from an existing datum, then from the
    /// registry. Unknown tags default to `Undefined`.
    pub fn set_str(&mut self, key: &str, text: &str) -> Result<(), Error> {
        let key: ExifKey = key.parse()?;
        let ty = self.ty_for(key);
        self.set(key, Value::from_str_typed(ty, text)?);
        Ok(())
    }

    /// The type a new value for `key` should have.
    pub(crate) fn ty_for(&self, key: ExifKey) -> PrimitiveTy {
        self.find_key(&key)
            .and_then(|d| d.value.ty())
            .or_else(|| key.info().map(|i| i.ty))
            .unwrap_or(PrimitiveTy::Undefined)
    }

    /// Removes every datum with this key, returning how many were removed.
    pub fn erase(&mut self, key: &ExifKey) -> usize {
        let before = self.datums.len();
        self.datums.retain(|d| d.key != *key);
        before - self.datums.len()
    }

    /// Finds the first datum with this key.
    pub fn find_key(&self, key: &ExifKey) -> Option<&Exifdatum> {
        self.datums.iter().find(|d| d.key == *key)
    }

    /// Finds the first datum with this key, given as text.
    pub fn get(&self, key: &str) -> Option<&Exifdatum> {
        let key: ExifKey = key.parse().ok()?;
        self.find_key(&key)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Exifdatum> {
        self.datums.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Exifdatum> {
        self.datums.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.datums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datums.is_empty()
    }

    /// Removes everything, including the thumbnail and other data areas.
    pub fn clear(&mut self) {
        self.datums.clear();
        self.data_areas.clear();
    }

    /// Sorts by group, then tag. Equal keys keep their order.
    pub fn sort_by_key(&mut self) {
        self.datums.sort_by_key(|d| d.key);
    }

    /// The byte order used for writing.
    pub fn byte_order(&self) -> Endianness {
        self.byte_order.unwrap_or_default()
    }

    pub fn set_byte_order(&mut self, order: Endianness) {
        self.byte_order = Some(order);
    }

    /// The thumbnail's JPEG bytes from IFD 1, if there is one.
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.data_areas
            .iter()
            .find(|a| a.group == IfdId::Thumbnail && a.offset_tag == 0x0201)
            .and_then(|a| a.parts.first())
            .map(Vec::as_slice)
    }

    /// The blob this data was read from.
    pub fn raw(&self) -> Option<&[u8]> {
        self.source.as_ref().map(|s| s.blob.as_slice())
    }

    /// Whether nothing changed since parsing.
    pub(crate) fn is_pristine(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(|s| s.snapshot == self.datums && self.byte_order() == s.order)
    }

    /// Serializes to a TIFF blob, choosing the cheapest strategy that works.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        writer::serialize(self, &mut Vec::new()).map(|(bytes, _)| bytes)
    }

    /// Parses a TIFF blob (starting at its byte order marker).
    ///
    /// Problems that don't stop parsing are returned as warnings.
    pub fn parse(blob: &[u8]) -> ExifFatalResult<(Self, Vec<Warning>)> {
        let input = &mut &blob[..];
        let order = parse_blob_endianness(input)?;
        parse_tiff_magic_number(input, order)?;
        let first = parse_tiff_header_offset(input, order, blob.len())?;

        let mut reader = IfdReader::new(blob);
        reader.read_chain(first as usize, order);
        if reader.nodes.is_empty() {
            log::error!("The first IFD couldn't be read. Giving up on this Exif.");
            return Err(ExifFatalError::FirstIfdUnreadable);
        }

        // the makernote needs `Make` and `Model`, so it's read after the
        // main tree
        let make = ascii_entry(&reader, IfdId::Image, 0x010F);
        let model = ascii_entry(&reader, IfdId::Image, 0x0110);

        let mn_entry: Option<RawEntry> = reader
            .nodes
            .iter()
            .find(|n| n.group == IfdId::Photo)
            .and_then(|n| n.entry(tags::MAKERNOTE_TAG))
            .cloned();

        let makernote = mn_entry
            .as_ref()
            .and_then(|e| makernote::decode(&mut reader, e, order, &make));
        let arrays = makernote
            .as_ref()
            .map(|mn| makernote::decode_arrays(&reader.nodes[mn.node], &model))
            .unwrap_or_default();

        let mut datums = Vec::new();
        for node in &reader.nodes {
            for entry in &node.entries {
                // the makernote is split into its own groups
                if node.group == IfdId::Photo && entry.tag == tags::MAKERNOTE_TAG {
                    if let Some(mn) = &makernote {
                        datums.push(Exifdatum::new(
                            ExifKey::new(IfdId::MakerNote, 0x0001),
                            Value::Long(vec![mn.pos as u32]),
                        ));
                        datums.push(Exifdatum::new(
                            ExifKey::new(IfdId::MakerNote, 0x0002),
                            Value::Ascii(
                                String::from_utf8_lossy(&mn.order.marker()).into_owned(),
                            ),
                        ));
                        continue;
                    }
                }

                // arrays show up as their elements instead
                if let Some((index, array)) = arrays
                    .iter()
                    .enumerate()
                    .find(|(_, a)| a.parent == node.group && a.tag == entry.tag)
                {
                    for (element, tag, value) in array.values() {
                        datums.push(Exifdatum {
                            key: ExifKey::new(array.group, tag),
                            value,
                            origin: Some(Origin::Element {
                                array: index,
                                element,
                            }),
                        });
                    }
                    continue;
                }

                datums.push(Exifdatum {
                    key: ExifKey::new(node.group, entry.tag),
                    value: entry_value(node.group, entry, node.order),
                    origin: Some(Origin::Entry {
                        entry: entry.pos,
                        data: entry.data_pos,
                        slot: entry.slot(),
                        type_id: entry.type_id,
                    }),
                });
            }
        }

        let mut warnings = core::mem::take(&mut reader.warnings);
        let data_areas = collect_data_areas(&reader, blob, &mut warnings);

        log::debug!(
            "parsed `{}` Exif datums from `{}` IFDs with `{}` warnings",
            datums.len(),
            reader.nodes.len(),
            warnings.len()
        );

        let source = ExifSource {
            blob: blob.to_vec(),
            order,
            snapshot: datums.clone(),
            makernote,
            arrays,
        };

        Ok((
            Self {
                datums,
                byte_order: Some(order),
                data_areas,
                source: Some(Arc::new(source)),
            },
            warnings,
        ))
    }
}

impl<'a> IntoIterator for &'a ExifData {
    type Item = &'a Exifdatum;
    type IntoIter = core::slice::Iter<'a, Exifdatum>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The value of an entry, with comments decoded.
fn entry_value(group: IfdId, entry: &RawEntry, order: Endianness) -> Value {
    let is_comment = tags::find(group, entry.tag).is_some_and(|i| i.ty == PrimitiveTy::Comment);

    if is_comment && entry.type_id == 7 {
        return Value::Comment(Comment::decode(&entry.data, order));
    }

    Value::parse(&entry.data, entry.type_id, entry.available(), order)
}

/// Reads an Ascii entry's text, or nothing.
fn ascii_entry(reader: &IfdReader<'_>, group: IfdId, tag: u16) -> String {
    reader
        .nodes
        .iter()
        .find(|n| n.group == group)
        .and_then(|n| n.entry(tag).map(|e| (e, n.order)))
        .map(|(e, order)| match Value::parse(&e.data, e.type_id, e.available(), order) {
            Value::Ascii(s) => s,
            _ => String::new(),
        })
        .unwrap_or_default()
}

/// Copies out every strip, tile, and thumbnail.
fn collect_data_areas(
    reader: &IfdReader<'_>,
    blob: &[u8],
    warnings: &mut Vec<Warning>,
) -> Vec<DataArea> {
    let mut areas = Vec::new();

    for node in reader.nodes.iter().filter(|n| n.group.table() == IfdId::Image) {
        for &(offset_tag, count_tag) in tags::DATA_AREAS {
            let (Some(offsets), Some(counts)) = (node.entry(offset_tag), node.entry(count_tag))
            else {
                continue;
            };

            let offsets = offsets.integers(node.order);
            let counts = counts.integers(node.order);

            let mut parts = Vec::with_capacity(offsets.len());
            for (offset, count) in offsets.iter().zip(counts.iter()) {
                let start = node.base + *offset as usize;
                match blob.get(start..start + *count as usize) {
                    Some(part) => parts.push(part.to_vec()),
                    None => {
                        warn_lossy(
                            warnings,
                            format!(
                                "`Exif.{}.{}` points out of range (`{offset}` + `{count}`); dropped",
                                node.group,
                                tags::tag_name(node.group, offset_tag)
                            ),
                        );
                        parts.push(Vec::new());
                    }
                }
            }

            areas.push(DataArea {
                group: node.group,
                offset_tag,
                count_tag,
                parts,
            });
        }
    }

    areas
}

/// Finds the endianness of the Exif blob.
fn parse_blob_endianness(input: &mut &[u8]) -> ExifFatalResult<Endianness> {
    let input_len = input.len();

    // ensure we've got two good bytes
    log::trace!("Looking for the BOM bytes...");
    let two_ascii_bytes: &[u8] = take(2_usize)
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Couldn't find endianness marker!");
            ExifFatalError::NoByteOrderMarker { len: input_len }
        })?;

    match two_ascii_bytes {
        b"II" => Ok(Endianness::Little).inspect(|f| log::trace!("It's LE: {f:?}")),
        b"MM" => Ok(Endianness::Big).inspect(|f| log::trace!("It's BE: {f:?}")),

        // found a weird bom!
        found => {
            let e = ExifFatalError::WeirdByteOrderMarker {
                found: [found[0], found[1]],
            };
            log::error!("Couldn't parse out Exif! err: {e}");
            Err(e)
        }
    }
}

/// The magic numbers we accept after the byte order marker.
///
/// Plain TIFF uses `42`. Olympus ORF uses `RO`/`OR`, and Panasonic RW2 uses
/// `U`.
const TIFF_MAGIC_NUMBERS: &[u16] = &[42, 0x4F52, 0x5352, 0x0055];

/// Ensures we're working with the correct kind of file.
fn parse_tiff_magic_number(input: &mut &[u8], order: Endianness) -> ExifFatalResult<()> {
    log::trace!("Getting magic number...");
    let magic_number: u16 = u16(winnow_order(order))
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Couldn't find TIFF magic number!");
            ExifFatalError::NoTiffMagicNumber
        })?;

    if !TIFF_MAGIC_NUMBERS.contains(&magic_number) {
        log::error!("Magic number wasn't for TIFF. got: `{magic_number}`");
        return Err(ExifFatalError::MagicNumberWasntTiff {
            found: magic_number,
        });
    }

    log::trace!("Magic number was good!");
    Ok(())
}

/// Grabs the offset of IFD 0, measured from the start of the blob.
fn parse_tiff_header_offset(
    input: &mut &[u8],
    order: Endianness,
    blob_len: usize,
) -> ExifFatalResult<u32> {
    let offset = u32(winnow_order(order))
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Didn't find a TIFF header offset!");
            ExifFatalError::NoTiffHeaderOffset
        })
        .inspect(|offset| log::trace!("found offset: `{offset}`"))?;

    if offset < 8 || offset as usize >= blob_len {
        log::error!("Exif blob placed offset out of bounds! Can't continue parsing.");
        return Err(ExifFatalError::HeaderOffsetOutOfBounds { offset });
    }

    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, util::logger};

    /// A big-endian TIFF: IFD 0 with `Make`, pointing to an Exif IFD with a
    /// `UserComment`.
    fn sample() -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(b"MM\0\x2a\0\0\0\x08");

        // ifd 0 at 8: two entries, ends at 8 + 2 + 24 + 4 = 38
        v.extend_from_slice(&2_u16.to_be_bytes());
        v.extend_from_slice(&[0x01, 0x0F, 0, 2, 0, 0, 0, 4]); // Make, 4 ascii
        v.extend_from_slice(b"RAV\0");
        v.extend_from_slice(&[0x87, 0x69, 0, 4, 0, 0, 0, 1]); // exif pointer
        v.extend_from_slice(&38_u32.to_be_bytes());
        v.extend_from_slice(&0_u32.to_be_bytes());

        // exif ifd at 38: one entry, ends at 38 + 18 = 56
        v.extend_from_slice(&1_u16.to_be_bytes());
        v.extend_from_slice(&[0x92, 0x86, 0, 7, 0, 0, 0, 13]); // UserComment
        v.extend_from_slice(&56_u32.to_be_bytes());
        v.extend_from_slice(&0_u32.to_be_bytes());

        v.extend_from_slice(b"ASCII\0\0\0hello");
        v
    }

    #[test]
    fn keys_parse_and_print() {
        logger();

        let key: ExifKey = "Exif.GPSInfo.GPSLatitude".parse().unwrap();
        assert_eq!(key, ExifKey::new(IfdId::GpsInfo, 0x0002));
        assert_eq!(key.to_string(), "Exif.GPSInfo.GPSLatitude");

        let unknown: ExifKey = "Exif.Image.0xbeef".parse().unwrap();
        assert_eq!(unknown.to_string(), "Exif.Image.0xbeef");

        let err = "Exif.Photo.NotATag".parse::<ExifKey>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownKey);

        for bad in ["Iptc.Photo.FNumber", "Exif.Photo", "Exif.Nope.FNumber", "Exif.Photo.F-Number"] {
            let err = bad.parse::<ExifKey>().unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidKey, "{bad}");
        }
    }

    #[test]
    fn parses_tree_and_comment() {
        logger();
        let blob = sample();
        let (exif, warnings) = ExifData::parse(&blob).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");

        assert_eq!(exif.byte_order(), Endianness::Big);
        assert_eq!(exif.len(), 3);
        assert_eq!(
            exif.get("Exif.Image.Make").unwrap().value(),
            &Value::Ascii("RAV".into())
        );
        assert_eq!(
            exif.get("Exif.Photo.UserComment").unwrap().value(),
            &Value::Comment(Comment::new(Charset::Ascii, "hello"))
        );

        // fresh from the parser, so nothing changed
        assert!(exif.is_pristine());
        assert_eq!(exif.raw(), Some(blob.as_slice()));
    }

    #[test]
    fn facade_operations() {
        logger();
        let (mut exif, _) = ExifData::parse(&sample()).unwrap();
        let make: ExifKey = "Exif.Image.Make".parse().unwrap();

        // set is idempotent
        exif.set(make, Value::Ascii("Canon".into()));
        exif.set(make, Value::Ascii("Canon".into()));
        assert_eq!(exif.len(), 3);
        assert!(!exif.is_pristine());

        // add makes duplicates
        exif.add(Exifdatum::new(make, Value::Ascii("Nikon".into())));
        assert_eq!(exif.len(), 4);
        assert_eq!(exif.find_key(&make).unwrap().value(), &Value::Ascii("Canon".into()));

        assert_eq!(exif.erase(&make), 2);
        assert!(exif.find_key(&make).is_none());

        exif.set_str("Exif.Photo.FNumber", "28/10").unwrap();
        assert_eq!(
            exif.get("Exif.Photo.FNumber").unwrap().value(),
            &Value::Rational(vec![Rational::new(28, 10)])
        );

        exif.sort_by_key();
        let groups: Vec<_> = exif.iter().map(|d| d.group()).collect();
        assert!(groups.is_sorted());

        exif.clear();
        assert!(exif.is_empty());
    }

    #[test]
    fn fatal_header_errors() {
        logger();
        assert_eq!(
            ExifData::parse(b"I").unwrap_err(),
            ExifFatalError::NoByteOrderMarker { len: 1 }
        );
        assert_eq!(
            ExifData::parse(b"XX\0*").unwrap_err(),
            ExifFatalError::WeirdByteOrderMarker { found: *b"XX" }
        );
        assert_eq!(
            ExifData::parse(b"II\x2b\0\x08\0\0\0").unwrap_err(),
            ExifFatalError::MagicNumberWasntTiff { found: 0x2b }
        );
        assert_eq!(
            ExifData::parse(b"II\x2a\0\xff\0\0\0").unwrap_err(),
            ExifFatalError::HeaderOffsetOutOfBounds { offset: 0xff }
        );

        // the first IFD runs off the end
        assert_eq!(
            ExifData::parse(b"II\x2a\0\x08\0\0\0\x09\0").unwrap_err(),
            ExifFatalError::FirstIfdUnreadable
        );
    }

    #[test]
    fn orf_and_rw2_magic_numbers() {
        logger();
        let mut blob = sample();
        blob[2..4].copy_from_slice(b"OR");
        assert!(ExifData::parse(&blob).is_ok());

        let mut le = b"IIU\0\x08\0\0\0".to_vec();
        le.extend_from_slice(&[0, 0, 0, 0, 0, 0]); // empty ifd
        assert!(ExifData::parse(&le).is_ok());
    }
}
