//! The HEIF `meta` box, which lists "items" and where to find their bytes.
//!
//! Exif and XMP are items, like the image tiles are. To get them out, we
//! need three boxes:
//!
//! - `iinf` says what each item is,
//! - `iloc` says where each item's bytes are,
//! - and `idat` holds bytes for items that live inside the `meta` box.
//!
//! `pitm`, `iref` and `iprp` aren't needed to find metadata, but we read
//! them for structure printing.

use winnow::{
    Parser as _,
    binary::{be_u8, be_u16, be_u32, be_u64},
    error::EmptyError,
    token::take,
};

use crate::{
    error::{Warning, warn},
    providers::shared::bmff::{BmffBox, boxes, find, fourcc},
};

type PResult<T> = Result<T, EmptyError>;

/// What an item is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInfo {
    pub id: u32,
    pub item_type: [u8; 4],
    pub name: String,

    /// Only for `mime` items.
    pub content_type: Option<String>,
}

/// Where an item's bytes come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstructionMethod {
    /// Offsets are from the start of the file.
    File,

    /// Offsets are into the `idat` box.
    Idat,

    /// Offsets are into other items. We don't follow these.
    Item,
}

/// Where an item is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemLocation {
    pub id: u32,
    pub method: ConstructionMethod,
    pub base_offset: u64,

    /// `(offset, length)` pairs. A length of zero means "all the rest".
    pub extents: Vec<(u64, u64)>,
}

/// A reference from one item to others, like `cdsc` (describes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemReference {
    pub ref_type: [u8; 4],
    pub from: u32,
    pub to: Vec<u32>,
}

/// The interesting parts of a `meta` box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaBox<'i> {
    pub handler: Option<[u8; 4]>,
    pub primary: Option<u32>,
    pub infos: Vec<ItemInfo>,
    pub locations: Vec<ItemLocation>,
    pub references: Vec<ItemReference>,

    /// `(width, height)` from each `ispe` property.
    pub sizes: Vec<(u32, u32)>,

    /// The `idat` payload.
    pub idat: Option<&'i [u8]>,
}

/// `FullBox` fields: version and flags.
fn full_box(input: &mut &[u8]) -> PResult<(u8, u32)> {
    let version = be_u8::<_, EmptyError>.parse_next(input)?;
    let flags = take::<_, _, EmptyError>(3_usize)
        .parse_next(input)
        .map(|f: &[u8]| u32::from_be_bytes([0, f[0], f[1], f[2]]))?;
    Ok((version, flags))
}

fn nul_terminated(input: &mut &[u8]) -> PResult<String> {
    let end = input.iter().position(|b| *b == 0).unwrap_or(input.len());
    let (s, rest) = input.split_at(end);
    // skip the NUL itself. some writers leave it off the last string
    *input = rest.get(1..).unwrap_or(rest);
    Ok(String::from_utf8_lossy(s).into_owned())
}

/// Reads an unsigned integer of 0, 4, or 8 bytes (`iloc` field sizes).
fn sized(input: &mut &[u8], size: u8) -> PResult<u64> {
    match size {
        0 => Ok(0),
        4 => be_u32::<_, EmptyError>.parse_next(input).map(u64::from),
        8 => be_u64::<_, EmptyError>.parse_next(input),
        _ => Err(EmptyError),
    }
}

fn item_id(input: &mut &[u8], wide: bool) -> PResult<u32> {
    if wide {
        be_u32::<_, EmptyError>.parse_next(input)
    } else {
        be_u16::<_, EmptyError>.parse_next(input).map(u32::from)
    }
}

fn parse_pitm(mut input: &[u8]) -> PResult<u32> {
    let (version, _) = full_box(&mut input)?;
    item_id(&mut input, version != 0)
}

fn parse_infe(mut input: &[u8]) -> PResult<ItemInfo> {
    let (version, _) = full_box(&mut input)?;

    if version < 2 {
        let id = item_id(&mut input, false)?;
        let _protection = be_u16::<_, EmptyError>.parse_next(&mut input)?;
        let name = nul_terminated(&mut input)?;
        let content_type = nul_terminated(&mut input)?;
        return Ok(ItemInfo {
            id,
            item_type: *b"\0\0\0\0",
            name,
            content_type: Some(content_type),
        });
    }

    let id = item_id(&mut input, version != 2)?;
    let _protection = be_u16::<_, EmptyError>.parse_next(&mut input)?;
    let item_type: [u8; 4] = take::<_, _, EmptyError>(4_usize)
        .parse_next(&mut input)?
        .try_into()
        .map_err(|_| EmptyError)?;
    let name = nul_terminated(&mut input)?;
    let content_type = if &item_type == b"mime" {
        Some(nul_terminated(&mut input)?)
    } else {
        None
    };

    Ok(ItemInfo {
        id,
        item_type,
        name,
        content_type,
    })
}

fn parse_iinf(b: &BmffBox<'_>, warnings: &mut Vec<Warning>) -> Vec<ItemInfo> {
    let mut input = b.payload;
    let Ok((version, _)) = full_box(&mut input) else {
        warn(warnings, "`iinf` box is too short");
        return Vec::new();
    };
    let count = if version == 0 {
        be_u16::<_, EmptyError>.parse_next(&mut input).map(u32::from)
    } else {
        be_u32::<_, EmptyError>.parse_next(&mut input)
    };
    let Ok(count) = count else {
        warn(warnings, "`iinf` box has no entry count");
        return Vec::new();
    };

    let offset = b.payload_offset() + (b.payload.len() - input.len());
    let infos: Vec<ItemInfo> = boxes(input, offset, warnings)
        .iter()
        .filter(|e| e.header.box_type.is(b"infe"))
        .filter_map(|e| match parse_infe(e.payload) {
            Ok(info) => Some(info),
            Err(_) => {
                warn(warnings, format!("unreadable `infe` box at `{}`", e.offset));
                None
            }
        })
        .collect();

    if infos.len() != count as usize {
        log::debug!("`iinf` said `{count}` items, but `{}` were read", infos.len());
    }
    infos
}

fn parse_iloc(mut input: &[u8]) -> PResult<Vec<ItemLocation>> {
    let (version, _) = full_box(&mut input)?;
    let sizes = be_u8::<_, EmptyError>.parse_next(&mut input)?;
    let (offset_size, length_size) = (sizes >> 4, sizes & 0x0f);
    let sizes = be_u8::<_, EmptyError>.parse_next(&mut input)?;
    let base_offset_size = sizes >> 4;
    let index_size = if matches!(version, 1 | 2) {
        sizes & 0x0f
    } else {
        0
    };

    let count = if version < 2 {
        be_u16::<_, EmptyError>.parse_next(&mut input).map(u32::from)?
    } else {
        be_u32::<_, EmptyError>.parse_next(&mut input)?
    };

    let mut locations = Vec::new();
    for _ in 0..count {
        let id = item_id(&mut input, version >= 2)?;
        let method = if matches!(version, 1 | 2) {
            match be_u16::<_, EmptyError>.parse_next(&mut input)? & 0x0f {
                0 => ConstructionMethod::File,
                1 => ConstructionMethod::Idat,
                _ => ConstructionMethod::Item,
            }
        } else {
            ConstructionMethod::File
        };
        let _data_reference_index = be_u16::<_, EmptyError>.parse_next(&mut input)?;
        let base_offset = sized(&mut input, base_offset_size)?;

        let extent_count = be_u16::<_, EmptyError>.parse_next(&mut input)?;
        let mut extents = Vec::with_capacity(extent_count as usize);
        for _ in 0..extent_count {
            let _index = sized(&mut input, index_size)?;
            let offset = sized(&mut input, offset_size)?;
            let length = sized(&mut input, length_size)?;
            extents.push((offset, length));
        }

        locations.push(ItemLocation {
            id,
            method,
            base_offset,
            extents,
        });
    }

    Ok(locations)
}

fn parse_iref(b: &BmffBox<'_>, warnings: &mut Vec<Warning>) -> Vec<ItemReference> {
    let mut input = b.payload;
    let Ok((version, _)) = full_box(&mut input) else {
        warn(warnings, "`iref` box is too short");
        return Vec::new();
    };

    let offset = b.payload_offset() + 4;
    boxes(input, offset, warnings)
        .iter()
        .filter_map(|r| {
            let mut p = r.payload;
            let from = item_id(&mut p, version != 0).ok()?;
            let count = be_u16::<_, EmptyError>.parse_next(&mut p).ok()?;
            let to = (0..count)
                .map(|_| item_id(&mut p, version != 0))
                .collect::<PResult<Vec<u32>>>()
                .ok()?;
            let super::BoxType::Id(ref_type) = r.header.box_type else {
                return None;
            };
            Some(ItemReference { ref_type, from, to })
        })
        .collect()
}

fn parse_ispe(mut input: &[u8]) -> PResult<(u32, u32)> {
    let _ = full_box(&mut input)?;
    Ok((be_u32::<_, EmptyError>.parse_next(&mut input)?, be_u32::<_, EmptyError>.parse_next(&mut input)?))
}

impl<'i> MetaBox<'i> {
    /// Reads a `meta` box's children.
    pub fn new(meta: &BmffBox<'i>, warnings: &mut Vec<Warning>) -> Self {
        let children = meta.children(warnings);
        let mut out = MetaBox::default();

        if let Some(hdlr) = find(&children, b"hdlr") {
            // version/flags, then `pre_defined`, then the handler type
            out.handler = hdlr.payload.get(8..12).and_then(|h| h.try_into().ok());
        }

        if let Some(pitm) = find(&children, b"pitm") {
            match parse_pitm(pitm.payload) {
                Ok(id) => out.primary = Some(id),
                Err(_) => warn(warnings, "unreadable `pitm` box"),
            }
        }

        if let Some(iinf) = find(&children, b"iinf") {
            out.infos = parse_iinf(iinf, warnings);
        }

        if let Some(iloc) = find(&children, b"iloc") {
            match parse_iloc(iloc.payload) {
                Ok(locations) => out.locations = locations,
                Err(_) => warn(warnings, "unreadable `iloc` box"),
            }
        }

        if let Some(iref) = find(&children, b"iref") {
            out.references = parse_iref(iref, warnings);
        }

        if let Some(iprp) = find(&children, b"iprp")
            && let Some(ipco) = find(&iprp.children(warnings), b"ipco")
        {
            out.sizes = ipco
                .children(warnings)
                .iter()
                .filter(|p| p.header.box_type.is(b"ispe"))
                .filter_map(|p| parse_ispe(p.payload).ok())
                .collect();
        }

        out.idat = find(&children, b"idat").map(|b| b.payload);

        log::debug!(
            "`meta` has `{}` items and `{}` locations",
            out.infos.len(),
            out.locations.len()
        );
        out
    }

    /// Finds the first item of a type, like `Exif`.
    pub fn item_of_type(&self, item_type: &[u8; 4]) -> Option<&ItemInfo> {
        self.infos.iter().find(|i| &i.item_type == item_type)
    }

    /// Finds the first `mime` item with one of the content types.
    pub fn item_of_mime(&self, types: &[&str]) -> Option<&ItemInfo> {
        self.infos.iter().find(|i| {
            i.content_type
                .as_deref()
                .is_some_and(|c| types.contains(&c))
        })
    }

    pub fn location(&self, id: u32) -> Option<&ItemLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Gathers an item's bytes from its extents.
    ///
    /// An extent past the end only fails this one item.
    pub fn item_data(
        &self,
        id: u32,
        file: &[u8],
        warnings: &mut Vec<Warning>,
    ) -> Option<Vec<u8>> {
        let Some(location) = self.location(id) else {
            warn(warnings, format!("item `{id}` has no location"));
            return None;
        };

        let source: &[u8] = match location.method {
            ConstructionMethod::File => file,
            ConstructionMethod::Idat => match self.idat {
                Some(idat) => idat,
                None => {
                    warn(warnings, format!("item `{id}` lives in `idat`, but there isn't one"));
                    return None;
                }
            },
            ConstructionMethod::Item => {
                warn(warnings, format!("item `{id}` is built from other items; skipping it"));
                return None;
            }
        };

        let mut data = Vec::new();
        for &(offset, length) in &location.extents {
            let start = location.base_offset.saturating_add(offset);
            let end = if length == 0 {
                source.len() as u64
            } else {
                start.saturating_add(length)
            };

            let range = usize::try_from(start).ok().zip(usize::try_from(end).ok());
            match range.and_then(|(s, e)| source.get(s..e)) {
                Some(bytes) => data.extend_from_slice(bytes),
                None => {
                    warn(
                        warnings,
                        format!(
                            "item `{id}` has an extent `{start}..{end}` past the end (`{}` bytes)",
                            source.len()
                        ),
                    );
                    return None;
                }
            }
        }

        Some(data)
    }

    /// Describes the items, one per line.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(primary) = self.primary {
            lines.push(format!("primary item: {primary}"));
        }
        for info in &self.infos {
            let location = match self.location(info.id) {
                Some(l) => l
                    .extents
                    .iter()
                    .map(|(o, len)| format!("{}+{len}", l.base_offset + o))
                    .collect::<Vec<_>>()
                    .join(", "),
                None => "-".into(),
            };
            lines.push(format!(
                "item {:>4} | {} | {:<20} | {location}",
                info.id,
                fourcc(&info.item_type),
                info.content_type.as_deref().unwrap_or(&info.name),
            ));
        }
        for r in &self.references {
            lines.push(format!(
                "reference {} | {} -> {:?}",
                fourcc(&r.ref_type),
                r.from,
                r.to
            ));
        }
        for (w, h) in &self.sizes {
            lines.push(format!("ispe {w} x {h}"));
        }
        lines
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        providers::shared::bmff::{BoxType, write_box},
        util::logger,
    };

    fn boxed(ty: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_box(&mut out, BoxType::Id(*ty), payload);
        out
    }

    /// A `meta` box with one `Exif` item stored at `exif_at` for `exif_len`
    /// bytes, and one XMP item in `idat`.
    pub(crate) fn meta_box(exif_at: u32, exif_len: u32, xmp: &[u8]) -> Vec<u8> {
        let hdlr = boxed(
            b"hdlr",
            &[
                [0, 0, 0, 0].as_slice(), // version, flags
                &[0; 4],                 // pre_defined
                b"pict",                 // handler
                &[0; 12],                // reserved
                b"\0",                   // name
            ]
            .concat(),
        );
        let pitm = boxed(b"pitm", &[0, 0, 0, 0, 0, 1]);

        let infe_exif = boxed(
            b"infe",
            &[
                [2, 0, 0, 0].as_slice(), // version 2
                &2_u16.to_be_bytes(),    // item id
                &0_u16.to_be_bytes(),    // protection index
                b"Exif",                 // item type
                b"\0",                   // name
            ]
            .concat(),
        );
        let infe_xmp = boxed(
            b"infe",
            &[
                [2, 0, 0, 0].as_slice(),    // version 2
                &3_u16.to_be_bytes(),       // item id
                &0_u16.to_be_bytes(),       // protection index
                b"mime",                    // item type
                b"XMP\0",                   // name
                b"application/rdf+xml\0\0", // content type, encoding
            ]
            .concat(),
        );
        let iinf = boxed(
            b"iinf",
            &[
                [0, 0, 0, 0].as_slice(), // version, flags
                &2_u16.to_be_bytes(),    // entry count
                &infe_exif,
                &infe_xmp,
            ]
            .concat(),
        );

        let iloc = boxed(
            b"iloc",
            &[
                [1, 0, 0, 0].as_slice(), // version 1
                &[0x44, 0x00],           // offset/length 4 bytes, no base, no index
                &2_u16.to_be_bytes(),    // item count
                // the exif item, in the file
                &2_u16.to_be_bytes(),
                &0_u16.to_be_bytes(), // construction method 0
                &0_u16.to_be_bytes(), // data reference index
                &1_u16.to_be_bytes(), // extent count
                &exif_at.to_be_bytes(),
                &exif_len.to_be_bytes(),
                // the xmp item, in idat
                &3_u16.to_be_bytes(),
                &1_u16.to_be_bytes(), // construction method 1
                &0_u16.to_be_bytes(),
                &1_u16.to_be_bytes(),
                &0_u32.to_be_bytes(),
                &(xmp.len() as u32).to_be_bytes(),
            ]
            .concat(),
        );

        let ispe = boxed(
            b"ispe",
            &[
                [0, 0, 0, 0].as_slice(),
                &640_u32.to_be_bytes(),
                &480_u32.to_be_bytes(),
            ]
            .concat(),
        );
        let iprp = boxed(b"iprp", &boxed(b"ipco", &ispe));
        let idat = boxed(b"idat", xmp);

        boxed(
            b"meta",
            &[
                [0, 0, 0, 0].as_slice(),
                &hdlr,
                &pitm,
                &iinf,
                &iloc,
                &iprp,
                &idat,
            ]
            .concat(),
        )
    }

    #[test]
    fn reads_items() {
        logger();
        // the box's length doesn't depend on where the exif is
        let exif_at = meta_box(0, 0, b"<x:xmpmeta/>").len() as u32;
        let mut file = meta_box(exif_at, 8, b"<x:xmpmeta/>");
        file.extend_from_slice(b"\0\0\0\0II*\0");

        let mut warnings = Vec::new();
        let top = boxes(&file, 0, &mut warnings);
        let meta = MetaBox::new(&top[0], &mut warnings);
        assert!(warnings.is_empty(), "{warnings:?}");

        assert_eq!(meta.handler, Some(*b"pict"));
        assert_eq!(meta.primary, Some(1));
        assert_eq!(meta.sizes, [(640, 480)]);

        let exif = meta.item_of_type(b"Exif").unwrap();
        assert_eq!(
            meta.item_data(exif.id, &file, &mut warnings).unwrap(),
            b"\0\0\0\0II*\0"
        );

        let xmp = meta.item_of_mime(&["application/rdf+xml"]).unwrap();
        assert_eq!(
            meta.item_data(xmp.id, &file, &mut warnings).unwrap(),
            b"<x:xmpmeta/>"
        );
    }

    #[test]
    fn extents_past_the_end_fail_one_item() {
        logger();
        let file = meta_box(10_000, 8, b"<x/>");
        let mut warnings = Vec::new();
        let top = boxes(&file, 0, &mut warnings);
        let meta = MetaBox::new(&top[0], &mut warnings);

        assert!(meta.item_data(2, &file, &mut warnings).is_none());
        assert_eq!(warnings.len(), 1);
        assert_eq!(meta.item_data(3, &file, &mut warnings).unwrap(), b"<x/>");
    }
}
