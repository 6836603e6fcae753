//! The ISO-BMFF image family: HEIF (HEIC, HIF), AVIF, the JPEG XL container,
//! and Canon's CR3.
//!
//! They all share the box layout, but hide metadata in different places:
//!
//! - HEIF/AVIF: as items in the top-level `meta` box. The `iloc` box says
//!   where each item's bytes are,
//! - JPEG XL: in top-level `Exif` and `xml ` boxes,
//! - CR3: in `moov/uuid(85c0b687…)`, as four TIFF blobs (`CMT1` to `CMT4`).
//!
//! These are read-only.

use winnow::{Parser as _, binary::be_u32, error::EmptyError};

use crate::{
    MetadataProvider,
    error::{Warning, warn, warn_lossy},
    exif::{ExifData, ExifKey, Exifdatum, IfdId},
    providers::{
        RawBlobs,
        shared::{
            EXIF_HEADER,
            bmff::{self, BmffBox, BoxType, CANON_UUID, XMP_UUID, ftyp::FtypBox, meta::MetaBox},
            strip_exif_header,
        },
    },
};

/// The signature box that starts a JPEG XL container.
const JXL_SIGNATURE: &[u8] = &[
    0x00, 0x00, 0x00, 0x0C, b'J', b'X', b'L', b' ', 0x0D, 0x0A, 0x87, 0x0A,
];

const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevx", b"mif1", b"msf1",
];
const AVIF_BRANDS: &[&[u8; 4]] = &[b"avif", b"avis"];

const XMP_MIME: &[&str] = &["application/rdf+xml"];

/// Which kind of BMFF file this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BmffKind {
    Heif,
    Avif,
    Jxl,
    Cr3,
}

impl BmffKind {
    /// Figures out the kind from the leading bytes.
    pub fn detect(input: &[u8]) -> Option<Self> {
        if input.starts_with(JXL_SIGNATURE) {
            return Some(BmffKind::Jxl);
        }

        if input.get(4..8) != Some(b"ftyp".as_slice()) {
            return None;
        }
        let ftyp = FtypBox::at_start(input)?;

        // order matters: CR3s and AVIFs often list `mif1` too
        if ftyp.has_any(&[b"crx "]) {
            Some(BmffKind::Cr3)
        } else if ftyp.has_any(AVIF_BRANDS) {
            Some(BmffKind::Avif)
        } else if ftyp.has_any(HEIF_BRANDS) {
            Some(BmffKind::Heif)
        } else if ftyp.has_any(&[b"jxl "]) {
            Some(BmffKind::Jxl)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum BmffConstructionError {
    /// The file had no `ftyp`, or none of its brands are ones we read.
    UnknownBrand,

    /// There was no `meta` box, so there can't be any items.
    NoMetaBox,
}

impl core::fmt::Display for BmffConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownBrand => f.write_str("The file's BMFF brand isn't one we support."),
            Self::NoMetaBox => f.write_str("The HEIF/AVIF file has no `meta` box."),
        }
    }
}

impl core::error::Error for BmffConstructionError {}

/// A BMFF-based image.
#[derive(Clone, Debug)]
pub struct Bmff {
    kind: BmffKind,
    blobs: RawBlobs,
}

impl Bmff {
    pub fn kind(&self) -> BmffKind {
        self.kind
    }
}

/// Finds the TIFF header in an Exif item or box.
///
/// These start with a big-endian offset to the TIFF header (counted after the
/// offset itself). Some writers get it wrong, so if the offset doesn't land
/// on a TIFF header, we look for one nearby.
fn exif_payload(data: &[u8], warnings: &mut Vec<Warning>) -> Option<Vec<u8>> {
    let is_tiff = |b: &[u8]| b.starts_with(b"II*\0") || b.starts_with(b"MM\0*");

    if let Ok(offset) = be_u32::<_, EmptyError>.parse_next(&mut &data[..])
        && let Some(tiff) = (offset as usize)
            .checked_add(4)
            .and_then(|start| data.get(start..))
        && is_tiff(tiff)
    {
        return Some(tiff.to_vec());
    }

    let near = &data[..data.len().min(64)];
    let found = near
        .windows(EXIF_HEADER.len())
        .position(|w| w == EXIF_HEADER)
        .map(|at| at + EXIF_HEADER.len())
        .or_else(|| near.windows(4).position(is_tiff));

    match found {
        Some(at) => {
            warn(warnings, "Exif data has a bad TIFF header offset; found the header anyway");
            Some(data[at..].to_vec())
        }
        None => {
            warn_lossy(warnings, "couldn't find a TIFF header in the Exif data");
            None
        }
    }
}

/// The profile in `iprp/ipco/colr`, for `prof` and `rICC` color types.
fn colr_profile(meta: &BmffBox<'_>, warnings: &mut Vec<Warning>) -> Option<Vec<u8>> {
    let children = meta.children(warnings);
    let iprp = bmff::find(&children, b"iprp")?;
    let props = iprp.children(warnings);
    let ipco = bmff::find(&props, b"ipco")?;

    ipco.children(warnings)
        .iter()
        .filter(|b| b.header.box_type.is(b"colr"))
        .find_map(|b| {
            let (kind, profile) = b.payload.split_at_checked(4)?;
            matches!(kind, b"prof" | b"rICC").then(|| profile.to_vec())
        })
}

fn read_items(file: &[u8], top: &[BmffBox<'_>], blobs: &mut RawBlobs, warnings: &mut Vec<Warning>) {
    let Some(meta_box) = bmff::find(top, b"meta") else {
        return;
    };
    let meta = MetaBox::new(meta_box, warnings);

    if let Some(item) = meta.item_of_type(b"Exif")
        && let Some(data) = meta.item_data(item.id, file, warnings)
    {
        blobs.exif = exif_payload(&data, warnings);
    }

    if let Some(item) = meta.item_of_mime(XMP_MIME) {
        blobs.xmp = meta.item_data(item.id, file, warnings);
    }

    blobs.icc = colr_profile(meta_box, warnings);
}

fn read_jxl(top: &[BmffBox<'_>], blobs: &mut RawBlobs, warnings: &mut Vec<Warning>) {
    if let Some(b) = bmff::find(top, b"Exif") {
        blobs.exif = exif_payload(b.payload, warnings);
    }
    if let Some(b) = bmff::find(top, b"xml ") {
        blobs.xmp = Some(b.payload.to_vec());
    }

    if top.iter().any(|b| b.header.box_type.is(b"brob")) {
        warn(
            warnings,
            "this JPEG XL file has Brotli-compressed boxes, which can't be read",
        );
    }
}

/// Where each CR3 TIFF blob's IFD0 goes in the combined Exif.
const CMT_GROUPS: [(&[u8; 4], IfdId); 4] = [
    (b"CMT1", IfdId::Image),
    (b"CMT2", IfdId::Photo),
    (b"CMT3", IfdId::Canon),
    (b"CMT4", IfdId::GpsInfo),
];

/// Combines `CMT1` to `CMT4` into one TIFF blob.
fn read_cr3(top: &[BmffBox<'_>], blobs: &mut RawBlobs, warnings: &mut Vec<Warning>) {
    if let Some(b) = top
        .iter()
        .find(|b| b.header.box_type == BoxType::Uuid(XMP_UUID))
    {
        blobs.xmp = Some(b.payload.to_vec());
    }

    let Some(moov) = bmff::find(top, b"moov") else {
        warn(warnings, "CR3 file has no `moov` box");
        return;
    };
    let children = moov.children(warnings);
    let Some(canon) = children
        .iter()
        .find(|b| b.header.box_type == BoxType::Uuid(CANON_UUID))
    else {
        warn(warnings, "CR3 file has no Canon metadata box");
        return;
    };
    let parts = canon.children(warnings);

    let mut merged = ExifData::new();
    for (name, group) in CMT_GROUPS {
        let Some(part) = bmff::find(&parts, name) else {
            continue;
        };

        let (exif, found) = match ExifData::parse(part.payload) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn_lossy(
                    warnings,
                    format!("couldn't read CR3 `{}`. err: {e}", String::from_utf8_lossy(name)),
                );
                continue;
            }
        };
        warnings.extend(found);

        if merged.is_empty() {
            merged.set_byte_order(exif.byte_order());
        }
        for d in exif.iter() {
            let key = if d.group() == IfdId::Image {
                ExifKey::new(group, d.tag())
            } else {
                d.key()
            };
            merged.add(Exifdatum::new(key, d.value().clone()));
        }
    }

    if merged.is_empty() {
        return;
    }
    match merged.to_bytes() {
        Ok(tiff) => blobs.exif = Some(tiff),
        Err(e) => warn_lossy(warnings, format!("couldn't combine the CR3 Exif. err: {e}")),
    }
}

impl MetadataProvider for Bmff {
    type ConstructionError = BmffConstructionError;

    const FORMAT: &'static str = "BMFF";

    fn magic_number(input: &[u8]) -> bool {
        BmffKind::detect(input).is_some()
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();
        let kind = BmffKind::detect(file).ok_or(BmffConstructionError::UnknownBrand)?;

        let mut warnings = Vec::new();
        let top = bmff::boxes(file, 0, &mut warnings);
        let mut blobs = RawBlobs::default();

        match kind {
            BmffKind::Heif | BmffKind::Avif => {
                if bmff::find(&top, b"meta").is_none() {
                    return Err(BmffConstructionError::NoMetaBox);
                }
                read_items(file, &top, &mut blobs, &mut warnings);
            }
            BmffKind::Jxl => read_jxl(&top, &mut blobs, &mut warnings),
            BmffKind::Cr3 => read_cr3(&top, &mut blobs, &mut warnings),
        }

        blobs.warnings = warnings;
        log::debug!("read a `{kind:?}` file with `{}` top-level boxes", top.len());
        Ok(Self { kind, blobs })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut lines = Vec::new();

        if let Some(ftyp) = FtypBox::at_start(input) {
            lines.push(format!("ftyp: {}", ftyp.describe()));
        }
        lines.push(" address | box        |   length".to_string());
        lines.extend(bmff::tree(input, 0, 0, &mut warnings));

        let top = bmff::boxes(input, 0, &mut warnings);
        if let Some(meta) = bmff::find(&top, b"meta") {
            lines.extend(MetaBox::new(meta, &mut warnings).describe());
        }

        if recursive && let Some(exif) = &self.blobs.exif {
            lines.extend(crate::providers::shared::tiff_structure(strip_exif_header(exif), 2));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        exif::{Rational, Value},
        iptc::IptcData,
        providers::shared::bmff::{meta::tests::meta_box, write_box},
        util::logger,
        write::{MetadataUpdate, WriteOptions},
        xmp::XmpData,
    };

    fn boxed(ty: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_box(&mut out, BoxType::Id(*ty), payload);
        out
    }

    fn tiff() -> Vec<u8> {
        let mut exif = ExifData::new();
        exif.set_str("Exif.Image.Make", "Apple").unwrap();
        exif.to_bytes().unwrap()
    }

    /// `ftyp`, then a `meta` whose Exif item is right after it.
    fn heic(exif_item: &[u8]) -> Vec<u8> {
        let ftyp = boxed(b"ftyp", b"heic\0\0\0\0mif1heic");
        let meta_len = meta_box(0, 0, b"<x:xmpmeta/>").len();
        let exif_at = (ftyp.len() + meta_len) as u32;

        [
            ftyp.as_slice(),
            &meta_box(exif_at, exif_item.len() as u32, b"<x:xmpmeta/>"),
            exif_item,
        ]
        .concat()
    }

    #[test]
    fn detects_brands() {
        assert_eq!(BmffKind::detect(&heic(&[])), Some(BmffKind::Heif));
        assert_eq!(
            BmffKind::detect(&boxed(b"ftyp", b"avif\0\0\0\0mif1")),
            Some(BmffKind::Avif)
        );
        assert_eq!(
            BmffKind::detect(&boxed(b"ftyp", b"crx \0\0\0\0isom")),
            Some(BmffKind::Cr3)
        );
        assert_eq!(BmffKind::detect(JXL_SIGNATURE), Some(BmffKind::Jxl));
        assert_eq!(BmffKind::detect(&boxed(b"ftyp", b"mp42\0\0\0\0isom")), None);
    }

    #[test]
    fn reads_heic_items() {
        logger();
        let item = [0_u32.to_be_bytes().as_slice(), &tiff()].concat();
        let file = heic(&item);

        let parsed = Bmff::new(&file).unwrap();
        assert_eq!(parsed.kind(), BmffKind::Heif);
        assert!(parsed.blobs().warnings.is_empty(), "{:?}", parsed.blobs().warnings);
        assert_eq!(parsed.blobs().exif, Some(tiff()));
        assert_eq!(parsed.blobs().xmp.as_deref(), Some(b"<x:xmpmeta/>".as_slice()));
    }

    #[test]
    fn bad_exif_offsets_are_worked_around() {
        logger();
        // the offset says 6, but there's no `Exif\0\0` after it
        let item = [6_u32.to_be_bytes().as_slice(), &tiff()].concat();
        let parsed = Bmff::new(&heic(&item)).unwrap();
        assert_eq!(parsed.blobs().exif, Some(tiff()));
        assert_eq!(parsed.blobs().warnings.len(), 1);

        // and this one has a header, but no offset at all
        let item = [EXIF_HEADER, &tiff()].concat();
        let parsed = Bmff::new(&heic(&item)).unwrap();
        assert_eq!(parsed.blobs().exif, Some(tiff()));
    }

    #[test]
    fn reads_jxl_boxes() {
        logger();
        let file = [
            JXL_SIGNATURE,
            &boxed(b"ftyp", b"jxl \0\0\0\0jxl "),
            &boxed(b"Exif", &[0_u32.to_be_bytes().as_slice(), &tiff()].concat()),
            &boxed(b"xml ", b"<x:xmpmeta/>"),
            &boxed(b"brob", b"Exif...."),
            &boxed(b"jxlc", &[0xFF, 0x0A]),
        ]
        .concat();

        let jxl = Bmff::new(&file).unwrap();
        assert_eq!(jxl.kind(), BmffKind::Jxl);
        assert_eq!(jxl.blobs().exif, Some(tiff()));
        assert_eq!(jxl.blobs().xmp.as_deref(), Some(b"<x:xmpmeta/>".as_slice()));
        assert_eq!(jxl.blobs().warnings.len(), 1);
    }

    #[test]
    fn combines_cr3_blobs() {
        logger();
        let mut cmt1 = ExifData::new();
        cmt1.set_str("Exif.Image.Make", "Canon").unwrap();
        cmt1.set_str("Exif.Image.Model", "Canon EOS R5").unwrap();

        // these are IFD0s too, but they hold other groups' tags
        let mut cmt2 = ExifData::new();
        cmt2.set(ExifKey::new(IfdId::Image, 0x829D), Value::Rational(vec![Rational::new(28, 10)]));
        let mut cmt4 = ExifData::new();
        cmt4.set(ExifKey::new(IfdId::Image, 0x0001), Value::Ascii("N".into()));

        let cmts = [
            boxed(b"CMT1", &cmt1.to_bytes().unwrap()),
            boxed(b"CMT2", &cmt2.to_bytes().unwrap()),
            boxed(b"CMT4", &cmt4.to_bytes().unwrap()),
        ]
        .concat();
        let mut moov = Vec::new();
        write_box(&mut moov, BoxType::Uuid(CANON_UUID), &cmts);

        let file = [
            boxed(b"ftyp", b"crx \0\0\0\x01crx isom").as_slice(),
            &boxed(b"moov", &moov),
        ]
        .concat();

        let cr3 = Bmff::new(&file).unwrap();
        assert_eq!(cr3.kind(), BmffKind::Cr3);
        let (exif, _) = ExifData::parse(cr3.blobs().exif.as_ref().unwrap()).unwrap();
        assert_eq!(exif.get("Exif.Image.Model").unwrap().value().to_string(), "Canon EOS R5");
        assert_eq!(exif.get("Exif.Photo.FNumber").unwrap().value().to_string(), "28/10");
        assert_eq!(exif.get("Exif.GPSInfo.GPSLatitudeRef").unwrap().value().to_string(), "N");
    }

    #[test]
    fn writing_is_unsupported() {
        let file = heic(&[0, 0, 0, 0]);
        let parsed = Bmff::new(&file).unwrap();
        let (exif, iptc, xmp) = (ExifData::new(), IptcData::new(), XmpData::new());
        let update = MetadataUpdate {
            exif: &exif,
            iptc: &iptc,
            xmp: &xmp,
            icc: None,
            comment: None,
            options: WriteOptions::default(),
            original: parsed.blobs(),
        };
        assert!(matches!(
            parsed.write(&file, &update),
            Err(Error::WriteUnsupported { format: "BMFF" })
        ));
    }

    #[test]
    fn structure_shows_items() {
        logger();
        let item = [0_u32.to_be_bytes().as_slice(), &tiff()].concat();
        let file = heic(&item);
        let parsed = Bmff::new(&file).unwrap();

        let lines = parsed.structure(&file, false);
        assert_eq!(lines[0], "ftyp: heic (mif1, heic)");
        assert!(lines.iter().any(|l| l.contains("iloc")));
        assert!(lines.iter().any(|l| l.contains("ispe 640 x 480")));
        assert!(lines.iter().any(|l| l.starts_with("item    2 | Exif")));
    }
}
