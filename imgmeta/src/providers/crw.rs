//! Canon's old CRW raw format, which is a CIFF heap.
//!
//! A heap is a run of bytes whose last four bytes point at its directory.
//! Each directory entry has a 16-bit tag that also says how its data is
//! stored (in the heap, or right in the entry) and what kind it is. Some
//! entries are heaps themselves.
//!
//! CRW files don't have Exif, so we make some from the entries we know.

use winnow::{
    ModalResult, Parser as _,
    binary::{le_u16, le_u32},
    error::{ContextError, EmptyError},
    token::literal,
};

use crate::{
    MetadataProvider,
    error::{Warning, warn, warn_lossy},
    exif::{Charset, Comment, ExifData, ExifKey, IfdId, Value},
    providers::{
        RawBlobs,
        shared::{desc, preview},
    },
};

const MAGIC: &[u8] = b"II\x1a\0\0\0HEAPCCDR";

/// Heaps can't nest forever.
const MAX_DEPTH: usize = 8;

// the top two bits say where the data is
const LOCATION_MASK: u16 = 0xC000;
const IN_RECORD: u16 = 0x4000;

// the next three say what kind it is
const KIND_MASK: u16 = 0x3800;
const KIND_HEAP: [u16; 2] = [0x2800, 0x3000];

// tag ids, without the location bits
const USER_COMMENT: u16 = 0x0805;
const MAKE_MODEL: u16 = 0x080A;
const FIRMWARE: u16 = 0x080B;
const OWNER_NAME: u16 = 0x0810;
const SHOT_INFO: u16 = 0x102A;
const CAMERA_SETTINGS: u16 = 0x102D;
const CAPTURED_TIME: u16 = 0x180E;
const IMAGE_INFO: u16 = 0x1810;

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum CrwConstructionError {
    /// The `HEAPCCDR` header was missing.
    NoHeader,

    /// The root heap's directory couldn't be found.
    BadHeap,
}

impl core::fmt::Display for CrwConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoHeader => f.write_str("The CRW file has no CIFF header."),
            Self::BadHeap => f.write_str("The CRW file's root heap couldn't be read."),
        }
    }
}

impl core::error::Error for CrwConstructionError {}

/// One directory entry, found somewhere in the heap tree.
#[derive(Clone, Debug, PartialEq)]
struct CiffEntry {
    /// The whole tag, location bits and all.
    tag: u16,

    /// How deep the directory holding this is.
    depth: usize,

    /// Where the data is in the file.
    offset: usize,
    data: Vec<u8>,
}

impl CiffEntry {
    fn id(&self) -> u16 {
        self.tag & !LOCATION_MASK
    }

    fn is_heap(&self) -> bool {
        KIND_HEAP.contains(&(self.tag & KIND_MASK))
    }
}

/// A Canon CRW file.
#[derive(Clone, Debug)]
pub struct Crw {
    entries: Vec<CiffEntry>,
    blobs: RawBlobs,
}

fn header(input: &mut &[u8]) -> ModalResult<u32, ContextError> {
    literal(b"II").context(desc("byte order")).parse_next(input)?;
    let len = le_u32.context(desc("header length")).parse_next(input)?;
    literal(b"HEAPCCDR").context(desc("CIFF signature")).parse_next(input)?;
    Ok(len)
}

/// A directory: `(tag, size, offset)` for each entry.
fn directory(input: &mut &[u8]) -> ModalResult<Vec<(u16, u32, u32)>, ContextError> {
    let count = le_u16.context(desc("entry count")).parse_next(input)?;
    (0..count)
        .map(|_| (le_u16, le_u32, le_u32).context(desc("entry")).parse_next(input))
        .collect()
}

/// Walks a heap at `base`, pushing all its entries (and its children's).
fn walk(
    file: &[u8],
    base: usize,
    len: usize,
    depth: usize,
    entries: &mut Vec<CiffEntry>,
    warnings: &mut Vec<Warning>,
) -> Option<()> {
    if depth > MAX_DEPTH {
        warn(warnings, "CIFF heaps are nested too deeply");
        return None;
    }

    let heap = file.get(base..base.checked_add(len)?)?;
    let dir_at = le_u32::<_, EmptyError>
        .parse_next(&mut heap.get(len.checked_sub(4)?..)?)
        .ok()? as usize;

    let Ok(found) = directory(&mut heap.get(dir_at..)?) else {
        warn(warnings, format!("unreadable CIFF directory at `{}`", base + dir_at));
        return None;
    };

    for (i, (tag, size, offset)) in found.into_iter().enumerate() {
        let (offset, data) = if tag & LOCATION_MASK == IN_RECORD {
            // the size and offset fields are the data
            let at = base + dir_at + 2 + i * 10 + 2;
            let mut data = size.to_le_bytes().to_vec();
            data.extend_from_slice(&offset.to_le_bytes());
            (at, data)
        } else {
            let (offset, size) = (offset as usize, size as usize);
            match offset.checked_add(size).and_then(|end| heap.get(offset..end)) {
                Some(d) => (base + offset, d.to_vec()),
                None => {
                    warn_lossy(
                        warnings,
                        format!("CIFF entry `0x{tag:04x}` points past its heap; skipped"),
                    );
                    continue;
                }
            }
        };

        let entry = CiffEntry {
            tag,
            depth,
            offset,
            data,
        };
        let heap_child = entry.is_heap().then_some((entry.offset, entry.data.len()));
        entries.push(entry);

        if let Some((at, len)) = heap_child
            && walk(file, at, len, depth + 1, entries, warnings).is_none()
        {
            warn(warnings, format!("couldn't read the CIFF heap at `{at}`"));
        }
    }
    Some(())
}

/// Turns seconds since the Unix epoch into an Exif date.
fn exif_date(secs: u32) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;

    // days to a civil date, from Howard Hinnant's `civil_from_days`
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    format!(
        "{year:04}:{month:02}:{day:02} {:02}:{:02}:{:02}",
        rem / 3600,
        rem % 3600 / 60,
        rem % 60
    )
}

fn text(data: &[u8]) -> String {
    let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
    String::from_utf8_lossy(&data[..end]).into_owned()
}

fn shorts(data: &[u8]) -> Vec<i16> {
    data.chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

fn long_at(data: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(data.get(at..at + 4)?.try_into().ok()?))
}

/// Maps the entries we understand onto Exif.
fn to_exif(entries: &[CiffEntry]) -> ExifData {
    let mut exif = ExifData::new();
    let key = |group, tag| ExifKey::new(group, tag);

    for e in entries {
        match e.id() {
            MAKE_MODEL => {
                let mut parts = e.data.split(|b| *b == 0).map(text);
                if let Some(make) = parts.next() {
                    exif.set(key(IfdId::Image, 0x010F), Value::Ascii(make));
                }
                if let Some(model) = parts.next() {
                    exif.set(key(IfdId::Image, 0x0110), Value::Ascii(model));
                }
            }
            CAPTURED_TIME => {
                if let Some(secs) = long_at(&e.data, 0) {
                    exif.set(key(IfdId::Photo, 0x9003), Value::Ascii(exif_date(secs)));
                }
            }
            IMAGE_INFO => {
                if let (Some(w), Some(h)) = (long_at(&e.data, 0), long_at(&e.data, 4)) {
                    exif.set(key(IfdId::Photo, 0xA002), Value::Long(vec![w]));
                    exif.set(key(IfdId::Photo, 0xA003), Value::Long(vec![h]));
                }
            }
            USER_COMMENT => exif.set(
                key(IfdId::Photo, 0x9286),
                Value::Comment(Comment::new(Charset::Ascii, text(&e.data))),
            ),
            FIRMWARE => exif.set(key(IfdId::Canon, 0x0007), Value::Ascii(text(&e.data))),
            OWNER_NAME => exif.set(key(IfdId::Canon, 0x0009), Value::Ascii(text(&e.data))),
            id @ (CAMERA_SETTINGS | SHOT_INFO) => {
                let group = if id == CAMERA_SETTINGS {
                    IfdId::CanonCs
                } else {
                    IfdId::CanonSi
                };
                // the first element is the array's size
                for (i, v) in shorts(&e.data).into_iter().enumerate().skip(1) {
                    exif.set(key(group, i as u16), Value::SShort(vec![v]));
                }
            }
            _ => (),
        }
    }
    exif
}

impl MetadataProvider for Crw {
    type ConstructionError = CrwConstructionError;

    const FORMAT: &'static str = "CRW";

    fn magic_number(input: &[u8]) -> bool {
        input.starts_with(MAGIC)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();
        let header_len =
            header(&mut &file[..]).map_err(|_| CrwConstructionError::NoHeader)? as usize;
        if header_len > file.len() {
            return Err(CrwConstructionError::NoHeader);
        }

        let mut warnings = Vec::new();
        let mut entries = Vec::new();
        walk(
            file,
            header_len,
            file.len() - header_len,
            0,
            &mut entries,
            &mut warnings,
        )
        .ok_or(CrwConstructionError::BadHeap)?;

        let exif = to_exif(&entries);
        let mut blobs = RawBlobs::default();
        if !exif.is_empty() {
            match exif.to_bytes() {
                Ok(tiff) => blobs.exif = Some(tiff),
                Err(e) => warn_lossy(
                    &mut warnings,
                    format!("couldn't turn CRW entries into Exif. err: {e}"),
                ),
            }
        }
        blobs.warnings = warnings;

        log::debug!("CRW has `{}` CIFF entries", entries.len());
        Ok(Self { entries, blobs })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn structure(&self, _input: &[u8], _recursive: bool) -> Vec<String> {
        let mut lines = vec!["  offset |    tag |     size | data".to_string()];
        for e in &self.entries {
            lines.push(format!(
                "{:indent$}{:8} | 0x{:04x} | {:8} | {}",
                "",
                e.offset,
                e.id(),
                e.data.len(),
                if e.is_heap() {
                    "(heap)".into()
                } else {
                    preview(&e.data, 24)
                },
                indent = e.depth * 2
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    /// A heap holding some data, then its directory.
    fn heap(items: &[(u16, &[u8])]) -> Vec<u8> {
        let mut data = Vec::new();
        let mut dir = (items.len() as u16).to_le_bytes().to_vec();
        for (tag, bytes) in items {
            dir.extend_from_slice(&tag.to_le_bytes());
            dir.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            dir.extend_from_slice(&(data.len() as u32).to_le_bytes());
            data.extend_from_slice(bytes);
        }

        let dir_at = data.len() as u32;
        [data.as_slice(), &dir, &dir_at.to_le_bytes()].concat()
    }

    fn crw(root: &[u8]) -> Vec<u8> {
        [
            b"II".as_slice(),
            &26_u32.to_le_bytes(),
            b"HEAPCCDR",
            &0x0001_0002_u32.to_le_bytes(), // version
            &[0; 8],                        // reserved
            root,
        ]
        .concat()
    }

    #[test]
    fn dates_are_civil() {
        assert_eq!(exif_date(0), "1970:01:01 00:00:00");
        assert_eq!(exif_date(1_136_214_245), "2006:01:02 15:04:05");
        assert_eq!(exif_date(951_782_400), "2000:02:29 00:00:00");
    }

    #[test]
    fn maps_entries_to_exif() {
        logger();
        let settings: Vec<u8> = [8_i16, 2, 0, 747]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let info = [
            3072_u32.to_le_bytes().as_slice(), // width
            &2048_u32.to_le_bytes(),           // height
            &[0; 8],
        ]
        .concat();

        // 0x300a is an image-properties heap
        let props = heap(&[
            (MAKE_MODEL, b"Canon\0Canon EOS D60\0"),
            (CAPTURED_TIME, &1_136_214_245_u32.to_le_bytes()),
            (IMAGE_INFO, &info),
        ]);
        let root = heap(&[(0x300A, &props), (CAMERA_SETTINGS, &settings)]);
        let file = crw(&root);

        assert!(Crw::magic_number(&file));
        let parsed = Crw::new(&file).unwrap();
        assert!(parsed.blobs().warnings.is_empty(), "{:?}", parsed.blobs().warnings);

        let (exif, _) = ExifData::parse(parsed.blobs().exif.as_ref().unwrap()).unwrap();
        let get = |k: &str| exif.get(k).unwrap().value().to_string();
        assert_eq!(get("Exif.Image.Make"), "Canon");
        assert_eq!(get("Exif.Image.Model"), "Canon EOS D60");
        assert_eq!(get("Exif.Photo.DateTimeOriginal"), "2006:01:02 15:04:05");
        assert_eq!(get("Exif.Photo.PixelXDimension"), "3072");
        assert_eq!(
            exif.find_key(&ExifKey::new(IfdId::CanonCs, 3)).unwrap().value(),
            &Value::SShort(vec![747])
        );
    }

    #[test]
    fn in_record_entries_hold_their_data() {
        logger();
        // a little-endian u32 pair stored right in the entry
        let mut dir = 1_u16.to_le_bytes().to_vec();
        dir.extend_from_slice(&(IN_RECORD | CAPTURED_TIME).to_le_bytes());
        dir.extend_from_slice(&0_u32.to_le_bytes());
        dir.extend_from_slice(&0_u32.to_le_bytes());
        let root = [dir.as_slice(), &0_u32.to_le_bytes()].concat();

        let parsed = Crw::new(&crw(&root)).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].data, [0; 8]);
        assert_eq!(parsed.entries[0].offset, 26 + 2 + 2);
    }

    #[test]
    fn bad_heaps_fail() {
        assert_eq!(
            Crw::new(&b"II\x1a\0\0\0HEAPCCDX".to_vec()).unwrap_err(),
            CrwConstructionError::NoHeader
        );
        // the directory pointer is past the end
        let root = 1000_u32.to_le_bytes();
        assert_eq!(Crw::new(&crw(&root)).unwrap_err(), CrwConstructionError::BadHeap);
    }
}
