//! Fujifilm RAF raw files.
//!
//! These start with a fixed header that points at an embedded JPEG preview.
//! The preview holds all the metadata we care about, so we just hand it to
//! the JPEG provider.

use winnow::{
    ModalResult, Parser as _,
    binary::be_u32,
    error::ContextError,
    token::{literal, take},
};

use crate::{
    MetadataProvider,
    providers::{
        RawBlobs,
        jpeg::{Jpeg, JpegConstructionError},
        shared::desc,
    },
};

const MAGIC: &[u8] = b"FUJIFILMCCD-RAW";

/// Where the JPEG's offset and length are in the header.
const JPEG_POINTER_AT: usize = 84;

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub enum RafConstructionError {
    /// The header was shorter than the JPEG pointer.
    ShortHeader,

    /// The JPEG's offset or length ran past the end of the file.
    JpegOutOfBounds { offset: u32, len: u32 },

    /// The embedded JPEG couldn't be read.
    Jpeg(JpegConstructionError),
}

impl core::fmt::Display for RafConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ShortHeader => f.write_str("The RAF header is truncated."),
            Self::JpegOutOfBounds { offset, len } => write!(
                f,
                "The RAF's embedded JPEG (`{len}` bytes at `{offset}`) is out of bounds."
            ),
            Self::Jpeg(e) => write!(f, "The RAF's embedded JPEG is invalid. err: {e}"),
        }
    }
}

impl core::error::Error for RafConstructionError {}

/// A Fujifilm raw file.
#[derive(Clone, Debug)]
pub struct Raf {
    camera: String,
    jpeg_at: usize,
    jpeg_len: usize,
    jpeg: Jpeg,
}

impl Raf {
    /// The camera name from the header, like `X-T4`.
    pub fn camera(&self) -> &str {
        &self.camera
    }
}

/// Reads the header up to the JPEG pointer: `(camera name, offset, length)`.
fn header(input: &mut &[u8]) -> ModalResult<(String, u32, u32), ContextError> {
    literal(MAGIC).context(desc("RAF magic")).parse_next(input)?;

    // one space, then the format version and camera id
    take(1_usize + 4 + 8).void().parse_next(input)?;
    let name = take(32_usize).context(desc("camera name")).parse_next(input)?;

    // directory version and some unknown bytes
    take(JPEG_POINTER_AT - 60).void().parse_next(input)?;
    let offset = be_u32.context(desc("JPEG offset")).parse_next(input)?;
    let len = be_u32.context(desc("JPEG length")).parse_next(input)?;

    let name = name.split(|b| *b == 0).next().unwrap_or_default();
    Ok((String::from_utf8_lossy(name).into_owned(), offset, len))
}

impl MetadataProvider for Raf {
    type ConstructionError = RafConstructionError;

    const FORMAT: &'static str = "RAF";

    fn magic_number(input: &[u8]) -> bool {
        input.starts_with(MAGIC)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();
        let (camera, offset, len) =
            header(&mut &file[..]).map_err(|_| RafConstructionError::ShortHeader)?;

        let (jpeg_at, jpeg_len) = (offset as usize, len as usize);
        let preview = jpeg_at
            .checked_add(jpeg_len)
            .and_then(|end| file.get(jpeg_at..end))
            .ok_or(RafConstructionError::JpegOutOfBounds { offset, len })?;

        let jpeg = Jpeg::new(&preview).map_err(RafConstructionError::Jpeg)?;
        log::debug!("RAF from `{camera}` has a `{len}` byte JPEG at `{offset}`");

        Ok(Self {
            camera,
            jpeg_at,
            jpeg_len,
            jpeg,
        })
    }

    fn blobs(&self) -> &RawBlobs {
        self.jpeg.blobs()
    }

    fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
        let mut lines = vec![
            format!("camera: {}", self.camera),
            format!("embedded JPEG: {} bytes at {}", self.jpeg_len, self.jpeg_at),
        ];

        let preview = &input[self.jpeg_at..self.jpeg_at + self.jpeg_len];
        lines.extend(
            self.jpeg
                .structure(preview, recursive)
                .into_iter()
                .map(|l| format!("  {l}")),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{exif::ExifData, util::logger};

    /// A RAF header pointing at whatever comes right after it.
    fn raf(jpeg: &[u8]) -> Vec<u8> {
        let mut name = [0_u8; 32];
        name[..4].copy_from_slice(b"X-T4");
        let start = (JPEG_POINTER_AT + 8) as u32;

        [
            MAGIC,
            b" ",
            b"0201",              // format version
            b"FF129502",          // camera id
            &name,                // camera name
            b"0100",              // directory version
            &[0; 20],             // unknown
            &start.to_be_bytes(), // jpeg offset
            &(jpeg.len() as u32).to_be_bytes(),
            jpeg,
        ]
        .concat()
    }

    fn jpeg_with_exif(exif: &ExifData) -> Vec<u8> {
        let payload = [b"Exif\0\0".as_slice(), &exif.to_bytes().unwrap()].concat();
        [
            [0xFF, 0xD8, 0xFF, 0xE1].as_slice(),
            &((payload.len() + 2) as u16).to_be_bytes(),
            &payload,
            &[0xFF, 0xDA, 0x00, 0x08, 1, 1, 0, 0, 0x3F, 0], // sos
            &[0x12, 0x34, 0xFF, 0xD9],
        ]
        .concat()
    }

    #[test]
    fn reads_the_embedded_jpeg() {
        logger();
        let mut exif = ExifData::new();
        exif.set_str("Exif.Image.Make", "FUJIFILM").unwrap();
        let file = raf(&jpeg_with_exif(&exif));

        assert!(Raf::magic_number(&file));
        let parsed = Raf::new(&file).unwrap();
        assert_eq!(parsed.camera(), "X-T4");
        assert_eq!(parsed.blobs().exif, Some(exif.to_bytes().unwrap()));
    }

    #[test]
    fn bad_pointers_fail() {
        let mut file = raf(&[0xFF, 0xD8]);
        file[JPEG_POINTER_AT + 4..JPEG_POINTER_AT + 8].copy_from_slice(&1000_u32.to_be_bytes());
        assert!(matches!(
            Raf::new(&file).unwrap_err(),
            RafConstructionError::JpegOutOfBounds { len: 1000, .. }
        ));

        assert_eq!(
            Raf::new(&MAGIC.to_vec()).unwrap_err(),
            RafConstructionError::ShortHeader
        );
    }
}
