//! The [`Image`] type, which ties a byte store, a container format, and the
//! three metadata families together.
//!
//! ```
//! use imgmeta::Image;
//!
//! let tiff = vec![b'I', b'I', 42, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
//! let mut image = Image::from_bytes(tiff).unwrap();
//! image.read_metadata().unwrap();
//!
//! image.exif_mut().set_str("Exif.Image.Software", "imgmeta").unwrap();
//! image.write_metadata().unwrap();
//!
//! image.read_metadata().unwrap();
//! let software = image.exif().get("Exif.Image.Software").unwrap();
//! assert_eq!(software.value().to_string(), "imgmeta");
//! ```

use std::path::Path;

use crate::{
    error::{Error, Warning, warn_lossy},
    exif::ExifData,
    io::{BasicIo, FileIo, MemIo},
    iptc::IptcData,
    magic_number::{AnyProvider, MagicNumber},
    write::{MetadataUpdate, WriteOptions, WriteState, WriteStrategy},
    xmp::XmpData,
};

/// An image file and its metadata.
///
/// Reads and writes are all-or-nothing: if anything fails, the metadata (or
/// the file) stays as it was.
#[derive(Debug)]
pub struct Image {
    io: Box<dyn BasicIo>,
    magic_number: MagicNumber,

    exif: ExifData,
    iptc: IptcData,
    xmp: XmpData,
    icc: Option<Vec<u8>>,
    comment: Option<String>,

    warnings: Vec<Warning>,
    options: WriteOptions,
    write_state: WriteState,
    write_strategy: Option<WriteStrategy>,
}

impl Image {
    /// Opens a file on disk.
    ///
    /// The metadata isn't read until [`Image::read_metadata`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_io(Box::new(FileIo::open(path)?))
    }

    /// Wraps some bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, Error> {
        Self::from_io(Box::new(MemIo::new(bytes)))
    }

    /// Downloads an image. It can be read, but not written.
    #[cfg(feature = "http")]
    pub fn open_url(url: &str) -> Result<Self, Error> {
        Self::from_io(Box::new(crate::io::RemoteIo::fetch(url)?))
    }

    /// Uses any byte store.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedImageType`] when the leading bytes don't match
    /// any supported format.
    pub fn from_io(io: Box<dyn BasicIo>) -> Result<Self, Error> {
        let magic_number = MagicNumber::new(&io.as_bytes()).ok_or_else(|| {
            log::error!("not a supported image type: `{:?}`", io.path());
            Error::UnsupportedImageType
        })?;
        log::debug!("opened a `{}` image", magic_number.format());

        Ok(Self {
            io,
            magic_number,
            exif: ExifData::new(),
            iptc: IptcData::new(),
            xmp: XmpData::new(),
            icc: None,
            comment: None,
            warnings: Vec::new(),
            options: WriteOptions::default(),
            write_state: WriteState::default(),
            write_strategy: None,
        })
    }

    pub fn magic_number(&self) -> MagicNumber {
        self.magic_number
    }

    /// The container's name, like `JPEG`.
    pub fn format(&self) -> &'static str {
        self.magic_number.format()
    }

    /// The image's current bytes.
    pub fn bytes(&self) -> &[u8] {
        self.io.as_bytes()
    }

    /// The file this came from, if it came from one.
    pub fn path(&self) -> Option<&Path> {
        self.io.path()
    }

    /// Reads all metadata from the image, replacing what's in memory.
    pub fn read_metadata(&mut self) -> Result<(), Error> {
        let provider = AnyProvider::new(&self.io.as_bytes())?;
        let blobs = provider.blobs();
        let mut warnings = blobs.warnings.clone();

        let exif = match &blobs.exif {
            Some(blob) => {
                let (exif, found) = ExifData::parse(blob)?;
                warnings.extend(found);
                exif
            }
            None => ExifData::new(),
        };

        // a broken IIM block loses the IPTC, not everything else
        let iptc = match blobs.iptc.as_deref().map(IptcData::parse) {
            Some(Ok((iptc, found))) => {
                warnings.extend(found);
                iptc
            }
            Some(Err(e)) => {
                warn_lossy(&mut warnings, format!("Failed to read IPTC; skipping it. err: {e}"));
                IptcData::new()
            }
            None => IptcData::new(),
        };

        let mut xmp = match &blobs.xmp {
            Some(packet) => {
                let (xmp, found) = XmpData::parse_bytes(packet)?;
                warnings.extend(found);
                xmp
            }
            None => XmpData::new(),
        };
        if let Some(extended) = &blobs.xmp_extended {
            let (extended, found) = XmpData::parse_bytes(extended)?;
            warnings.extend(found);
            xmp.merge_extended(extended);
        }

        log::debug!(
            "read `{}` Exif, `{}` IPTC, and `{}` XMP datums, with `{}` warnings",
            exif.len(),
            iptc.len(),
            xmp.len(),
            warnings.len()
        );

        // only now that everything worked do we replace what we had
        self.magic_number = provider.magic_number();
        self.exif = exif;
        self.iptc = iptc;
        self.xmp = xmp;
        self.icc = blobs.icc.clone();
        self.comment = blobs.comment.clone();
        self.warnings = warnings;
        Ok(())
    }

    /// Writes the in-memory metadata back into the image.
    ///
    /// Files are replaced atomically. If this fails, the image's bytes are
    /// unchanged and [`Image::write_state`] is [`WriteState::Aborted`].
    pub fn write_metadata(&mut self) -> Result<(), Error> {
        self.write_state = WriteState::Analyzing;
        self.write_strategy = None;

        match self.try_write() {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("Failed to write metadata. err: {e}");
                self.write_state = WriteState::Aborted;
                Err(e)
            }
        }
    }

    fn try_write(&mut self) -> Result<(), Error> {
        let input = self.io.as_bytes();
        let provider = AnyProvider::new(&input)?;

        let outcome = provider.write(
            input,
            &MetadataUpdate {
                exif: &self.exif,
                iptc: &self.iptc,
                xmp: &self.xmp,
                icc: self.icc.as_deref(),
                comment: self.comment.as_deref(),
                options: self.options,
                original: provider.blobs(),
            },
        )?;

        self.write_state = self.write_state.choose(outcome.strategy);
        if self.write_state == WriteState::Aborted {
            return Err(Error::WriteFailed);
        }

        if outcome.bytes != self.io.as_bytes() {
            self.io.replace(&outcome.bytes)?;
            self.io.commit()?;
        } else {
            log::debug!("the new bytes match the old ones; nothing to write");
        }

        self.write_state = self.write_state.finish();
        self.write_strategy = Some(outcome.strategy);
        self.warnings.extend(outcome.warnings);
        Ok(())
    }

    /// Forgets all metadata. The next write takes it out of the file.
    pub fn clear_metadata(&mut self) {
        self.exif.clear();
        self.iptc.clear();
        self.xmp.clear();
        self.icc = None;
        self.comment = None;
    }

    pub fn exif(&self) -> &ExifData {
        &self.exif
    }

    pub fn exif_mut(&mut self) -> &mut ExifData {
        &mut self.exif
    }

    pub fn iptc(&self) -> &IptcData {
        &self.iptc
    }

    pub fn iptc_mut(&mut self) -> &mut IptcData {
        &mut self.iptc
    }

    pub fn xmp(&self) -> &XmpData {
        &self.xmp
    }

    pub fn xmp_mut(&mut self) -> &mut XmpData {
        &mut self.xmp
    }

    /// The ICC color profile.
    pub fn icc(&self) -> Option<&[u8]> {
        self.icc.as_deref()
    }

    pub fn set_icc(&mut self, icc: Option<Vec<u8>>) {
        self.icc = icc;
    }

    /// The image comment (like JPEG's `COM`).
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Component `i` of an Exif value as an integer.
    ///
    /// Ascii that isn't a number reads as `0`, with a warning added to
    /// [`Image::warnings`].
    pub fn exif_long(&mut self, key: &str, i: usize) -> Option<i64> {
        let datum = self.exif.get(key)?;
        datum.to_long(i, &mut self.warnings)
    }

    /// Problems found by the last read (and any writes since).
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn options(&self) -> WriteOptions {
        self.options
    }

    pub fn set_options(&mut self, options: WriteOptions) {
        self.options = options;
    }

    /// Where the last write got to.
    pub fn write_state(&self) -> WriteState {
        self.write_state
    }

    /// How the last successful write was done.
    pub fn write_strategy(&self) -> Option<WriteStrategy> {
        self.write_strategy
    }

    /// Describes the container's layout, one line per part.
    pub fn structure(&self, recursive: bool) -> Result<Vec<String>, Error> {
        let input = self.io.as_bytes();
        Ok(AnyProvider::new(&input)?.structure(input, recursive))
    }

    /// A short, human-readable overview, as `(label, value)` pairs.
    pub fn metadata_summary(&self) -> Vec<(&'static str, String)> {
        let printed = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| self.exif.get(k))
                .map(|d| d.print(&self.exif))
                .unwrap_or_default()
        };

        let size = match (
            self.exif.get("Exif.Photo.PixelXDimension"),
            self.exif.get("Exif.Photo.PixelYDimension"),
        ) {
            (Some(w), Some(h)) => format!("{} x {}", w.value(), h.value()),
            _ => String::new(),
        };

        let mut lines = vec![("File size", format!("{} Bytes", self.bytes().len()))];
        if let Some(path) = self.path() {
            lines.insert(0, ("File name", path.display().to_string()));
        }
        lines.extend([
            ("Format", self.format().to_string()),
            ("Image size", size),
            ("Camera make", printed(&["Exif.Image.Make"])),
            ("Camera model", printed(&["Exif.Image.Model"])),
            (
                "Image timestamp",
                printed(&["Exif.Photo.DateTimeOriginal", "Exif.Image.DateTime"]),
            ),
            ("Exposure time", printed(&["Exif.Photo.ExposureTime"])),
            ("Aperture", printed(&["Exif.Photo.FNumber"])),
            ("Exposure bias", printed(&["Exif.Photo.ExposureBiasValue"])),
            ("Flash", printed(&["Exif.Photo.Flash"])),
            ("Focal length", printed(&["Exif.Photo.FocalLength"])),
            ("ISO speed", printed(&["Exif.Photo.ISOSpeedRatings"])),
            ("Exposure mode", printed(&["Exif.Photo.ExposureProgram"])),
            ("White balance", printed(&["Exif.Photo.WhiteBalance"])),
            (
                "Thumbnail",
                self.exif
                    .thumbnail()
                    .map(|t| format!("image/jpeg, {} Bytes", t.len()))
                    .unwrap_or_else(|| "None".into()),
            ),
            ("Copyright", printed(&["Exif.Image.Copyright"])),
            ("Exif comment", printed(&["Exif.Photo.UserComment"])),
        ]);
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    /// An empty little-endian TIFF.
    fn tiff() -> Vec<u8> {
        [
            b"II*\0".as_slice(),
            &8_u32.to_le_bytes(), // ifd0 offset
            &0_u16.to_le_bytes(), // no entries
            &0_u32.to_le_bytes(), // no next ifd
        ]
        .concat()
    }

    /// A JPEG with no metadata at all.
    fn jpeg() -> Vec<u8> {
        [
            [0xFF, 0xD8].as_slice(),
            &[0xFF, 0xDA, 0x00, 0x08, 1, 1, 0, 0, 0x3F, 0], // sos
            &[0x12, 0x34, 0xFF, 0xD9],
        ]
        .concat()
    }

    #[test]
    fn unsupported_bytes_are_rejected() {
        assert!(matches!(
            Image::from_bytes(b"hello world".to_vec()),
            Err(Error::UnsupportedImageType)
        ));
    }

    #[test]
    fn writes_and_reads_back() {
        logger();
        let mut image = Image::from_bytes(jpeg()).unwrap();
        assert_eq!(image.magic_number(), MagicNumber::Jpeg);
        image.read_metadata().unwrap();
        assert!(image.exif().is_empty());

        image.exif_mut().set_str("Exif.Image.Make", "Canon").unwrap();
        image.iptc_mut().set_str("Iptc.Application2.City", "Kyiv").unwrap();
        image.set_comment(Some("a comment".into()));
        image.write_metadata().unwrap();
        assert_eq!(image.write_state(), WriteState::Written);
        assert_eq!(image.write_strategy(), Some(WriteStrategy::Intrusive));

        // the image data is still at the end
        assert!(image.bytes().ends_with(&[0x12, 0x34, 0xFF, 0xD9]));

        image.read_metadata().unwrap();
        assert_eq!(image.exif().get("Exif.Image.Make").unwrap().value().to_string(), "Canon");
        assert_eq!(image.iptc().len(), 1);
        assert_eq!(image.comment(), Some("a comment"));
    }

    #[test]
    fn untouched_metadata_writes_nothing() {
        logger();
        let mut image = Image::from_bytes(tiff()).unwrap();
        image.read_metadata().unwrap();
        let before = image.bytes().to_vec();

        image.write_metadata().unwrap();
        assert_eq!(image.write_state(), WriteState::Written);
        assert_eq!(image.bytes(), before);
    }

    #[test]
    fn failed_writes_abort() {
        logger();
        // an eps with no xmp packet can't take one
        let mut image = Image::from_bytes(b"%!PS-Adobe-3.0\nshowpage\n".to_vec()).unwrap();
        image.read_metadata().unwrap();
        image.xmp_mut().set_str("Xmp.dc.format", None, "application/postscript").unwrap();

        let before = image.bytes().to_vec();
        assert!(matches!(
            image.write_metadata(),
            Err(Error::Provider { format: "EPS", .. })
        ));
        assert_eq!(image.write_state(), WriteState::Aborted);
        assert_eq!(image.write_strategy(), None);
        assert_eq!(image.bytes(), before);
    }

    #[test]
    fn files_are_replaced_atomically() {
        logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, jpeg()).unwrap();

        let mut image = Image::open(&path).unwrap();
        image.read_metadata().unwrap();
        image.exif_mut().set_str("Exif.Image.Artist", "me").unwrap();
        image.write_metadata().unwrap();

        let mut again = Image::open(&path).unwrap();
        again.read_metadata().unwrap();
        assert_eq!(again.exif().get("Exif.Image.Artist").unwrap().value().to_string(), "me");

        // nothing else is left behind in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn summaries_use_printed_values() {
        logger();
        let mut image = Image::from_bytes(tiff()).unwrap();
        image.read_metadata().unwrap();
        image.exif_mut().set_str("Exif.Image.Make", "Canon").unwrap();
        image.exif_mut().set_str("Exif.Photo.FNumber", "28/10").unwrap();

        let summary = image.metadata_summary();
        let get = |label: &str| {
            summary
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("Format"), "TIFF");
        assert_eq!(get("Camera make"), "Canon");
        assert_eq!(get("Aperture"), "F2.8");
        assert_eq!(get("Thumbnail"), "None");
    }
}
