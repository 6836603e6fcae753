//! # `imgmeta`
//!
//! A library to read and write Exif, IPTC and XMP metadata in image files.
//!
//! ## Supported formats
//!
//! | Format                     | Exif | IPTC | XMP | Write |
//! | -------------------------- | ---- | ---- | --- | ----- |
//! | JPEG                       | ✓    | ✓    | ✓   | ✓     |
//! | TIFF (and ORF, RW2, DNG)   | ✓    | ✓    | ✓   | ✓     |
//! | PNG                        | ✓    | ✓    | ✓   | ✓     |
//! | WebP                       | ✓    |      | ✓   | ✓     |
//! | PSD                        | ✓    | ✓    | ✓   | ✓     |
//! | JPEG 2000                  | ✓    | ✓    | ✓   | ✓     |
//! | HEIF, AVIF, JPEG XL, CR3   | ✓    |      | ✓   |       |
//! | RAF                        | ✓    | ✓    | ✓   |       |
//! | CRW                        | ✓    |      |     |       |
//! | EPS                        |      |      | ✓   | ✓     |
//! | XMP sidecars               |      |      | ✓   | ✓     |
//!
//! Vendor MakerNotes (Canon, Nikon, Olympus, Fujifilm, and others) are read
//! into their own groups, like `Exif.Canon.*`.
//!
//! ## Usage
//!
//! Most users only need [`Image`]:
//!
//! ```no_run
//! use imgmeta::Image;
//!
//! let mut image = Image::open("photo.jpg")?;
//! image.read_metadata()?;
//!
//! for datum in image.exif().iter() {
//!     println!("{} = {}", datum.key(), datum.print(image.exif()));
//! }
//!
//! image.exif_mut().set_str("Exif.Image.Artist", "Me")?;
//! image.write_metadata()?;
//! # Ok::<(), imgmeta::Error>(())
//! ```
//!
//! If you only need to know what a file is, see [`get`] and [`parse`].
//!
//! ## Contributing
//!
//! Contributions are welcome! Please submit PRs or issues at your leisure.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod error;
pub mod exif;
pub mod image;
pub mod io;
pub mod iptc;
pub mod magic_number;
pub mod providers;
pub mod write;
pub mod xmp;

pub use crate::{
    error::{Error, ErrorCode, Severity, Warning},
    exif::ExifData,
    image::Image,
    iptc::IptcData,
    magic_number::{AnyProvider, MagicNumber},
    providers::RawBlobs,
    write::{WriteOptions, WriteState, WriteStrategy},
    xmp::XmpData,
};

use crate::write::{MetadataUpdate, WriteOutcome};

/// A container format that can hold metadata.
///
/// Each file format is a "provider": it finds the raw metadata blobs in a
/// file, and puts new ones back.
pub trait MetadataProvider: Clone + core::fmt::Debug + Sized + Send + Sync {
    /// An error that can occur when calling [`MetadataProvider::new`].
    type ConstructionError: Clone
        + core::fmt::Debug
        + PartialEq
        + PartialOrd
        + core::error::Error
        + Sized
        + Send
        + Sync;

    /// The format's display name, like `JPEG`.
    const FORMAT: &'static str;

    /// Checks whether `input` starts like this format.
    ///
    /// This doesn't validate the rest of the file.
    fn magic_number(input: &[u8]) -> bool;

    /// Parses a media file for its metadata blobs.
    fn new(input: &impl AsRef<[u8]>)
    -> Result<Self, <Self as MetadataProvider>::ConstructionError>;

    /// The metadata blobs found in the file, still unparsed.
    fn blobs(&self) -> &RawBlobs;

    /// Builds a copy of `input` that holds the metadata in `update`.
    ///
    /// `input` must be the bytes this provider was made from. Everything
    /// that isn't metadata is copied over untouched.
    ///
    /// # Errors
    ///
    /// By default, this returns [`Error::WriteUnsupported`].
    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        _ = (input, update);
        log::error!("Can't write metadata into `{}` files.", Self::FORMAT);
        Err(Error::WriteUnsupported {
            format: Self::FORMAT,
        })
    }

    /// Describes the container's layout, one line per part.
    ///
    /// With `recursive`, embedded structures (like a TIFF inside an `APP1`
    /// segment) are described too.
    fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
        _ = (input, recursive);
        Vec::new()
    }
}

/// Finds the format of a file and parses it with the matching provider.
///
/// # Errors
///
/// See [`AnyProvider::new`].
pub fn parse(input: &impl AsRef<[u8]>) -> Result<AnyProvider, Error> {
    magic_number::parse(input)
}

/// Finds the format of a file by its leading bytes.
///
/// Returns `None` if no supported format matches.
pub fn get(input: &impl AsRef<[u8]>) -> Option<MagicNumber> {
    magic_number::get(input)
}

/// Internal utility methods.
pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
