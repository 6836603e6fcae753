//! Errors that stop Exif parsing entirely.
//!
//! Anything smaller than these (a broken entry, a loop, a bad pointer) is
//! collected as a [`Warning`](crate::error::Warning) instead.

/// On `Err`, there's no Exif data to be had from the blob.
pub type ExifFatalResult<T> = Result<T, ExifFatalError>;

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum ExifFatalError {
    /// The blob is shorter than a byte order marker.
    NoByteOrderMarker { len: usize },

    /// The byte order marker wasn't `II` or `MM`.
    WeirdByteOrderMarker { found: [u8; 2] },

    /// The blob ended before the magic number.
    NoTiffMagicNumber,

    /// The magic number isn't `42`, or one of the raw variants (`ORF`, `RW2`).
    MagicNumberWasntTiff { found: u16 },

    /// The blob ended before the offset of IFD0.
    NoTiffHeaderOffset,

    /// IFD0's offset points into the header or past the end.
    HeaderOffsetOutOfBounds { offset: u32 },

    /// The first IFD couldn't be read at all.
    FirstIfdUnreadable,
}

impl core::fmt::Display for ExifFatalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoByteOrderMarker { len } => {
                write!(f, "No byte order marker was found. len: `{len}`")
            }
            Self::WeirdByteOrderMarker { found } => match core::str::from_utf8(found.as_slice()) {
                Ok(found_utf8_bom) => {
                    write!(f, "Got a weird byte-order marker: `{found_utf8_bom}`")
                }
                Err(_) => {
                    write!(f, "Got a weird byte-order marker - wasn't ASCII: {found:?}")
                }
            },
            Self::NoTiffMagicNumber => {
                f.write_str("No TIFF magic number found - the slice was likely cut short.")
            }
            Self::MagicNumberWasntTiff { found } => {
                write!(f, "Magic number was not TIFF! got: `{found}`")
            }
            Self::NoTiffHeaderOffset => f.write_str("No TIFF header offset was found."),
            Self::HeaderOffsetOutOfBounds { offset } => write!(
                f,
                "TIFF header offset points outside the data. offset: `{offset}`"
            ),
            Self::FirstIfdUnreadable => f.write_str("corrupted image metadata"),
        }
    }
}

impl core::error::Error for ExifFatalError {}
