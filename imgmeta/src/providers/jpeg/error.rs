/// Why a file couldn't be read as a JPEG at all.
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum JpegConstructionError {
    /// The file didn't open with `SOI`.
    NoSoi { marker: u8 },

    /// A marker was expected at `offset`, but the byte there wasn't `0xFF`.
    NotAMarker { offset: usize, byte: u8 },

    /// The file ended in the middle of a marker.
    Truncated,

    /// Marker codes can't be `0x00` or `0xFF`.
    BadMarker(u8),

    /// A segment was missing its length field.
    MissingLength { marker: u8 },

    /// A segment's length was smaller than the length field itself.
    LengthTooShort { marker: u8, len: u16 },

    /// A segment claimed more bytes than the file has left.
    PayloadTooShort {
        marker: u8,

        /// The length field's value, which counts its own two bytes.
        len: u16,
        remaining: u64,
    },
}

impl core::fmt::Display for JpegConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoSoi { marker } => write!(
                f,
                "The JPEG doesn't start with `SOI`. first marker: `0x{marker:02X}`"
            ),
            Self::NotAMarker { offset, byte } => write!(
                f,
                "Expected a JPEG marker at `{offset}`, but found `0x{byte:02X}`."
            ),
            Self::Truncated => f.write_str("The JPEG ended in the middle of a marker."),
            Self::BadMarker(code) => write!(f, "`0x{code:02X}` isn't a valid JPEG marker code."),
            Self::MissingLength { marker } => write!(
                f,
                "The JPEG segment `0x{marker:02X}` has no length field."
            ),
            Self::LengthTooShort { marker, len } => write!(
                f,
                "The JPEG segment `0x{marker:02X}` has a length of `{len}`, \
                which can't even hold the length field."
            ),
            Self::PayloadTooShort {
                marker,
                len,
                remaining,
            } => write!(
                f,
                "The JPEG segment `0x{marker:02X}` wants `{len}` bytes, \
                but only `{remaining}` are left."
            ),
        }
    }
}

impl core::error::Error for JpegConstructionError {}
