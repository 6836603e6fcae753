//! The crate-wide error type, plus the warnings collected while parsing.
//!
//! Each subsystem has its own error enum (see [`ExifFatalError`],
//! [`IptcError`], [`XmpError`], and the providers' construction errors).
//! They all convert into [`Error`], which carries a stable [`ErrorCode`].

use std::sync::Arc;

use imgmeta_types::exif::ValueError;

use crate::{exif::error::ExifFatalError, iptc::error::IptcError, xmp::error::XmpError};

/// A stable number for each kind of [`Error`].
///
/// These don't change between releases, so tools can match on them.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    Io = 1,
    FailedToReadImageData = 2,
    UnsupportedImageType = 3,
    FileTruncated = 4,
    ReadOnlyIo = 5,
    CorruptedMetadata = 6,
    InvalidLangAlt = 7,
    XmpParse = 8,
    Exif = 9,
    Iptc = 10,
    Provider = 11,
    WriteFailed = 12,
    ValueConversion = 13,
    WriteUnsupported = 14,
    InvalidKey = 15,
    UnknownKey = 16,
    InvalidCommand = 17,
    InvalidValue = 18,
}

/// Anything that can go wrong in `imgmeta`.
#[derive(Clone, Debug)]
pub enum Error {
    /// The operating system reported an error.
    Io(Arc<std::io::Error>),

    /// We couldn't load the file (or URL) at all.
    FailedToReadImageData { path: String },

    /// The leading bytes didn't match any container we support.
    UnsupportedImageType,

    /// A read asked for bytes past the end of the data.
    FileTruncated { offset: u64, wanted: u64, size: u64 },

    /// The I/O backend can't be written to.
    ReadOnlyIo,

    /// Metadata was too broken to use.
    CorruptedMetadata { what: String },

    /// A `lang=` prefix was malformed.
    InvalidLangAlt { input: String },

    /// The XMP packet wasn't valid XML (or RDF).
    XmpParse(XmpError),

    /// The Exif block couldn't be parsed at all.
    Exif(ExifFatalError),

    /// The IPTC block couldn't be parsed at all.
    Iptc(IptcError),

    /// A container parser failed.
    Provider { format: &'static str, message: String },

    /// The new metadata couldn't be placed into the container.
    WriteFailed,

    /// A value couldn't be converted for writing.
    ValueConversion { what: String, reason: String },

    /// The container can be read, but not written.
    WriteUnsupported { format: &'static str },

    /// A key didn't follow `Family.Group.Tag`.
    InvalidKey { key: String },

    /// A key was well-formed, but names nothing we know.
    UnknownKey { key: String },

    /// A modify command couldn't be understood.
    InvalidCommand { line: String },

    /// A value couldn't be built from the given text.
    InvalidValue(ValueError),
}

impl Error {
    /// The stable code for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Error::Io(_) => ErrorCode::Io,
            Error::FailedToReadImageData { .. } => ErrorCode::FailedToReadImageData,
            Error::UnsupportedImageType => ErrorCode::UnsupportedImageType,
            Error::FileTruncated { .. } => ErrorCode::FileTruncated,
            Error::ReadOnlyIo => ErrorCode::ReadOnlyIo,
            Error::CorruptedMetadata { .. } => ErrorCode::CorruptedMetadata,
            Error::InvalidLangAlt { .. } => ErrorCode::InvalidLangAlt,
            Error::XmpParse(_) => ErrorCode::XmpParse,
            Error::Exif(_) => ErrorCode::Exif,
            Error::Iptc(_) => ErrorCode::Iptc,
            Error::Provider { .. } => ErrorCode::Provider,
            Error::WriteFailed => ErrorCode::WriteFailed,
            Error::ValueConversion { .. } => ErrorCode::ValueConversion,
            Error::WriteUnsupported { .. } => ErrorCode::WriteUnsupported,
            Error::InvalidKey { .. } => ErrorCode::InvalidKey,
            Error::UnknownKey { .. } => ErrorCode::UnknownKey,
            Error::InvalidCommand { .. } => ErrorCode::InvalidCommand,
            Error::InvalidValue(_) => ErrorCode::InvalidValue,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::FailedToReadImageData { path } => {
                write!(f, "{path}: Failed to read image data")
            }
            Error::UnsupportedImageType => f.write_str("not a supported image type"),
            Error::FileTruncated {
                offset,
                wanted,
                size,
            } => write!(
                f,
                "Failed to read input data: wanted `{wanted}` bytes at offset `{offset}`, \
                but the data is only `{size}` bytes long"
            ),
            Error::ReadOnlyIo => f.write_str("This data source is read-only"),
            Error::CorruptedMetadata { what } => {
                write!(f, "corrupted image metadata ({what})")
            }
            Error::InvalidLangAlt { input } => write!(f, "invalid LangAlt value: `{input}`"),
            Error::XmpParse(e) => write!(f, "Failed to parse XMP: {e}"),
            Error::Exif(e) => write!(f, "Failed to parse Exif: {e}"),
            Error::Iptc(e) => write!(f, "Failed to parse IPTC: {e}"),
            Error::Provider { format, message } => write!(f, "{format}: {message}"),
            Error::WriteFailed => {
                f.write_str("could not write metadata to file: corrupted image metadata")
            }
            Error::ValueConversion { what, reason } => {
                write!(f, "failed to convert {what} ({reason})")
            }
            Error::WriteUnsupported { format } => {
                write!(f, "Writing to {format} images is not supported")
            }
            Error::InvalidKey { key } => write!(f, "Invalid key `{key}`"),
            Error::UnknownKey { key } => write!(f, "Unknown key `{key}`"),
            Error::InvalidCommand { line } => write!(f, "Invalid command `{line}`"),
            Error::InvalidValue(e) => write!(f, "Invalid value: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e.as_ref()),
            Error::XmpParse(e) => Some(e),
            Error::Exif(e) => Some(e),
            Error::Iptc(e) => Some(e),
            Error::InvalidValue(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(Arc::new(value))
    }
}

impl From<ExifFatalError> for Error {
    fn from(value: ExifFatalError) -> Self {
        Error::Exif(value)
    }
}

impl From<IptcError> for Error {
    fn from(value: IptcError) -> Self {
        Error::Iptc(value)
    }
}

impl From<XmpError> for Error {
    fn from(value: XmpError) -> Self {
        match value {
            XmpError::InvalidLangAlt { input } => Error::InvalidLangAlt { input },
            other => Error::XmpParse(other),
        }
    }
}

impl From<ValueError> for Error {
    fn from(value: ValueError) -> Self {
        Error::InvalidValue(value)
    }
}

/// How bad a [`Warning`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Something was odd, but nothing was lost.
    Warning,

    /// Something was lost (like a truncated entry), but parsing went on.
    Error,
}

/// A problem found while parsing that didn't stop the parse.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Warning {
    pub severity: Severity,
    pub message: String,
}

impl Warning {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

impl core::fmt::Display for Warning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "Warning: {}", self.message),
            Severity::Error => write!(f, "Error: {}", self.message),
        }
    }
}

/// Records a warning and logs it.
pub(crate) fn warn(warnings: &mut Vec<Warning>, message: impl Into<String>) {
    let message = message.into();
    log::warn!("{message}");
    warnings.push(Warning::new(Severity::Warning, message));
}

/// Records a lossy problem and logs it.
pub(crate) fn warn_lossy(warnings: &mut Vec<Warning>, message: impl Into<String>) {
    let message = message.into();
    log::warn!("{message}");
    warnings.push(Warning::new(Severity::Error, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::UnsupportedImageType.to_string(),
            "not a supported image type"
        );
        assert_eq!(
            Error::WriteFailed.to_string(),
            "could not write metadata to file: corrupted image metadata"
        );
        assert_eq!(Error::WriteFailed.code() as u16, 12);
        assert_eq!(
            Warning::new(Severity::Error, "invalid size").to_string(),
            "Error: invalid size"
        );
    }

    #[test]
    fn lang_alt_errors_keep_their_kind() {
        let e: Error = XmpError::InvalidLangAlt {
            input: "lang=".into(),
        }
        .into();
        assert_eq!(e.code(), ErrorCode::InvalidLangAlt);
        assert!(e.to_string().starts_with("invalid LangAlt value"));
    }
}
