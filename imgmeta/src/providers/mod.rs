//! # Providers
//!
//! Providers represent a source of metadata: a container format like JPEG,
//! or a family of them, like the ISO-BMFF formats.
//!
//! Each provider has a struct with a [`MetadataProvider`][crate::MetadataProvider]
//! implementation. It finds the raw metadata blobs in a file, and (for
//! formats we can write) splices new blobs back in while copying everything
//! else as-is.

pub mod bmff;
pub mod crw;
pub mod eps;
pub mod jp2;
pub mod jpeg;
pub mod png;
pub mod psd;
pub mod raf;
pub mod tiff;
pub mod webp;
pub mod xmp_sidecar;

mod shared;

use crate::error::Warning;

/// The metadata blobs a provider found, before any parsing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawBlobs {
    /// A TIFF blob, starting at its byte order marker.
    pub exif: Option<Vec<u8>>,

    /// IPTC-IIM datasets (without any Photoshop wrapping).
    pub iptc: Option<Vec<u8>>,

    /// The main XMP packet.
    pub xmp: Option<Vec<u8>>,

    /// More XMP that didn't fit in the main packet (JPEG's ExtendedXMP).
    pub xmp_extended: Option<Vec<u8>>,

    /// An ICC color profile.
    pub icc: Option<Vec<u8>>,

    /// The image comment.
    pub comment: Option<String>,

    /// Problems the provider ran into that didn't stop it.
    pub warnings: Vec<Warning>,
}

impl RawBlobs {
    /// Whether nothing was found at all.
    pub fn is_empty(&self) -> bool {
        self.exif.is_none()
            && self.iptc.is_none()
            && self.xmp.is_none()
            && self.icc.is_none()
            && self.comment.is_none()
    }
}
