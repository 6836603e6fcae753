//! # `imgmeta_types`
//!
//! Static tables used by `imgmeta` when it reads and writes metadata.
//!
//! This crate doesn't do any parsing on its own. Instead, it describes what
//! the parser may find:
//!
//! - [`exif`]: the typed Exif value model, IFD groups, tag tables (including
//!   vendor MakerNotes) and lens lookups
//! - [`iptc`]: IPTC-IIM records and datasets
//! - [`xmp`]: built-in XMP namespaces and the shape of well-known properties
//!
//! Every table is a `static` slice. Lookup indices are built lazily, on
//! first use, and are never mutated afterward.

#![forbid(unsafe_code)]

pub mod exif;
pub mod iptc;
pub mod xmp;
