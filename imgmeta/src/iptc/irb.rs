//! Photoshop image resource blocks (IRBs).
//!
//! JPEG APP13 segments, PSD files, and TIFF tag `0x8649` all carry a list of
//! these. Each one looks like:
//!
//! ```text
//! signature (4) | id (u16, BE) | pascal name (even-padded) | len (u32, BE) | data (even-padded)
//! ```
//!
//! IPTC lives in resource `0x0404`. We keep every other resource as-is.

use winnow::{
    Parser as _,
    binary::{be_u16, be_u32, u8},
    error::EmptyError,
    token::take,
};

use crate::{
    error::{Warning, warn_lossy},
    iptc::error::IptcError,
};

/// Signatures that start a resource block.
pub const SIGNATURES: [&[u8; 4]; 5] = [b"8BIM", b"PHUT", b"AgHg", b"DCSR", b"MeSa"];

/// IPTC-IIM data.
pub const IPTC: u16 = 0x0404;

/// An ICC profile.
pub const ICC: u16 = 0x040F;

/// Exif data (a TIFF blob).
pub const EXIF: u16 = 0x0422;

/// An XMP packet.
pub const XMP: u16 = 0x0424;

/// One image resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub signature: [u8; 4],
    pub id: u16,

    /// The raw pascal string, without its length byte.
    pub name: Vec<u8>,

    pub data: Vec<u8>,
}

impl Resource {
    /// A new `8BIM` resource with no name.
    pub fn new(id: u16, data: Vec<u8>) -> Self {
        Self {
            signature: *b"8BIM",
            id,
            name: Vec::new(),
            data,
        }
    }
}

/// Reads all resources in a block.
///
/// Parsing stops at the first unknown signature. Anything after it is
/// reported with a warning.
pub fn parse(block: &[u8], warnings: &mut Vec<Warning>) -> Result<Vec<Resource>, IptcError> {
    let mut input = block;
    let mut resources = Vec::new();

    while !input.is_empty() {
        let offset = block.len() - input.len();

        if !SIGNATURES.iter().any(|s| input.starts_with(*s)) {
            // trailing zeroes are just padding
            if input.iter().any(|b| *b != 0) {
                warn_lossy(
                    warnings,
                    format!("unknown image resource signature at `{offset}`; ignoring the rest"),
                );
            }
            break;
        }

        match resource(&mut input) {
            Some(r) => {
                log::trace!(
                    "read image resource `0x{:04x}` ({} bytes)",
                    r.id,
                    r.data.len()
                );
                resources.push(r);
            }
            None => {
                if resources.is_empty() {
                    return Err(IptcError::BadResourceBlock { offset });
                }
                warn_lossy(
                    warnings,
                    format!("image resource at `{offset}` is truncated; ignoring the rest"),
                );
                break;
            }
        }
    }

    Ok(resources)
}

fn resource(input: &mut &[u8]) -> Option<Resource> {
    let signature: &[u8] = take(4_usize).parse_next(input).map_err(|_: EmptyError| ()).ok()?;
    let id = be_u16.parse_next(input).map_err(|_: EmptyError| ()).ok()?;

    // the name's length byte counts toward the padding
    let name_len = u8.parse_next(input).map_err(|_: EmptyError| ()).ok()? as usize;
    let name: &[u8] = take(name_len).parse_next(input).map_err(|_: EmptyError| ()).ok()?;
    if (name_len + 1) % 2 == 1 {
        let _: u8 = u8.parse_next(input).map_err(|_: EmptyError| ()).ok()?;
    }

    let len = be_u32.parse_next(input).map_err(|_: EmptyError| ()).ok()? as usize;
    let data: &[u8] = take(len).parse_next(input).map_err(|_: EmptyError| ()).ok()?;
    if len % 2 == 1 {
        // some writers forget the last pad byte
        if !input.is_empty() {
            *input = &input[1..];
        }
    }

    Some(Resource {
        signature: signature.try_into().ok()?,
        id,
        name: name.to_vec(),
        data: data.to_vec(),
    })
}

/// Writes resources back out, with their padding.
pub fn serialize(resources: &[Resource]) -> Vec<u8> {
    let mut out = Vec::new();

    for r in resources {
        out.extend_from_slice(&r.signature);
        out.extend_from_slice(&r.id.to_be_bytes());

        let name = &r.name[..r.name.len().min(255)];
        out.push(name.len() as u8);
        out.extend_from_slice(name);
        if (name.len() + 1) % 2 == 1 {
            out.push(0);
        }

        out.extend_from_slice(&(r.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&r.data);
        if r.data.len() % 2 == 1 {
            out.push(0);
        }
    }

    out
}

/// Finds the first `8BIM` resource with an ID.
pub fn find(resources: &[Resource], id: u16) -> Option<&Resource> {
    resources
        .iter()
        .find(|r| r.id == id && &r.signature == b"8BIM")
}

/// Replaces, inserts, or (given `None`) removes a resource.
///
/// A replaced resource keeps its position and name. New ones go at the end.
pub fn set(resources: &mut Vec<Resource>, id: u16, data: Option<Vec<u8>>) {
    let is_target = |r: &Resource| r.id == id && &r.signature == b"8BIM";

    match data {
        None => resources.retain(|r| !is_target(r)),
        Some(data) => {
            let mut found = false;
            resources.retain_mut(|r| {
                if !is_target(r) {
                    return true;
                }
                if found {
                    // only one copy survives
                    return false;
                }
                found = true;
                r.data.clone_from(&data);
                true
            });

            if !found {
                resources.push(Resource::new(id, data));
            }
        }
    }
}
