//! WebP is a RIFF container: `RIFF`, a size, `WEBP`, then chunks.
//!
//! A "simple" WebP only holds image data (`VP8 ` or `VP8L`). Metadata needs
//! the "extended" format, which starts with a `VP8X` chunk whose flags say
//! what else is in the file:
//!
//! - `ICCP` holds an ICC profile,
//! - `EXIF` holds a TIFF blob,
//! - and `XMP ` holds an XMP packet.
//!
//! For more info, see:
//! https://developers.google.com/speed/webp/docs/riff_container

use winnow::{Parser as _, binary::le_u32, error::EmptyError};

use crate::{
    MetadataProvider,
    error::{Error, Warning, warn, warn_lossy},
    providers::{
        RawBlobs,
        shared::{preview, strip_exif_header, tiff_structure},
    },
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
};

use self::chunk::{RiffChunk, write_chunk};

mod chunk;
mod error;
mod header;

pub use error::WebpConstructionError;

const VP8X: [u8; 4] = *b"VP8X";
const EXIF: [u8; 4] = *b"EXIF";
const XMP: [u8; 4] = *b"XMP ";
const ICCP: [u8; 4] = *b"ICCP";

/// `VP8X` flag bits.
mod flags {
    pub const ICC: u8 = 0b0010_0000;
    pub const ALPHA: u8 = 0b0001_0000;
    pub const EXIF: u8 = 0b0000_1000;
    pub const XMP: u8 = 0b0000_0100;
}

#[derive(Clone, Debug)]
pub struct Webp {
    chunks: Vec<RiffChunk>,
    blobs: RawBlobs,
}

/// Attempts to find the needle in the list of chunks.
fn find_chunk<'f>(needle: [u8; 4], chunks: &[RiffChunk], file: &'f [u8]) -> Option<&'f [u8]> {
    chunks
        .iter()
        .find(|c| c.fourcc == needle)
        .map(|c| c.data(file))
}

/// Makes a `VP8X` payload for a simple WebP, from its bitstream's size.
fn synthesize_vp8x(chunks: &[RiffChunk], file: &[u8]) -> Option<[u8; 10]> {
    let (width, height, alpha) = chunks.iter().find_map(|c| {
        let data = c.data(file);
        match &c.fourcc {
            // lossy: a frame tag, a start code, then 14-bit dimensions
            b"VP8 " if data.get(3..6) == Some([0x9D, 0x01, 0x2A].as_slice()) => {
                let w = u16::from_le_bytes([*data.get(6)?, *data.get(7)?]) & 0x3FFF;
                let h = u16::from_le_bytes([*data.get(8)?, *data.get(9)?]) & 0x3FFF;
                Some((w as u32, h as u32, false))
            }

            // lossless: a signature, then packed `width - 1` and `height - 1`
            b"VP8L" if data.first() == Some(&0x2F) => {
                let bits = le_u32::<_, EmptyError>.parse_next(&mut data.get(1..)?).ok()?;
                Some((
                    (bits & 0x3FFF) + 1,
                    ((bits >> 14) & 0x3FFF) + 1,
                    (bits >> 28) & 1 == 1,
                ))
            }
            _ => None,
        }
    })?;

    let alpha = alpha || chunks.iter().any(|c| &c.fourcc == b"ALPH");
    let (w, h) = (width.saturating_sub(1), height.saturating_sub(1));

    let mut out = [0_u8; 10];
    out[0] = if alpha { flags::ALPHA } else { 0 };
    out[4..7].copy_from_slice(&w.to_le_bytes()[..3]);
    out[7..10].copy_from_slice(&h.to_le_bytes()[..3]);
    Some(out)
}

impl MetadataProvider for Webp {
    type ConstructionError = WebpConstructionError;

    const FORMAT: &'static str = "WebP";

    fn magic_number(input: &[u8]) -> bool {
        input.get(..4) == Some(b"RIFF".as_slice()) && input.get(8..12) == Some(b"WEBP".as_slice())
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();
        let mut input = file;
        let mut warnings: Vec<Warning> = Vec::new();

        // first, look for the header.
        let size =
            header::webp_file_header(&mut input).map_err(|_| WebpConstructionError::NoHeader)?;
        if size as usize + 8 != file.len() {
            warn(
                &mut warnings,
                format!(
                    "RIFF says the file is `{}` bytes, but it's `{}`",
                    size as usize + 8,
                    file.len()
                ),
            );
        }

        // loop the rest of the file, collecting every chunk
        let mut chunks = Vec::new();
        while input.len() >= 8 {
            let offset = file.len() - input.len();
            let chunk = chunk::chunk(&mut input, offset).map_err(|e| {
                log::error!("Invalid RIFF chunk in WebP file! err: {e}");
                WebpConstructionError::NoChunks
            })?;

            if chunk.len as usize > input.len() {
                warn_lossy(
                    &mut warnings,
                    format!(
                        "WebP chunk `{}` wants `{}` bytes, but only `{}` are left",
                        String::from_utf8_lossy(&chunk.fourcc),
                        chunk.len,
                        input.len()
                    ),
                );
                break;
            }

            // skip its data and any padding byte
            input = &input[chunk.padded_len().min(input.len())..];
            chunks.push(chunk);
        }

        let Some(first) = chunks.first() else {
            return Err(WebpConstructionError::NoChunks);
        };

        // if it's an "extended" WebP, its flags should match what's there
        if first.fourcc == VP8X {
            let Some(&bits) = first.data(file).first() else {
                return Err(WebpConstructionError::MalformedExtendedHeader);
            };
            for (flag, fourcc) in [(flags::EXIF, EXIF), (flags::XMP, XMP), (flags::ICC, ICCP)] {
                let has = chunks.iter().any(|c| c.fourcc == fourcc);
                if (bits & flag != 0) != has {
                    warn(
                        &mut warnings,
                        format!(
                            "`VP8X` flags disagree about the `{}` chunk",
                            String::from_utf8_lossy(&fourcc)
                        ),
                    );
                }
            }
        }

        let blobs = RawBlobs {
            exif: find_chunk(EXIF, &chunks, file).map(|b| strip_exif_header(b).to_vec()),
            xmp: find_chunk(XMP, &chunks, file).map(Vec::from),
            icc: find_chunk(ICCP, &chunks, file).map(Vec::from),
            warnings,
            ..Default::default()
        };

        log::debug!("WebP has `{}` chunks", chunks.len());
        Ok(Self { chunks, blobs })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        let mut warnings = Vec::new();

        let exif = match update.exif_change(&mut warnings)? {
            Change::Keep => Change::Keep,
            Change::Remove => Change::Remove,
            Change::Set((tiff, _)) => Change::Set(tiff),
        };
        let xmp = match update.xmp_change()? {
            Change::Keep => Change::Keep,
            Change::Remove => Change::Remove,
            Change::Set(packet) => Change::Set(packet.into_bytes()),
        };
        let icc = update.icc_change();

        if exif.is_keep() && xmp.is_keep() && icc.is_keep() {
            log::debug!("WebP is unchanged");
            return Ok(WriteOutcome {
                bytes: input.to_vec(),
                strategy: WriteStrategy::NonIntrusive,
                warnings,
            });
        }

        let original = |fourcc| find_chunk(fourcc, &self.chunks, input).map(Vec::from);
        let exif = exif.resolve(self.blobs.exif.as_ref()).cloned();
        let xmp = xmp.resolve(original(XMP).as_ref()).cloned();
        let icc = icc.resolve(original(ICCP).as_ref()).cloned();

        // every chunk that isn't metadata stays, in order
        let rest: Vec<&RiffChunk> = self
            .chunks
            .iter()
            .filter(|c| ![VP8X, EXIF, XMP, ICCP].contains(&c.fourcc))
            .collect();

        let mut vp8x = match self.chunks.first() {
            Some(c) if c.fourcc == VP8X => {
                let mut payload = [0_u8; 10];
                let data = c.data(input);
                let n = data.len().min(10);
                payload[..n].copy_from_slice(&data[..n]);
                Some(payload)
            }
            _ => None,
        };
        let needs_vp8x = exif.is_some() || xmp.is_some() || icc.is_some();
        if vp8x.is_none() && needs_vp8x {
            vp8x = Some(synthesize_vp8x(&self.chunks, input).ok_or_else(|| Error::Provider {
                format: Self::FORMAT,
                message: "couldn't find the image size to make a `VP8X` chunk".into(),
            })?);
        }

        let mut body = b"WEBP".to_vec();
        if let Some(mut payload) = vp8x {
            for (flag, present) in [
                (flags::ICC, icc.is_some()),
                (flags::EXIF, exif.is_some()),
                (flags::XMP, xmp.is_some()),
            ] {
                if present {
                    payload[0] |= flag;
                } else {
                    payload[0] &= !flag;
                }
            }
            write_chunk(&mut body, &VP8X, &payload);
        }

        // the profile comes first, and Exif/XMP go last
        if let Some(icc) = &icc {
            write_chunk(&mut body, &ICCP, icc);
        }
        for c in rest {
            body.extend_from_slice(c.bytes(input));
            if c.len % 2 != 0 && c.bytes(input).len() < c.padded_len() + 8 {
                body.push(0);
            }
        }
        if let Some(exif) = &exif {
            write_chunk(&mut body, &EXIF, exif);
        }
        if let Some(xmp) = &xmp {
            write_chunk(&mut body, &XMP, xmp);
        }

        let size = u32::try_from(body.len()).map_err(|_| Error::Provider {
            format: Self::FORMAT,
            message: "the new file is too large for RIFF".into(),
        })?;
        let mut out = Vec::with_capacity(body.len() + 8);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&size.to_le_bytes());
        out.extend(body);

        log::debug!("rewrote WebP: `{}` -> `{}` bytes", input.len(), out.len());
        Ok(WriteOutcome {
            bytes: out,
            strategy: WriteStrategy::Intrusive,
            warnings,
        })
    }

    fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
        let mut lines = vec![" address | chunk |   length | data".to_string()];
        for c in &self.chunks {
            let data = c.data(input);
            lines.push(format!(
                "{:8} | {:<5} | {:8} | {}",
                c.offset,
                String::from_utf8_lossy(&c.fourcc),
                c.len,
                preview(data, 32)
            ));
            if recursive && c.fourcc == EXIF {
                lines.extend(tiff_structure(strip_exif_header(data), 2));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{exif::ExifData, iptc::IptcData, util::logger, write::WriteOptions, xmp::XmpData};

    /// helper: create the `VP8X` chunk (required for "extended" WebP)
    fn vp8x(has_exif: bool, has_xmp: bool) -> Vec<u8> {
        let exif_bit: u8 = if has_exif { flags::EXIF } else { 0 };
        let xmp_bit: u8 = if has_xmp { flags::XMP } else { 0 };

        #[rustfmt::skip]
        let bytes = [
            exif_bit | xmp_bit,
            0_u8, 0_u8, 0_u8,
            0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8,
        ].to_vec();

        bytes
    }

    /// helper: a lossless bitstream for a `w` by `h` image
    fn vp8l(w: u32, h: u32) -> Vec<u8> {
        let bits = (w - 1) | ((h - 1) << 14);
        [[0x2F].as_slice(), &bits.to_le_bytes(), &[0; 5]].concat()
    }

    /// helper: build a file to make these tests readable
    fn make_webp_sample(chunks: Vec<(&[u8; 4], &[u8])>) -> Vec<u8> {
        let mut bytes = Vec::new();

        // add the file header
        bytes.extend_from_slice(b"RIFF");
        bytes.extend([0; 4]); // we'll fill this in just a sec
        bytes.extend_from_slice(b"WEBP");

        for (fourcc, data) in chunks.iter() {
            write_chunk(&mut bytes, fourcc, data);
        }

        // with all chunks done, we set the file size
        let total_size_of_chunks: u32 = (bytes.len() as u32) - 8_u32;
        bytes[4..8].copy_from_slice(&total_size_of_chunks.to_le_bytes());

        bytes
    }

    fn update<'a>(
        webp: &'a Webp,
        exif: &'a ExifData,
        iptc: &'a IptcData,
        xmp: &'a XmpData,
    ) -> MetadataUpdate<'a> {
        MetadataUpdate {
            exif,
            iptc,
            xmp,
            icc: webp.blobs().icc.as_deref(),
            comment: None,
            options: WriteOptions::default(),
            original: webp.blobs(),
        }
    }

    /// There are no "empty" WebP files - the standard requires at least one
    /// chunk on all kinds.
    #[test]
    fn empty_webp_should_fail() {
        logger();
        let minimal_webp: &[u8] = &make_webp_sample(Vec::new());
        assert_eq!(
            Webp::new(&minimal_webp).unwrap_err(),
            WebpConstructionError::NoChunks
        );
    }

    /// Odd chunks shouldn't result in any weird corruption or nonsense.
    #[test]
    fn odd_num_of_chunk_bytes_should_construct() {
        logger();
        let vp8x_chunk_data = vp8x(false, false);
        let bytes = &make_webp_sample(vec![
            (b"VP8X", vp8x_chunk_data.as_slice()),
            (b"FAKE", [33_u8; 29].as_slice()),
            (b"TEST", [1_u8; 2].as_slice()),
        ]);

        let webp = Webp::new(bytes).unwrap();
        assert_eq!(webp.chunks.len(), 3);
        assert_eq!(webp.chunks[2].fourcc, *b"TEST");
        assert!(webp.blobs().warnings.is_empty());
    }

    #[test]
    fn reads_metadata_chunks() {
        logger();
        let mut exif = ExifData::new();
        exif.set_str("Exif.Image.Artist", "me").unwrap();
        let tiff = exif.to_bytes().unwrap();

        let flags = vp8x(true, true);
        let bytes = &make_webp_sample(vec![
            (b"VP8X", flags.as_slice()),
            (b"VP8L", &vp8l(2, 2)),
            (b"EXIF", &tiff),
            (b"XMP ", b"<x:xmpmeta/>"),
        ]);

        let webp = Webp::new(bytes).unwrap();
        assert!(webp.blobs().warnings.is_empty());
        assert_eq!(webp.blobs().exif.as_deref(), Some(tiff.as_slice()));
        assert_eq!(webp.blobs().xmp.as_deref(), Some(b"<x:xmpmeta/>".as_slice()));
    }

    #[test]
    fn wrong_flags_warn() {
        logger();
        let flags = vp8x(true, false);
        let bytes = &make_webp_sample(vec![(b"VP8X", flags.as_slice()), (b"VP8L", &vp8l(2, 2))]);
        let webp = Webp::new(bytes).unwrap();
        assert_eq!(webp.blobs().warnings.len(), 1);
    }

    #[test]
    fn simple_files_get_a_vp8x() {
        logger();
        let bytes = make_webp_sample(vec![(b"VP8L", &vp8l(300, 200))]);
        let webp = Webp::new(&bytes).unwrap();

        let mut exif = ExifData::new();
        exif.set_str("Exif.Image.Artist", "me").unwrap();
        let (iptc, xmp) = (IptcData::new(), XmpData::new());

        let outcome = webp.write(&bytes, &update(&webp, &exif, &iptc, &xmp)).unwrap();
        assert_eq!(outcome.strategy, WriteStrategy::Intrusive);

        let again = Webp::new(&outcome.bytes).unwrap();
        assert!(again.blobs().warnings.is_empty());
        let fourccs: Vec<[u8; 4]> = again.chunks.iter().map(|c| c.fourcc).collect();
        assert_eq!(fourccs, [VP8X, *b"VP8L", EXIF]);

        // flags, then the canvas size minus one
        let header = again.chunks[0].data(&outcome.bytes);
        assert_eq!(header[0], flags::EXIF);
        assert_eq!(&header[4..10], &[43, 1, 0, 199, 0, 0]);
    }

    #[test]
    fn removing_metadata_clears_flags() {
        logger();
        let flags = vp8x(false, true);
        let bytes = &make_webp_sample(vec![
            (b"VP8X", flags.as_slice()),
            (b"VP8L", &vp8l(2, 2)),
            (b"XMP ", b"<x:xmpmeta/>"),
        ]);
        let webp = Webp::new(bytes).unwrap();
        let (exif, iptc, xmp) = (ExifData::new(), IptcData::new(), XmpData::new());

        let outcome = webp.write(bytes, &update(&webp, &exif, &iptc, &xmp)).unwrap();
        let again = Webp::new(&outcome.bytes).unwrap();
        assert!(again.blobs().is_empty());
        assert_eq!(again.chunks[0].data(&outcome.bytes)[0], 0);
        assert_eq!(again.chunks.len(), 2);
    }

    #[test]
    fn structure_lists_chunks() {
        let bytes = make_webp_sample(vec![(b"VP8L", &vp8l(2, 2))]);
        let webp = Webp::new(&bytes).unwrap();
        let lines = webp.structure(&bytes, false);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("      12 | VP8L  |       10"));
    }
}
