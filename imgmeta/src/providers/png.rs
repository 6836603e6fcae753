//! PNG, or the Portable Network Graphics format, is a common image format as
//! of writing.
//!
//! A PNG is its signature, then a list of chunks. Each chunk has a length, a
//! four-character type, its data, and a CRC over the type and data.
//!
//! Metadata can be in a bunch of places:
//!
//! - `eXIf` holds a TIFF blob,
//! - `iTXt` with the keyword `XML:com.adobe.xmp` holds XMP,
//! - `iCCP` holds a compressed ICC profile,
//! - `tEXt`/`iTXt` `Comment` or `Description` holds a comment,
//! - and any text chunk may carry an ImageMagick "raw profile" (`Raw
//!   profile type exif`, `iptc`, or `xmp`), which is hex in a text field.

use std::io::{Read as _, Write as _};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use winnow::{
    ModalResult, Parser as _,
    binary::be_u32,
    error::ContextError,
    token::{literal, take},
};

use crate::{
    MetadataProvider,
    error::{Error, Warning, warn, warn_lossy},
    iptc::irb,
    providers::{
        RawBlobs,
        shared::{EXIF_HEADER, desc, preview, strip_exif_header, tiff_structure},
    },
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
};

const SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const XMP_KEYWORD: &[u8] = b"XML:com.adobe.xmp";
const RAW_PROFILE: &[u8] = b"Raw profile type ";

/// Compressed text shouldn't inflate to anything near this.
const MAX_INFLATED: u64 = 64 * 1024 * 1024;

/// One chunk, as found in the file.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Chunk {
    /// Where the chunk's length field starts.
    offset: usize,
    kind: [u8; 4],
    len: usize,
    crc: u32,
}

impl Chunk {
    fn data<'f>(&self, file: &'f [u8]) -> &'f [u8] {
        &file[self.offset + 8..self.offset + 8 + self.len]
    }

    /// The whole chunk, including its length and CRC.
    fn bytes<'f>(&self, file: &'f [u8]) -> &'f [u8] {
        &file[self.offset..self.offset + 12 + self.len]
    }
}

/// Which metadata a chunk holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChunkKind {
    Exif,
    ExifProfile,
    IptcProfile,
    Xmp,
    XmpProfile,
    Icc,
    Comment,
    Other,
}

/// Something we couldn't get past while reading a PNG.
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum PngConstructionError {
    /// The file didn't start with the PNG signature.
    NoSignature,

    /// The first chunk couldn't be read, or it wasn't `IHDR`.
    NoHeaderChunk,
}

impl core::fmt::Display for PngConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoSignature => f.write_str("The PNG signature wasn't found."),
            Self::NoHeaderChunk => f.write_str("A PNG's first chunk must be `IHDR`, but it wasn't."),
        }
    }
}

impl core::error::Error for PngConstructionError {}

/// A PNG file.
#[derive(Clone, Debug)]
pub struct Png {
    chunks: Vec<Chunk>,
    blobs: RawBlobs,

    /// Whether the Exif came from a raw profile instead of `eXIf`.
    exif_in_profile: bool,
}

fn chunk(input: &mut &[u8], offset: usize) -> ModalResult<(Chunk, u32), ContextError> {
    let len = be_u32.context(desc("chunk length")).parse_next(input)? as usize;
    let kind: &[u8] = take(4_usize).context(desc("chunk type")).parse_next(input)?;
    let data: &[u8] = take(len).context(desc("chunk data")).parse_next(input)?;
    let crc = be_u32.context(desc("chunk crc")).parse_next(input)?;

    // the CRC covers the type and data
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);

    let kind: [u8; 4] = [kind[0], kind[1], kind[2], kind[3]];
    Ok((
        Chunk {
            offset,
            kind,
            len,
            crc,
        },
        hasher.finalize(),
    ))
}

/// Walks every chunk up to (and including) `IEND`.
fn chunks(file: &[u8], warnings: &mut Vec<Warning>) -> Result<Vec<Chunk>, PngConstructionError> {
    let mut input = file;
    literal(SIGNATURE)
        .void()
        .parse_next(&mut input)
        .map_err(|_: winnow::error::ErrMode<ContextError>| PngConstructionError::NoSignature)?;

    let mut found = Vec::new();
    while !input.is_empty() {
        let offset = file.len() - input.len();
        let (c, computed) = match chunk(&mut input, offset) {
            Ok(c) => c,
            Err(e) => {
                warn_lossy(
                    warnings,
                    format!("PNG chunk at offset `{offset}` is truncated. err: {e}"),
                );
                break;
            }
        };

        if c.crc != computed {
            warn(
                warnings,
                format!(
                    "PNG chunk `{}` has a bad checksum. expected: `{:08x}`, got: `{:08x}`",
                    String::from_utf8_lossy(&c.kind),
                    computed,
                    c.crc
                ),
            );
        }

        let end = &c.kind == b"IEND";
        found.push(c);
        if end {
            break;
        }
    }

    if found.first().is_none_or(|c| &c.kind != b"IHDR") {
        return Err(PngConstructionError::NoHeaderChunk);
    }
    Ok(found)
}

fn inflate(data: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .take(MAX_INFLATED)
        .read_to_end(&mut out)
        .ok()?;
    Some(out)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Splits off a NUL-terminated field.
fn field(data: &[u8]) -> Option<(&[u8], &[u8])> {
    let nul = data.iter().position(|b| *b == 0)?;
    Some((&data[..nul], &data[nul + 1..]))
}

/// A text chunk's keyword and text, decompressed if needed.
fn text_chunk(kind: &[u8; 4], data: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
    let (keyword, rest) = field(data)?;
    let text = match kind {
        b"tEXt" => rest.to_vec(),
        b"zTXt" => {
            // compression method, then zlib
            let (0, compressed) = rest.split_first().map(|(m, r)| (*m, r))? else {
                return None;
            };
            inflate(compressed)?
        }
        b"iTXt" => {
            let (&compressed, rest) = rest.split_first()?;
            let (_method, rest) = rest.split_first()?;
            let (_lang, rest) = field(rest)?;
            let (_translated, text) = field(rest)?;
            if compressed == 1 {
                inflate(text)?
            } else {
                text.to_vec()
            }
        }
        _ => return None,
    };
    Some((keyword.to_vec(), text))
}

/// Latin-1 (what `tEXt` uses) to a `String`.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|b| *b as char).collect()
}

/// Decodes ImageMagick's raw profile text:
///
/// ```text
/// \nexif\n     220\n45786966000049492a00...
/// ```
///
/// That's the profile's name, how many bytes it holds, then the bytes as hex
/// (split over many lines).
fn decode_raw_profile(text: &[u8]) -> Option<Vec<u8>> {
    let mut lines = text.split(|b| *b == b'\n').skip_while(|l| l.is_empty());
    let _name = lines.next()?;
    let len: usize = core::str::from_utf8(lines.next()?).ok()?.trim().parse().ok()?;

    let digits: Vec<u8> = lines
        .flatten()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let mut out = Vec::with_capacity(len);
    for pair in digits.chunks_exact(2).take(len) {
        let pair = core::str::from_utf8(pair).ok()?;
        out.push(u8::from_str_radix(pair, 16).ok()?);
    }
    (out.len() == len).then_some(out)
}

fn encode_raw_profile(name: &str, data: &[u8]) -> Vec<u8> {
    let mut out = format!("\n{name}\n{:8}\n", data.len());
    for line in data.chunks(36) {
        for b in line {
            out.push_str(&format!("{b:02x}"));
        }
        out.push('\n');
    }
    out.into_bytes()
}

/// IPTC in a raw profile is usually wrapped in Photoshop resources.
fn iptc_from_profile(data: Vec<u8>, warnings: &mut Vec<Warning>) -> Option<Vec<u8>> {
    let data = match data.strip_prefix(b"Photoshop 3.0\0") {
        Some(rest) => rest.to_vec(),
        None => data,
    };
    if !irb::SIGNATURES.iter().any(|s| data.starts_with(*s)) {
        return Some(data);
    }

    match irb::parse(&data, warnings) {
        Ok(resources) => irb::find(&resources, irb::IPTC).map(|r| r.data.clone()),
        Err(e) => {
            warn(warnings, format!("couldn't read the PNG IPTC profile. err: {e}"));
            None
        }
    }
}

fn classify(kind: &[u8; 4], data: &[u8]) -> ChunkKind {
    match kind {
        b"eXIf" => return ChunkKind::Exif,
        b"iCCP" => return ChunkKind::Icc,
        b"tEXt" | b"zTXt" | b"iTXt" => (),
        _ => return ChunkKind::Other,
    }

    let Some((keyword, _)) = field(data) else {
        return ChunkKind::Other;
    };
    match keyword.strip_prefix(RAW_PROFILE) {
        Some(b"exif" | b"APP1") => ChunkKind::ExifProfile,
        Some(b"iptc") => ChunkKind::IptcProfile,
        Some(b"xmp") => ChunkKind::XmpProfile,
        Some(_) => ChunkKind::Other,
        None if keyword == XMP_KEYWORD && kind == b"iTXt" => ChunkKind::Xmp,
        None if keyword == b"Comment" || keyword == b"Description" => ChunkKind::Comment,
        None => ChunkKind::Other,
    }
}

/// Fills the blobs from every chunk. Earlier chunks win.
fn extract(file: &[u8], chunks: &[Chunk], warnings: &mut Vec<Warning>) -> (RawBlobs, bool) {
    let mut blobs = RawBlobs::default();
    let mut exif_in_profile = false;

    for c in chunks {
        let data = c.data(file);
        let kind = classify(&c.kind, data);
        if kind == ChunkKind::Other {
            continue;
        }

        if kind == ChunkKind::Exif {
            if blobs.exif.is_none() {
                blobs.exif = Some(strip_exif_header(data).to_vec());
            }
            continue;
        }

        if kind == ChunkKind::Icc {
            if blobs.icc.is_none() {
                blobs.icc = field(data)
                    .and_then(|(_name, rest)| rest.split_first())
                    .and_then(|(_method, compressed)| inflate(compressed));
                if blobs.icc.is_none() {
                    warn_lossy(warnings, "couldn't inflate the PNG `iCCP` chunk");
                }
            }
            continue;
        }

        let Some((_keyword, text)) = text_chunk(&c.kind, data) else {
            warn_lossy(
                warnings,
                format!(
                    "couldn't read PNG text chunk `{}` at offset `{}`",
                    String::from_utf8_lossy(&c.kind),
                    c.offset
                ),
            );
            continue;
        };

        match kind {
            ChunkKind::ExifProfile if blobs.exif.is_none() => {
                match decode_raw_profile(&text) {
                    Some(profile) => {
                        // the profile is an APP1 payload, so skip to the TIFF header
                        let at = profile
                            .windows(EXIF_HEADER.len())
                            .position(|w| w == EXIF_HEADER);
                        let tiff = match at {
                            Some(at) => profile[at + EXIF_HEADER.len()..].to_vec(),
                            None => profile,
                        };
                        blobs.exif = Some(tiff);
                        exif_in_profile = true;
                    }
                    None => warn_lossy(warnings, "couldn't decode the PNG Exif raw profile"),
                }
            }

            ChunkKind::IptcProfile if blobs.iptc.is_none() => match decode_raw_profile(&text) {
                Some(profile) => blobs.iptc = iptc_from_profile(profile, warnings),
                None => warn_lossy(warnings, "couldn't decode the PNG IPTC raw profile"),
            },

            ChunkKind::Xmp if blobs.xmp.is_none() => blobs.xmp = Some(text),

            ChunkKind::XmpProfile if blobs.xmp.is_none() => match decode_raw_profile(&text) {
                Some(profile) => blobs.xmp = Some(profile),
                None => warn_lossy(warnings, "couldn't decode the PNG XMP raw profile"),
            },

            ChunkKind::Comment if blobs.comment.is_none() => {
                blobs.comment = Some(if c.kind == *b"iTXt" {
                    String::from_utf8_lossy(&text).into_owned()
                } else {
                    latin1(&text)
                });
            }

            _ => warn(
                warnings,
                format!(
                    "ignoring a duplicate PNG `{}` chunk at offset `{}`",
                    String::from_utf8_lossy(&c.kind),
                    c.offset
                ),
            ),
        }
    }

    (blobs, exif_in_profile)
}

/// Writes one chunk, CRC included.
fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> Result<(), Error> {
    let len = u32::try_from(data.len()).map_err(|_| Error::Provider {
        format: "PNG",
        message: format!("chunk `{}` is too large", String::from_utf8_lossy(kind)),
    })?;

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);

    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
    Ok(())
}

/// A `zTXt` chunk holding a raw profile.
fn profile_chunk(out: &mut Vec<u8>, name: &str, data: &[u8]) -> Result<(), Error> {
    let text = encode_raw_profile(name, data);
    let mut payload = [RAW_PROFILE, name.as_bytes(), &[0, 0]].concat();
    payload.extend(deflate(&text)?);
    write_chunk(out, b"zTXt", &payload)
}

/// An uncompressed `iTXt` chunk, with no language.
fn itxt_chunk(out: &mut Vec<u8>, keyword: &[u8], text: &[u8]) -> Result<(), Error> {
    let payload = [keyword, &[0, 0, 0, 0, 0], text].concat();
    write_chunk(out, b"iTXt", &payload)
}

impl Png {
    fn new_chunks(
        &self,
        update: &MetadataUpdate<'_>,
        warnings: &mut Vec<Warning>,
    ) -> Result<(Vec<u8>, Vec<ChunkKind>, WriteStrategy), Error> {
        let mut out = Vec::new();
        let mut replaced = Vec::new();
        let mut strategy = WriteStrategy::NonIntrusive;

        match update.exif_change(warnings)? {
            Change::Keep => (),
            Change::Remove => replaced.extend([ChunkKind::Exif, ChunkKind::ExifProfile]),
            Change::Set((tiff, s)) => {
                strategy = strategy.and(s);
                replaced.extend([ChunkKind::Exif, ChunkKind::ExifProfile]);
                if self.exif_in_profile {
                    profile_chunk(&mut out, "exif", &[EXIF_HEADER, &tiff].concat())?;
                } else {
                    write_chunk(&mut out, b"eXIf", &tiff)?;
                }
            }
        }

        let iptc = update.iptc_change();
        if !iptc.is_keep() {
            replaced.push(ChunkKind::IptcProfile);
        }
        if let Change::Set(iim) = iptc {
            let block = irb::serialize(&[irb::Resource::new(irb::IPTC, iim)]);
            profile_chunk(&mut out, "iptc", &block)?;
        }

        let xmp = update.xmp_change()?;
        if !xmp.is_keep() {
            replaced.extend([ChunkKind::Xmp, ChunkKind::XmpProfile]);
        }
        if let Change::Set(packet) = xmp {
            itxt_chunk(&mut out, XMP_KEYWORD, packet.as_bytes())?;
        }

        let icc = update.icc_change();
        if !icc.is_keep() {
            replaced.push(ChunkKind::Icc);
        }
        if let Change::Set(profile) = icc {
            let mut payload = b"ICC profile\0\0".to_vec();
            payload.extend(deflate(&profile)?);
            write_chunk(&mut out, b"iCCP", &payload)?;
        }

        let comment = update.comment_change();
        if !comment.is_keep() {
            replaced.push(ChunkKind::Comment);
        }
        if let Change::Set(text) = comment {
            // `tEXt` is Latin-1 only
            if text.chars().all(|c| (c as u32) < 0x100) {
                let text: Vec<u8> = text.chars().map(|c| c as u8).collect();
                write_chunk(&mut out, b"tEXt", &[b"Comment\0".as_slice(), &text].concat())?;
            } else {
                itxt_chunk(&mut out, b"Comment", text.as_bytes())?;
            }
        }

        if !replaced.is_empty() {
            strategy = WriteStrategy::Intrusive;
        }
        Ok((out, replaced, strategy))
    }
}

impl MetadataProvider for Png {
    type ConstructionError = PngConstructionError;

    const FORMAT: &'static str = "PNG";

    fn magic_number(input: &[u8]) -> bool {
        input.starts_with(SIGNATURE)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let input = input.as_ref();
        let mut warnings = Vec::new();
        let chunks = chunks(input, &mut warnings)?;
        let (mut blobs, exif_in_profile) = extract(input, &chunks, &mut warnings);
        blobs.warnings = warnings;

        log::debug!("PNG has `{}` chunks", chunks.len());
        Ok(Self {
            chunks,
            blobs,
            exif_in_profile,
        })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        let mut warnings = Vec::new();
        let (new, replaced, strategy) = self.new_chunks(update, &mut warnings)?;

        if replaced.is_empty() {
            log::debug!("PNG is unchanged");
            return Ok(WriteOutcome {
                bytes: input.to_vec(),
                strategy,
                warnings,
            });
        }

        let mut out = Vec::with_capacity(input.len() + new.len());
        out.extend_from_slice(SIGNATURE);

        // new metadata goes right after `IHDR`
        for (i, c) in self.chunks.iter().enumerate() {
            if replaced.contains(&classify(&c.kind, c.data(input))) {
                continue;
            }
            out.extend_from_slice(c.bytes(input));
            if i == 0 {
                out.extend_from_slice(&new);
            }
        }

        // anything after `IEND` stays put
        if let Some(last) = self.chunks.last() {
            out.extend_from_slice(&input[last.offset + 12 + last.len..]);
        }

        log::debug!("rewrote PNG: `{}` -> `{}` bytes", input.len(), out.len());
        Ok(WriteOutcome {
            bytes: out,
            strategy,
            warnings,
        })
    }

    fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
        let mut lines = vec![" address | chunk |  length | data                             | checksum".to_string()];
        for c in &self.chunks {
            let data = c.data(input);
            lines.push(format!(
                "{:8} | {:<5} | {:7} | {:<32} | 0x{:08x}",
                c.offset,
                String::from_utf8_lossy(&c.kind),
                c.len,
                preview(data, 32),
                c.crc
            ));

            if recursive && &c.kind == b"eXIf" {
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

    /// A 1x1 grayscale PNG with extra chunks after `IHDR`.
    fn png_with(extra: &[u8]) -> Vec<u8> {
        let mut out = SIGNATURE.to_vec();
        let ihdr = [
            1_u32.to_be_bytes().as_slice(), // width
            &1_u32.to_be_bytes(),           // height
            &[8, 0, 0, 0, 0],               // depth, color type, compression, filter, interlace
        ]
        .concat();
        write_chunk(&mut out, b"IHDR", &ihdr).unwrap();
        out.extend_from_slice(extra);
        write_chunk(&mut out, b"IDAT", &deflate(&[0, 0]).unwrap()).unwrap();
        write_chunk(&mut out, b"IEND", &[]).unwrap();
        out
    }

    fn tiff() -> Vec<u8> {
        let mut exif = ExifData::new();
        exif.set_str("Exif.Image.Make", "Nikon").unwrap();
        exif.to_bytes().unwrap()
    }

    fn update<'a>(
        png: &'a Png,
        exif: &'a ExifData,
        iptc: &'a IptcData,
        xmp: &'a XmpData,
    ) -> MetadataUpdate<'a> {
        MetadataUpdate {
            exif,
            iptc,
            xmp,
            icc: png.blobs().icc.as_deref(),
            comment: png.blobs().comment.as_deref(),
            options: WriteOptions::default(),
            original: png.blobs(),
        }
    }

    #[test]
    fn rejects_other_files() {
        assert!(!Png::magic_number(b"\xFF\xD8\xFF"));
        assert_eq!(
            Png::new(&b"\x89PNG\r\n\x1a\nxx".to_vec()).unwrap_err(),
            PngConstructionError::NoHeaderChunk
        );
    }

    #[test]
    fn raw_profiles() {
        let data: Vec<u8> = (0..100).collect();
        let text = encode_raw_profile("iptc", &data);
        assert!(text.starts_with(b"\niptc\n     100\n000102"));
        assert_eq!(decode_raw_profile(&text).unwrap(), data);

        // lengths that don't match the hex are rejected
        assert_eq!(decode_raw_profile(b"\nxmp\n  4\n0102\n"), None);
    }

    #[test]
    fn reads_every_carrier() {
        logger();
        let mut extra = Vec::new();
        write_chunk(&mut extra, b"eXIf", &tiff()).unwrap();
        itxt_chunk(&mut extra, XMP_KEYWORD, b"<x:xmpmeta/>").unwrap();
        write_chunk(&mut extra, b"tEXt", b"Comment\0caf\xe9").unwrap();
        let icc: Vec<u8> = (0..64).collect();
        let mut iccp = b"sRGB\0\0".to_vec();
        iccp.extend(deflate(&icc).unwrap());
        write_chunk(&mut extra, b"iCCP", &iccp).unwrap();

        let file = png_with(&extra);
        let png = Png::new(&file).unwrap();
        assert!(png.blobs().warnings.is_empty());
        assert_eq!(png.blobs().exif.as_deref(), Some(tiff().as_slice()));
        assert_eq!(png.blobs().xmp.as_deref(), Some(b"<x:xmpmeta/>".as_slice()));
        assert_eq!(png.blobs().comment.as_deref(), Some("café"));
        assert_eq!(png.blobs().icc.as_deref(), Some(icc.as_slice()));
    }

    #[test]
    fn reads_exif_from_raw_profiles() {
        logger();
        let mut extra = Vec::new();
        profile_chunk(&mut extra, "exif", &[EXIF_HEADER, &tiff()].concat()).unwrap();

        let png = Png::new(&png_with(&extra)).unwrap();
        assert!(png.exif_in_profile);
        assert_eq!(png.blobs().exif.as_deref(), Some(tiff().as_slice()));
    }

    #[test]
    fn bad_checksums_warn() {
        logger();
        let mut file = png_with(&[]);

        // flip a bit in IHDR's data
        file[SIGNATURE.len() + 8] ^= 1;
        let png = Png::new(&file).unwrap();
        assert_eq!(png.blobs().warnings.len(), 1);
        assert!(png.blobs().warnings[0].message.contains("bad checksum"));
    }

    #[test]
    fn writes_after_ihdr() {
        logger();
        let file = png_with(&[]);
        let png = Png::new(&file).unwrap();

        let (exif, _) = ExifData::parse(&tiff()).unwrap();
        let mut exif = exif;
        exif.set_str("Exif.Image.Model", "D70").unwrap();
        let mut iptc = IptcData::new();
        iptc.set_str("Iptc.Application2.Headline", "news").unwrap();
        let mut xmp = XmpData::new();
        xmp.set_str("Xmp.dc.subject", None, "png").unwrap();

        let mut update = update(&png, &exif, &iptc, &xmp);
        update.comment = Some("hello");
        let outcome = png.write(&file, &update).unwrap();
        assert_eq!(outcome.strategy, WriteStrategy::Intrusive);

        let again = Png::new(&outcome.bytes).unwrap();
        assert!(again.blobs().warnings.is_empty());
        let kinds: Vec<&[u8; 4]> = again.chunks.iter().map(|c| &c.kind).collect();
        assert_eq!(
            kinds,
            [b"IHDR", b"eXIf", b"zTXt", b"iTXt", b"tEXt", b"IDAT", b"IEND"]
        );

        let (back, _) = ExifData::parse(again.blobs().exif.as_ref().unwrap()).unwrap();
        assert_eq!(back.get("Exif.Image.Model").unwrap().value().to_string(), "D70");
        assert_eq!(again.blobs().iptc, Some(iptc.to_bytes()));
        assert_eq!(again.blobs().comment.as_deref(), Some("hello"));

        // the image data is copied as-is
        let idat = |png: &Png, file: &[u8]| {
            png.chunks
                .iter()
                .find(|c| &c.kind == b"IDAT")
                .map(|c| c.bytes(file).to_vec())
        };
        assert_eq!(idat(&again, &outcome.bytes), idat(&png, &file));
    }

    #[test]
    fn exif_keeps_its_carrier() {
        logger();
        let mut extra = Vec::new();
        profile_chunk(&mut extra, "exif", &[EXIF_HEADER, &tiff()].concat()).unwrap();
        let file = png_with(&extra);
        let png = Png::new(&file).unwrap();

        let (mut exif, _) = ExifData::parse(png.blobs().exif.as_ref().unwrap()).unwrap();
        exif.set_str("Exif.Image.Make", "Canon").unwrap();
        let (iptc, xmp) = (IptcData::new(), XmpData::new());

        let outcome = png.write(&file, &update(&png, &exif, &iptc, &xmp)).unwrap();
        let again = Png::new(&outcome.bytes).unwrap();
        assert!(again.exif_in_profile);
        assert!(!again.chunks.iter().any(|c| &c.kind == b"eXIf"));
    }

    #[test]
    fn unchanged_files_stay_the_same() {
        logger();
        let file = png_with(&[]);
        let png = Png::new(&file).unwrap();
        let (exif, iptc, xmp) = (ExifData::new(), IptcData::new(), XmpData::new());

        let outcome = png.write(&file, &update(&png, &exif, &iptc, &xmp)).unwrap();
        assert_eq!(outcome.bytes, file);
        assert_eq!(outcome.strategy, WriteStrategy::NonIntrusive);
    }

    #[test]
    fn structure_lists_chunks() {
        let file = png_with(&[]);
        let png = Png::new(&file).unwrap();
        let lines = png.structure(&file, false);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("       8 | IHDR  |      13"));
    }
}
