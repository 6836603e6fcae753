use std::collections::BTreeMap;

use winnow::{
    Parser,
    binary::{be_u16, be_u32, u8},
    error::EmptyError,
    token::take,
};

use crate::{
    error::{Warning, warn, warn_lossy},
    iptc::irb,
    providers::RawBlobs,
};

use super::JpegConstructionError;

/// The first marker code, `SOI` (start of image).
pub(super) const SOI: u8 = 0xD8;

/// The last marker code, `EOI` (end of image).
pub(super) const EOI: u8 = 0xD9;

/// The start of scan code, `SOS`.
pub(super) const SOS: u8 = 0xDA;

pub(super) const APP0: u8 = 0xE0;
pub(super) const APP1: u8 = 0xE1;
pub(super) const APP2: u8 = 0xE2;
pub(super) const APP13: u8 = 0xED;
pub(super) const COM: u8 = 0xFE;

pub(super) const EXIF_SIG: &[u8] = b"Exif\0\0";
pub(super) const XMP_SIG: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
pub(super) const XMP_EXT_SIG: &[u8] = b"http://ns.adobe.com/xmp/extension/\0";
pub(super) const ICC_SIG: &[u8] = b"ICC_PROFILE\0";
pub(super) const PHOTOSHOP_SIG: &[u8] = b"Photoshop 3.0\0";

/// One marker segment, as found in the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub marker: u8,

    /// Where the segment starts, including any fill bytes before it.
    pub offset: usize,

    /// The whole segment's length: fill, marker, length bytes, and payload.
    pub len: usize,

    /// How many bytes come before the payload.
    pub header_len: usize,
}

impl Segment {
    pub fn payload<'i>(&self, file: &'i [u8]) -> &'i [u8] {
        file.get(self.offset + self.header_len..self.offset + self.len)
            .unwrap_or_default()
    }

    pub fn bytes<'i>(&self, file: &'i [u8]) -> &'i [u8] {
        file.get(self.offset..self.offset + self.len)
            .unwrap_or_default()
    }

    /// What this segment holds, as far as we care.
    pub fn kind(&self, file: &[u8]) -> SegmentKind {
        let payload = self.payload(file);
        match self.marker {
            APP1 if payload.starts_with(EXIF_SIG) => SegmentKind::Exif,
            APP1 if payload.starts_with(XMP_SIG) => SegmentKind::Xmp,
            APP1 if payload.starts_with(XMP_EXT_SIG) => SegmentKind::ExtendedXmp,
            APP2 if payload.starts_with(ICC_SIG) => SegmentKind::Icc,
            APP13 if payload.starts_with(PHOTOSHOP_SIG) => SegmentKind::Photoshop,
            COM => SegmentKind::Comment,
            _ => SegmentKind::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Exif,
    Xmp,
    ExtendedXmp,
    Icc,
    Photoshop,
    Comment,
    Other,
}

/// Where everything is in a JPEG.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Every segment before the image data, starting with `SOI`.
    pub segments: Vec<Segment>,

    /// Where the `SOS` marker (or `EOI`, or the end of the file) is.
    ///
    /// Everything from here on is copied verbatim.
    pub scan: usize,
}

/// A part of a JPEG file.
enum Marker {
    /// A marker with no data.
    Standalone {
        /// An identifier for a marker.
        marker_code: u8,
    },

    /// A marker with a payload and length.
    Full {
        /// An identifier for a marker.
        marker_code: u8,

        /// The length of the marker's payload.
        ///
        /// This value does NOT include the two length bytes.
        len: u16,
    },
}

/// Checks whether the file starts like a JPEG.
pub fn magic_number(input: &[u8]) -> bool {
    input.starts_with(&[0xFF, SOI])
}

/// Finds every segment up to the image data.
pub fn layout(file: &[u8]) -> Result<Layout, JpegConstructionError> {
    let input: &mut &[u8] = &mut &*file;
    let position = |rest: &[u8]| file.len() - rest.len();

    // take first marker, which should be `SOI`
    match marker(input, 0)? {
        Marker::Standalone { marker_code } if marker_code == SOI => (),
        Marker::Standalone { marker_code } | Marker::Full { marker_code, .. } => {
            log::error!("not a JPEG: the first marker is `{marker_code:x?}`, not `SOI`");
            return Err(JpegConstructionError::NoSoi {
                marker: marker_code,
            });
        }
    };

    let mut segments = vec![Segment {
        marker: SOI,
        offset: 0,
        len: 2,
        header_len: 2,
    }];

    // loop until the image data starts
    while !input.is_empty() {
        let offset = position(input);
        let marker = marker(input, offset)?;

        match marker {
            // image data (and anything after) isn't ours to look at
            Marker::Standalone { marker_code } | Marker::Full { marker_code, .. }
                if marker_code == SOS || marker_code == EOI =>
            {
                log::trace!("hit `{marker_code:x?}` at `{offset}`; stopping");
                return Ok(Layout {
                    segments,
                    scan: offset,
                });
            }

            Marker::Standalone { marker_code } => {
                log::trace!("Got standalone marker with code `{marker_code:x?}`. Skipping...");
                segments.push(Segment {
                    marker: marker_code,
                    offset,
                    len: position(input) - offset,
                    header_len: position(input) - offset,
                });
            }

            Marker::Full { marker_code, len } => {
                let header_len = position(input) - offset;
                let remaining = input.len() as u64;
                take(len as usize)
                    .void()
                    .parse_next(input)
                    .map_err(|_: EmptyError| {
                        log::error!(
                            "segment `{marker_code:x?}` at `{offset}` is cut off. \
                            len: `{len}`, left: `{remaining}`"
                        );
                        JpegConstructionError::PayloadTooShort {
                            marker: marker_code,
                            len: len + 2,
                            remaining,
                        }
                    })?;

                log::trace!("Got full marker! code: `{marker_code:x?}`, len: `{len}`");
                segments.push(Segment {
                    marker: marker_code,
                    offset,
                    len: position(input) - offset,
                    header_len,
                });
            }
        }
    }

    log::warn!("JPEG ended before any image data");
    Ok(Layout {
        segments,
        scan: file.len(),
    })
}

/// Tries to parse out a [`Marker`].
fn marker(input: &mut &[u8], offset: usize) -> Result<Marker, JpegConstructionError> {
    let truncated = |_: EmptyError| {
        log::error!("the JPEG ended inside a marker at `{offset}`");
        JpegConstructionError::Truncated
    };

    let lead: u8 = u8.parse_next(input).map_err(truncated)?;
    if lead != 0xFF {
        log::error!("expected a marker at `{offset}`, got `{lead:x?}`");
        return Err(JpegConstructionError::NotAMarker { offset, byte: lead });
    }

    // fill bytes (extra `0xFF`s) may come before the code
    let marker_code: u8 = loop {
        let k: u8 = u8.parse_next(input).map_err(truncated)?;
        if k != 0xFF {
            break k;
        }
    };
    if marker_code == 0 {
        log::error!("`0x00` at `{offset}` isn't a marker code");
        return Err(JpegConstructionError::BadMarker(marker_code));
    }

    // `RSTn`, `SOI`, `EOI` and `TEM` have no length field
    const STANDALONE: &[u8] = &[
        0xD0, 0xD1, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0x01,
    ];
    if STANDALONE.contains(&marker_code) {
        return Ok(Marker::Standalone { marker_code });
    }

    let raw_len: u16 = be_u16.parse_next(input).map_err(|_: EmptyError| {
        log::error!("segment `{marker_code:x?}` at `{offset}` has no length");
        JpegConstructionError::MissingLength {
            marker: marker_code,
        }
    })?;

    // the length counts its own two bytes
    let len = raw_len
        .checked_sub(2)
        .ok_or(JpegConstructionError::LengthTooShort {
            marker: marker_code,
            len: raw_len,
        })?;

    Ok(Marker::Full { marker_code, len })
}

/// One piece of an ExtendedXMP packet.
struct ExtendedChunk {
    total_len: u32,
    data: Vec<u8>,
}

/// Pulls the metadata blobs out of the segments.
pub fn extract(file: &[u8], layout: &Layout) -> RawBlobs {
    let mut blobs = RawBlobs::default();
    let mut photoshop: Vec<u8> = Vec::new();
    let mut icc_chunks: BTreeMap<u8, (u8, &[u8])> = BTreeMap::new();

    // outer: by GUID, inner: by offset
    let mut extended: BTreeMap<[u8; 32], BTreeMap<u32, ExtendedChunk>> = BTreeMap::new();

    for segment in &layout.segments {
        let payload = segment.payload(file);

        match segment.kind(file) {
            SegmentKind::Exif => {
                if blobs.exif.is_some() {
                    warn(
                        &mut blobs.warnings,
                        format!("ignoring an extra Exif segment at `{}`", segment.offset),
                    );
                    continue;
                }
                log::trace!("Found Exif in JPEG!");
                blobs.exif = Some(payload[EXIF_SIG.len()..].to_vec());
            }

            SegmentKind::Xmp => {
                if blobs.xmp.is_some() {
                    warn(
                        &mut blobs.warnings,
                        format!("ignoring an extra XMP segment at `{}`", segment.offset),
                    );
                    continue;
                }
                log::trace!("Found StandardXMP in JPEG!");
                blobs.xmp = Some(payload[XMP_SIG.len()..].to_vec());
            }

            SegmentKind::ExtendedXmp => {
                let mut rest = &payload[XMP_EXT_SIG.len()..];
                let header = (
                    take::<_, _, EmptyError>(32_usize),
                    be_u32::<_, EmptyError>,
                    be_u32::<_, EmptyError>,
                )
                    .parse_next(&mut rest);
                let Ok((guid, total_len, offset)) = header else {
                    warn_lossy(
                        &mut blobs.warnings,
                        format!("ExtendedXMP segment at `{}` is truncated", segment.offset),
                    );
                    continue;
                };
                let Ok(guid) = <[u8; 32]>::try_from(guid) else {
                    continue;
                };

                log::trace!("Found ExtendedXMP chunk at offset `{offset}`");
                extended.entry(guid).or_default().insert(
                    offset,
                    ExtendedChunk {
                        total_len,
                        data: rest.to_vec(),
                    },
                );
            }

            SegmentKind::Icc => {
                let rest = &payload[ICC_SIG.len()..];
                let [sequence, count, data @ ..] = rest else {
                    warn(&mut blobs.warnings, "ICC segment is missing its sequence numbers");
                    continue;
                };
                if icc_chunks.insert(*sequence, (*count, data)).is_some() {
                    warn(
                        &mut blobs.warnings,
                        format!("ICC chunk `{sequence}` appears more than once"),
                    );
                }
            }

            SegmentKind::Photoshop => {
                // big resource blocks are split over many segments
                photoshop.extend_from_slice(&payload[PHOTOSHOP_SIG.len()..]);
            }

            SegmentKind::Comment => {
                if blobs.comment.is_none() {
                    let text = payload.strip_suffix(b"\0").unwrap_or(payload);
                    blobs.comment = Some(String::from_utf8_lossy(text).into_owned());
                }
            }

            SegmentKind::Other => (),
        }
    }

    if !photoshop.is_empty() {
        match irb::parse(&photoshop, &mut blobs.warnings) {
            Ok(resources) => {
                let iptc: Vec<u8> = resources
                    .iter()
                    .filter(|r| r.id == irb::IPTC && &r.signature == b"8BIM")
                    .flat_map(|r| r.data.iter().copied())
                    .collect();
                if !iptc.is_empty() {
                    blobs.iptc = Some(iptc);
                }
            }
            Err(e) => warn_lossy(
                &mut blobs.warnings,
                format!("couldn't read Photoshop resources. err: {e}"),
            ),
        }
    }

    if !icc_chunks.is_empty() {
        blobs.icc = assemble_icc(&icc_chunks, &mut blobs.warnings);
    }

    if !extended.is_empty() {
        blobs.xmp_extended = assemble_extended(blobs.xmp.as_deref(), extended, &mut blobs.warnings);
    }

    blobs
}

/// Puts ICC chunks back together, in sequence order.
fn assemble_icc(chunks: &BTreeMap<u8, (u8, &[u8])>, warnings: &mut Vec<Warning>) -> Option<Vec<u8>> {
    let count = chunks.values().map(|(c, _)| *c).max().unwrap_or(0);
    if chunks.len() != count as usize || chunks.keys().copied().ne(1..=count) {
        warn_lossy(
            warnings,
            format!(
                "ICC profile should have `{count}` chunks, but `{}` were found",
                chunks.len()
            ),
        );
        return None;
    }

    Some(chunks.values().flat_map(|(_, d)| d.iter().copied()).collect())
}

/// Finds the GUID that the main packet points to.
///
/// It's stored as `xmpNote:HasExtendedXMP`, either as an attribute or an
/// element, so we just look for 32 hex digits after the name.
fn extended_guid(packet: &[u8]) -> Option<[u8; 32]> {
    const NAME: &[u8] = b"HasExtendedXMP";
    let at = packet.windows(NAME.len()).position(|w| w == NAME)?;
    let after = &packet[at + NAME.len()..];

    let start = after
        .iter()
        .position(|b| b.is_ascii_hexdigit())
        .filter(|i| *i < 8)?;
    let guid: [u8; 32] = after.get(start..start + 32)?.try_into().ok()?;
    guid.iter().all(u8::is_ascii_hexdigit).then_some(guid)
}

/// Joins the ExtendedXMP chunks for the main packet's GUID.
fn assemble_extended(
    standard: Option<&[u8]>,
    mut extended: BTreeMap<[u8; 32], BTreeMap<u32, ExtendedChunk>>,
    warnings: &mut Vec<Warning>,
) -> Option<Vec<u8>> {
    let Some(standard) = standard else {
        warn(warnings, "found ExtendedXMP, but no main XMP packet");
        return None;
    };
    let Some(guid) = extended_guid(standard) else {
        warn(warnings, "found ExtendedXMP, but the main packet doesn't name it");
        return None;
    };
    let Some(chunks) = extended.remove(&guid) else {
        warn(
            warnings,
            format!(
                "no ExtendedXMP chunks match GUID `{}`",
                String::from_utf8_lossy(&guid)
            ),
        );
        return None;
    };
    if !extended.is_empty() {
        log::debug!("ignoring `{}` ExtendedXMP chunk sets with other GUIDs", extended.len());
    }

    let total_len = chunks.values().map(|c| c.total_len).max().unwrap_or(0);
    let mut joined: Vec<u8> = Vec::with_capacity(total_len as usize);
    for (offset, chunk) in chunks {
        if offset as usize != joined.len() {
            warn_lossy(
                warnings,
                format!("missing an ExtendedXMP chunk at offset `{}`", joined.len()),
            );
            return None;
        }
        joined.extend(chunk.data);
    }

    if joined.len() != total_len as usize {
        warn_lossy(
            warnings,
            format!(
                "ExtendedXMP should be `{total_len}` bytes, but `{}` were found",
                joined.len()
            ),
        );
        return None;
    }

    log::debug!("joined `{}` bytes of ExtendedXMP", joined.len());
    Some(joined)
}

/// A marker's usual name.
pub fn marker_name(marker: u8) -> String {
    match marker {
        SOI => "SOI".into(),
        EOI => "EOI".into(),
        SOS => "SOS".into(),
        COM => "COM".into(),
        0xC4 => "DHT".into(),
        0xCC => "DAC".into(),
        0xDB => "DQT".into(),
        0xDD => "DRI".into(),
        0xC0..=0xCF => format!("SOF{}", marker - 0xC0),
        0xD0..=0xD7 => format!("RST{}", marker - 0xD0),
        0xE0..=0xEF => format!("APP{}", marker - APP0),
        other => format!("0x{other:02x}"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::util::logger;

    /// Makes a marker segment with a payload.
    pub(crate) fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
        [
            [0xFF, marker].as_slice(),
            &((payload.len() + 2) as u16).to_be_bytes(),
            payload,
        ]
        .concat()
    }

    /// SOS plus some "image data", then EOI.
    pub(crate) fn scan() -> Vec<u8> {
        [
            segment(SOS, &[1, 1, 0, 0, 0x3f, 0]).as_slice(),
            &[0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD0, 0x56], // entropy-coded data
            &[0xFF, EOI],
        ]
        .concat()
    }

    #[test]
    fn finds_segments() {
        logger();
        let file = [
            [0xFF, SOI].as_slice(),
            &segment(APP0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0"),
            &[0xFF, 0xFF], // fill bytes
            &segment(COM, b"hello"),
            &scan(),
        ]
        .concat();

        let layout = layout(&file).unwrap();
        let markers: Vec<u8> = layout.segments.iter().map(|s| s.marker).collect();
        assert_eq!(markers, [SOI, APP0, COM]);

        let com = &layout.segments[2];
        assert_eq!(com.payload(&file), b"hello");
        assert_eq!(com.len, 2 + 4 + 5);
        assert_eq!(layout.scan, com.offset + com.len);
    }

    #[test]
    fn rejects_non_jpegs() {
        assert_eq!(
            layout(&[0xFF, 0xE0, 0, 2]),
            Err(JpegConstructionError::NoSoi { marker: 0xE0 })
        );
        assert!(matches!(
            layout(&[0xFF, SOI, 0xFF, COM, 0, 10, b'h']),
            Err(JpegConstructionError::PayloadTooShort { .. })
        ));
    }

    #[test]
    fn reassembles_icc_out_of_order() {
        logger();
        let file = [
            [0xFF, SOI].as_slice(),
            &segment(APP2, &[ICC_SIG, &[2, 2], b"world"].concat()),
            &segment(APP2, &[ICC_SIG, &[1, 2], b"hello "].concat()),
            &scan(),
        ]
        .concat();

        let blobs = extract(&file, &layout(&file).unwrap());
        assert_eq!(blobs.icc.as_deref(), Some(b"hello world".as_slice()));
    }

    #[test]
    fn missing_icc_chunks_are_dropped() {
        logger();
        let file = [
            [0xFF, SOI].as_slice(),
            &segment(APP2, &[ICC_SIG, &[1, 3], b"a"].concat()),
            &segment(APP2, &[ICC_SIG, &[3, 3], b"c"].concat()),
            &scan(),
        ]
        .concat();

        let blobs = extract(&file, &layout(&file).unwrap());
        assert_eq!(blobs.icc, None);
        assert_eq!(blobs.warnings.len(), 1);
    }

    #[test]
    fn joins_extended_xmp() {
        logger();
        let guid = b"0123456789ABCDEF0123456789ABCDEF";
        let standard = format!(
            "<x:xmpmeta><rdf:RDF><rdf:Description xmpNote:HasExtendedXMP=\"{}\"/></rdf:RDF></x:xmpmeta>",
            core::str::from_utf8(guid).unwrap()
        );
        let ext = |offset: u32, data: &[u8]| {
            segment(
                APP1,
                &[
                    XMP_EXT_SIG,
                    guid,
                    &9_u32.to_be_bytes(), // total length
                    &offset.to_be_bytes(),
                    data,
                ]
                .concat(),
            )
        };

        let file = [
            [0xFF, SOI].as_slice(),
            &segment(APP1, &[XMP_SIG, standard.as_bytes()].concat()),
            &ext(5, b"more"),
            &ext(0, b"<ext>"),
            &scan(),
        ]
        .concat();

        let blobs = extract(&file, &layout(&file).unwrap());
        assert!(blobs.warnings.is_empty(), "{:?}", blobs.warnings);
        assert_eq!(blobs.xmp.as_deref(), Some(standard.as_bytes()));
        assert_eq!(blobs.xmp_extended.as_deref(), Some(b"<ext>more".as_slice()));
    }

    #[test]
    fn reads_iptc_from_photoshop_segments() {
        logger();
        let iim = [0x1c, 2, 120, 0, 5, b'h', b'e', b'l', b'l', b'o'];
        let resources = irb::serialize(&[
            irb::Resource::new(0x0425, vec![0; 16]),
            irb::Resource::new(irb::IPTC, iim.to_vec()),
        ]);

        let file = [
            [0xFF, SOI].as_slice(),
            &segment(APP13, &[PHOTOSHOP_SIG, &resources].concat()),
            &segment(COM, b"a comment\0"),
            &scan(),
        ]
        .concat();

        let blobs = extract(&file, &layout(&file).unwrap());
        assert_eq!(blobs.iptc.as_deref(), Some(iim.as_slice()));
        assert_eq!(blobs.comment.as_deref(), Some("a comment"));
    }

    #[test]
    fn marker_names() {
        assert_eq!(marker_name(0xE1), "APP1");
        assert_eq!(marker_name(0xC0), "SOF0");
        assert_eq!(marker_name(0xDB), "DQT");
    }
}
