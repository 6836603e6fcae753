//! Encapsulated PostScript.
//!
//! EPS only carries XMP, as a packet somewhere in the PostScript text. DOS
//! EPS files wrap that text in a binary header that also points at preview
//! images, so offsets in that header can't move.
//!
//! Because of that, we never grow or shrink the file: a new packet has to fit
//! in the old one's space, and gets padded with spaces until it does.

use winnow::{
    ModalResult, Parser as _,
    binary::le_u32,
    error::ContextError,
    token::{literal, take},
};

use crate::{
    MetadataProvider,
    error::{Error, warn},
    providers::{RawBlobs, shared::desc},
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
    xmp::XmpData,
};

const PS_MAGIC: &[u8] = b"%!PS-Adobe";
const DOS_MAGIC: &[u8] = &[0xC5, 0xD0, 0xD3, 0xC6];

const PACKET_BEGIN: &[u8] = b"<?xpacket begin=";
const PACKET_END: &[u8] = b"<?xpacket end=";

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum EpsConstructionError {
    /// Neither the PostScript nor the DOS EPS signature was there.
    NoSignature,

    /// The DOS EPS header pointed outside the file.
    BadDosHeader,
}

impl core::fmt::Display for EpsConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoSignature => f.write_str("The file isn't EPS."),
            Self::BadDosHeader => {
                f.write_str("The DOS EPS header points past the end of the file.")
            }
        }
    }
}

impl core::error::Error for EpsConstructionError {}

/// An EPS file.
#[derive(Clone, Debug)]
pub struct Eps {
    /// The PostScript section, as `(offset, length)`.
    postscript: (usize, usize),

    /// Where the XMP packet is, if there is one.
    packet: Option<(usize, usize)>,
    blobs: RawBlobs,
}

/// Reads a DOS EPS header: the PostScript section's offset and length.
fn dos_header(input: &mut &[u8]) -> ModalResult<(u32, u32), ContextError> {
    literal(DOS_MAGIC).context(desc("DOS EPS signature")).parse_next(input)?;
    let offset = le_u32.context(desc("PostScript offset")).parse_next(input)?;
    let len = le_u32.context(desc("PostScript length")).parse_next(input)?;

    // previews and the checksum
    take(4_usize * 4 + 2).void().parse_next(input)?;
    Ok((offset, len))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Finds every whole packet in some text, as `(offset, length)`.
fn packets(text: &[u8]) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut from = 0;

    while let Some(begin) = find(&text[from..], PACKET_BEGIN).map(|at| from + at) {
        let Some(end) = find(&text[begin..], PACKET_END).map(|at| begin + at) else {
            break;
        };
        let Some(close) = find(&text[end..], b"?>").map(|at| end + at + 2) else {
            break;
        };
        found.push((begin, close - begin));
        from = close;
    }
    found
}

/// Pads a packet with spaces so it's exactly `len` bytes long.
///
/// Returns `None` when it can't fit.
fn fit_packet(packet: &str, len: usize) -> Option<Vec<u8>> {
    let trailer_at = packet.rfind(core::str::from_utf8(PACKET_END).ok()?)?;
    let (body, trailer) = packet.split_at(trailer_at);
    let body = body.trim_end();

    let needed = body.len() + 1 + trailer.len();
    let spaces = len.checked_sub(needed)?;

    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(body.as_bytes());
    out.resize(out.len() + spaces, b' ');
    out.push(b'\n');
    out.extend_from_slice(trailer.as_bytes());
    Some(out)
}

impl MetadataProvider for Eps {
    type ConstructionError = EpsConstructionError;

    const FORMAT: &'static str = "EPS";

    fn magic_number(input: &[u8]) -> bool {
        input.starts_with(PS_MAGIC) || input.starts_with(DOS_MAGIC)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let file = input.as_ref();

        let postscript = if file.starts_with(DOS_MAGIC) {
            let (offset, len) =
                dos_header(&mut &file[..]).map_err(|_| EpsConstructionError::BadDosHeader)?;
            let (offset, len) = (offset as usize, len as usize);
            if offset.checked_add(len).is_none_or(|end| end > file.len()) {
                return Err(EpsConstructionError::BadDosHeader);
            }
            (offset, len)
        } else if file.starts_with(PS_MAGIC) {
            (0, file.len())
        } else {
            return Err(EpsConstructionError::NoSignature);
        };

        let (ps_at, ps_len) = postscript;
        let text = &file[ps_at..ps_at + ps_len];

        let mut warnings = Vec::new();
        let found = packets(text);
        if found.len() > 1 {
            warn(
                &mut warnings,
                format!("EPS has `{}` XMP packets; using the first", found.len()),
            );
        }

        let packet = found.first().map(|(at, len)| (ps_at + at, *len));
        let blobs = RawBlobs {
            xmp: packet.map(|(at, len)| file[at..at + len].to_vec()),
            warnings,
            ..Default::default()
        };

        Ok(Self {
            postscript,
            packet,
            blobs,
        })
    }

    fn blobs(&self) -> &RawBlobs {
        &self.blobs
    }

    fn write(&self, input: &[u8], update: &MetadataUpdate<'_>) -> Result<WriteOutcome, Error> {
        let mut warnings = Vec::new();

        let others_changed = !update.exif_change(&mut warnings)?.is_keep()
            || !update.iptc_change().is_keep()
            || !update.icc_change().is_keep()
            || !update.comment_change().is_keep();
        if others_changed {
            warn(&mut warnings, "EPS files can only hold XMP; other changes were dropped");
        }

        let packet = match update.xmp_change()? {
            Change::Keep => {
                return Ok(WriteOutcome {
                    bytes: input.to_vec(),
                    strategy: WriteStrategy::NonIntrusive,
                    warnings,
                });
            }
            // an empty packet keeps the space, in case it's wanted again
            Change::Remove => XmpData::new().to_packet()?,
            Change::Set(packet) => packet,
        };

        let Some((at, len)) = self.packet else {
            return Err(Error::Provider {
                format: Self::FORMAT,
                message: "the file has no XMP packet to replace".into(),
            });
        };
        let fitted = fit_packet(&packet, len).ok_or_else(|| Error::Provider {
            format: Self::FORMAT,
            message: format!(
                "the new XMP packet doesn't fit in the old one's `{len}` bytes"
            ),
        })?;

        let mut out = input.to_vec();
        out[at..at + len].copy_from_slice(&fitted);

        log::debug!("replaced EPS XMP packet at `{at}` in place");
        Ok(WriteOutcome {
            bytes: out,
            strategy: WriteStrategy::NonIntrusive,
            warnings,
        })
    }

    fn structure(&self, _input: &[u8], _recursive: bool) -> Vec<String> {
        let (ps_at, ps_len) = self.postscript;
        let mut lines = vec![format!("PostScript: {ps_len} bytes at {ps_at}")];
        match self.packet {
            Some((at, len)) => lines.push(format!("XMP packet: {len} bytes at {at}")),
            None => lines.push("XMP packet: none".into()),
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{exif::ExifData, iptc::IptcData, util::logger, write::WriteOptions};

    const PACKET: &str = concat!(
        "<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n",
        "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">",
        "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"/>",
        "</x:xmpmeta>\n"
    );

    fn eps(padding: usize) -> Vec<u8> {
        [
            b"%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 10 10\n".as_slice(),
            PACKET.as_bytes(),
            " ".repeat(padding).as_bytes(),
            b"\n<?xpacket end=\"w\"?>\n",
            b"showpage\n%%EOF\n",
        ]
        .concat()
    }

    fn update<'a>(
        eps: &'a Eps,
        exif: &'a ExifData,
        iptc: &'a IptcData,
        xmp: &'a XmpData,
    ) -> MetadataUpdate<'a> {
        MetadataUpdate {
            exif,
            iptc,
            xmp,
            icc: None,
            comment: None,
            options: WriteOptions::default(),
            original: eps.blobs(),
        }
    }

    #[test]
    fn finds_packets() {
        logger();
        let file = eps(10);
        let parsed = Eps::new(&file).unwrap();
        let xmp = parsed.blobs().xmp.as_ref().unwrap();
        assert!(xmp.starts_with(PACKET_BEGIN));
        assert!(xmp.ends_with(b"<?xpacket end=\"w\"?>"));
    }

    #[test]
    fn reads_dos_eps() {
        logger();
        let ps = eps(0);
        let header = [
            DOS_MAGIC,
            &30_u32.to_le_bytes(),               // postscript offset
            &(ps.len() as u32).to_le_bytes(),    // postscript length
            &[0; 16],                            // no previews
            &0xFFFF_u16.to_le_bytes(),           // no checksum
        ]
        .concat();
        let file = [header.as_slice(), &ps].concat();

        let parsed = Eps::new(&file).unwrap();
        assert_eq!(parsed.postscript, (30, ps.len()));
        assert!(parsed.blobs().xmp.is_some());

        let mut bad = file.clone();
        bad[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(Eps::new(&bad).unwrap_err(), EpsConstructionError::BadDosHeader);
    }

    #[test]
    fn packets_are_replaced_in_place() {
        logger();
        let file = eps(4000);
        let parsed = Eps::new(&file).unwrap();

        let (mut xmp, _) = XmpData::parse_bytes(parsed.blobs().xmp.as_ref().unwrap()).unwrap();
        xmp.set_str("Xmp.dc.format", None, "application/postscript").unwrap();
        let (exif, iptc) = (ExifData::new(), IptcData::new());

        let outcome = parsed.write(&file, &update(&parsed, &exif, &iptc, &xmp)).unwrap();
        assert_eq!(outcome.strategy, WriteStrategy::NonIntrusive);
        assert_eq!(outcome.bytes.len(), file.len());
        assert!(outcome.bytes.ends_with(b"showpage\n%%EOF\n"));

        let again = Eps::new(&outcome.bytes).unwrap();
        let (back, _) = XmpData::parse_bytes(again.blobs().xmp.as_ref().unwrap()).unwrap();
        assert_eq!(
            back.get("Xmp.dc.format").unwrap().value(),
            xmp.get("Xmp.dc.format").unwrap().value()
        );
    }

    #[test]
    fn packets_that_dont_fit_fail() {
        logger();
        let file = eps(0);
        let parsed = Eps::new(&file).unwrap();

        let mut xmp = XmpData::new();
        xmp.set_str("Xmp.dc.format", None, "application/postscript").unwrap();
        let (exif, iptc) = (ExifData::new(), IptcData::new());

        assert!(matches!(
            parsed.write(&file, &update(&parsed, &exif, &iptc, &xmp)),
            Err(Error::Provider { format: "EPS", .. })
        ));
    }
}
