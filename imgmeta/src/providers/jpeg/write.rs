//! Rebuilds a JPEG's header segments around new metadata.
//!
//! Segments we don't touch are copied byte for byte, and so is everything
//! from `SOS` on.

use crate::{
    error::{Error, Warning},
    iptc::irb,
    write::{Change, MetadataUpdate, WriteOutcome, WriteStrategy},
};

use super::parse::{
    APP0, APP1, APP2, APP13, COM, EXIF_SIG, ICC_SIG, Layout, PHOTOSHOP_SIG, SOI, SegmentKind,
    XMP_SIG,
};

/// The most payload a segment can carry (its length field counts itself).
const MAX_PAYLOAD: usize = 65533;

/// The biggest XMP packet that fits in one APP1.
pub(super) const MAX_XMP: usize = MAX_PAYLOAD - XMP_SIG.len();

/// How much ICC data goes in each APP2.
const ICC_CHUNK: usize = MAX_PAYLOAD - ICC_SIG.len() - 2;

/// The IPTC digest resource. It's stale once IPTC changes.
const IPTC_DIGEST: u16 = 0x0425;

fn segment(out: &mut Vec<u8>, marker: u8, parts: &[&[u8]]) {
    let len: usize = parts.iter().map(|p| p.len()).sum::<usize>() + 2;
    out.extend_from_slice(&[0xFF, marker]);
    out.extend_from_slice(&(len as u16).to_be_bytes());
    for p in parts {
        out.extend_from_slice(p);
    }
}

/// New segments for each kind of metadata, or `None` to keep the old ones.
#[derive(Debug, Default)]
struct Replacements {
    exif: Option<Vec<u8>>,
    xmp: Option<Vec<u8>>,
    icc: Option<Vec<u8>>,
    photoshop: Option<Vec<u8>>,
    comment: Option<Vec<u8>>,
}

impl Replacements {
    fn for_kind(&mut self, kind: SegmentKind) -> Option<&mut Option<Vec<u8>>> {
        match kind {
            SegmentKind::Exif => Some(&mut self.exif),
            // ExtendedXMP goes wherever the main packet goes
            SegmentKind::Xmp | SegmentKind::ExtendedXmp => Some(&mut self.xmp),
            SegmentKind::Icc => Some(&mut self.icc),
            SegmentKind::Photoshop => Some(&mut self.photoshop),
            SegmentKind::Comment => Some(&mut self.comment),
            SegmentKind::Other => None,
        }
    }

    /// Takes everything left, in the order new segments get inserted.
    fn drain(&mut self) -> impl Iterator<Item = Vec<u8>> + use<> {
        [
            self.exif.take(),
            self.xmp.take(),
            self.icc.take(),
            self.photoshop.take(),
            self.comment.take(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Makes the new segments for one change. `Remove` gives no bytes at all.
fn encode<T>(
    change: &Change<T>,
    f: impl FnOnce(&T) -> Result<Vec<u8>, Error>,
) -> Result<Option<Vec<u8>>, Error> {
    match change {
        Change::Keep => Ok(None),
        Change::Remove => Ok(Some(Vec::new())),
        Change::Set(t) => f(t).map(Some),
    }
}

/// Rewrites the resource block with new IPTC, keeping other resources.
fn photoshop_segments(
    file: &[u8],
    layout: &Layout,
    iptc: Option<&Vec<u8>>,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<u8>, Error> {
    let mut old: Vec<u8> = Vec::new();
    for s in &layout.segments {
        if s.kind(file) == SegmentKind::Photoshop {
            old.extend_from_slice(&s.payload(file)[PHOTOSHOP_SIG.len()..]);
        }
    }

    let mut resources = if old.is_empty() {
        Vec::new()
    } else {
        irb::parse(&old, warnings)?
    };
    irb::set(&mut resources, irb::IPTC, iptc.cloned());
    irb::set(&mut resources, IPTC_DIGEST, None);

    let mut out = Vec::new();
    if resources.is_empty() {
        return Ok(out);
    }

    let block = irb::serialize(&resources);
    for chunk in block.chunks(MAX_PAYLOAD - PHOTOSHOP_SIG.len()) {
        segment(&mut out, APP13, &[PHOTOSHOP_SIG, chunk]);
    }
    Ok(out)
}

pub(super) fn write(
    file: &[u8],
    layout: &Layout,
    update: &MetadataUpdate<'_>,
) -> Result<WriteOutcome, Error> {
    let mut warnings = Vec::new();

    let exif = update.exif_change(&mut warnings)?;
    let xmp = update.xmp_change()?;
    let iptc = update.iptc_change();
    let icc = update.icc_change();
    let comment = update.comment_change();

    let strategy = match &exif {
        Change::Keep => WriteStrategy::NonIntrusive,
        Change::Remove => WriteStrategy::Intrusive,
        Change::Set((_, s)) => *s,
    };
    let strategy = if xmp.is_keep() && iptc.is_keep() && icc.is_keep() && comment.is_keep() {
        strategy
    } else {
        strategy.and(WriteStrategy::Intrusive)
    };

    let mut new = Replacements {
        exif: encode(&exif, |(blob, _)| {
            if blob.len() + EXIF_SIG.len() > MAX_PAYLOAD {
                return Err(Error::Provider {
                    format: "JPEG",
                    message: format!(
                        "Exif data is `{}` bytes, which is too big for one APP1 segment",
                        blob.len()
                    ),
                });
            }
            let mut out = Vec::new();
            segment(&mut out, APP1, &[EXIF_SIG, blob.as_slice()]);
            Ok(out)
        })?,

        xmp: encode(&xmp, |packet| {
            if packet.len() > MAX_XMP {
                return Err(Error::Provider {
                    format: "JPEG",
                    message: format!(
                        "XMP packet is `{}` bytes, but one APP1 segment fits `{MAX_XMP}`",
                        packet.len()
                    ),
                });
            }
            let mut out = Vec::new();
            segment(&mut out, APP1, &[XMP_SIG, packet.as_bytes()]);
            Ok(out)
        })?,

        icc: encode(&icc, |profile| {
            let chunks: Vec<&[u8]> = profile.chunks(ICC_CHUNK).collect();
            let count = u8::try_from(chunks.len()).map_err(|_| Error::Provider {
                format: "JPEG",
                message: "ICC profile needs more than 255 segments".into(),
            })?;

            let mut out = Vec::new();
            for (i, chunk) in chunks.iter().enumerate() {
                segment(&mut out, APP2, &[ICC_SIG, &[i as u8 + 1, count][..], chunk]);
            }
            Ok(out)
        })?,

        photoshop: match &iptc {
            Change::Keep => None,
            Change::Remove => Some(photoshop_segments(file, layout, None, &mut warnings)?),
            Change::Set(iim) => Some(photoshop_segments(file, layout, Some(iim), &mut warnings)?),
        },

        comment: encode(&comment, |text| {
            let mut out = Vec::new();
            for chunk in text.as_bytes().chunks(MAX_PAYLOAD) {
                segment(&mut out, COM, &[chunk]);
            }
            Ok(out)
        })?,
    };

    let mut out: Vec<u8> = Vec::with_capacity(file.len() + 1024);
    out.extend_from_slice(&[0xFF, SOI]);

    // new kinds of metadata go after SOI and any JFIF/JFXX segments
    let segments = layout.segments.iter().filter(|s| s.marker != SOI);
    let insert_at = segments.clone().take_while(|s| s.marker == APP0).count();

    // kinds that are already in the file get replaced where they are
    let present: Vec<SegmentKind> = segments.clone().map(|s| s.kind(file)).collect();
    let has = |kinds: &[SegmentKind]| kinds.iter().any(|k| present.contains(k));
    let mut inserted = Replacements {
        exif: new.exif.take_if(|_| !has(&[SegmentKind::Exif])),
        xmp: new
            .xmp
            .take_if(|_| !has(&[SegmentKind::Xmp, SegmentKind::ExtendedXmp])),
        icc: new.icc.take_if(|_| !has(&[SegmentKind::Icc])),
        photoshop: new.photoshop.take_if(|_| !has(&[SegmentKind::Photoshop])),
        comment: new.comment.take_if(|_| !has(&[SegmentKind::Comment])),
    };

    let changed = |kind: SegmentKind| match kind {
        SegmentKind::Exif => !exif.is_keep(),
        SegmentKind::Xmp | SegmentKind::ExtendedXmp => !xmp.is_keep(),
        SegmentKind::Photoshop => !iptc.is_keep(),
        SegmentKind::Icc => !icc.is_keep(),
        SegmentKind::Comment => !comment.is_keep(),
        SegmentKind::Other => false,
    };

    for (i, s) in segments.enumerate() {
        if i == insert_at {
            inserted.drain().for_each(|bytes| out.extend(bytes));
        }

        let kind = s.kind(file);
        if !changed(kind) {
            out.extend_from_slice(s.bytes(file));
            continue;
        }

        // the first old segment makes room for the new ones. the rest go
        if let Some(slot) = new.for_kind(kind)
            && let Some(bytes) = slot.take()
        {
            out.extend(bytes);
        }
    }
    inserted.drain().for_each(|bytes| out.extend(bytes));

    out.extend_from_slice(&file[layout.scan..]);

    log::debug!(
        "rewrote JPEG: `{}` bytes -> `{}` bytes",
        file.len(),
        out.len()
    );
    Ok(WriteOutcome {
        bytes: out,
        strategy,
        warnings,
    })
}
