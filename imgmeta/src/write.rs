//! Deciding how metadata goes back into a file.
//!
//! Every write starts out [`WriteState::Analyzing`]. From there, it picks a
//! strategy, does the work, and ends up [`WriteState::Written`]. Anything
//! going wrong along the way leaves it [`WriteState::Aborted`], and the file
//! untouched.

use imgmeta_types::exif::Endianness;

use crate::{
    error::{Error, Warning},
    exif::{ExifData, writer},
    iptc::IptcData,
    providers::RawBlobs,
    xmp::XmpData,
};

/// Where a write is at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WriteState {
    /// No strategy picked yet.
    #[default]
    Analyzing,

    /// Patching the original bytes where they are.
    NonIntrusive,

    /// Rebuilding the metadata from scratch.
    Intrusive,

    /// Done. The new bytes are in place.
    Written,

    /// Something failed, so nothing was written.
    Aborted,
}

impl WriteState {
    /// Moves to the state for the picked strategy.
    pub(crate) fn choose(self, strategy: WriteStrategy) -> Self {
        let next = match (self, strategy) {
            (WriteState::Analyzing, WriteStrategy::NonIntrusive) => WriteState::NonIntrusive,
            (WriteState::Analyzing, WriteStrategy::Intrusive) => WriteState::Intrusive,
            (other, _) => {
                log::error!("can't pick a write strategy while `{other:?}`");
                WriteState::Aborted
            }
        };

        log::info!("Write strategy: {strategy}");
        next
    }

    /// Moves to [`WriteState::Written`] after a strategy finished.
    pub(crate) fn finish(self) -> Self {
        match self {
            WriteState::NonIntrusive | WriteState::Intrusive => WriteState::Written,
            other => {
                log::error!("can't finish a write while `{other:?}`");
                WriteState::Aborted
            }
        }
    }
}

/// How the bytes were produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteStrategy {
    NonIntrusive,
    Intrusive,
}

impl WriteStrategy {
    /// The cheaper of two strategies is only kept if both agree.
    pub(crate) fn and(self, other: WriteStrategy) -> WriteStrategy {
        match (self, other) {
            (WriteStrategy::NonIntrusive, WriteStrategy::NonIntrusive) => {
                WriteStrategy::NonIntrusive
            }
            _ => WriteStrategy::Intrusive,
        }
    }
}

impl core::fmt::Display for WriteStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            WriteStrategy::NonIntrusive => "Non-intrusive",
            WriteStrategy::Intrusive => "Intrusive",
        })
    }
}

/// Knobs for writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Byte order for Exif that doesn't have one yet.
    pub byte_order: Endianness,

    /// Whether patching in place is allowed at all.
    pub non_intrusive: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            byte_order: Endianness::Little,
            non_intrusive: true,
        }
    }
}

/// What should happen to one kind of metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change<T> {
    /// Leave the original bytes alone.
    Keep,

    /// Take it out of the file.
    Remove,

    /// Put in these bytes instead.
    Set(T),
}

impl<T> Change<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Change::Keep)
    }

    /// The new value, or the old one for [`Change::Keep`].
    pub fn resolve<'a>(&'a self, original: Option<&'a T>) -> Option<&'a T> {
        match self {
            Change::Keep => original,
            Change::Remove => None,
            Change::Set(t) => Some(t),
        }
    }
}

/// Everything a provider needs to write a file back.
#[derive(Clone, Copy, Debug)]
pub struct MetadataUpdate<'a> {
    pub exif: &'a ExifData,
    pub iptc: &'a IptcData,
    pub xmp: &'a XmpData,
    pub icc: Option<&'a [u8]>,
    pub comment: Option<&'a str>,
    pub options: WriteOptions,

    /// What the provider found when reading.
    pub original: &'a RawBlobs,
}

impl MetadataUpdate<'_> {
    /// The new TIFF blob for the Exif, and how it was made.
    pub fn exif_change(
        &self,
        warnings: &mut Vec<Warning>,
    ) -> Result<Change<(Vec<u8>, WriteStrategy)>, Error> {
        if self.exif.is_pristine() {
            return Ok(Change::Keep);
        }
        if self.exif.is_empty() {
            return Ok(if self.original.exif.is_some() {
                Change::Remove
            } else {
                Change::Keep
            });
        }

        writer::serialize_with(self.exif, &self.options, warnings).map(Change::Set)
    }

    /// The new IIM block.
    pub fn iptc_change(&self) -> Change<Vec<u8>> {
        if self.iptc.is_pristine() {
            return Change::Keep;
        }
        if self.iptc.is_empty() {
            return if self.original.iptc.is_some() {
                Change::Remove
            } else {
                Change::Keep
            };
        }
        Change::Set(self.iptc.to_bytes())
    }

    /// The new XMP packet.
    pub fn xmp_change(&self) -> Result<Change<String>, Error> {
        if self.xmp.is_pristine() {
            return Ok(Change::Keep);
        }
        if self.xmp.is_empty() {
            return Ok(if self.original.xmp.is_some() {
                Change::Remove
            } else {
                Change::Keep
            });
        }
        Ok(Change::Set(self.xmp.to_packet()?))
    }

    pub fn icc_change(&self) -> Change<Vec<u8>> {
        match (self.icc, self.original.icc.as_deref()) {
            (new, old) if new == old => Change::Keep,
            (None, _) => Change::Remove,
            (Some(new), _) => Change::Set(new.to_vec()),
        }
    }

    pub fn comment_change(&self) -> Change<String> {
        match (self.comment, self.original.comment.as_deref()) {
            (new, old) if new == old => Change::Keep,
            (None, _) => Change::Remove,
            (Some(new), _) => Change::Set(new.to_string()),
        }
    }
}

/// A provider's rewritten file.
#[derive(Clone, Debug, PartialEq)]
pub struct WriteOutcome {
    pub bytes: Vec<u8>,
    pub strategy: WriteStrategy,
    pub warnings: Vec<Warning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    #[test]
    fn states_move_forward_only() {
        logger();
        let s = WriteState::default().choose(WriteStrategy::NonIntrusive);
        assert_eq!(s, WriteState::NonIntrusive);
        assert_eq!(s.finish(), WriteState::Written);

        assert_eq!(
            WriteState::Written.choose(WriteStrategy::Intrusive),
            WriteState::Aborted
        );
        assert_eq!(WriteState::Analyzing.finish(), WriteState::Aborted);
    }

    #[test]
    fn strategy_names() {
        assert_eq!(WriteStrategy::NonIntrusive.to_string(), "Non-intrusive");
        assert_eq!(WriteStrategy::Intrusive.to_string(), "Intrusive");
        assert_eq!(
            WriteStrategy::NonIntrusive.and(WriteStrategy::Intrusive),
            WriteStrategy::Intrusive
        );
    }

    #[test]
    fn nothing_changes_when_nothing_was_touched() {
        logger();
        let (exif, iptc, xmp) = (ExifData::new(), IptcData::new(), XmpData::new());
        let original = RawBlobs::default();
        let update = MetadataUpdate {
            exif: &exif,
            iptc: &iptc,
            xmp: &xmp,
            icc: None,
            comment: None,
            options: WriteOptions::default(),
            original: &original,
        };

        assert!(update.exif_change(&mut Vec::new()).unwrap().is_keep());
        assert!(update.iptc_change().is_keep());
        assert!(update.xmp_change().unwrap().is_keep());
        assert!(update.icc_change().is_keep());
        assert!(update.comment_change().is_keep());
    }

    #[test]
    fn icc_and_comments_compare_with_the_original() {
        let (exif, iptc, xmp) = (ExifData::new(), IptcData::new(), XmpData::new());
        let original = RawBlobs {
            icc: Some(vec![1, 2, 3]),
            comment: Some("old".into()),
            ..Default::default()
        };
        let update = MetadataUpdate {
            exif: &exif,
            iptc: &iptc,
            xmp: &xmp,
            icc: None,
            comment: Some("new"),
            options: WriteOptions::default(),
            original: &original,
        };

        assert_eq!(update.icc_change(), Change::Remove);
        assert_eq!(update.comment_change(), Change::Set("new".into()));
    }
}
