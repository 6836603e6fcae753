//! The IPTC-IIM wire format.
//!
//! Each dataset looks like this:
//!
//! ```text
//! 0x1C | record | dataset | length (u16, BE) | data...
//! ```
//!
//! When the length's high bit is set, its low 15 bits say how many bytes of
//! "extended length" follow instead.

use winnow::{
    Parser as _,
    binary::{be_u16, u8},
    error::EmptyError,
    token::take,
};

use crate::{
    error::{Warning, warn, warn_lossy},
    iptc::error::IptcError,
};

/// Every dataset starts with this.
pub(crate) const MARKER: u8 = 0x1C;

/// Lengths above this need the extended form.
const MAX_STANDARD_LEN: usize = 0x7FFF;

/// One dataset, straight off the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawDataset {
    pub record: u8,
    pub number: u8,
    pub data: Vec<u8>,
}

/// Reads every dataset in a block, in order.
///
/// Bytes before the first marker are skipped with a warning. Parsing stops
/// at the first byte that isn't a marker.
pub(crate) fn parse(
    block: &[u8],
    warnings: &mut Vec<Warning>,
) -> Result<Vec<RawDataset>, IptcError> {
    let Some(start) = block.iter().position(|b| *b == MARKER) else {
        log::debug!("no IPTC marker in `{}` bytes", block.len());
        return Err(IptcError::NoDatasets);
    };
    if start > 0 {
        warn(
            warnings,
            format!("skipped `{start}` bytes of garbage before the first IPTC dataset"),
        );
    }

    let mut input = &block[start..];
    let mut datasets = Vec::new();

    while let Some(first) = input.first() {
        let offset = block.len() - input.len();

        if *first != MARKER {
            // photoshop pads blocks with zeroes, which isn't worth a warning
            if input.iter().any(|b| *b != 0) {
                warn(
                    warnings,
                    format!(
                        "found `{}` trailing bytes after the IPTC datasets; ignoring them",
                        input.len()
                    ),
                );
            }
            break;
        }

        match dataset(&mut input, offset) {
            Ok(ds) => {
                log::trace!(
                    "read IPTC dataset `{}:{}` ({} bytes)",
                    ds.record,
                    ds.number,
                    ds.data.len()
                );
                datasets.push(ds);
            }
            Err(e) => {
                if datasets.is_empty() {
                    log::error!("the first IPTC dataset is broken. err: {e}");
                    return Err(e);
                }
                warn_lossy(warnings, format!("{e}; dropping the rest of the block"));
                break;
            }
        }
    }

    Ok(datasets)
}

/// Reads one dataset.
fn dataset(input: &mut &[u8], offset: usize) -> Result<RawDataset, IptcError> {
    let (_, record, number) = (u8, u8, u8)
        .parse_next(input)
        .map_err(|_: EmptyError| IptcError::DatasetTruncated {
            record: 0,
            number: 0,
            offset,
        })?;
    let truncated = || IptcError::DatasetTruncated {
        record,
        number,
        offset,
    };

    let size: u16 = be_u16.parse_next(input).map_err(|_: EmptyError| truncated())?;

    let len = if size & 0x8000 == 0 {
        size as usize
    } else {
        let len_of_len = (size & 0x7FFF) as usize;
        if len_of_len > 4 {
            log::warn!("extended length of `{len_of_len}` bytes at `{offset}`");
            return Err(IptcError::LengthTooLong { offset });
        }

        let bytes: &[u8] = take(len_of_len)
            .parse_next(input)
            .map_err(|_: EmptyError| truncated())?;
        bytes.iter().fold(0_usize, |acc, b| (acc << 8) | *b as usize)
    };

    let data: &[u8] = take(len)
        .parse_next(input)
        .map_err(|_: EmptyError| truncated())?;

    Ok(RawDataset {
        record,
        number,
        data: data.to_vec(),
    })
}

/// Writes one dataset, using an extended length when it's needed.
pub(crate) fn write_dataset(out: &mut Vec<u8>, record: u8, number: u8, data: &[u8]) {
    out.extend_from_slice(&[MARKER, record, number]);

    if data.len() <= MAX_STANDARD_LEN {
        out.extend_from_slice(&(data.len() as u16).to_be_bytes());
    } else {
        out.extend_from_slice(&0x8004_u16.to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    }

    out.extend_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::logger;

    #[test]
    fn reads_standard_and_extended_lengths() {
        logger();
        let big = vec![b'a'; 40_000];

        let mut block = Vec::new();
        write_dataset(&mut block, 2, 25, b"cat");
        write_dataset(&mut block, 2, 120, &big);

        // the big one uses the extended form
        assert_eq!(&block[8..13], &[0x1C, 2, 120, 0x80, 0x04]);

        let mut warnings = Vec::new();
        let datasets = parse(&block, &mut warnings).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].data, b"cat");
        assert_eq!(datasets[1].data.len(), 40_000);
    }

    #[test]
    fn leading_garbage_is_skipped() {
        logger();
        let block = [
            0xAA, 0xBB, // garbage
            0x1C, 2, 5, 0x00, 0x02, b'h', b'i', // 2:5 "hi"
            0, 0, // padding
        ];

        let mut warnings = Vec::new();
        let datasets = parse(&block, &mut warnings).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(datasets[0].data, b"hi");
    }

    #[test]
    fn truncated_datasets() {
        logger();
        let first_broken = [0x1C, 2, 5, 0x00, 0x09, b'h'];
        assert_eq!(
            parse(&first_broken, &mut Vec::new()),
            Err(IptcError::DatasetTruncated {
                record: 2,
                number: 5,
                offset: 0
            })
        );

        // later ones are just dropped
        let mut block = Vec::new();
        write_dataset(&mut block, 2, 5, b"ok");
        block.extend_from_slice(&[0x1C, 2, 25, 0x00, 0x09, b'x']);

        let mut warnings = Vec::new();
        let datasets = parse(&block, &mut warnings).unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn no_marker_at_all() {
        logger();
        assert_eq!(parse(b"hello", &mut Vec::new()), Err(IptcError::NoDatasets));
    }

    #[test]
    fn huge_extended_lengths_are_rejected() {
        logger();
        let block = [0x1C, 2, 5, 0x80, 0x05, 0, 0, 0, 0, 1];
        assert_eq!(
            parse(&block, &mut Vec::new()),
            Err(IptcError::LengthTooLong { offset: 0 })
        );
    }
}
