/// An error that occurred while parsing IPTC.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IptcError {
    /// There wasn't a single `0x1C` marker in the block.
    NoDatasets,

    /// A dataset's length ran past the end of the block.
    DatasetTruncated { record: u8, number: u8, offset: usize },

    /// An extended length used more than four length bytes.
    LengthTooLong { offset: usize },

    /// A Photoshop image resource block was malformed.
    BadResourceBlock { offset: usize },

    /// A value didn't fit the dataset's declared length.
    ValueTooLong { key: String, len: usize, max: u32 },
}

impl core::fmt::Display for IptcError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IptcError::NoDatasets => f.write_str("No IPTC datasets were found."),
            IptcError::DatasetTruncated {
                record,
                number,
                offset,
            } => write!(
                f,
                "Dataset `{record}:{number}` at offset `{offset}` runs past the end of the block."
            ),
            IptcError::LengthTooLong { offset } => write!(
                f,
                "Dataset at offset `{offset}` has an extended length we can't represent."
            ),
            IptcError::BadResourceBlock { offset } => {
                write!(f, "Malformed Photoshop resource block at offset `{offset}`.")
            }
            IptcError::ValueTooLong { key, len, max } => write!(
                f,
                "Value for `{key}` is `{len}` bytes long, but at most `{max}` are allowed."
            ),
        }
    }
}

impl core::error::Error for IptcError {}
