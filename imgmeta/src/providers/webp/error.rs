#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum WebpConstructionError {
    /// The `RIFF....WEBP` header was missing or malformed.
    NoHeader,

    /// Every WebP has at least one chunk, but this one had none.
    NoChunks,

    /// The `VP8X` chunk was too short.
    MalformedExtendedHeader,
}

impl core::fmt::Display for WebpConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoHeader => f.write_str("The WebP file header was missing or malformed."),
            Self::NoChunks => f.write_str("The WebP file had no chunks."),
            Self::MalformedExtendedHeader => {
                f.write_str("The WebP `VP8X` chunk was too short to read its flags.")
            }
        }
    }
}

impl core::error::Error for WebpConstructionError {}
