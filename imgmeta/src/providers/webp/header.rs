use winnow::{
    ModalResult, Parser as _,
    binary::le_u32,
    error::{ContextError, ErrMode, StrContext, StrContextValue},
    token::literal,
};

/// The most a RIFF can say it holds.
const FILE_SIZE_MAX: u32 = u32::MAX - 10_u32;

/// Parses out the WebP file header block, returning the size it reports.
///
/// This should be the first thing in the file.
pub fn webp_file_header(input: &mut &[u8]) -> ModalResult<u32, ContextError> {
    // first, we should ensure there's `RIFF` (in ASCII) at the beginning
    literal(b"RIFF").void().parse_next(input)?;

    // then, we should have a u32
    let file_size: u32 = le_u32.parse_next(input)?;

    // ensure it's the right size...
    if file_size > FILE_SIZE_MAX {
        log::error!(
            "File size was reported as `{file_size}` bytes, but maximum is `{FILE_SIZE_MAX}`! \
            Cannot continue parsing..."
        );
        return Err({
            let mut ce = ContextError::new();
            ce.push(StrContext::Expected(StrContextValue::StringLiteral(
                "File size was too large to be WebP.",
            )));
            ErrMode::Cut(ce)
        });
    }

    // now, check for the `WEBP` ASCII at the end
    literal(b"WEBP").void().parse_next(input)?;
    Ok(file_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_size() {
        let mut input: &[u8] = b"RIFF\x04\0\0\0WEBP";
        assert_eq!(webp_file_header(&mut input).unwrap(), 4);

        let mut input: &[u8] = b"RIFF\xff\xff\xff\xffWEBP";
        assert!(webp_file_header(&mut input).is_err());

        let mut input: &[u8] = b"RIFF\x04\0\0\0WAVE";
        assert!(webp_file_header(&mut input).is_err());
    }
}
