use winnow::{ModalResult, Parser as _, binary::le_u32, error::ContextError, token::take};

use crate::providers::shared::desc;

#[derive(Clone, Debug, PartialEq)]
pub struct RiffChunk {
    pub fourcc: [u8; 4],
    pub len: u32,

    /// Where the chunk's header starts in the file.
    pub offset: usize,
}

impl RiffChunk {
    pub fn data<'f>(&self, file: &'f [u8]) -> &'f [u8] {
        &file[self.offset + 8..self.offset + 8 + self.len as usize]
    }

    /// The header, data, and padding byte (if any).
    pub fn bytes<'f>(&self, file: &'f [u8]) -> &'f [u8] {
        let end = self.offset + 8 + self.padded_len();
        &file[self.offset..end.min(file.len())]
    }

    pub fn padded_len(&self) -> usize {
        self.len as usize + (self.len as usize & 1)
    }
}

/// Parses out a chunk's header.
///
/// The format in WebP is simple:
///
/// - let fourcc = input.read(4)
/// - let len = input.read_u32()
/// - let data = input.read(chunk_len)
///
/// Odd-length chunks get a padding byte after their data, which the caller
/// skips with [`RiffChunk::padded_len`].
pub fn chunk(input: &mut &[u8], offset: usize) -> ModalResult<RiffChunk, ContextError> {
    let fourcc: &[u8] = take(4_usize).context(desc("chunk fourcc")).parse_next(input)?;
    let fourcc: [u8; 4] = [fourcc[0], fourcc[1], fourcc[2], fourcc[3]];

    // see how long the chunk is
    let len: u32 = le_u32.context(desc("chunk length")).parse_next(input)?;

    Ok(RiffChunk {
        fourcc,
        len,
        offset,
    })
}

/// Writes a chunk, padding it to an even length.
pub fn write_chunk(out: &mut Vec<u8>, fourcc: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(fourcc);
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    if data.len() % 2 != 0 {
        out.push(0);
    }
}
