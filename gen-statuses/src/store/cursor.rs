//! Round-robin selection of the next chunk to post.

use crate::error::{GenerateError, Result};
use crate::text::Chunk;

/// Pick the chunk after `last`, wrapping to the first one after the end.
///
/// With no previous index the first chunk is returned.
pub fn next_status(chunks: &[Chunk], last: Option<usize>) -> Result<(usize, &Chunk)> {
    if chunks.is_empty() {
        return Err(GenerateError::EmptyStatuses);
    }

    let next = match last {
        Some(last) => (last % chunks.len() + 1) % chunks.len(),
        None => 0,
    };

    Ok((next, &chunks[next]))
}
