//! LZ-String decompression
//!
//! This module unpacks a code stream produced by [`crate::compress`] and
//! rebuilds the original code units. Padding and terminators after the
//! end-of-stream code are never read, so they need not be stripped first.

mod decoder;
mod reader;
mod state;

pub use reader::BitReader;

use state::DecodeState;

use crate::{Alphabet, CompressionStats, Result};

/// Decompress a payload produced in the given alphabet
///
/// Empty input gives empty output.
///
/// The decoded size is not capped: a short payload of repeated
/// self-references can expand quadratically. Limit the length of untrusted
/// payloads before decoding them.
pub fn decompress(input: &[u16], alphabet: Alphabet) -> Result<Vec<u16>> {
    Ok(decompress_with_stats(input, alphabet)?.0)
}

/// Decompress a payload and report statistics about the pass
pub fn decompress_with_stats(
    input: &[u16],
    alphabet: Alphabet,
) -> Result<(Vec<u16>, CompressionStats)> {
    if input.is_empty() {
        return Ok((Vec::new(), CompressionStats::default()));
    }

    let mut reader = BitReader::new(input, alphabet);
    let result = decompress_symbols(&mut reader, input.len());
    match &result {
        Ok((output, _)) => log::debug!(
            "decompressed {} {} symbols to {} units ({} of them read)",
            input.len(),
            alphabet,
            output.len(),
            reader.symbols_read()
        ),
        Err(e) => log::debug!(
            "{} payload rejected after {} symbols: {}",
            alphabet,
            reader.symbols_read(),
            e
        ),
    }
    result
}

/// Decode a stream from `reader`, without any alphabet post-processing
pub(crate) fn decompress_symbols(
    reader: &mut BitReader<'_>,
    compressed_len: usize,
) -> Result<(Vec<u16>, CompressionStats)> {
    let state = DecodeState::decode(reader)?;
    let stats = state.stats(compressed_len);
    Ok((state.output, stats))
}
