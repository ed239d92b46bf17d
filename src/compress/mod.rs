//! LZ-String compression
//!
//! This module turns a sequence of UTF-16 code units into a packed code stream
//! in one of the four output alphabets, adding the padding or terminator that
//! each alphabet's consumers expect.

mod dictionary;
mod state;
mod writer;

pub use dictionary::Dictionary;
pub use state::Encoder;
pub use writer::BitWriter;

use crate::tables::{SymbolMap, BASE64_PAD, URI_SAFE_TERMINATOR, UTF16_TERMINATOR};
use crate::{Alphabet, CompressionStats};

/// Compress code units into the given alphabet
///
/// Empty input gives empty output.
pub fn compress(input: &[u16], alphabet: Alphabet) -> Vec<u16> {
    compress_with_stats(input, alphabet).0
}

/// Compress code units and report statistics about the pass
pub fn compress_with_stats(input: &[u16], alphabet: Alphabet) -> (Vec<u16>, CompressionStats) {
    if input.is_empty() {
        return (Vec::new(), CompressionStats::default());
    }

    let (mut output, mut stats) = compress_symbols(input, alphabet.symbol_map());
    match alphabet {
        Alphabet::Raw => {}
        Alphabet::Utf16 => output.push(UTF16_TERMINATOR),
        Alphabet::Base64 => {
            while output.len() % 4 != 0 {
                output.push(BASE64_PAD as u16);
            }
        }
        Alphabet::UriSafe => output.push(URI_SAFE_TERMINATOR as u16),
    }
    stats.output_units = output.len();

    log::debug!(
        "compressed {} units to {} {} symbols (dictionary {}, {} bits)",
        stats.input_units,
        stats.output_units,
        alphabet,
        stats.dictionary_size,
        stats.code_bits
    );
    (output, stats)
}

/// Run the encoder over non-empty input, without any alphabet post-processing
pub(crate) fn compress_symbols(input: &[u16], map: SymbolMap) -> (Vec<u16>, CompressionStats) {
    let mut encoder = Encoder::with_capacity(map, input.len());
    for &unit in input {
        encoder.push(unit);
    }
    let (output, mut stats) = encoder.finish();
    stats.output_units = output.len();
    (output, stats)
}
