//! Decompression state management
//!
//! Every dictionary entry the decoder rebuilds is a run of code units that has
//! already been written to the output, so entries are stored as spans into the
//! output buffer rather than as separate strings.

use crate::common::{CompressionStats, FIRST_DICT_CODE};

/// A run of decoded code units, `output[start..start + len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    /// First unit of the run
    pub(crate) start: usize,
    /// Number of units
    pub(crate) len: usize,
}

impl Span {
    /// End of the run (exclusive)
    pub(crate) fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Decompression state for one call
#[derive(Debug)]
pub(crate) struct DecodeState {
    /// Dictionary entries by code; the control codes hold empty placeholders
    pub(crate) entries: Vec<Span>,
    /// Decoded code units
    pub(crate) output: Vec<u16>,
    /// Where the previous entry was written
    pub(crate) phrase: Span,
    /// Current code width
    pub(crate) num_bits: u32,
    /// Codes left before the width grows
    pub(crate) enlarge_in: u64,
    /// Number of literals read
    pub(crate) literal_count: usize,
    /// Number of back-references read
    pub(crate) reference_count: usize,
}

impl DecodeState {
    /// Create the state that follows the stream's first literal
    pub(crate) fn new(first: u16) -> Self {
        let mut entries = Vec::with_capacity(64);
        entries.resize(FIRST_DICT_CODE as usize, Span { start: 0, len: 0 });
        let phrase = Span { start: 0, len: 1 };
        entries.push(phrase);

        Self {
            entries,
            output: vec![first],
            phrase,
            // Both already advanced past the first literal
            num_bits: 3,
            enlarge_in: 4,
            literal_count: 1,
            reference_count: 0,
        }
    }

    /// Account for one code and widen the code size when its range is used up
    pub(crate) fn count_code(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1u64 << self.num_bits;
            self.num_bits += 1;
        }
    }

    /// Append a copy of `span` to the output and return where it landed
    pub(crate) fn copy_span(&mut self, span: Span) -> Span {
        let start = self.output.len();
        self.output.extend_from_within(span.start..span.end());
        Span {
            start,
            len: span.len,
        }
    }

    /// Summarize the pass
    pub(crate) fn stats(&self, compressed_len: usize) -> CompressionStats {
        CompressionStats {
            input_units: self.output.len(),
            output_units: compressed_len,
            dictionary_size: self.entries.len() as u32,
            code_bits: self.num_bits,
            literal_count: self.literal_count,
            reference_count: self.reference_count,
        }
    }
}
