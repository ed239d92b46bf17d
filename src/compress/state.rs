//! Compression state machine
//!
//! The encoder walks the input one code unit at a time, growing the current
//! phrase while it stays in the dictionary and emitting the phrase's code when
//! it falls out. A phrase that has never been emitted before is sent as a
//! literal instead of a back-reference.

use super::dictionary::{Dictionary, ROOT};
use super::writer::BitWriter;
use crate::common::{CompressionStats, CODE_END_OF_STREAM, CODE_LITERAL_16, CODE_LITERAL_8};
use crate::tables::SymbolMap;
use std::collections::HashMap;

/// Compression state for one call
#[derive(Debug)]
pub struct Encoder {
    dictionary: Dictionary,
    /// Single-unit phrases not yet sent as literals, by code
    pending: HashMap<u32, u16>,
    /// Code of the phrase being extended
    phrase: Option<u32>,
    /// Current code width
    num_bits: u32,
    /// Codes left before the width grows
    enlarge_in: u64,
    writer: BitWriter,
    input_units: usize,
    literal_count: usize,
    reference_count: usize,
}

impl Encoder {
    /// Create an encoder writing symbols through `map`
    pub fn new(map: SymbolMap) -> Self {
        Self::with_capacity(map, 0)
    }

    /// Create an encoder pre-sized for `input_len` code units of input
    pub fn with_capacity(map: SymbolMap, input_len: usize) -> Self {
        let bits = map.bits() as usize;
        Self {
            dictionary: Dictionary::with_capacity(input_len / 2),
            pending: HashMap::new(),
            phrase: None,
            num_bits: 2,
            // The first literal's entry does not count towards growth
            enlarge_in: 2,
            writer: BitWriter::with_capacity(map, input_len * 8 / bits / 2),
            input_units: 0,
            literal_count: 0,
            reference_count: 0,
        }
    }

    /// Feed one code unit
    pub fn push(&mut self, unit: u16) {
        self.input_units += 1;

        let unit_code = match self.dictionary.get(ROOT, unit) {
            Some(code) => code,
            None => {
                let code = self.dictionary.insert(ROOT, unit);
                self.pending.insert(code, unit);
                code
            }
        };

        let Some(phrase) = self.phrase else {
            self.phrase = Some(unit_code);
            return;
        };

        match self.dictionary.get(phrase, unit) {
            Some(extended) => self.phrase = Some(extended),
            None => {
                self.emit(phrase);
                self.dictionary.insert(phrase, unit);
                self.phrase = Some(unit_code);
            }
        }
    }

    /// Emit the code for `phrase`, as a literal on its first appearance
    fn emit(&mut self, phrase: u32) {
        if let Some(unit) = self.pending.remove(&phrase) {
            if unit < 0x100 {
                self.writer.write_bits(CODE_LITERAL_8, self.num_bits);
                self.writer.write_bits(unit as u32, 8);
            } else {
                self.writer.write_bits(CODE_LITERAL_16, self.num_bits);
                self.writer.write_bits(unit as u32, 16);
            }
            self.literal_count += 1;
            // The decoder creates a dictionary entry for the literal itself
            self.count_code();
        } else {
            debug_assert!((phrase as u64) < 1u64 << self.num_bits);
            self.writer.write_bits(phrase, self.num_bits);
            self.reference_count += 1;
        }
        self.count_code();
    }

    /// Account for one code and widen the code size when its range is used up
    fn count_code(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1u64 << self.num_bits;
            self.num_bits += 1;
            log::trace!(
                "code width grows to {} bits at dictionary size {}",
                self.num_bits,
                self.dictionary.next_code()
            );
        }
    }

    /// Current code width in bits
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Next dictionary code to be assigned
    pub fn dict_size(&self) -> u32 {
        self.dictionary.next_code()
    }

    /// Emit the final phrase and the end marker, then flush
    pub fn finish(mut self) -> (Vec<u16>, CompressionStats) {
        if let Some(phrase) = self.phrase.take() {
            self.emit(phrase);
        }
        self.writer.write_bits(CODE_END_OF_STREAM, self.num_bits);

        let stats = CompressionStats {
            input_units: self.input_units,
            output_units: 0,
            dictionary_size: self.dictionary.next_code(),
            code_bits: self.num_bits,
            literal_count: self.literal_count,
            reference_count: self.reference_count,
        };
        let mut output = self.writer.finish();
        output.shrink_to_fit();
        (output, stats)
    }
}
