//! BitWriter - packs variable-width codes into fixed-width output symbols
//!
//! Codes are shifted in least-significant bit first; each symbol fills from its
//! most-significant bit. Once a symbol holds `bits` bits it is translated
//! through the [`SymbolMap`] and appended to the output.

use crate::tables::SymbolMap;

/// Accumulates code bits and emits complete symbols
#[derive(Debug)]
pub struct BitWriter {
    map: SymbolMap,
    bits_per_symbol: u32,
    /// Bits of the symbol being filled
    value: u32,
    /// Number of bits already in `value`
    position: u32,
    output: Vec<u16>,
}

impl BitWriter {
    /// Create a writer for the given symbol mapping
    pub fn new(map: SymbolMap) -> Self {
        Self::with_capacity(map, 0)
    }

    /// Create a writer with room for `capacity` output symbols
    pub fn with_capacity(map: SymbolMap, capacity: usize) -> Self {
        Self {
            map,
            bits_per_symbol: map.bits(),
            value: 0,
            position: 0,
            output: Vec::with_capacity(capacity),
        }
    }

    /// Append the low `width` bits of `code`, least-significant bit first
    ///
    /// A width of zero writes nothing.
    pub fn write_bits(&mut self, code: u32, width: u32) {
        let mut code = code as u64;
        for _ in 0..width {
            self.push_bit((code & 1) as u32);
            code >>= 1;
        }
    }

    fn push_bit(&mut self, bit: u32) {
        self.value = (self.value << 1) | bit;
        if self.position == self.bits_per_symbol - 1 {
            self.emit();
        } else {
            self.position += 1;
        }
    }

    fn emit(&mut self) {
        self.output.push(self.map.encode(self.value as u16));
        self.value = 0;
        self.position = 0;
    }

    /// Number of complete symbols emitted so far
    pub fn symbols_written(&self) -> usize {
        self.output.len()
    }

    /// Zero-pad and emit the final symbol, returning all output
    ///
    /// One more symbol is always emitted, even when the last code ended on a
    /// symbol boundary; LZ-String decoders read one symbol ahead.
    pub fn finish(mut self) -> Vec<u16> {
        loop {
            self.value <<= 1;
            if self.position == self.bits_per_symbol - 1 {
                self.emit();
                break;
            }
            self.position += 1;
        }
        self.output
    }
}
