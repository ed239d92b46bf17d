//! BitReader - unpacks variable-width codes from fixed-width input symbols
//!
//! The dual of [`crate::compress::BitWriter`]: a mask walks each symbol from
//! its most-significant payload bit downwards, and codes are assembled least
//! significant bit first. The next symbol is only fetched once a bit is
//! actually needed, so trailing padding is never touched.

use crate::common::MAX_CODE_BITS;
use crate::tables::SymbolMap;
use crate::{Alphabet, LzsError, Result};

/// Reads codes from a slice of encoded symbols
#[derive(Debug)]
pub struct BitReader<'a> {
    input: &'a [u16],
    map: SymbolMap,
    alphabet: Alphabet,
    /// Index of the next symbol to load
    index: usize,
    /// Raw value of the current symbol
    value: u16,
    /// Mask of the next bit to read; zero when the symbol is exhausted
    mask: u16,
    high_bit: u16,
}

impl<'a> BitReader<'a> {
    /// Create a reader for a payload in `alphabet`
    pub fn new(input: &'a [u16], alphabet: Alphabet) -> Self {
        Self::with_map(input, alphabet.symbol_map(), alphabet)
    }

    /// Create a reader with an explicit symbol mapping
    ///
    /// `alphabet` only labels errors about symbols the map rejects.
    pub fn with_map(input: &'a [u16], map: SymbolMap, alphabet: Alphabet) -> Self {
        Self {
            input,
            map,
            alphabet,
            index: 0,
            value: 0,
            mask: 0,
            high_bit: 1 << (map.bits() - 1),
        }
    }

    fn refill(&mut self) -> Result<()> {
        let unit = *self.input.get(self.index).ok_or(LzsError::UnexpectedEof)?;
        self.value = self.map.decode(unit).ok_or(LzsError::InvalidSymbol {
            symbol: unit,
            alphabet: self.alphabet,
        })?;
        self.index += 1;
        self.mask = self.high_bit;
        Ok(())
    }

    fn read_bit(&mut self) -> Result<bool> {
        if self.mask == 0 {
            self.refill()?;
        }
        let bit = self.value & self.mask != 0;
        self.mask >>= 1;
        Ok(bit)
    }

    /// Read a `width`-bit code, least-significant bit first
    pub fn read_bits(&mut self, width: u32) -> Result<u32> {
        if width > MAX_CODE_BITS {
            return Err(LzsError::CodeWidthOverflow(width));
        }
        let mut code = 0u32;
        for power in 0..width {
            if self.read_bit()? {
                code |= 1 << power;
            }
        }
        Ok(code)
    }

    /// Number of input symbols loaded so far
    pub fn symbols_read(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_lsb_first_from_msb() {
        let input = [0b011_101u16];
        let map = SymbolMap::Identity { bits: 6, offset: 0 };
        let mut reader = BitReader::with_map(&input, map, Alphabet::Raw);
        assert_eq!(reader.read_bits(3).unwrap(), 0b110);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.symbols_read(), 1);
    }

    #[test]
    fn test_zero_width_reads_nothing() {
        let input: [u16; 0] = [];
        let mut reader = BitReader::new(&input, Alphabet::Raw);
        assert_eq!(reader.read_bits(0).unwrap(), 0);
    }

    #[test]
    fn test_reading_past_end_fails() {
        let input = [0xFFFFu16];
        let mut reader = BitReader::new(&input, Alphabet::Raw);
        assert_eq!(reader.read_bits(16).unwrap(), 0xFFFF);
        assert!(matches!(reader.read_bits(1), Err(LzsError::UnexpectedEof)));
    }

    #[test]
    fn test_codes_span_symbols() {
        // 'I' = 8, 'Z' = 25: 001000 011001
        let input: Vec<u16> = "IZ".encode_utf16().collect();
        let mut reader = BitReader::new(&input, Alphabet::Base64);
        assert_eq!(reader.read_bits(2).unwrap(), 0);
        // bits 1000 01 read LSB first
        assert_eq!(reader.read_bits(6).unwrap(), 0b100001);
    }

    #[test]
    fn test_invalid_symbol() {
        let input: Vec<u16> = "A/".encode_utf16().collect();
        let mut reader = BitReader::new(&input, Alphabet::UriSafe);
        assert_eq!(reader.read_bits(6).unwrap(), 0);
        assert!(matches!(
            reader.read_bits(1),
            Err(LzsError::InvalidSymbol {
                symbol: 0x2F,
                alphabet: Alphabet::UriSafe
            })
        ));
    }

    #[test]
    fn test_width_overflow() {
        let input = [0u16; 4];
        let mut reader = BitReader::new(&input, Alphabet::Raw);
        assert!(matches!(
            reader.read_bits(33),
            Err(LzsError::CodeWidthOverflow(33))
        ));
    }
}
