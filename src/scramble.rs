//! Keystream scrambler
//!
//! This module XORs a keystream derived from one or more 64-bit keys over a
//! compressed payload. It is a reversible obfuscation layer and offers no
//! confidentiality: anyone holding the payload can brute-force or bypass it.
//!
//! The payload is packed at 15 bits per symbol. Every key walks the symbols in
//! blocks of four, and each block is XORed with four 15-bit slices of one
//! keystream word. The final block may be shorter than four symbols and only
//! uses as many slices as it has symbols. After scrambling, every symbol is
//! biased by 32 so the result stays within the UTF-16-safe range.
//!
//! Each key pass is an independent XOR, so passes commute and identical passes
//! cancel. The order of the keys does not matter, and a key listed an even
//! number of times has no effect at all: `[5, 5]` leaves the payload
//! unscrambled, and it decodes with `[6, 6]` or any other list that cancels
//! out. Only the set of keys occurring an odd number of times is significant.
//!
//! There is no checksum. Decoding with the wrong keys normally fails with a
//! format error from the decompressor, but a successful decode does not prove
//! that the keys were right.

use crate::compress::{compress, compress_symbols};
use crate::decompress::{decompress, decompress_symbols, BitReader};
use crate::tables::{SymbolMap, UTF16_OFFSET};
use crate::{Alphabet, LzsError, Result};

/// Symbols per keystream word
const BLOCK_LEN: usize = 4;

/// Payload bits of one scrambled symbol
const SYMBOL_BITS: u32 = 15;

const SYMBOL_MASK: u64 = (1 << SYMBOL_BITS) - 1;

/// Packing used underneath the scrambler, before the output bias is added
const SCRAMBLE_MAP: SymbolMap = SymbolMap::Identity {
    bits: SYMBOL_BITS,
    offset: 0,
};

/// Largest biased symbol a scrambled payload can contain
const MAX_SYMBOL: u16 = UTF16_OFFSET + SYMBOL_MASK as u16;

/// Finalizer of the splitMix64 generator
pub fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Keystream generator for a single key
///
/// The `n`-th word (counting from 1) is `mix(mix(key) + n * increment)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystream {
    state: u64,
    increment: u64,
}

impl Keystream {
    /// Derive the start state and odd increment for `key`
    pub fn new(key: i64) -> Self {
        let key = key as u64;
        let increment = mix(key.wrapping_mul(key) ^ 0x9E37_79B9 ^ !key) | 1;
        Self {
            state: mix(key),
            increment,
        }
    }

    /// Advance one step and return the new word
    pub fn next_word(&mut self) -> u64 {
        self.state = self.state.wrapping_add(self.increment);
        mix(self.state)
    }

    /// Return the current word and step back once
    pub fn prev_word(&mut self) -> u64 {
        let word = mix(self.state);
        self.state = self.state.wrapping_sub(self.increment);
        word
    }

    /// Move the state forward by `steps` increments
    pub fn skip(&mut self, steps: usize) {
        self.state = self
            .state
            .wrapping_add((steps as u64).wrapping_mul(self.increment));
    }

    /// The odd step added per block
    pub fn increment(&self) -> u64 {
        self.increment
    }
}

fn xor_block(block: &mut [u16], word: u64) {
    for (slot, symbol) in block.iter_mut().enumerate() {
        *symbol ^= ((word >> (SYMBOL_BITS as usize * slot)) & SYMBOL_MASK) as u16;
    }
}

/// Scramble 15-bit symbols in place, applying `keys` in order
pub fn scramble(symbols: &mut [u16], keys: &[i64]) {
    for &key in keys {
        let mut stream = Keystream::new(key);
        for block in symbols.chunks_mut(BLOCK_LEN) {
            xor_block(block, stream.next_word());
        }
        log::trace!("scrambled {} symbols with key {:#x}", symbols.len(), key);
    }
}

/// Undo [`scramble`], applying `keys` in reverse order
pub fn unscramble(symbols: &mut [u16], keys: &[i64]) {
    let blocks = symbols.len().div_ceil(BLOCK_LEN);
    for &key in keys.iter().rev() {
        let mut stream = Keystream::new(key);
        // Start on the word of the last (possibly partial) block and walk back
        stream.skip(blocks);
        for block in symbols.chunks_mut(BLOCK_LEN).rev() {
            xor_block(block, stream.prev_word());
        }
        log::trace!("unscrambled {} symbols with key {:#x}", symbols.len(), key);
    }
}

/// Keys that survive scrambling: those listed an odd number of times, sorted
pub fn effective_keys(keys: &[i64]) -> Vec<i64> {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    sorted
        .chunk_by(|a, b| a == b)
        .filter(|run| run.len() % 2 == 1)
        .map(|run| run[0])
        .collect()
}

/// Compress and scramble code units with `keys`
///
/// With no keys this is plain RAW compression. Key order is irrelevant and
/// duplicate keys cancel in pairs; see [`effective_keys`].
pub fn compress_scrambled(input: &[u16], keys: &[i64]) -> Vec<u16> {
    if keys.is_empty() {
        return compress(input, Alphabet::Raw);
    }
    if input.is_empty() {
        return Vec::new();
    }
    if effective_keys(keys).is_empty() {
        log::warn!(
            "{} scrambler keys cancel out; the payload is left unscrambled",
            keys.len()
        );
    }

    let (mut symbols, stats) = compress_symbols(input, SCRAMBLE_MAP);
    scramble(&mut symbols, keys);
    for symbol in symbols.iter_mut() {
        *symbol += UTF16_OFFSET;
    }

    log::debug!(
        "compressed {} units to {} scrambled symbols with {} keys",
        stats.input_units,
        symbols.len(),
        keys.len()
    );
    symbols
}

/// Unscramble and decompress a payload made by [`compress_scrambled`]
///
/// Any key list with the same [`effective_keys`] as the one used to compress
/// will decode the payload, in any order.
pub fn decompress_scrambled(input: &[u16], keys: &[i64]) -> Result<Vec<u16>> {
    if keys.is_empty() {
        return decompress(input, Alphabet::Raw);
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut symbols = input
        .iter()
        .map(|&unit| {
            if (UTF16_OFFSET..=MAX_SYMBOL).contains(&unit) {
                Ok(unit - UTF16_OFFSET)
            } else {
                Err(LzsError::InvalidSymbol {
                    symbol: unit,
                    alphabet: Alphabet::Utf16,
                })
            }
        })
        .collect::<Result<Vec<u16>>>()?;
    unscramble(&mut symbols, keys);

    let mut reader = BitReader::with_map(&symbols, SCRAMBLE_MAP, Alphabet::Utf16);
    let (output, _) = decompress_symbols(&mut reader, symbols.len())?;
    log::debug!(
        "decompressed {} scrambled symbols to {} units",
        input.len(),
        output.len()
    );
    Ok(output)
}

/// Seeded hash of a sequence of code units
fn hash_units(units: &[u16], seed: u64) -> u64 {
    let mut hash = seed ^ (units.len() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    for &unit in units {
        hash = mix(hash.wrapping_add(unit as u64).wrapping_add(0x9E37_79B9_7F4A_7C15));
    }
    hash
}

/// Turn a passphrase into `count` scrambler keys
///
/// Each key hashes the passphrase under a different seed, chained through a
/// counter so that no two slots repeat. The same passphrase and count always
/// give the same keys.
pub fn derive_keys(passphrase: &str, count: usize) -> Vec<i64> {
    let units: Vec<u16> = passphrase.encode_utf16().collect();
    let mut counter = (units.len() as u64)
        .wrapping_mul(181)
        .wrapping_add(0xB9A2_842F);

    (0..count)
        .map(|_| {
            let key = hash_units(&units, mix(counter));
            counter = counter.wrapping_add(key).wrapping_add(0xB9A2_842F);
            (key ^ counter) as i64
        })
        .collect()
}
