//! Character tables for the 6-bit alphabets
//!
//! Each 6-bit alphabet has a forward table (symbol value to character) and a
//! reverse table indexed by ASCII code. Reverse entries set to [`INVALID`] mark
//! characters that cannot appear in a payload of that alphabet.

/// Reverse-table marker for characters outside an alphabet
pub const INVALID: u8 = 0xFF;

/// Base64 characters, indexed by 6-bit symbol value
pub const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// URI-safe characters, indexed by 6-bit symbol value
pub const URI_SAFE_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-";

/// Padding character appended to Base64 output
pub const BASE64_PAD: u8 = b'=';

/// Character appended to URI-safe output
pub const URI_SAFE_TERMINATOR: u8 = b'+';

/// Filler accepted (as a zero symbol) by the URI-safe decoder
pub const URI_SAFE_FILLER: u8 = b'$';

/// Code unit appended to UTF16-safe output
pub const UTF16_TERMINATOR: u16 = b' ' as u16;

/// Bias added to every UTF16-safe symbol
pub const UTF16_OFFSET: u16 = 32;

/// Reverse Base64 table; `=` decodes as a zero symbol
pub const BASE64_VALUES: [u8; 128] = reverse_table(BASE64_CHARS, BASE64_PAD);

/// Reverse URI-safe table; `$` decodes as a zero symbol
pub const URI_SAFE_VALUES: [u8; 128] = reverse_table(URI_SAFE_CHARS, URI_SAFE_FILLER);

const fn reverse_table(chars: &[u8; 64], filler: u8) -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < 64 {
        table[chars[i] as usize] = i as u8;
        i += 1;
    }
    table[filler as usize] = 0;
    table
}

/// Mapping between raw symbol values and output code units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolMap {
    /// Symbols of `bits` width stored directly, biased by `offset`
    Identity {
        /// Payload bits per symbol
        bits: u32,
        /// Bias added on output
        offset: u16,
    },
    /// 6-bit symbols translated through a character table
    Table {
        /// Forward table
        chars: &'static [u8; 64],
        /// Reverse table
        values: &'static [u8; 128],
    },
}

impl SymbolMap {
    /// Payload bits carried by each symbol
    pub fn bits(&self) -> u32 {
        match self {
            SymbolMap::Identity { bits, .. } => *bits,
            SymbolMap::Table { .. } => 6,
        }
    }

    /// Translate a raw symbol value to its output code unit
    pub fn encode(&self, value: u16) -> u16 {
        match self {
            SymbolMap::Identity { offset, .. } => value.wrapping_add(*offset),
            SymbolMap::Table { chars, .. } => chars[(value & 0x3F) as usize] as u16,
        }
    }

    /// Translate an input code unit back to its raw symbol value
    pub fn decode(&self, unit: u16) -> Option<u16> {
        match self {
            SymbolMap::Identity { bits, offset } => {
                let value = unit.checked_sub(*offset)?;
                if *bits < 16 && value >> *bits != 0 {
                    None
                } else {
                    Some(value)
                }
            }
            SymbolMap::Table { values, .. } => lookup(values, unit),
        }
    }
}

/// Look up a code unit in a reverse table
pub fn lookup(values: &[u8; 128], unit: u16) -> Option<u16> {
    match values.get(unit as usize) {
        Some(&value) if value != INVALID => Some(value as u16),
        _ => None,
    }
}
