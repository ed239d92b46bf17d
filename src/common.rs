//! Common types and constants for the LZ-String codec
//!
//! This module defines the core types, constants, and structures shared by the
//! compressor, the decompressor and the keystream scrambler.

use crate::tables::{
    SymbolMap, BASE64_CHARS, BASE64_VALUES, URI_SAFE_CHARS, URI_SAFE_VALUES, UTF16_OFFSET,
};
use std::fmt;
use thiserror::Error;

/// Output alphabet of a compressed payload
///
/// The alphabet is never recorded inside the payload. Whoever stores a
/// compressed string must also remember which alphabet produced it and pass
/// the same one back to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// 16 bits per code unit, densest form; may contain unpaired surrogates
    Raw,
    /// 15 bits per code unit biased by 32, always valid UTF-16
    Utf16,
    /// 6 bits per character using `A-Za-z0-9+/`, padded with `=`
    Base64,
    /// 6 bits per character using `A-Za-z0-9+-`, terminated with `+`
    UriSafe,
}

impl Alphabet {
    /// All supported alphabets, in declaration order
    pub const ALL: [Alphabet; 4] = [
        Alphabet::Raw,
        Alphabet::Utf16,
        Alphabet::Base64,
        Alphabet::UriSafe,
    ];

    /// Number of payload bits carried by each output symbol
    pub fn bits_per_symbol(&self) -> u32 {
        match self {
            Alphabet::Raw => 16,
            Alphabet::Utf16 => 15,
            Alphabet::Base64 | Alphabet::UriSafe => 6,
        }
    }

    /// Symbol mapping used to pack and unpack this alphabet
    pub fn symbol_map(&self) -> SymbolMap {
        match self {
            Alphabet::Raw => SymbolMap::Identity { bits: 16, offset: 0 },
            Alphabet::Utf16 => SymbolMap::Identity {
                bits: 15,
                offset: UTF16_OFFSET,
            },
            Alphabet::Base64 => SymbolMap::Table {
                chars: BASE64_CHARS,
                values: &BASE64_VALUES,
            },
            Alphabet::UriSafe => SymbolMap::Table {
                chars: URI_SAFE_CHARS,
                values: &URI_SAFE_VALUES,
            },
        }
    }

    /// Whether every output of this alphabet is valid UTF-16 (and so fits a `String`)
    pub fn is_text_safe(&self) -> bool {
        !matches!(self, Alphabet::Raw)
    }

    /// Short lowercase name, as accepted by the CLI
    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Raw => "raw",
            Alphabet::Utf16 => "utf16",
            Alphabet::Base64 => "base64",
            Alphabet::UriSafe => "uri-safe",
        }
    }

    /// Convert compressed code units into bytes for storage
    ///
    /// Text-safe alphabets are stored as UTF-8, RAW output as UTF-16LE.
    pub fn to_storage_bytes(&self, units: &[u16]) -> Result<Vec<u8>> {
        if self.is_text_safe() {
            Ok(String::from_utf16(units)?.into_bytes())
        } else {
            Ok(units.iter().flat_map(|unit| unit.to_le_bytes()).collect())
        }
    }

    /// Inverse of [`Alphabet::to_storage_bytes`]
    pub fn from_storage_bytes(&self, bytes: &[u8]) -> Result<Vec<u16>> {
        if self.is_text_safe() {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| LzsError::InvalidData(format!("stored payload is not UTF-8: {e}")))?;
            Ok(text.encode_utf16().collect())
        } else {
            if bytes.len() % 2 != 0 {
                return Err(LzsError::InvalidData(format!(
                    "RAW payload has odd byte length {}",
                    bytes.len()
                )));
            }
            Ok(bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect())
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error type for codec operations
#[derive(Debug, Error)]
pub enum LzsError {
    /// The code stream ended before the end-of-stream code was read
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// The first token of a stream was not an 8-bit or 16-bit literal
    #[error("Invalid control code: {0} (expected 0 or 1)")]
    InvalidControlCode(u32),

    /// A back-reference named a dictionary entry that does not exist
    #[error("Invalid dictionary code {code} (dictionary holds {dict_size} entries)")]
    InvalidCode {
        /// The code read from the stream
        code: u32,
        /// Dictionary size at the time the code was read
        dict_size: usize,
    },

    /// A character is not part of the alphabet used for decoding
    #[error("Symbol {symbol:#06x} is not valid for the {alphabet} alphabet")]
    InvalidSymbol {
        /// The offending code unit
        symbol: u16,
        /// Alphabet being decoded
        alphabet: Alphabet,
    },

    /// The code width grew past what a dictionary code can hold
    #[error("Code width overflow: {0} bits")]
    CodeWidthOverflow(u32),

    /// Decoded text is not valid UTF-16
    #[error("Decoded text is not valid UTF-16: {0}")]
    InvalidUtf16(#[from] std::string::FromUtf16Error),

    /// Invalid data format or corruption
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A background task failed before producing a result
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LzsError {
    /// Whether this error means the compressed payload itself is malformed
    ///
    /// A wrong scrambler key usually surfaces as one of these, but the absence
    /// of a format error does not prove that the keys were right.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            LzsError::UnexpectedEof
                | LzsError::InvalidControlCode(_)
                | LzsError::InvalidCode { .. }
                | LzsError::InvalidSymbol { .. }
                | LzsError::CodeWidthOverflow(_)
        )
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, LzsError>;

// Reserved dictionary codes

/// Control code introducing an 8-bit literal
pub const CODE_LITERAL_8: u32 = 0;

/// Control code introducing a 16-bit literal
pub const CODE_LITERAL_16: u32 = 1;

/// Control code marking the end of the stream
pub const CODE_END_OF_STREAM: u32 = 2;

/// First code assigned to a dictionary entry
pub const FIRST_DICT_CODE: u32 = 3;

/// Widest dictionary code the decoder will read
pub const MAX_CODE_BITS: u32 = 32;

/// Statistics for compression/decompression operations
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompressionStats {
    /// Uncompressed length in UTF-16 code units
    pub input_units: usize,
    /// Compressed length in output symbols (including padding and sentinels)
    pub output_units: usize,
    /// Next dictionary code when the stream ended
    pub dictionary_size: u32,
    /// Code width in bits when the stream ended
    pub code_bits: u32,
    /// Number of literals introduced
    pub literal_count: usize,
    /// Number of back-references emitted
    pub reference_count: usize,
}

impl CompressionStats {
    /// Compressed size divided by uncompressed size (0.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.input_units == 0 {
            0.0
        } else {
            self.output_units as f64 / self.input_units as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_symbol() {
        assert_eq!(Alphabet::Raw.bits_per_symbol(), 16);
        assert_eq!(Alphabet::Utf16.bits_per_symbol(), 15);
        assert_eq!(Alphabet::Base64.bits_per_symbol(), 6);
        assert_eq!(Alphabet::UriSafe.bits_per_symbol(), 6);
    }

    #[test]
    fn test_storage_bytes() {
        let units = [0xD800u16, 0x0041, 0xFFFF];
        let bytes = Alphabet::Raw.to_storage_bytes(&units).unwrap();
        assert_eq!(bytes, vec![0x00, 0xD8, 0x41, 0x00, 0xFF, 0xFF]);
        assert_eq!(Alphabet::Raw.from_storage_bytes(&bytes).unwrap(), units);
        assert!(Alphabet::Raw.from_storage_bytes(&bytes[..5]).is_err());

        let text: Vec<u16> = "IZA=".encode_utf16().collect();
        let bytes = Alphabet::Base64.to_storage_bytes(&text).unwrap();
        assert_eq!(bytes, b"IZA=");
        assert_eq!(Alphabet::Base64.from_storage_bytes(&bytes).unwrap(), text);

        // A lone surrogate can never come out of a text-safe alphabet
        assert!(matches!(
            Alphabet::Utf16.to_storage_bytes(&[0xD800]),
            Err(LzsError::InvalidUtf16(_))
        ));
    }

    #[test]
    fn test_format_error_classification() {
        assert!(LzsError::UnexpectedEof.is_format_error());
        assert!(LzsError::InvalidControlCode(3).is_format_error());
        assert!(LzsError::InvalidCode {
            code: 9,
            dict_size: 4
        }
        .is_format_error());
        assert!(!LzsError::InvalidData("x".to_string()).is_format_error());
    }

    #[test]
    fn test_stats_ratio() {
        let stats = CompressionStats {
            input_units: 100,
            output_units: 25,
            ..Default::default()
        };
        assert!((stats.ratio() - 0.25).abs() < f64::EPSILON);
        assert_eq!(CompressionStats::default().ratio(), 0.0);
    }
}
