//! LZS - Rust implementation of the LZ-String text compression format
//!
//! This crate compresses text with an LZW-style dictionary coder that works on
//! UTF-16 code units, and packs the variable-width codes into one of four
//! output alphabets. The wire layout matches the widely used LZ-String
//! library, so payloads can be exchanged with other implementations.
//!
//! # Features
//!
//! - Four output alphabets: RAW (16 bits per unit), UTF-16 safe (15 bits),
//!   Base64 and URI-safe (6 bits per character)
//! - Optional keystream scrambler driven by one or more 64-bit keys
//! - Explicit errors for malformed payloads; decoding never panics
//! - Compression statistics
//! - Async batch processing (feature `async`)
//!
//! The alphabet is not recorded in the payload. Callers must remember which
//! alphabet produced a payload and use the same one to decompress it.
//!
//! # Example
//!
//! ```
//! use lzs::{compress_to_base64, decompress_from_base64};
//!
//! let packed = compress_to_base64("hello world");
//! assert_eq!(packed, "BYUwNmD2AEDukCcwBMg=");
//! assert_eq!(decompress_from_base64(&packed)?, "hello world");
//! # Ok::<(), lzs::LzsError>(())
//! ```
//!
//! # Example - Scrambling
//!
//! ```
//! use lzs::{compress_scrambled, decompress_scrambled};
//!
//! let text: Vec<u16> = "hello world".encode_utf16().collect();
//! let packed = compress_scrambled(&text, &[42]);
//! assert_eq!(decompress_scrambled(&packed, &[42])?, text);
//! # Ok::<(), lzs::LzsError>(())
//! ```
//!
//! The scrambler is obfuscation, not encryption. Key passes commute and
//! duplicate keys cancel in pairs, so only [`effective_keys`] matter.
//!
//! Decoded output is not size-limited. A short payload can expand
//! quadratically, so bound the length of untrusted input before decoding it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod compress;
pub mod decompress;
pub mod error;
pub mod scramble;
pub mod tables;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use common::{Alphabet, CompressionStats, LzsError, Result};
pub use compress::{compress, compress_with_stats};
pub use decompress::{decompress, decompress_with_stats};
pub use scramble::{compress_scrambled, decompress_scrambled, derive_keys, effective_keys};

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;

// Convenience functions

fn compress_to_string(text: &str, alphabet: Alphabet) -> String {
    let units: Vec<u16> = text.encode_utf16().collect();
    // Text-safe alphabets never produce surrogates, so this is lossless
    String::from_utf16_lossy(&compress(&units, alphabet))
}

fn decompress_to_string(payload: &str, alphabet: Alphabet) -> Result<String> {
    let units: Vec<u16> = payload.encode_utf16().collect();
    Ok(String::from_utf16(&decompress(&units, alphabet)?)?)
}

/// Compress text into the UTF-16 safe alphabet
///
/// The result ends with a space and may contain any character from U+0020 to
/// U+801F, so it suits storage that accepts arbitrary valid UTF-16.
pub fn compress_to_utf16(text: &str) -> String {
    compress_to_string(text, Alphabet::Utf16)
}

/// Decompress text produced by [`compress_to_utf16`]
pub fn decompress_from_utf16(payload: &str) -> Result<String> {
    decompress_to_string(payload, Alphabet::Utf16)
}

/// Compress text into the Base64 alphabet, padded with `=`
pub fn compress_to_base64(text: &str) -> String {
    compress_to_string(text, Alphabet::Base64)
}

/// Decompress text produced by [`compress_to_base64`]
pub fn decompress_from_base64(payload: &str) -> Result<String> {
    decompress_to_string(payload, Alphabet::Base64)
}

/// Compress text into the URI-safe alphabet, terminated with `+`
pub fn compress_to_uri_safe(text: &str) -> String {
    compress_to_string(text, Alphabet::UriSafe)
}

/// Decompress text produced by [`compress_to_uri_safe`]
pub fn decompress_from_uri_safe(payload: &str) -> Result<String> {
    decompress_to_string(payload, Alphabet::UriSafe)
}

/// Compress text into RAW code units
///
/// RAW output can contain unpaired surrogates and therefore is returned as
/// code units rather than a `String`.
pub fn compress_raw(text: &str) -> Vec<u16> {
    let units: Vec<u16> = text.encode_utf16().collect();
    compress(&units, Alphabet::Raw)
}

/// Decompress RAW code units produced by [`compress_raw`]
pub fn decompress_raw(payload: &[u16]) -> Result<String> {
    Ok(String::from_utf16(&decompress(payload, Alphabet::Raw)?)?)
}
