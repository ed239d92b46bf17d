//! Round-trip tests for the LZS codec
//!
//! These tests verify that compressing and then decompressing returns the
//! original code units for a range of hand-picked inputs in every alphabet.

use lzs::{compress, compress_with_stats, decompress, decompress_with_stats, Alphabet};

fn units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn assert_round_trip(input: &[u16]) -> Result<(), Box<dyn std::error::Error>> {
    for alphabet in Alphabet::ALL {
        let packed = compress(input, alphabet);
        let unpacked = decompress(&packed, alphabet)?;
        assert_eq!(
            unpacked,
            input,
            "round trip failed in {alphabet} for {} units",
            input.len()
        );
    }
    Ok(())
}

/// Test empty input in every alphabet
#[test]
fn test_empty_input() -> Result<(), Box<dyn std::error::Error>> {
    for alphabet in Alphabet::ALL {
        assert!(compress(&[], alphabet).is_empty());
        assert!(decompress(&[], alphabet)?.is_empty());
    }
    Ok(())
}

/// Test single code units, including both literal widths
#[test]
fn test_single_units() -> Result<(), Box<dyn std::error::Error>> {
    for unit in [0u16, 1, 2, 3, 0x7F, 0xFF, 0x100, 0xD800, 0xDFFF, 0xFFFF] {
        assert_round_trip(&[unit])?;
    }
    Ok(())
}

/// Test every code unit from 0 to 0xFFFF in one input
#[test]
fn test_full_code_unit_range() -> Result<(), Box<dyn std::error::Error>> {
    let all: Vec<u16> = (0..=u16::MAX).collect();
    assert_round_trip(&all)?;

    let reversed: Vec<u16> = all.iter().rev().copied().collect();
    assert_round_trip(&reversed)?;
    Ok(())
}

/// Test inputs that exercise the phrase + phrase[0] back-reference
#[test]
fn test_repeated_runs() -> Result<(), Box<dyn std::error::Error>> {
    for len in 1..200 {
        assert_round_trip(&vec![b'x' as u16; len])?;
    }
    assert_round_trip(&units("ABABABABABABABABABABA"))?;
    assert_round_trip(&units("TOBEORNOTTOBEORTOBEORNOT"))?;
    Ok(())
}

/// Test that highly repetitive text compresses to under half its length
#[test]
fn test_repetitive_text_compresses() {
    let text = units(&"ab".repeat(50));
    let packed = compress(&text, Alphabet::Raw);
    println!("{} units -> {} RAW units", text.len(), packed.len());
    assert!(packed.len() * 2 < text.len());

    let long_text = units(&"Lorem ipsum dolor sit amet, ".repeat(400));
    let (packed, stats) = compress_with_stats(&long_text, Alphabet::Utf16);
    println!(
        "{} units -> {} UTF-16 units (ratio {:.3})",
        long_text.len(),
        packed.len(),
        stats.ratio()
    );
    assert!(stats.ratio() < 0.2);
}

/// Test that width growth boundaries survive a round trip
#[test]
fn test_width_boundaries() -> Result<(), Box<dyn std::error::Error>> {
    // Distinct units push the dictionary across many power-of-two sizes
    for len in [2usize, 3, 4, 5, 6, 7, 8, 9, 15, 16, 17, 31, 32, 33, 127, 128, 129, 1000] {
        let input: Vec<u16> = (0..len as u16).map(|i| i.wrapping_mul(7919)).collect();
        assert_round_trip(&input)?;
    }
    Ok(())
}

/// Test that Base64 payloads are always padded to a multiple of four
#[test]
fn test_base64_padding() {
    for len in 1..40 {
        let input: Vec<u16> = (0..len).map(|i| b'a' as u16 + (i % 26)).collect();
        let packed = compress(&input, Alphabet::Base64);
        assert_eq!(packed.len() % 4, 0, "length {} for {len} units", packed.len());
    }
}

/// Test that sentinels are present on the alphabets that use them
#[test]
fn test_sentinels() {
    let input = units("sentinel check");
    assert_eq!(compress(&input, Alphabet::Utf16).last(), Some(&(b' ' as u16)));
    assert_eq!(compress(&input, Alphabet::UriSafe).last(), Some(&(b'+' as u16)));
}

/// Test that decoding is a pure function of its input
#[test]
fn test_decompression_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let input = units("decode me twice, decode me twice");
    for alphabet in Alphabet::ALL {
        let packed = compress(&input, alphabet);
        let first = decompress(&packed, alphabet)?;
        let second = decompress(&packed, alphabet)?;
        assert_eq!(first, second);
    }
    Ok(())
}

/// Test that compression and decompression agree on statistics
#[test]
fn test_statistics() -> Result<(), Box<dyn std::error::Error>> {
    let input = units("the rain in spain falls mainly on the plain");
    let (packed, compress_stats) = compress_with_stats(&input, Alphabet::Base64);
    let (unpacked, decompress_stats) = decompress_with_stats(&packed, Alphabet::Base64)?;

    assert_eq!(unpacked, input);
    assert_eq!(compress_stats.input_units, input.len());
    assert_eq!(compress_stats.output_units, packed.len());
    assert_eq!(decompress_stats.input_units, input.len());
    assert_eq!(compress_stats.literal_count, decompress_stats.literal_count);
    assert_eq!(compress_stats.reference_count, decompress_stats.reference_count);
    assert_eq!(compress_stats.code_bits, decompress_stats.code_bits);
    Ok(())
}
