//! Tests for the async batch and file helpers

#![cfg(feature = "async")]

use lzs::{
    compress, compress_file, compress_scrambled, decompress_file, decompress_scrambled,
    AsyncBatchProcessor, Alphabet, LzsError,
};
use tempfile::tempdir;

fn units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn sample_inputs() -> Vec<Vec<u16>> {
    (0..32)
        .map(|i| units(&format!("input number {i} ").repeat(i + 1)))
        .collect()
}

#[tokio::test]
async fn test_batch_preserves_order() -> Result<(), Box<dyn std::error::Error>> {
    let inputs = sample_inputs();
    let processor = AsyncBatchProcessor::new().with_concurrency(4);

    let packed = processor.compress_all(inputs.clone(), Alphabet::Base64).await?;
    assert_eq!(packed.len(), inputs.len());
    for (input, payload) in inputs.iter().zip(&packed) {
        assert_eq!(payload, &compress(input, Alphabet::Base64));
    }

    let unpacked = processor.decompress_all(packed, Alphabet::Base64).await?;
    assert_eq!(unpacked, inputs);
    Ok(())
}

#[tokio::test]
async fn test_batch_reports_first_failure() {
    let processor = AsyncBatchProcessor::new().with_concurrency(2);
    let mut payloads: Vec<Vec<u16>> = sample_inputs()
        .iter()
        .map(|input| compress(input, Alphabet::UriSafe))
        .collect();
    payloads[5] = units("not/valid");

    let result = processor.decompress_all(payloads, Alphabet::UriSafe).await;
    assert!(matches!(result, Err(LzsError::InvalidSymbol { .. })));
}

#[tokio::test]
async fn test_batch_scrambled() -> Result<(), Box<dyn std::error::Error>> {
    let inputs = sample_inputs();
    let keys = [11i64, -22, 33];
    let processor = AsyncBatchProcessor::default();

    let packed = processor.compress_scrambled_all(inputs.clone(), &keys).await?;
    for (input, payload) in inputs.iter().zip(&packed) {
        assert_eq!(payload, &compress_scrambled(input, &keys));
        assert_eq!(&decompress_scrambled(payload, &keys)?, input);
    }
    Ok(())
}

#[tokio::test]
async fn test_concurrency_is_at_least_one() {
    assert_eq!(AsyncBatchProcessor::new().with_concurrency(0).concurrency(), 1);
}

#[tokio::test]
async fn test_file_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_path = dir.path().join("input.txt");
    let text = "Async file round trip. ".repeat(100) + "Ünïcödé ✓";
    tokio::fs::write(&input_path, &text).await?;

    for alphabet in Alphabet::ALL {
        let packed_path = dir.path().join(format!("packed.{alphabet}"));
        let output_path = dir.path().join(format!("output.{alphabet}.txt"));

        let stats = compress_file(&input_path, &packed_path, alphabet).await?;
        assert_eq!(stats.input_units, text.encode_utf16().count());
        assert!(stats.output_units < stats.input_units);

        let stats = decompress_file(&packed_path, &output_path, alphabet).await?;
        assert_eq!(stats.input_units, text.encode_utf16().count());
        assert_eq!(tokio::fs::read_to_string(&output_path).await?, text);
    }
    Ok(())
}

#[tokio::test]
async fn test_compress_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut paths = Vec::new();
    for i in 0..5 {
        let path = dir.path().join(format!("file{i}.txt"));
        tokio::fs::write(&path, format!("file {i} ").repeat(10)).await?;
        paths.push(path);
    }

    let results = lzs::compress_files(paths.clone(), Alphabet::Utf16, Some(2)).await?;
    assert_eq!(results.len(), paths.len());
    for ((path, payload), expected_path) in results.iter().zip(&paths) {
        assert_eq!(path, expected_path);
        let text = tokio::fs::read_to_string(path).await?;
        assert_eq!(payload, &compress(&units(&text), Alphabet::Utf16));
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = compress_file(
        dir.path().join("missing.txt"),
        dir.path().join("out"),
        Alphabet::Raw,
    )
    .await;
    assert!(matches!(result, Err(LzsError::Io(_))));
}
