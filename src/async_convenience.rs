//! Async convenience functions
//!
//! This module provides easy-to-use async functions for compressing and
//! decompressing text and files without blocking the runtime.

#[cfg(feature = "async")]
/// Async wrappers around the codec and file helpers
pub mod functions {
    use crate::{Alphabet, CompressionStats, LzsError, Result};
    use std::path::Path;

    async fn spawn<T, F>(work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| LzsError::TaskFailed(e.to_string()))?
    }

    /// Compress text on the blocking pool
    pub async fn compress_async(text: String, alphabet: Alphabet) -> Result<Vec<u16>> {
        spawn(move || {
            let units: Vec<u16> = text.encode_utf16().collect();
            Ok(crate::compress::compress(&units, alphabet))
        })
        .await
    }

    /// Decompress a payload to text on the blocking pool
    pub async fn decompress_async(payload: Vec<u16>, alphabet: Alphabet) -> Result<String> {
        spawn(move || {
            let units = crate::decompress::decompress(&payload, alphabet)?;
            Ok(String::from_utf16(&units)?)
        })
        .await
    }

    /// Compress a UTF-8 text file into the storage form of `alphabet`
    pub async fn compress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        alphabet: Alphabet,
    ) -> Result<CompressionStats> {
        let text = tokio::fs::read_to_string(input_path).await?;
        let (bytes, stats) = spawn(move || {
            let units: Vec<u16> = text.encode_utf16().collect();
            let (packed, stats) = crate::compress::compress_with_stats(&units, alphabet);
            Ok((alphabet.to_storage_bytes(&packed)?, stats))
        })
        .await?;

        tokio::fs::write(output_path, bytes).await?;
        Ok(stats)
    }

    /// Decompress a file written by [`compress_file`] back to UTF-8 text
    pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        alphabet: Alphabet,
    ) -> Result<CompressionStats> {
        let bytes = tokio::fs::read(input_path).await?;
        let (text, stats) = spawn(move || {
            let payload = alphabet.from_storage_bytes(&bytes)?;
            let (units, stats) = crate::decompress::decompress_with_stats(&payload, alphabet)?;
            Ok((String::from_utf16(&units)?, stats))
        })
        .await?;

        tokio::fs::write(output_path, text).await?;
        Ok(stats)
    }

    /// Compress multiple files concurrently
    pub async fn compress_files<P: AsRef<Path>>(
        files: Vec<P>,
        alphabet: Alphabet,
        concurrency: Option<usize>,
    ) -> Result<Vec<(std::path::PathBuf, Vec<u16>)>> {
        use crate::async_batch::AsyncBatchProcessor;

        let mut processor = AsyncBatchProcessor::new();
        if let Some(limit) = concurrency {
            processor = processor.with_concurrency(limit);
        }

        processor.compress_files(files, alphabet).await
    }
}

#[cfg(feature = "async")]
pub use functions::*;
