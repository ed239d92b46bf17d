//! Async batch processing module
//!
//! This module runs many independent compress or decompress calls
//! concurrently. A single call is strictly sequential, so the only parallelism
//! available is across inputs; each call is moved onto tokio's blocking pool
//! and results come back in input order.

#[cfg(feature = "async")]
/// Concurrent batch processing with a configurable concurrency limit
pub mod processor {
    use crate::{Alphabet, LzsError, Result};
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Run a CPU-bound codec call on the blocking pool
    async fn run_blocking<T, F>(work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| LzsError::TaskFailed(e.to_string()))?
    }

    /// Concurrent processor for independent inputs
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
    }

    impl AsyncBatchProcessor {
        /// Create a new batch processor with one slot per CPU
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
            }
        }

        /// Set the concurrency limit (at least 1)
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Current concurrency limit
        pub fn concurrency(&self) -> usize {
            self.concurrency_limit
        }

        /// Apply `work` to every input concurrently, keeping input order
        async fn run_all<I, T, F>(&self, inputs: Vec<I>, work: F) -> Result<Vec<T>>
        where
            I: Send + 'static,
            T: Send + 'static,
            F: Fn(I) -> Result<T> + Send + Sync + 'static,
        {
            let work = Arc::new(work);
            stream::iter(inputs.into_iter().map(|input| {
                let work = Arc::clone(&work);
                run_blocking(move || (*work)(input))
            }))
            .buffered(self.concurrency_limit)
            .try_collect()
            .await
        }

        /// Compress every input with the same alphabet
        pub async fn compress_all(
            &self,
            inputs: Vec<Vec<u16>>,
            alphabet: Alphabet,
        ) -> Result<Vec<Vec<u16>>> {
            log::debug!(
                "compressing {} inputs as {} with {} workers",
                inputs.len(),
                alphabet,
                self.concurrency_limit
            );
            self.run_all(inputs, move |input| {
                Ok(crate::compress::compress(&input, alphabet))
            })
            .await
        }

        /// Decompress every payload; the first malformed payload fails the batch
        pub async fn decompress_all(
            &self,
            inputs: Vec<Vec<u16>>,
            alphabet: Alphabet,
        ) -> Result<Vec<Vec<u16>>> {
            self.run_all(inputs, move |input| {
                crate::decompress::decompress(&input, alphabet)
            })
            .await
        }

        /// Compress and scramble every input with the same keys
        pub async fn compress_scrambled_all(
            &self,
            inputs: Vec<Vec<u16>>,
            keys: &[i64],
        ) -> Result<Vec<Vec<u16>>> {
            let keys: Arc<[i64]> = keys.into();
            self.run_all(inputs, move |input| {
                Ok(crate::scramble::compress_scrambled(&input, &keys))
            })
            .await
        }

        /// Read UTF-8 text files and compress each one
        pub async fn compress_files<P: AsRef<Path>>(
            &self,
            files: Vec<P>,
            alphabet: Alphabet,
        ) -> Result<Vec<(PathBuf, Vec<u16>)>> {
            let texts = stream::iter(files.iter().map(|path| {
                let path = path.as_ref().to_path_buf();
                async move {
                    let text = tokio::fs::read_to_string(&path).await?;
                    Ok::<_, LzsError>((path, text.encode_utf16().collect::<Vec<u16>>()))
                }
            }))
            .buffered(self.concurrency_limit)
            .try_collect::<Vec<_>>()
            .await?;

            self.run_all(texts, move |(path, units)| {
                Ok((path, crate::compress::compress(&units, alphabet)))
            })
            .await
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
