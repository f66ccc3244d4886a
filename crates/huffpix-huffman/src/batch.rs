//! Batch coding of independent images.
//!
//! Every image gets its own histogram, tree, code table and buffers, so
//! images can be coded on separate worker threads without synchronization.
//! With the `parallel` feature the work is spread over a rayon pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use huffpix_core::{CodecConfig, CompressionStats, Metrics, Result};

use crate::codec::HuffmanCodec;
use crate::encoder::EncodedBuffer;
use crate::histogram::FrequencyTable;

/// An encoded image plus the side information a receiver needs to decode it.
///
/// The bitstream itself carries neither; both travel out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    /// Histogram the tree is rebuilt from.
    pub frequencies: FrequencyTable,
    /// Number of pixels to decode.
    pub symbol_count: usize,
    /// Encoded bitstream.
    pub encoded: EncodedBuffer,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// Per-image results, in input order.
    pub results: Vec<Result<CompressedImage>>,
    /// Aggregate counters over the batch.
    pub metrics: Metrics,
}

/// Compress one image with a tree trained on its own pixels.
pub fn compress_image(
    pixels: &[u8],
    config: &CodecConfig,
) -> Result<(CompressedImage, CompressionStats)> {
    let codec = HuffmanCodec::train(pixels, config.clone())?;
    let (encoded, stats) = codec.compress_with_stats(pixels)?;
    let image = CompressedImage {
        frequencies: codec.frequencies().clone(),
        symbol_count: pixels.len(),
        encoded,
    };
    Ok((image, stats))
}

/// Rebuild the tree from the stored histogram and decode the pixels.
pub fn decompress_image(image: &CompressedImage, config: &CodecConfig) -> Result<Vec<u8>> {
    let codec = HuffmanCodec::from_frequencies(image.frequencies.clone(), config.clone())?;
    codec.decode(image.encoded.as_bytes(), image.symbol_count)
}

/// Compress many images independently.
///
/// Only a failure to start the worker pool fails the whole call; per-image
/// errors are reported in [`BatchReport::results`].
pub fn compress_images(images: &[&[u8]], config: &CodecConfig) -> Result<BatchReport> {
    config.validate()?;

    let outcomes = run_batch(images, config, |pixels, config| compress_image(pixels, config))?;

    let mut metrics = Metrics::new();
    let results = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            Ok((image, stats)) => {
                metrics.record(&stats);
                Ok(image)
            }
            Err(e) => {
                metrics.record_error();
                Err(e)
            }
        })
        .collect();

    Ok(BatchReport { results, metrics })
}

/// Decompress many images independently, in input order.
pub fn decompress_images(
    images: &[CompressedImage],
    config: &CodecConfig,
) -> Result<Vec<Result<Vec<u8>>>> {
    config.validate()?;
    run_batch(images, config, decompress_image)
}

#[cfg(feature = "parallel")]
fn run_batch<T, R, F>(items: &[T], config: &CodecConfig, f: F) -> Result<Vec<Result<R>>>
where
    T: Sync,
    R: Send,
    F: Fn(&T, &CodecConfig) -> Result<R> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build()
        .map_err(|e| huffpix_core::Error::Parallel(format!("failed to create thread pool: {}", e)))?;

    Ok(pool.install(|| items.par_iter().map(|item| f(item, config)).collect()))
}

#[cfg(not(feature = "parallel"))]
fn run_batch<T, R, F>(items: &[T], config: &CodecConfig, f: F) -> Result<Vec<Result<R>>>
where
    F: Fn(&T, &CodecConfig) -> Result<R>,
{
    Ok(items.iter().map(|item| f(item, config)).collect())
}
