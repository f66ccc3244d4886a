//! Huffman codec (tree + code table + encoder + decoder).

use std::time::Instant;

use huffpix_core::{
    Codec, CodecConfig, CompressionStats, Compressor, Decompressor, Result,
};

use crate::decoder::HuffmanDecoder;
use crate::encoder::{EncodedBuffer, HuffmanEncoder};
use crate::histogram::FrequencyTable;
use crate::table::CodeTable;
use crate::tree::HuffmanTree;

/// Huffman codec for one histogram.
///
/// Holds the tree and its code table for as long as the codec lives, so any
/// number of encode and decode calls can share them.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    tree: Option<HuffmanTree>,
    table: CodeTable,
    config: CodecConfig,
}

impl HuffmanCodec {
    /// Build a codec from a precomputed histogram.
    pub fn from_frequencies(frequencies: FrequencyTable, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        let tree = HuffmanTree::build(&frequencies)?;
        let table = CodeTable::from_tree(tree.as_ref());
        Ok(Self {
            frequencies,
            tree,
            table,
            config,
        })
    }

    /// Build a codec from the histogram of `pixels`.
    pub fn train(pixels: &[u8], config: CodecConfig) -> Result<Self> {
        Self::from_frequencies(FrequencyTable::from_pixels(pixels), config)
    }

    /// Histogram the codec was built from.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Tree, or `None` for an empty histogram.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a pixel buffer.
    pub fn encode(&self, pixels: &[u8]) -> Result<EncodedBuffer> {
        HuffmanEncoder::with_config(&self.table, &self.config).encode(pixels)
    }

    /// Decode `output.len()` symbols into `output`.
    pub fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        HuffmanDecoder::with_config(self.tree.as_ref(), &self.config).decode_into(input, output)
    }

    /// Decode `count` symbols into a new buffer.
    pub fn decode(&self, input: &[u8], count: usize) -> Result<Vec<u8>> {
        HuffmanDecoder::with_config(self.tree.as_ref(), &self.config).decode(input, count)
    }

    /// Encode and report sizes, code shape and timing.
    pub fn compress_with_stats(&self, pixels: &[u8]) -> Result<(EncodedBuffer, CompressionStats)> {
        let start = Instant::now();
        let encoded = self.encode(pixels)?;
        let stats = CompressionStats {
            original_size: pixels.len(),
            compressed_size: encoded.len(),
            encoded_bits: encoded.bit_len(),
            distinct_symbols: self.table.len(),
            max_code_len: self.table.max_code_len(),
            time_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        Ok((encoded, stats))
    }
}

impl Compressor for HuffmanCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encode(input)?.into_vec())
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        input_len
            .saturating_mul(self.table.max_code_len())
            .div_ceil(8)
    }
}

impl Decompressor for HuffmanCodec {
    fn decompress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.decode_into(input, output)
    }
}

impl Codec for HuffmanCodec {}

#[cfg(test)]
mod tests {
    use super::*;
    use huffpix_core::{DecodeMode, Error};

    #[test]
    fn test_roundtrip_empty() {
        let codec = HuffmanCodec::train(b"", CodecConfig::default()).unwrap();
        assert!(codec.tree().is_none());

        let compressed = codec.compress(b"").unwrap();
        assert!(compressed.is_empty());

        let decompressed = codec.decompress_with_size(&compressed, 0).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn test_roundtrip_small() {
        let input = b"Hello, Huffman!";
        let codec = HuffmanCodec::train(input, CodecConfig::default()).unwrap();
        assert!(codec.verify_roundtrip(input).unwrap());
    }

    #[test]
    fn test_roundtrip_large() {
        let pattern = b"The quick brown fox jumps over the lazy dog. ";
        let input: Vec<u8> = pattern.iter().cycle().take(100_000).copied().collect();
        let codec = HuffmanCodec::train(&input, CodecConfig::default()).unwrap();

        let compressed = codec.compress(&input).unwrap();
        assert!(compressed.len() < input.len());
        assert!(compressed.len() <= codec.max_compressed_size(input.len()));

        let decompressed = codec.decompress_with_size(&compressed, input.len()).unwrap();
        assert_eq!(decompressed, input);
    }

    #[test]
    fn test_stats() {
        let input = [10, 10, 20, 20, 20, 30, 30, 30, 40];
        let codec = HuffmanCodec::train(&input, CodecConfig::default()).unwrap();
        let (encoded, stats) = codec.compress_with_stats(&input).unwrap();

        assert_eq!(stats.original_size, 9);
        assert_eq!(stats.compressed_size, encoded.len());
        assert_eq!(stats.encoded_bits, 18);
        assert_eq!(stats.distinct_symbols, 4);
        assert_eq!(stats.max_code_len, 3);
        assert!((stats.bits_per_symbol() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_ratio() {
        let input = vec![0u8, 0, 0, 1].repeat(256);
        let codec = HuffmanCodec::train(&input, CodecConfig::default()).unwrap();
        let ratio = codec.measure_ratio(&input).unwrap();
        // One bit per symbol
        assert_eq!(ratio.compressed_size, input.len() / 8);
        assert!(ratio.is_effective());
    }

    #[test]
    fn test_invalid_config() {
        let config = CodecConfig::default().with_initial_capacity(0);
        let err = HuffmanCodec::train(b"abc", config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_decode_mode_from_config() {
        let input = b"abracadabra";
        let codec = HuffmanCodec::train(input, CodecConfig::default()).unwrap();
        let compressed = codec.compress(input).unwrap();
        assert!(codec
            .decompress_with_size(&compressed[..1], input.len())
            .is_err());

        let lenient = HuffmanCodec::train(
            input,
            CodecConfig::default().with_decode_mode(DecodeMode::Lenient),
        )
        .unwrap();
        let mut output = vec![0u8; input.len()];
        let written = lenient.decompress_to(&compressed[..1], &mut output).unwrap();
        assert!(written < input.len());
        assert_eq!(&output[..written], &input[..written]);
    }

    #[test]
    fn test_lenient_decompress_with_size_truncates() {
        let input = b"abracadabra";
        let codec = HuffmanCodec::train(
            input,
            CodecConfig::default().with_decode_mode(DecodeMode::Lenient),
        )
        .unwrap();
        let compressed = codec.compress(input).unwrap();

        let decompressed = codec
            .decompress_with_size(&compressed[..1], input.len())
            .unwrap();
        assert!(!decompressed.is_empty());
        assert!(decompressed.len() < input.len());
        assert_eq!(decompressed.as_slice(), &input[..decompressed.len()]);
    }

    #[test]
    fn test_compress_with_stats() {
        let input = vec![3u8; 1024];
        let codec = HuffmanCodec::train(&input, CodecConfig::default()).unwrap();
        let (encoded, stats) = codec.compress_with_stats(&input).unwrap();
        assert_eq!(stats.compressed_size, encoded.len());
        assert_eq!(stats.encoded_bits, 1024);
        assert_eq!(stats.max_code_len, 1);
    }

    #[test]
    fn test_encode_foreign_pixels() {
        let codec = HuffmanCodec::train(b"aaaa", CodecConfig::default()).unwrap();
        let err = codec.compress(b"ab").unwrap_err();
        assert!(matches!(err, Error::MissingCode { symbol: b'b' }));
    }
}
