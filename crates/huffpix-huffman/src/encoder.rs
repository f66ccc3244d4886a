//! Bit-packing encoder.
//!
//! Concatenates the code of every input symbol, MSB-first, and zero-pads the
//! last byte. Nothing else is written: the receiver must know the symbol
//! count and hold an identical tree.

use tracing::debug;

use huffpix_core::{CodecConfig, Error, Result};

use crate::bitio::BitWriter;
use crate::table::CodeTable;

/// Encoded bytes plus the exact number of code bits they carry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedBuffer {
    data: Vec<u8>,
    bit_len: u64,
}

impl EncodedBuffer {
    /// Wrap bytes produced elsewhere.
    pub fn new(data: Vec<u8>, bit_len: u64) -> Self {
        debug_assert!(bit_len <= data.len() as u64 * 8);
        Self { data, bit_len }
    }

    /// Encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length in bytes, padding included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Code bits, padding excluded.
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Padding bits in the final byte.
    pub fn padding_bits(&self) -> u64 {
        self.data.len() as u64 * 8 - self.bit_len
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for EncodedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Encoder bound to one code table.
#[derive(Debug, Clone, Copy)]
pub struct HuffmanEncoder<'t> {
    table: &'t CodeTable,
    initial_capacity: usize,
}

impl<'t> HuffmanEncoder<'t> {
    /// Create an encoder with the default starting buffer size.
    pub fn new(table: &'t CodeTable) -> Self {
        Self::with_config(table, &CodecConfig::default())
    }

    /// Create an encoder using the buffer settings from `config`.
    pub fn with_config(table: &'t CodeTable, config: &CodecConfig) -> Self {
        Self {
            table,
            initial_capacity: config.initial_capacity.max(1),
        }
    }

    /// Encode a pixel buffer.
    ///
    /// Fails with [`Error::MissingCode`] if a pixel value has no
    /// code in the table, and with
    /// [`Error::AllocationFailed`] if the output cannot grow.
    pub fn encode(&self, pixels: &[u8]) -> Result<EncodedBuffer> {
        let mut writer = BitWriter::with_capacity(self.initial_capacity)?;

        for &symbol in pixels {
            let code = self
                .table
                .get(symbol)
                .ok_or_else(|| Error::missing_code(symbol))?;
            writer.write_code(code)?;
        }

        let (data, bit_len) = writer.finish()?;

        debug!(
            symbols = pixels.len(),
            bytes = data.len(),
            bits = bit_len,
            "Encoded pixel buffer"
        );

        Ok(EncodedBuffer { data, bit_len })
    }
}

/// Encode `pixels` with `table` using default buffer settings.
pub fn encode(pixels: &[u8], table: &CodeTable) -> Result<EncodedBuffer> {
    HuffmanEncoder::new(table).encode(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn table_for(pixels: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_pixels(pixels)).unwrap();
        CodeTable::from_tree(tree.as_ref())
    }

    #[test]
    fn test_scenario_bytes() {
        let pixels = [10, 10, 20, 20, 20, 30, 30, 30, 40];
        let table = table_for(&pixels);
        let encoded = encode(&pixels, &table).unwrap();

        // 101 101 11 11 11 0 0 0 100 -> 10110111 11110001 00|000000
        assert_eq!(encoded.as_bytes(), &[0xB7, 0xF1, 0x00]);
        assert_eq!(encoded.bit_len(), 18);
        assert_eq!(encoded.padding_bits(), 6);
    }

    #[test]
    fn test_degenerate_one_bit_per_symbol() {
        let pixels = [7u8; 9];
        let table = table_for(&pixels);
        let encoded = encode(&pixels, &table).unwrap();
        assert_eq!(encoded.as_bytes(), &[0x00, 0x00]);
        assert_eq!(encoded.bit_len(), 9);
    }

    #[test]
    fn test_empty_input() {
        let table = CodeTable::from_tree(None);
        let encoded = encode(&[], &table).unwrap();
        assert!(encoded.is_empty());
        assert_eq!(encoded.bit_len(), 0);
    }

    #[test]
    fn test_allocation_failure_is_error() {
        let pixels = [10, 10, 20, 20, 20, 30, 30, 30, 40];
        let table = table_for(&pixels);
        let config = CodecConfig::default().with_initial_capacity(usize::MAX);

        let err = HuffmanEncoder::with_config(&table, &config)
            .encode(&pixels)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AllocationFailed {
                requested_bytes: usize::MAX
            }
        ));
    }

    #[test]
    fn test_missing_code() {
        let table = table_for(&[1, 2, 3]);
        let err = encode(&[1, 2, 9], &table).unwrap_err();
        assert!(matches!(err, Error::MissingCode { symbol: 9 }));
    }

    #[test]
    fn test_small_initial_capacity_grows() {
        let pixels: Vec<u8> = (0..10_000u32).map(|i| (i % 17) as u8).collect();
        let table = table_for(&pixels);
        let config = CodecConfig::default().with_initial_capacity(1);

        let small = HuffmanEncoder::with_config(&table, &config)
            .encode(&pixels)
            .unwrap();
        let default = encode(&pixels, &table).unwrap();
        assert_eq!(small, default);
    }

    #[test]
    fn test_bit_len_matches_table_estimate() {
        let pixels: Vec<u8> = (0..4096u32).map(|i| ((i * 31) % 200) as u8).collect();
        let freqs = FrequencyTable::from_pixels(&pixels);
        let tree = HuffmanTree::build(&freqs).unwrap();
        let table = CodeTable::from_tree(tree.as_ref());

        let encoded = encode(&pixels, &table).unwrap();
        assert_eq!(encoded.bit_len(), table.encoded_bits(&freqs));
        assert_eq!(encoded.len() as u64, encoded.bit_len().div_ceil(8));
    }
}
