//! Tree-walking decoder.
//!
//! Each input bit moves one edge down the tree (`0` left, `1` right). On
//! reaching a leaf its symbol is written and the walk restarts at the root.
//! Decoding stops the moment the output is full, even mid-byte, so padding
//! bits are never interpreted.

use tracing::{debug, warn};

use huffpix_core::{CodecConfig, DecodeMode, Error, Result};

use crate::bitio::BitReader;
use crate::tree::{HuffmanTree, TreeNode};

/// Decoder bound to one tree.
#[derive(Debug, Clone, Copy)]
pub struct HuffmanDecoder<'t> {
    tree: Option<&'t HuffmanTree>,
    mode: DecodeMode,
}

impl<'t> HuffmanDecoder<'t> {
    /// Create a strict decoder. `None` is the tree of an empty histogram.
    pub fn new(tree: Option<&'t HuffmanTree>) -> Self {
        Self {
            tree,
            mode: DecodeMode::Strict,
        }
    }

    /// Create a decoder using the under-run policy from `config`.
    pub fn with_config(tree: Option<&'t HuffmanTree>, config: &CodecConfig) -> Self {
        Self {
            tree,
            mode: config.decode_mode,
        }
    }

    /// Set the under-run policy.
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Decode exactly `output.len()` symbols from `input` into `output`.
    ///
    /// Returns the number of symbols written. If `input` runs out first,
    /// strict mode fails with [`Error::DecodeUnderrun`]; lenient mode returns
    /// the short count and leaves the rest of `output` unchanged.
    pub fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let target = output.len();
        if target == 0 {
            return Ok(0);
        }

        let Some(tree) = self.tree else {
            return self.underrun(0, target, 0);
        };

        let root = tree.root();
        let mut reader = BitReader::new(input);
        let mut written = 0;

        match root {
            TreeNode::Leaf { symbol, .. } => {
                // One bit per symbol; its value carries no information
                while written < target && reader.read_bit().is_some() {
                    output[written] = *symbol;
                    written += 1;
                }
            }
            TreeNode::Internal { .. } => {
                let mut node = root;
                while written < target {
                    let Some(bit) = reader.read_bit() else {
                        break;
                    };
                    node = match node.child(bit) {
                        Some(child) => child,
                        None => unreachable!("walk resets at every leaf"),
                    };
                    if let TreeNode::Leaf { symbol, .. } = node {
                        output[written] = *symbol;
                        written += 1;
                        node = root;
                    }
                }
            }
        }

        if written < target {
            return self.underrun(written, target, reader.bytes_consumed());
        }

        debug!(
            symbols = written,
            bytes_read = reader.bytes_consumed(),
            "Decoded pixel buffer"
        );

        Ok(written)
    }

    /// Decode `count` symbols into a new buffer.
    ///
    /// In lenient mode a short stream yields a shorter buffer.
    pub fn decode(&self, input: &[u8], count: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; count];
        let written = self.decode_into(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }

    fn underrun(&self, decoded: usize, expected: usize, bytes_read: usize) -> Result<usize> {
        match self.mode {
            DecodeMode::Strict => Err(Error::decode_underrun(decoded, expected, bytes_read)),
            DecodeMode::Lenient => {
                warn!(
                    decoded,
                    expected,
                    bytes_read,
                    "Encoded input exhausted before symbol count reached"
                );
                Ok(decoded)
            }
        }
    }
}

/// Decode `count` symbols from `input` with a strict decoder.
pub fn decode(input: &[u8], tree: Option<&HuffmanTree>, count: usize) -> Result<Vec<u8>> {
    HuffmanDecoder::new(tree).decode(input, count)
}
