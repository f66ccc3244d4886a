//! # Huffpix Huffman
//!
//! Lossless Huffman entropy coding for single-channel pixel buffers.
//!
//! ## Pipeline
//!
//! ```text
//! histogram -> priority queue -> tree -> code table -> encoder -> bytes
//!                                   \------------------> decoder -> pixels
//! ```
//!
//! The bitstream is raw: codes are packed MSB-first with zero padding in the
//! last byte, and there is no header, length, table or checksum. A receiver
//! needs the exact pixel count and the same histogram (or tree) out of band.
//! Ties between equal frequencies break on symbol value, so every build from
//! the same histogram yields the same codes.
//!
//! ## Example
//!
//! ```ignore
//! use huffpix_core::{CodecConfig, Compressor, Decompressor};
//! use huffpix_huffman::HuffmanCodec;
//!
//! let pixels = [10, 10, 20, 20, 20, 30, 30, 30, 40];
//! let codec = HuffmanCodec::train(&pixels, CodecConfig::default())?;
//! let compressed = codec.compress(&pixels)?;
//! let original = codec.decompress_with_size(&compressed, pixels.len())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Encode and decode image batches on a rayon pool (default)

pub mod batch;
pub mod bitio;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod histogram;
pub mod queue;
pub mod table;
pub mod tree;

// Re-export main types
pub use batch::{compress_image, compress_images, decompress_image, decompress_images};
pub use batch::{BatchReport, CompressedImage};
pub use codec::HuffmanCodec;
pub use decoder::{decode, HuffmanDecoder};
pub use encoder::{encode, EncodedBuffer, HuffmanEncoder};
pub use histogram::FrequencyTable;
pub use queue::{PendingNode, PriorityQueue};
pub use table::{CodeTable, HuffmanCode};
pub use tree::{HuffmanTree, TreeNode};
