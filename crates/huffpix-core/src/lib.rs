//! # Huffpix Core
//!
//! Shared errors, types, configuration and codec traits for the huffpix
//! entropy coder.
//!
//! ## Core Traits
//!
//! - [`Compressor`] - One-shot compression operations
//! - [`Decompressor`] - One-shot decompression with a known symbol count
//! - [`Codec`] - Combined compress/decompress capability
//!
//! ## Example
//!
//! ```ignore
//! use huffpix_core::{Codec, CodecConfig};
//! use huffpix_huffman::HuffmanCodec;
//!
//! let codec = HuffmanCodec::train(pixels, CodecConfig::default())?;
//! let compressed = codec.compress(pixels)?;
//! let original = codec.decompress_with_size(&compressed, pixels.len())?;
//! ```

pub mod config;
pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use config::{CodecConfig, DecodeMode};
pub use error::{Error, Result};
pub use stats::{CompressionStats, Metrics};
pub use traits::{Codec, Compressor, Decompressor};
pub use types::{CompressionRatio, ALPHABET_SIZE, MAX_CODE_BITS};
