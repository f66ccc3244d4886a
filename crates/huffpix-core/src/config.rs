//! Codec configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the decoder reacts when encoded input runs out early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Report a short stream as [`Error::DecodeUnderrun`].
    #[default]
    Strict,

    /// Stop quietly and leave the remaining output slots untouched.
    Lenient,
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Starting capacity of the encoder output buffer (bytes)
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Decoder under-run policy
    #[serde(default)]
    pub decode_mode: DecodeMode,

    /// Worker threads for batch coding (0 = one per core)
    #[serde(default)]
    pub num_threads: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            decode_mode: DecodeMode::default(),
            num_threads: 0,
        }
    }
}

impl CodecConfig {
    /// Set the initial encoder buffer capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the decoder under-run policy.
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    /// Set the batch worker count.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Check the configuration for values the codec cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(Error::invalid_config("initial_capacity must be non-zero"));
        }
        Ok(())
    }
}

fn default_initial_capacity() -> usize {
    4096
}
