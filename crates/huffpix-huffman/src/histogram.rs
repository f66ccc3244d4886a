//! Symbol frequency tables.
//!
//! The frequency table is the only input the tree builder needs. Two builds
//! from identical tables always produce identical codes.

use huffpix_core::ALPHABET_SIZE;

/// Occurrence count for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Wrap a precomputed histogram.
    pub fn from_counts(counts: [u32; ALPHABET_SIZE]) -> Self {
        Self { counts }
    }

    /// Count byte values in a pixel buffer.
    ///
    /// Counts saturate at `u32::MAX`; a saturated count still yields a code
    /// for its symbol.
    pub fn from_pixels(pixels: &[u8]) -> Self {
        let mut counts = [0u32; ALPHABET_SIZE];

        // Process 4 bytes at a time to reduce loop overhead
        let chunks = pixels.chunks_exact(4);
        let remainder = chunks.remainder();

        for chunk in chunks {
            bump(&mut counts, chunk[0]);
            bump(&mut counts, chunk[1]);
            bump(&mut counts, chunk[2]);
            bump(&mut counts, chunk[3]);
        }

        for &b in remainder {
            bump(&mut counts, b);
        }

        Self { counts }
    }

    /// Count for one symbol.
    #[inline]
    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when no symbol occurs.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter_present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Raw histogram.
    pub fn as_counts(&self) -> &[u32; ALPHABET_SIZE] {
        &self.counts
    }
}

#[inline(always)]
fn bump(counts: &mut [u32; ALPHABET_SIZE], symbol: u8) {
    let slot = &mut counts[symbol as usize];
    *slot = slot.saturating_add(1);
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl From<[u32; ALPHABET_SIZE]> for FrequencyTable {
    fn from(counts: [u32; ALPHABET_SIZE]) -> Self {
        Self::from_counts(counts)
    }
}
