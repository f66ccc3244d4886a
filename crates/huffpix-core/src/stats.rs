//! Statistics and metrics for entropy coding operations.

use crate::types::CompressionRatio;

/// Statistics from a single encode operation.
#[derive(Debug, Clone, Default)]
pub struct CompressionStats {
    /// Original (uncompressed) size in bytes.
    pub original_size: usize,

    /// Compressed size in bytes, including final-byte padding.
    pub compressed_size: usize,

    /// Exact number of code bits emitted, excluding padding.
    pub encoded_bits: u64,

    /// Number of distinct symbols with a code.
    pub distinct_symbols: usize,

    /// Longest code in the table, in bits.
    pub max_code_len: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Average code length per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.original_size as f64
    }

    /// Get throughput in bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        self.throughput_bps() / 1_000_000.0
    }

    /// Merge stats from another operation.
    pub fn merge(&mut self, other: &CompressionStats) {
        self.original_size += other.original_size;
        self.compressed_size += other.compressed_size;
        self.encoded_bits += other.encoded_bits;
        self.time_us += other.time_us;
        self.distinct_symbols = self.distinct_symbols.max(other.distinct_symbols);
        self.max_code_len = self.max_code_len.max(other.max_code_len);
    }
}

/// Metrics collector for aggregate statistics.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Total operations performed.
    pub total_operations: u64,

    /// Total bytes consumed.
    pub total_bytes_in: u64,

    /// Total bytes produced.
    pub total_bytes_out: u64,

    /// Total time spent in microseconds.
    pub total_time_us: u64,

    /// Number of errors encountered.
    pub error_count: u64,
}

impl Metrics {
    /// Create new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed operation.
    pub fn record(&mut self, stats: &CompressionStats) {
        self.total_operations += 1;
        self.total_bytes_in += stats.original_size as u64;
        self.total_bytes_out += stats.compressed_size as u64;
        self.total_time_us += stats.time_us;
    }

    /// Record a failed operation.
    pub fn record_error(&mut self) {
        self.total_operations += 1;
        self.error_count += 1;
    }

    /// Get average compression ratio.
    pub fn average_ratio(&self) -> f64 {
        if self.total_bytes_out == 0 {
            return 1.0;
        }
        self.total_bytes_in as f64 / self.total_bytes_out as f64
    }

    /// Get average throughput in MB/s.
    pub fn average_throughput_mbs(&self) -> f64 {
        if self.total_time_us == 0 {
            return 0.0;
        }
        self.total_bytes_in as f64 / self.total_time_us as f64
    }

    /// Get error rate (0.0 to 1.0).
    pub fn error_rate(&self) -> f64 {
        if self.total_operations == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.total_operations as f64
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get metrics summary as string.
    pub fn summary(&self) -> String {
        format!(
            "Operations: {}, Bytes: {} -> {} (ratio: {:.2}x), Throughput: {:.1} MB/s, Errors: {}",
            self.total_operations,
            self.total_bytes_in,
            self.total_bytes_out,
            self.average_ratio(),
            self.average_throughput_mbs(),
            self.error_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(original: usize, compressed: usize, bits: u64) -> CompressionStats {
        CompressionStats {
            original_size: original,
            compressed_size: compressed,
            encoded_bits: bits,
            distinct_symbols: 4,
            max_code_len: 3,
            time_us: 10,
        }
    }

    #[test]
    fn test_bits_per_symbol() {
        let stats = sample(9, 3, 18);
        assert!((stats.bits_per_symbol() - 2.0).abs() < 1e-9);
        assert_eq!(CompressionStats::new().bits_per_symbol(), 0.0);
    }

    #[test]
    fn test_merge() {
        let mut a = sample(9, 3, 18);
        let b = sample(100, 40, 310);
        a.merge(&b);
        assert_eq!(a.original_size, 109);
        assert_eq!(a.compressed_size, 43);
        assert_eq!(a.encoded_bits, 328);
        assert_eq!(a.time_us, 20);
    }

    #[test]
    fn test_metrics_record() {
        let mut metrics = Metrics::new();
        metrics.record(&sample(100, 50, 400));
        metrics.record(&sample(100, 50, 400));
        metrics.record_error();

        assert_eq!(metrics.total_operations, 3);
        assert!((metrics.average_ratio() - 2.0).abs() < 1e-9);
        assert!((metrics.error_rate() - 1.0 / 3.0).abs() < 1e-9);
        assert!(metrics.summary().contains("Errors: 1"));

        metrics.reset();
        assert_eq!(metrics.total_operations, 0);
    }
}
