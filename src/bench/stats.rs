//! Timing aggregation and throughput

use std::time::Duration;

/// Min/mean/max over the measured runs of one strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingStats {
    pub samples: usize,
    pub min: Duration,
    pub mean: Duration,
    pub max: Duration,
}

impl TimingStats {
    /// Aggregates samples, `None` when there are none
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let min = *samples.iter().min()?;
        let max = *samples.iter().max()?;
        let total: Duration = samples.iter().sum();

        Some(Self {
            samples: samples.len(),
            min,
            mean: total / samples.len() as u32,
            max,
        })
    }

    /// Throughput in GFLOP/s at the mean time, 0 if the mean is zero
    pub fn gflops(&self, flops: u64) -> f64 {
        let secs = self.mean.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        flops as f64 / secs / 1e9
    }
}

/// Floating-point operations in a dense matrix × vector product
pub fn dense_flops(n_rows: usize, n_cols: usize) -> u64 {
    2 * n_rows as u64 * n_cols as u64
}

/// Floating-point operations in a CSR matrix × vector product
pub fn sparse_flops(nnz: usize) -> u64 {
    2 * nnz as u64
}
