//! Benchmark harness, experiments and reporting

pub mod clock;
pub mod config;
pub mod experiments;
pub mod harness;
pub mod memory;
pub mod report;
pub mod stats;

pub use clock::{Clock, MonotonicClock};
pub use config::{BenchConfig, BenchProfile, SystemParameters};
pub use experiments::{
    run_all, run_file, run_size_sweep, run_sparsity_sweep, FileReport, RunSummary, SweepKind,
    SweepPoint, SweepReport,
};
pub use harness::{BenchmarkHarness, ConfigurationResult, CrossCheck, Measurement, Workload};
pub use memory::{MemoryProbe, NullProbe, ProcStatusProbe};
pub use report::{export_sweep_csv, format_summary, print_summary, write_sweep_csv};
pub use stats::TimingStats;
