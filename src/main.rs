//! Command-line driver for the SpMV benchmarks

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use spmv_bench::bench::{
    export_sweep_csv, print_summary, run_all, run_file, run_size_sweep, run_sparsity_sweep,
    SweepReport,
};
use spmv_bench::{
    write_coordinate_file, BenchConfig, BenchProfile, BenchmarkHarness, MatrixGenerator,
};

#[derive(Parser)]
#[command(name = "spmv-bench", version)]
#[command(about = "Dense vs compressed-row matrix-vector multiplication benchmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: GlobalOptions,
}

#[derive(Args)]
struct GlobalOptions {
    /// Timed runs per strategy
    #[arg(long, global = true)]
    iterations: Option<usize>,

    /// Untimed runs before measuring
    #[arg(long, global = true)]
    warmup: Option<usize>,

    /// Threads for the parallel kernel (default: all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Seed for synthetic matrices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Directory receiving the CSV reports
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Experiment size: quick or full (default: $SPMV_PROFILE, else full)
    #[arg(long, global = true)]
    profile: Option<BenchProfile>,

    /// Fail instead of skipping when the matrix file cannot be loaded
    #[arg(long, global = true)]
    require_file: bool,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both sweeps and the file experiment
    All {
        /// Coordinate file for the file experiment
        #[arg(long)]
        matrix: Option<PathBuf>,
    },

    /// Sweep sparsity at a fixed matrix size
    Sparsity,

    /// Sweep matrix size at a fixed sparsity
    Size,

    /// Time the sparse kernels on a coordinate file
    File {
        /// Path to the coordinate file
        path: PathBuf,
    },

    /// Write a random square matrix as a coordinate file
    Generate {
        /// Output path
        path: PathBuf,

        /// Matrix dimension
        #[arg(long, default_value_t = 1000)]
        size: usize,

        /// Fraction of entries left empty
        #[arg(long, default_value_t = 0.9)]
        sparsity: f64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "spmv_bench=debug" } else { "spmv_bench=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_config(options: &GlobalOptions) -> BenchConfig {
    let profile = options.profile.unwrap_or_else(BenchProfile::from_env);
    let mut config = BenchConfig::for_profile(profile);

    if let Some(n) = options.iterations {
        config.iterations = n;
    }
    if let Some(n) = options.warmup {
        config.warmup_iterations = n;
    }
    if let Some(n) = options.threads {
        config.system_params.n_threads = n;
    }
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    if let Some(dir) = &options.output_dir {
        config.output_dir = dir.clone();
    }
    config.require_matrix_file = options.require_file;

    config
}

fn print_sweep(sweep: &SweepReport) {
    for point in &sweep.points {
        let title = format!("{} {}", sweep.kind.key_column(), point.key);
        print_summary(&title, &point.result);
    }
}

fn make_harness(config: &BenchConfig) -> Result<BenchmarkHarness> {
    let harness = BenchmarkHarness::new(config).context("invalid benchmark configuration")?;
    info!(threads = harness.threads(), "harness ready");
    Ok(harness)
}

fn finish_sweep(config: &BenchConfig, sweep: &SweepReport) -> Result<()> {
    print_sweep(sweep);
    let path = export_sweep_csv(&config.output_dir, sweep).context("failed to export sweep results")?;
    println!("results: {}", path.display());
    anyhow::ensure!(
        sweep.failed_cross_checks() == 0,
        "{} configuration(s) failed the cross-check",
        sweep.failed_cross_checks()
    );
    Ok(())
}

fn generate(config: &BenchConfig, path: &Path, size: usize, sparsity: f64) -> Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&sparsity),
        "sparsity {} outside [0, 1]",
        sparsity
    );
    let sparse = MatrixGenerator::new(config.seed).generate_sparse(size, size, sparsity);
    write_coordinate_file(path, &sparse).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), nnz = sparse.nnz(), "wrote coordinate file");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.options.verbose);

    let mut config = build_config(&cli.options);

    match cli.command.unwrap_or(Commands::All { matrix: None }) {
        Commands::All { matrix } => {
            if let Some(path) = matrix {
                config.matrix_file = Some(path);
            }
            let harness = make_harness(&config)?;
            let summary = run_all(&config, &harness).context("benchmark run failed")?;

            print_sweep(&summary.sparsity);
            print_sweep(&summary.size);
            if let Some(file) = &summary.file {
                print_summary(&file.path.display().to_string(), &file.result);
            }
            println!("sparsity results: {}", summary.sparsity_csv.display());
            println!("size results: {}", summary.size_csv.display());
            anyhow::ensure!(
                summary.failed_cross_checks() == 0,
                "{} configuration(s) failed the cross-check",
                summary.failed_cross_checks()
            );
        }
        Commands::Sparsity => {
            let harness = make_harness(&config)?;
            finish_sweep(&config, &run_sparsity_sweep(&config, &harness))?;
        }
        Commands::Size => {
            let harness = make_harness(&config)?;
            finish_sweep(&config, &run_size_sweep(&config, &harness))?;
        }
        Commands::File { path } => {
            let harness = make_harness(&config)?;
            let report = run_file(&harness, &path)
                .with_context(|| format!("failed to benchmark {}", path.display()))?;
            print_summary(&path.display().to_string(), &report.result);
            if report.dropped > 0 {
                println!("  dropped {} out-of-range entries", report.dropped);
            }
            anyhow::ensure!(report.result.cross_check.passed, "cross-check failed");
        }
        Commands::Generate {
            path,
            size,
            sparsity,
        } => generate(&config, &path, size, sparsity)?,
    }

    Ok(())
}
