//! CLI argument definitions for crossmatch

use celestial_crossmatch::{MatchStrategy, NullMetric, SAMPLE_SEED};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crossmatch")]
#[command(about = "Cross-match sky catalogs and estimate the significance of the associations")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-match two catalogs and run the Monte Carlo significance test
    Run(RunArgs),

    /// Write the synthetic demo catalogs as CSV
    Sample(SampleArgs),

    /// Print the angular separation between two positions
    Separation(SeparationArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Primary catalog CSV (columns: name, ra, dec, ...)
    #[arg(long, requires = "secondary", conflicts_with = "sample")]
    pub primary: Option<PathBuf>,

    /// Secondary catalog CSV (columns: name, ra, dec, ...)
    #[arg(long, requires = "primary", conflicts_with = "sample")]
    pub secondary: Option<PathBuf>,

    /// Use the built-in demo catalogs instead of files
    #[arg(long)]
    pub sample: bool,

    /// Seed for the demo catalogs
    #[arg(long, default_value_t = SAMPLE_SEED)]
    pub sample_seed: u64,

    /// TOML analysis configuration; command-line flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search radius in arc-minutes [default: 5]
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Monte Carlo iterations [default: 10000]
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Monte Carlo seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance metric for the null distribution
    #[arg(long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Candidate selection strategy for the cross-match
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Worker threads for the Monte Carlo loop (0 = all cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Histogram bins for the null distribution [default: 50]
    #[arg(long)]
    pub bins: Option<usize>,

    /// Write the match table to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct SampleArgs {
    /// Directory receiving gamma.csv and stars.csv
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Random seed for the generated catalogs
    #[arg(long, default_value_t = SAMPLE_SEED)]
    pub seed: u64,
}

#[derive(Args)]
pub struct SeparationArgs {
    /// First right ascension (degrees)
    #[arg(allow_negative_numbers = true)]
    pub ra1: f64,
    /// First declination (degrees)
    #[arg(allow_negative_numbers = true)]
    pub dec1: f64,
    /// Second right ascension (degrees)
    #[arg(allow_negative_numbers = true)]
    pub ra2: f64,
    /// Second declination (degrees)
    #[arg(allow_negative_numbers = true)]
    pub dec2: f64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Planar,
    Spherical,
}

impl From<MetricArg> for NullMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Planar => NullMetric::Planar,
            MetricArg::Spherical => NullMetric::Spherical,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    BruteForce,
    Zones,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::BruteForce => MatchStrategy::BruteForce,
            StrategyArg::Zones => MatchStrategy::Zones,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}
