//! Application configuration from CLI flags and environment.

use clap::{Parser, ValueEnum};

/// Which demonstration to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Iterate, map, filter, fold — one pooled pipeline.
    Pipeline,
    /// Sieve of Eratosthenes built from combinators.
    Primes,
    /// Build sequences here, destroy them on a worker thread.
    Crossthread,
    /// Every scenario in order.
    All,
}

/// SlabVec — pooled fixed-capacity sequence demonstrator.
#[derive(Parser, Debug)]
#[command(name = "slabvec", version, about)]
pub struct AppConfig {
    /// Scenario to run.
    #[arg(long, value_enum, default_value = "all", env = "SLABVEC_SCENARIO")]
    pub scenario: Scenario,

    /// Upper bound for the primes scenario (inclusive).
    #[arg(short = 'n', long, default_value = "100")]
    pub limit: u64,

    /// Slots to pre-allocate per pool before running.
    #[arg(long, default_value = "0")]
    pub prewarm: usize,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (result lines only, no headers).
    #[arg(short, long)]
    pub quiet: bool,

    /// Also print per-pool counter snapshots.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the report to a file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
