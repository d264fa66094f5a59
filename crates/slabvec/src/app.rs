//! Application entry point and scenario dispatch.

use anyhow::Result;
use console::style;
use serde::Serialize;

use slabvec_core::{BoundedSeq, PoolRegistry, PoolStats, SeqPool, SlotClass};

use crate::config::{AppConfig, Scenario};
use crate::errors::AppError;
use crate::worker::Worker;

/// Element capacity of the pipeline scenario's sequences.
const PIPELINE_CAP: usize = 1000;
/// Element capacity of the primes scenario's sequences.
const PRIME_CAP: usize = 4096;

/// Counter snapshot of one pool, for the report.
#[derive(Debug, Serialize)]
pub struct PoolReport {
    /// The pool's size class.
    pub class: SlotClass,
    /// Its counters at scenario end.
    pub stats: PoolStats,
}

/// Everything one scenario produced.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub scenario: String,
    /// Human-readable result lines.
    pub lines: Vec<String>,
    /// Per-pool counters.
    pub pools: Vec<PoolReport>,
}

fn pool_reports(registry: &PoolRegistry) -> Vec<PoolReport> {
    registry
        .stats()
        .into_iter()
        .map(|(class, stats)| PoolReport { class, stats })
        .collect()
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    if config.limit < 2 || config.limit as usize > PRIME_CAP {
        return Err(AppError::Config(format!(
            "limit must be in 2..={PRIME_CAP}, got {}",
            config.limit
        ))
        .into());
    }

    let reports = match config.scenario {
        Scenario::Pipeline => vec![run_pipeline(config)],
        Scenario::Primes => vec![run_primes(config)],
        Scenario::Crossthread => vec![run_crossthread(config)?],
        Scenario::All => vec![
            run_pipeline(config),
            run_primes(config),
            run_crossthread(config)?,
        ],
    };

    let text = render(&reports, config)?;
    print!("{text}");

    if let Some(ref path) = config.output {
        std::fs::write(path, &text)?;
    }

    Ok(())
}

fn render(reports: &[ScenarioReport], config: &AppConfig) -> Result<String> {
    if config.json {
        let mut text = serde_json::to_string_pretty(reports)?;
        text.push('\n');
        return Ok(text);
    }

    let mut text = String::new();
    for report in reports {
        if !config.quiet {
            text.push_str(&format!("{}\n", style(format!("== {} ==", report.scenario)).bold()));
        }
        for line in &report.lines {
            text.push_str(line);
            text.push('\n');
        }
        if config.verbose {
            for pool in &report.pools {
                text.push_str(&format!(
                    "pool {}x{}B/{}: hits={} misses={} prewarmed={} foreign={}\n",
                    pool.class.capacity(),
                    pool.class.elem_size(),
                    pool.class.elem_align(),
                    pool.stats.hits,
                    pool.stats.misses,
                    pool.stats.prewarmed,
                    pool.stats.foreign_returns,
                ));
            }
        }
    }
    Ok(text)
}

/// Iterate, map, filter, fold — the whole pipeline cycles a few pooled
/// slots instead of allocating per stage.
fn run_pipeline(config: &AppConfig) -> ScenarioReport {
    let mut registry = PoolRegistry::new();
    let ints = SeqPool::<i64, PIPELINE_CAP>::new(&mut registry);
    if config.prewarm > 0 {
        ints.prewarm(config.prewarm);
    }

    let sum = BoundedSeq::iterate(&ints, PIPELINE_CAP, 1, |p| p + 1)
        .map(&ints, |x| x * 5)
        .filter(|x| x % 2 != 0 && x % 3 != 0)
        .into_iter()
        .fold(1i64, |acc, x| acc + x);

    ScenarioReport {
        scenario: "pipeline".into(),
        lines: vec![format!("pipeline sum: {sum}")],
        pools: pool_reports(&registry),
    }
}

/// Sieve of Eratosthenes: descending candidates, repeatedly filtered by the
/// smallest remaining head until the head passes sqrt(limit).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn sieve(pool: &SeqPool<u64, PRIME_CAP>, limit: u64) -> BoundedSeq<u64, PRIME_CAP> {
    let end = (limit as f64).sqrt() as u64 + 1;
    let mut candidates = BoundedSeq::iterate(pool, (limit - 1) as usize, limit, |p| p - 1);
    let mut primes = BoundedSeq::new(pool);
    loop {
        let head = candidates[candidates.len() - 1];
        if head >= end {
            return candidates.concat(primes.reverse()).reverse();
        }
        let len = candidates.len();
        candidates = candidates.take(len - 1).filter(|x| x % head != 0);
        primes = primes.append(head);
    }
}

fn run_primes(config: &AppConfig) -> ScenarioReport {
    let mut registry = PoolRegistry::new();
    let pool = SeqPool::<u64, PRIME_CAP>::new(&mut registry);
    if config.prewarm > 0 {
        pool.prewarm(config.prewarm);
    }

    let primes = sieve(&pool, config.limit);
    let lines = vec![
        format!("primes up to {}: {primes}", config.limit),
        format!("count: {}", primes.len()),
    ];
    drop(primes);

    ScenarioReport {
        scenario: "primes".into(),
        lines,
        pools: pool_reports(&registry),
    }
}

/// Build a sequence here, consume and destroy it on a worker thread, and
/// show the slot coming home through the pool's incoming list.
fn run_crossthread(config: &AppConfig) -> Result<ScenarioReport> {
    let mut registry = PoolRegistry::new();
    let ints = SeqPool::<i64, 100>::new(&mut registry);
    if config.prewarm > 0 {
        ints.prewarm(config.prewarm);
    }

    let worker = Worker::spawn("slabvec-worker").map_err(AppError::from)?;

    let seq = BoundedSeq::iterate(&ints, 5, 2, |p| p + 2);
    let mut lines = vec![format!("built {seq} on the main thread")];

    let sum: i64 = worker
        .run(move || seq.into_iter().sum())
        .map_err(AppError::from)?;
    lines.push(format!("worker-side sum: {sum}"));

    let stats = ints.stats();
    lines.push(format!(
        "foreign returns: {} (pooled: {})",
        stats.foreign_returns,
        ints.pooled()
    ));

    // The next acquisition on this thread drains the incoming list.
    let drained = BoundedSeq::<i64, 100>::new(&ints);
    lines.push(format!(
        "reacquired after drain: hits={} misses={}",
        ints.stats().hits,
        ints.stats().misses
    ));
    drop(drained);

    Ok(ScenarioReport {
        scenario: "crossthread".into(),
        lines,
        pools: pool_reports(&registry),
    })
}
