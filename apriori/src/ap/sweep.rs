//! Parallel batches of independent mining runs over one database, used to
//! compare thresholds and variants.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use super::engine::mine;
use super::store::TransactionDb;
use super::writer::write_to_path;
use crate::config::Variant;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepJob {
    pub min_support: f64,
    pub variant: Variant,
}

#[derive(Debug, Clone)]
pub struct SweepRecord {
    pub job: SweepJob,
    pub patterns: usize,
    pub max_level: usize,
    pub elapsed: Duration,
}

/// `steps` evenly spaced thresholds from `start` (inclusive) to `stop`
/// (exclusive).
pub fn thresholds(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    if steps == 0 {
        return Vec::new();
    }
    let step = (stop - start) / steps as f64;
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Every threshold crossed with every variant.
pub fn jobs(thresholds: &[f64], variants: &[Variant]) -> Vec<SweepJob> {
    thresholds
        .iter()
        .flat_map(|&min_support| {
            variants.iter().map(move |&variant| SweepJob {
                min_support,
                variant,
            })
        })
        .collect()
}

/// Name of the result file a job writes under `out_dir`.
pub fn output_path(out_dir: &Path, input: &Path, job: &SweepJob) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "db".to_string(), |s| s.to_string_lossy().into_owned());
    out_dir.join(format!(
        "FPs_{}_{}_{}.txt",
        job.variant.name(),
        stem,
        job.min_support
    ))
}

/// Runs every job on its own engine in parallel. Results come back in job
/// order; a failing job does not affect the others.
pub fn run_sweep(
    input: &Path,
    jobs: &[SweepJob],
    out_dir: Option<&Path>,
) -> Vec<Result<SweepRecord>> {
    jobs.par_iter()
        .map(|job| {
            let start = Instant::now();
            let patterns = mine(TransactionDb::from_path(input), job.min_support, job.variant)?;
            let elapsed = start.elapsed();
            if let Some(dir) = out_dir {
                write_to_path(&output_path(dir, input, job), &patterns)?;
            }
            debug!(
                "{} at {}: {} patterns in {:?}",
                job.variant,
                job.min_support,
                patterns.total(),
                elapsed
            );
            Ok(SweepRecord {
                job: *job,
                patterns: patterns.total(),
                max_level: patterns.max_level(),
                elapsed,
            })
        })
        .collect()
}
