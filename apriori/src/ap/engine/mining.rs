use tracing::info;

use super::state::AprioriEngine;
use crate::ap::counting::{PruningCounter, ScanCounter};
use crate::ap::store::{DbSource, TransactionDb};
use crate::ap::utils::FrequentPatterns;
use crate::ap::writer::write_to_path;
use crate::config::{MinerConfig, Variant, epsilon, validate_min_support};
use crate::error::Result;

/// Mines `db` with an absolute threshold.
pub fn mine_with_epsilon<S: DbSource>(
    db: TransactionDb<S>,
    epsilon: f64,
    variant: Variant,
) -> Result<FrequentPatterns> {
    mine_counted(db, epsilon, None, variant)
}

/// Mines `db` with a relative threshold; epsilon is `min_support` times the
/// declared transaction count.
pub fn mine<S: DbSource>(
    db: TransactionDb<S>,
    min_support: f64,
    variant: Variant,
) -> Result<FrequentPatterns> {
    validate_min_support(min_support)?;
    let count = db.transaction_count()?;
    mine_counted(db, epsilon(min_support, count), Some(count), variant)
}

fn mine_counted<S: DbSource>(
    db: TransactionDb<S>,
    epsilon: f64,
    declared: Option<u64>,
    variant: Variant,
) -> Result<FrequentPatterns> {
    match variant {
        Variant::Classic => {
            let mut counter = ScanCounter::new(db);
            if let Some(count) = declared {
                counter = counter.with_declared_count(count);
            }
            AprioriEngine::new(counter, epsilon).run()
        }
        Variant::Rmtid => {
            let mut counter = PruningCounter::new(db);
            if let Some(count) = declared {
                counter = counter.with_declared_count(count);
            }
            AprioriEngine::new(counter, epsilon).run()
        }
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub transaction_count: u64,
    pub epsilon: f64,
    pub patterns: FrequentPatterns,
}

/// Validates `config`, mines its input and writes the result file. Nothing is
/// written unless mining completed.
pub fn run(config: &MinerConfig) -> Result<RunSummary> {
    config.validate()?;
    let db = TransactionDb::from_path(&config.input);
    let transaction_count = db.transaction_count()?;
    let epsilon = epsilon(config.min_support, transaction_count);
    info!(
        "mining {} ({} transactions) with {} at epsilon {epsilon}",
        config.input.display(),
        transaction_count,
        config.variant
    );

    let patterns = mine_counted(db, epsilon, Some(transaction_count), config.variant)?;
    info!("writing {} frequent patterns to {}", patterns.total(), config.output.display());
    write_to_path(&config.output, &patterns)?;

    Ok(RunSummary {
        transaction_count,
        epsilon,
        patterns,
    })
}
