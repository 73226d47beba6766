use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::store::{DbSource, PositionIndex, Transaction, TransactionDb};
use super::utils::{CandidateTable, FrequentLevel, ItemId, Pattern, TransactionId, meets_threshold};
use crate::error::{Error, Result};

/// Support counting strategy driven level by level by the engine.
pub trait SupportCount {
    /// Counts every item over the whole database and keeps those reaching `epsilon`.
    fn count_first_level(&mut self, epsilon: f64) -> Result<FrequentLevel>;

    /// Counts how many transactions contain each candidate and keeps those
    /// reaching `epsilon`.
    fn count_level(&mut self, candidates: &CandidateTable, epsilon: f64) -> Result<FrequentLevel>;
}

/// Accumulates per-item occurrences over `transactions`.
pub fn count_items<I>(transactions: I, epsilon: f64) -> Result<FrequentLevel>
where
    I: IntoIterator<Item = Result<Transaction>>,
{
    let mut item_counts: HashMap<ItemId, u64> = HashMap::new();
    for transaction in transactions {
        for &item in transaction?.items.items() {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    let mut level = FrequentLevel::new(1);
    for (item, count) in item_counts {
        if meets_threshold(count, epsilon) {
            level.add_itemset_with_support(Pattern::Item(item), count);
        }
    }
    Ok(level)
}

/// Adds one to every candidate contained in `transaction`; returns whether
/// any candidate matched.
pub fn count_transaction(candidates: &mut CandidateTable, transaction: &Transaction) -> bool {
    let mut matched = false;
    for (itemset, count) in candidates.counters_mut() {
        if itemset.is_subset_of(&transaction.items) {
            *count += 1;
            matched = true;
        }
    }
    matched
}

fn check_declared_count(db_name: &str, declared: Option<u64>, scanned: u64) {
    if let Some(declared) = declared {
        if declared != scanned {
            warn!(
                "{db_name}: count line declares {declared} transactions, scanned {scanned}"
            );
        }
    }
}

/// Classic Apriori: every level rescans the whole database.
pub struct ScanCounter<S> {
    db: TransactionDb<S>,
    declared_count: Option<u64>,
}

impl<S: DbSource> ScanCounter<S> {
    pub fn new(db: TransactionDb<S>) -> Self {
        Self {
            db,
            declared_count: None,
        }
    }

    /// Enables a warning when the scanned record count differs from `count`.
    pub fn with_declared_count(mut self, count: u64) -> Self {
        self.declared_count = Some(count);
        self
    }
}

impl<S: DbSource> SupportCount for ScanCounter<S> {
    fn count_first_level(&mut self, epsilon: f64) -> Result<FrequentLevel> {
        let mut seen: HashSet<TransactionId> = HashSet::new();
        let mut scan = self.db.scan_with_index()?;
        let transactions = scan.by_ref().map(|located| -> Result<Transaction> {
            let (range, transaction) = located?;
            if !seen.insert(transaction.id) {
                return Err(Error::format(
                    format!("byte {}", range.start),
                    format!("duplicate transaction id {}", transaction.id),
                ));
            }
            Ok(transaction)
        });
        let level = count_items(transactions, epsilon)?;
        check_declared_count(&self.db.describe(), self.declared_count, scan.records_read());
        Ok(level)
    }

    fn count_level(&mut self, candidates: &CandidateTable, epsilon: f64) -> Result<FrequentLevel> {
        let mut table = candidates.clone();
        for transaction in self.db.scan()? {
            count_transaction(&mut table, &transaction?);
        }
        Ok(table.into_frequent(epsilon))
    }
}

/// RmTID variant: the first pass records each transaction's byte range, later
/// passes re-read only transactions that matched some candidate on the
/// previous level. A transaction containing no k-candidate cannot contain any
/// (k+1)-candidate, since those are unions of frequent k-sets.
pub struct PruningCounter<S> {
    db: TransactionDb<S>,
    declared_count: Option<u64>,
    live: PositionIndex,
}

impl<S: DbSource> PruningCounter<S> {
    pub fn new(db: TransactionDb<S>) -> Self {
        Self {
            db,
            declared_count: None,
            live: PositionIndex::new(),
        }
    }

    pub fn with_declared_count(mut self, count: u64) -> Self {
        self.declared_count = Some(count);
        self
    }

    /// Transactions still visited by the next counting pass.
    pub fn live_transactions(&self) -> &PositionIndex {
        &self.live
    }
}

impl<S: DbSource> SupportCount for PruningCounter<S> {
    fn count_first_level(&mut self, epsilon: f64) -> Result<FrequentLevel> {
        let mut live = PositionIndex::new();
        let mut scan = self.db.scan_with_index()?;
        let transactions = scan.by_ref().map(|located| -> Result<Transaction> {
            let (range, transaction) = located?;
            live.insert(transaction.id, range)?;
            Ok(transaction)
        });
        let level = count_items(transactions, epsilon)?;
        check_declared_count(&self.db.describe(), self.declared_count, scan.records_read());

        self.live = live;
        debug!("indexed {} transactions", self.live.len());
        Ok(level)
    }

    fn count_level(&mut self, candidates: &CandidateTable, epsilon: f64) -> Result<FrequentLevel> {
        let mut table = candidates.clone();
        let mut reader = self.db.positional_reader()?;
        let mut exhausted: Vec<TransactionId> = Vec::new();

        for (id, range) in self.live.iter() {
            let transaction = reader.read_at(range)?;
            if transaction.id != id {
                return Err(Error::format(
                    format!("{} bytes {}..{}", self.db.describe(), range.start, range.end),
                    format!("expected transaction {id}, found {}", transaction.id),
                ));
            }
            if !count_transaction(&mut table, &transaction) {
                exhausted.push(id);
            }
        }

        self.live.remove_all(&exhausted);
        debug!(
            "pruned {} exhausted transactions, {} remain",
            exhausted.len(),
            self.live.len()
        );
        Ok(table.into_frequent(epsilon))
    }
}
