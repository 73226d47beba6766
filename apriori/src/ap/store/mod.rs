//! Transaction database access.
//!
//! Layout: the first line holds the declared number of transactions, each
//! following line is `<id>\t<item count>\t<item> <item> ...`.

pub mod index;
pub mod record;
pub mod scan;
pub mod source;

use std::io::BufRead;
use std::path::PathBuf;

pub use index::{PositionIndex, PositionalReader};
pub use record::{FIELD_DELIMITER, ITEM_DELIMITER, Transaction};
pub use scan::{ByteRange, IndexedScan, TransactionScan};
pub use source::{DbSource, FileSource, MemorySource};

use crate::error::{Error, Result};
use record::parse_count_line;

#[derive(Debug, Clone)]
pub struct TransactionDb<S> {
    source: S,
}

impl TransactionDb<FileSource> {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path))
    }
}

impl TransactionDb<MemorySource> {
    pub fn in_memory(text: impl Into<String>) -> Self {
        Self::new(MemorySource::from(text.into()))
    }

    /// Serializes `transactions` with a matching count line.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut text = format!("{}\n", transactions.len());
        for transaction in transactions {
            text.push_str(&transaction.to_line());
            text.push('\n');
        }
        Self::in_memory(text)
    }
}

impl<S: DbSource> TransactionDb<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Declared number of transactions from the leading count line.
    pub fn transaction_count(&self) -> Result<u64> {
        let mut reader = self.source.open()?;
        let mut buf = Vec::new();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io(self.describe(), e))?;
        let location = format!("{} line 1", self.describe());
        if n == 0 {
            return Err(Error::format(location, "missing transaction count"));
        }
        let line = std::str::from_utf8(&buf)
            .map_err(|_| Error::format(location.clone(), "count line is not valid UTF-8"))?;
        parse_count_line(line).map_err(|msg| Error::format(location, msg))
    }

    /// Fresh pass over every record; call again to rescan from the start.
    pub fn scan(&self) -> Result<TransactionScan<S::Reader>> {
        TransactionScan::after_header(self.source.open()?, self.describe())
    }

    /// Like [`Self::scan`], also yielding the byte span of every record.
    pub fn scan_with_index(&self) -> Result<IndexedScan<S::Reader>> {
        self.scan().map(IndexedScan)
    }

    /// Opens the source, reads exactly `range` and parses it as one record.
    pub fn read_at(&self, range: &ByteRange) -> Result<Transaction> {
        self.positional_reader()?.read_at(range)
    }

    /// Handle for many targeted reads within one pass.
    pub fn positional_reader(&self) -> Result<PositionalReader<S::Reader>> {
        Ok(PositionalReader::new(self.source.open()?, self.describe()))
    }
}
