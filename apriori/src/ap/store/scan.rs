use std::io::BufRead;
use std::ops::Range;

use super::record::{Transaction, parse_record};
use crate::error::{Error, Result};

/// Byte span of one record line in the database, trailing newline included.
pub type ByteRange = Range<u64>;

/// Forward-only pass over the records of a database, header already consumed.
/// Stops after the first error.
pub struct TransactionScan<R> {
    reader: R,
    buf: Vec<u8>,
    offset: u64,
    line_no: usize,
    records: u64,
    failed: bool,
    source: String,
}

impl<R: BufRead> TransactionScan<R> {
    /// Consumes the leading count line of `reader`.
    pub(crate) fn after_header(mut reader: R, source: String) -> Result<Self> {
        let mut buf = Vec::new();
        let header_len = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io(source.clone(), e))?;
        Ok(Self {
            reader,
            buf,
            offset: header_len as u64,
            line_no: 1,
            records: 0,
            failed: false,
            source,
        })
    }

    /// Number of records successfully parsed so far.
    pub fn records_read(&self) -> u64 {
        self.records
    }

    pub fn next_located(&mut self) -> Option<Result<(ByteRange, Transaction)>> {
        if self.failed {
            return None;
        }
        let result = self.read_next().transpose();
        if matches!(result, Some(Err(_))) {
            self.failed = true;
        }
        result
    }

    fn read_next(&mut self) -> Result<Option<(ByteRange, Transaction)>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| Error::io(self.source.clone(), e))?;
        if n == 0 {
            return Ok(None);
        }

        let start = self.offset;
        self.offset += n as u64;
        self.line_no += 1;

        let location = || format!("{} line {}", self.source, self.line_no);
        let line = std::str::from_utf8(&self.buf)
            .map_err(|_| Error::format(location(), "record is not valid UTF-8"))?;
        let transaction = parse_record(line).map_err(|msg| Error::format(location(), msg))?;

        self.records += 1;
        Ok(Some((start..self.offset, transaction)))
    }
}

impl<R: BufRead> Iterator for TransactionScan<R> {
    type Item = Result<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_located()
            .map(|result| result.map(|(_, transaction)| transaction))
    }
}

/// Same pass as [`TransactionScan`], also yielding each record's byte span.
pub struct IndexedScan<R>(pub(crate) TransactionScan<R>);

impl<R: BufRead> IndexedScan<R> {
    pub fn records_read(&self) -> u64 {
        self.0.records_read()
    }
}

impl<R: BufRead> Iterator for IndexedScan<R> {
    type Item = Result<(ByteRange, Transaction)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_located()
    }
}
