use std::collections::BTreeMap;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use super::record::{Transaction, parse_record};
use super::scan::ByteRange;
use crate::ap::utils::TransactionId;
use crate::error::{Error, Result};

/// Byte location of every transaction still relevant to the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    entries: BTreeMap<TransactionId, ByteRange>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TransactionId, range: ByteRange) -> Result<()> {
        if let Some(previous) = self.entries.insert(id, range) {
            return Err(Error::format(
                format!("byte {}", previous.start),
                format!("duplicate transaction id {id}"),
            ));
        }
        Ok(())
    }

    pub fn get(&self, id: TransactionId) -> Option<&ByteRange> {
        self.entries.get(&id)
    }

    pub fn remove_all(&mut self, ids: &[TransactionId]) {
        for id in ids {
            self.entries.remove(id);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TransactionId, &ByteRange)> {
        self.entries.iter().map(|(&id, range)| (id, range))
    }
}

/// Re-reads single records by byte range through one open handle.
pub struct PositionalReader<R> {
    reader: R,
    buf: Vec<u8>,
    source: String,
}

impl<R: Read + Seek> PositionalReader<R> {
    pub(crate) fn new(reader: R, source: String) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            source,
        }
    }

    pub fn read_at(&mut self, range: &ByteRange) -> Result<Transaction> {
        let len = range
            .end
            .checked_sub(range.start)
            .ok_or_else(|| Error::format(self.location(range), "inverted byte range"))?;

        self.reader
            .seek(SeekFrom::Start(range.start))
            .map_err(|e| Error::io(self.source.clone(), e))?;
        // bounded by the bytes actually present, never by the requested span
        self.buf.clear();
        let read = (&mut self.reader).take(len).read_to_end(&mut self.buf);
        let read = read.map_err(|e| Error::io(self.location(range), e))?;
        if (read as u64) < len {
            return Err(Error::io(
                self.location(range),
                std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("expected {len} bytes, found {read}"),
                ),
            ));
        }

        let line = std::str::from_utf8(&self.buf)
            .map_err(|_| Error::format(self.location(range), "record is not valid UTF-8"))?;
        parse_record(line).map_err(|msg| Error::format(self.location(range), msg))
    }

    fn location(&self, range: &ByteRange) -> String {
        format!("{} bytes {}..{}", self.source, range.start, range.end)
    }
}
