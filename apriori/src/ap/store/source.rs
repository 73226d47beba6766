use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Something a transaction database can be (re)opened from. Every call to
/// `open` yields a fresh reader positioned at the start.
pub trait DbSource {
    type Reader: BufRead + Seek;

    fn open(&self) -> Result<Self::Reader>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DbSource for FileSource {
    type Reader = BufReader<File>;

    fn open(&self) -> Result<Self::Reader> {
        let file = File::open(&self.path).map_err(|e| Error::io(self.describe(), e))?;
        Ok(BufReader::new(file))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Database held in memory, shared cheaply between readers.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl From<&str> for MemorySource {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl From<String> for MemorySource {
    fn from(text: String) -> Self {
        Self::new(text.into_bytes())
    }
}

impl DbSource for MemorySource {
    type Reader = Cursor<Arc<[u8]>>;

    fn open(&self) -> Result<Self::Reader> {
        Ok(Cursor::new(Arc::clone(&self.bytes)))
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}
