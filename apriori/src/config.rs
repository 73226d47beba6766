use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_OUT_FILE: &str = "MiningResults.txt";
pub const DEFAULT_MIN_SUPPORT: f64 = 0.5;

/// Which counting strategy drives the level-wise loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Variant {
    /// Rescan the whole database on every level.
    #[default]
    Classic,
    /// Index transactions by byte range and drop those that stop matching.
    Rmtid,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Classic, Variant::Rmtid];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Classic => "apriori",
            Variant::Rmtid => "rmtid_apriori",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings of one mining run.
#[derive(Debug, Clone, PartialEq)]
pub struct MinerConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Relative threshold in [0, 1].
    pub min_support: f64,
    pub variant: Variant,
}

impl MinerConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUT_FILE),
            min_support: DEFAULT_MIN_SUPPORT,
            variant: Variant::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_min_support(self.min_support)
    }
}

pub fn validate_min_support(min_support: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&min_support) {
        return Err(Error::validation(
            "min_supp",
            format!("{min_support} is outside [0, 1]"),
        ));
    }
    Ok(())
}

/// Absolute support threshold; not rounded.
pub fn epsilon(min_support: f64, transaction_count: u64) -> f64 {
    min_support * transaction_count as f64
}
