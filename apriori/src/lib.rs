pub mod ap;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(feature = "python")]
mod python;

pub use ap::{FrequentLevel, FrequentPatterns, ItemSet, Pattern, TransactionDb, mine};
pub use config::{MinerConfig, Variant};
pub use error::{Error, Result};
