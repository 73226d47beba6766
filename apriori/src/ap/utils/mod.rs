pub mod storage;

pub use storage::{
    CandidateTable, FrequentLevel, FrequentPatterns, ItemId, ItemSet, Pattern, TransactionId,
    meets_threshold,
};
