pub mod candidates;
pub mod counting;
pub mod engine;
pub mod store;
pub mod sweep;
pub mod utils;
pub mod writer;


pub use candidates::generate_candidates;
pub use counting::{PruningCounter, ScanCounter, SupportCount};
pub use engine::{AprioriEngine, MiningState, RunSummary, mine, mine_with_epsilon, run};
pub use store::{ByteRange, PositionIndex, Transaction, TransactionDb};
pub use utils::{CandidateTable, FrequentLevel, FrequentPatterns, ItemId, ItemSet, Pattern};
pub use writer::{write_patterns, write_to_path};
