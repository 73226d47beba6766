pub mod mining;
pub mod state;

pub use mining::{RunSummary, mine, mine_with_epsilon, run};
pub use state::{AprioriEngine, MiningState};
