use tracing::{debug, info};

use crate::ap::candidates::generate_candidates;
use crate::ap::counting::SupportCount;
use crate::ap::utils::{CandidateTable, FrequentPatterns};
use crate::error::{Error, Result};

/// Position of the level-wise loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningState {
    /// Count single items over the whole database.
    Level1,
    /// Join L_{k-1} into C_k.
    GeneratingCandidates(usize),
    /// Count C_k into L_k.
    Counting(usize),
    Done,
}

/// Level-wise Apriori driver over any [`SupportCount`] strategy.
pub struct AprioriEngine<C> {
    counter: C,
    epsilon: f64,
    state: MiningState,
    levels: FrequentPatterns,
    candidates: CandidateTable,
}

impl<C: SupportCount> AprioriEngine<C> {
    pub fn new(counter: C, epsilon: f64) -> Self {
        Self {
            counter,
            epsilon,
            state: MiningState::Level1,
            levels: FrequentPatterns::new(),
            candidates: CandidateTable::new(0),
        }
    }

    pub fn state(&self) -> MiningState {
        self.state
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Levels recorded so far.
    pub fn patterns(&self) -> &FrequentPatterns {
        &self.levels
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Performs one transition and returns the new state. On error the state
    /// is left unchanged.
    pub fn step(&mut self) -> Result<MiningState> {
        self.state = match self.state {
            MiningState::Level1 => {
                info!("searching for k=1 frequent patterns");
                let level = self.counter.count_first_level(self.epsilon)?;
                info!("found {} frequent pattern(s) at k=1", level.len());
                self.levels.push(level);
                MiningState::GeneratingCandidates(2)
            }
            MiningState::GeneratingCandidates(k) => {
                let previous = self.levels.level(k - 1).ok_or_else(|| {
                    Error::consistency(format!("level {} missing before generating {k}", k - 1))
                })?;
                let candidates = generate_candidates(previous, k)?;
                debug!("generated {} candidate(s) for k={k}", candidates.len());
                if candidates.is_empty() {
                    MiningState::Done
                } else {
                    self.candidates = candidates;
                    MiningState::Counting(k)
                }
            }
            MiningState::Counting(k) => {
                info!("searching for k={k} frequent patterns");
                let level = self.counter.count_level(&self.candidates, self.epsilon)?;
                info!("found {} frequent pattern(s) at k={k}", level.len());
                self.candidates = CandidateTable::new(0);
                if level.is_empty() {
                    MiningState::Done
                } else {
                    self.levels.push(level);
                    MiningState::GeneratingCandidates(k + 1)
                }
            }
            MiningState::Done => MiningState::Done,
        };
        Ok(self.state)
    }

    /// Runs to completion. The first error aborts the run and discards every
    /// level found so far.
    pub fn run(mut self) -> Result<FrequentPatterns> {
        while self.state != MiningState::Done {
            self.step()?;
        }
        Ok(self.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ap::utils::{FrequentLevel, ItemSet, Pattern};

    /// Counter answering from fixed tables, recording what it was asked.
    #[derive(Default)]
    struct ScriptedCounter {
        first: Vec<(i64, u64)>,
        supports: Vec<(Vec<i64>, u64)>,
        fail_at_level: Option<usize>,
        asked: Vec<usize>,
    }

    impl SupportCount for ScriptedCounter {
        fn count_first_level(&mut self, epsilon: f64) -> Result<FrequentLevel> {
            self.asked.push(1);
            let mut level = FrequentLevel::new(1);
            for &(item, count) in &self.first {
                if count as f64 >= epsilon {
                    level.add_itemset_with_support(Pattern::Item(item), count);
                }
            }
            Ok(level)
        }

        fn count_level(&mut self, candidates: &CandidateTable, epsilon: f64) -> Result<FrequentLevel> {
            self.asked.push(candidates.itemset_size);
            if self.fail_at_level == Some(candidates.itemset_size) {
                return Err(Error::format("scripted", "broken record"));
            }
            let mut level = FrequentLevel::new(candidates.itemset_size);
            for itemset in candidates.itemsets() {
                let count = self
                    .supports
                    .iter()
                    .find(|(items, _)| items.as_slice() == itemset.items())
                    .map_or(0, |&(_, count)| count);
                if count as f64 >= epsilon {
                    level.add_itemset_with_support(Pattern::Set(itemset.clone()), count);
                }
            }
            Ok(level)
        }
    }

    #[test]
    fn walks_states_in_order() {
        let counter = ScriptedCounter {
            first: vec![(1, 3), (2, 3), (3, 1)],
            supports: vec![(vec![1, 2], 2)],
            ..Default::default()
        };
        let mut engine = AprioriEngine::new(counter, 2.0);
        assert_eq!(engine.state(), MiningState::Level1);
        assert_eq!(engine.step().unwrap(), MiningState::GeneratingCandidates(2));
        assert_eq!(engine.step().unwrap(), MiningState::Counting(2));
        assert_eq!(engine.step().unwrap(), MiningState::GeneratingCandidates(3));
        // only one frequent 2-set, nothing to join
        assert_eq!(engine.step().unwrap(), MiningState::Done);
        assert_eq!(engine.step().unwrap(), MiningState::Done);

        let patterns = engine.run().unwrap();
        assert_eq!(patterns.levels().len(), 2);
        assert_eq!(patterns.total(), 3);
    }

    #[test]
    fn empty_first_level_is_recorded_then_stops() {
        let counter = ScriptedCounter {
            first: vec![(1, 1)],
            ..Default::default()
        };
        let patterns = AprioriEngine::new(counter, 5.0).run().unwrap();
        assert_eq!(patterns.levels().len(), 1);
        assert!(patterns.levels()[0].is_empty());
        assert_eq!(patterns.total(), 0);
    }

    #[test]
    fn level_with_no_frequent_candidate_is_discarded() {
        let counter = ScriptedCounter {
            first: vec![(1, 2), (2, 2)],
            supports: vec![(vec![1, 2], 1)],
            ..Default::default()
        };
        let mut engine = AprioriEngine::new(counter, 2.0);
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.step().unwrap(), MiningState::Done);
        assert_eq!(engine.counter().asked, vec![1, 2]);
        assert_eq!(engine.patterns().levels().len(), 1);
    }

    #[test]
    fn counting_error_aborts_run() {
        let counter = ScriptedCounter {
            first: vec![(1, 2), (2, 2)],
            fail_at_level: Some(2),
            ..Default::default()
        };
        let mut engine = AprioriEngine::new(counter, 1.0);
        engine.step().unwrap();
        engine.step().unwrap();
        assert!(engine.step().unwrap_err().is_format());
        assert_eq!(engine.state(), MiningState::Counting(2));

        let counter = ScriptedCounter {
            first: vec![(1, 2), (2, 2)],
            fail_at_level: Some(2),
            ..Default::default()
        };
        assert!(AprioriEngine::new(counter, 1.0).run().is_err());
    }

    #[test]
    fn grows_until_candidates_run_out() {
        let counter = ScriptedCounter {
            first: vec![(1, 4), (2, 4), (3, 4)],
            supports: vec![
                (vec![1, 2], 3),
                (vec![1, 3], 3),
                (vec![2, 3], 3),
                (vec![1, 2, 3], 2),
            ],
            ..Default::default()
        };
        let patterns = AprioriEngine::new(counter, 2.0).run().unwrap();
        assert_eq!(patterns.max_level(), 3);
        let top = patterns.level(3).unwrap();
        assert_eq!(top.support(&Pattern::Set(ItemSet::new(vec![1, 2, 3]))), Some(2));
    }
}
