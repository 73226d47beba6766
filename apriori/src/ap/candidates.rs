use itertools::Itertools;

use super::utils::{CandidateTable, FrequentLevel, ItemSet, Pattern};
use crate::error::{Error, Result};

/// Joins every unordered pair of frequent (k-1)-patterns and keeps the unions
/// of exactly `k` items, i.e. pairs sharing k-2 items. No subset pruning is
/// applied.
pub fn generate_candidates(previous: &FrequentLevel, k: usize) -> Result<CandidateTable> {
    let mut candidates = CandidateTable::new(k);

    for (left, right) in previous.patterns().tuple_combinations() {
        match (left, right) {
            (Pattern::Item(a), Pattern::Item(b)) => {
                candidates.insert(ItemSet::pair(*a, *b));
            }
            (Pattern::Set(a), Pattern::Set(b)) => {
                let union = a.union(b);
                if union.len() == k {
                    candidates.insert(union);
                }
            }
            _ => {
                return Err(Error::consistency(format!(
                    "cannot join {left:?} with {right:?} while generating level {k}"
                )));
            }
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ap::utils::ItemId;

    fn items(ids: &[ItemId]) -> FrequentLevel {
        let mut level = FrequentLevel::new(1);
        for &id in ids {
            level.add_itemset_with_support(Pattern::Item(id), 1);
        }
        level
    }

    fn sets(size: usize, sets: &[&[ItemId]]) -> FrequentLevel {
        let mut level = FrequentLevel::new(size);
        for set in sets {
            level.add_itemset_with_support(Pattern::Set(ItemSet::new(set.to_vec())), 1);
        }
        level
    }

    #[test]
    fn pairs_every_frequent_item() {
        let candidates = generate_candidates(&items(&[3, 1, 2]), 2).unwrap();
        let got: Vec<_> = candidates.itemsets().map(|s| s.items().to_vec()).collect();
        assert_eq!(got, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
        assert!(candidates.itemsets().all(|s| candidates.count(s) == Some(0)));
    }

    #[test]
    fn single_item_yields_no_candidates() {
        assert!(generate_candidates(&items(&[1]), 2).unwrap().is_empty());
        assert!(generate_candidates(&items(&[]), 2).unwrap().is_empty());
    }

    #[test]
    fn joins_sets_sharing_k_minus_2_items() {
        let previous = sets(2, &[&[1, 2], &[1, 3], &[2, 3], &[4, 5]]);
        let candidates = generate_candidates(&previous, 3).unwrap();
        let got: Vec<_> = candidates.itemsets().map(|s| s.items().to_vec()).collect();
        // {1,2,3} is reached by three different pairs but stored once
        assert_eq!(got, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn no_subset_pruning_is_applied() {
        // {2,3} is not frequent, {1,2,3} is still generated from {1,2} and {1,3}
        let previous = sets(2, &[&[1, 2], &[1, 3]]);
        let candidates = generate_candidates(&previous, 3).unwrap();
        assert!(candidates.contains(&ItemSet::new(vec![1, 2, 3])));
    }

    #[test]
    fn mixed_pattern_kinds_are_a_consistency_error() {
        let mut level = FrequentLevel::new(1);
        level.add_itemset_with_support(Pattern::Item(1), 1);
        level.add_itemset_with_support(Pattern::Set(ItemSet::new(vec![2])), 1);
        let err = generate_candidates(&level, 2).unwrap_err();
        assert!(matches!(err, Error::Consistency { .. }));
    }
}
