use std::collections::BTreeMap;
use std::fmt;

pub type ItemId = i64;
pub type TransactionId = i64;

/// Immutable set of item identifiers kept in ascending order without duplicates,
/// so structural equality, hashing and ordering are set semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemSet(Box<[ItemId]>);

impl ItemSet {
    pub fn new(mut items: Vec<ItemId>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items.into_boxed_slice())
    }

    pub fn pair(a: ItemId, b: ItemId) -> Self {
        Self::new(vec![a, b])
    }

    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    pub fn union(&self, other: &ItemSet) -> ItemSet {
        let (a, b) = (&self.0, &other.0);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        ItemSet(merged.into_boxed_slice())
    }

    /// Single merge walk over both sorted slices.
    pub fn is_subset_of(&self, other: &ItemSet) -> bool {
        let (needle, hay) = (&self.0, &other.0);
        if needle.len() > hay.len() {
            return false;
        }
        let mut j = 0;
        for &item in needle.iter() {
            while j < hay.len() && hay[j] < item {
                j += 1;
            }
            if j == hay.len() || hay[j] != item {
                return false;
            }
            j += 1;
        }
        true
    }
}

impl FromIterator<ItemId> for ItemSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// A level-1 pattern is a bare item; every later level holds item sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pattern {
    Item(ItemId),
    Set(ItemSet),
}

impl Pattern {
    pub fn items(&self) -> &[ItemId] {
        match self {
            Pattern::Item(id) => std::slice::from_ref(id),
            Pattern::Set(set) => set.items(),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Item(id) => write!(f, "{id}"),
            Pattern::Set(set) => write!(f, "{set}"),
        }
    }
}

/// `count >= epsilon`, the only frequency test used at any level.
pub fn meets_threshold(count: u64, epsilon: f64) -> bool {
    count as f64 >= epsilon
}

/// Frequent patterns of one size with their observed support (L_k).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentLevel {
    pub itemset_size: usize,
    supports: BTreeMap<Pattern, u64>,
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            itemset_size,
            supports: BTreeMap::new(),
        }
    }

    pub fn add_itemset_with_support(&mut self, pattern: Pattern, support: u64) {
        debug_assert_eq!(pattern.len(), self.itemset_size);
        self.supports.insert(pattern, support);
    }

    pub fn len(&self) -> usize {
        self.supports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty()
    }

    pub fn support(&self, pattern: &Pattern) -> Option<u64> {
        self.supports.get(pattern).copied()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> + Clone {
        self.supports.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pattern, u64)> {
        self.supports.iter().map(|(pattern, &support)| (pattern, support))
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[ItemId]> {
        self.supports.keys().map(Pattern::items)
    }
}

/// Candidate item sets of one size with a running counter (C_k).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTable {
    pub itemset_size: usize,
    counts: BTreeMap<ItemSet, u64>,
}

impl CandidateTable {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            itemset_size,
            counts: BTreeMap::new(),
        }
    }

    /// Returns false when the set was already a candidate.
    pub fn insert(&mut self, itemset: ItemSet) -> bool {
        debug_assert_eq!(itemset.len(), self.itemset_size);
        self.counts.insert(itemset, 0).is_none()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, itemset: &ItemSet) -> bool {
        self.counts.contains_key(itemset)
    }

    pub fn itemsets(&self) -> impl Iterator<Item = &ItemSet> {
        self.counts.keys()
    }

    pub fn count(&self, itemset: &ItemSet) -> Option<u64> {
        self.counts.get(itemset).copied()
    }

    pub(crate) fn counters_mut(&mut self) -> impl Iterator<Item = (&ItemSet, &mut u64)> {
        self.counts.iter_mut()
    }

    /// Keeps only the candidates whose count reached `epsilon`.
    pub fn into_frequent(self, epsilon: f64) -> FrequentLevel {
        let mut level = FrequentLevel::new(self.itemset_size);
        for (itemset, count) in self.counts {
            if meets_threshold(count, epsilon) {
                level.add_itemset_with_support(Pattern::Set(itemset), count);
            }
        }
        level
    }
}

/// Result of a mining run: `levels[k - 1]` is L_k. L_1 is always present,
/// every later level is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequentPatterns {
    levels: Vec<FrequentLevel>,
}

impl FrequentPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: FrequentLevel) {
        debug_assert_eq!(level.itemset_size, self.levels.len() + 1);
        self.levels.push(level);
    }

    pub fn level(&self, k: usize) -> Option<&FrequentLevel> {
        k.checked_sub(1).and_then(|idx| self.levels.get(idx))
    }

    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<FrequentLevel> {
        self.levels
    }

    pub fn max_level(&self) -> usize {
        self.levels.iter().rposition(|l| !l.is_empty()).map_or(0, |idx| idx + 1)
    }

    /// Number of frequent patterns across all levels.
    pub fn total(&self) -> usize {
        self.levels.iter().map(FrequentLevel::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pattern, u64)> {
        self.levels.iter().flat_map(FrequentLevel::iter)
    }
}
