//! Occurrence counts of sentinel codes across a batch.

use std::collections::BTreeMap;
use std::fmt;

use crate::SENTINEL_PREFIX;

/// A multiset of sentinel code numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SentinelTally {
    counts: BTreeMap<u16, usize>,
}

impl SentinelTally {
    pub fn record(&mut self, number: u16) {
        *self.counts.entry(number).or_default() += 1;
    }

    pub fn merge(&mut self, other: &SentinelTally) {
        for (&number, &count) in &other.counts {
            *self.counts.entry(number).or_default() += count;
        }
    }

    pub fn count(&self, number: u16) -> usize {
        self.counts.get(&number).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(code, count)` pairs, most frequent first; ties by ascending code.
    pub fn by_frequency(&self) -> Vec<(u16, usize)> {
        let mut pairs: Vec<(u16, usize)> = self.counts.iter().map(|(&n, &c)| (n, c)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        pairs
    }
}

/// Renders as ` ABEND883(12) ABEND042(3)`, the summary-line form.
impl fmt::Display for SentinelTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (number, count) in self.by_frequency() {
            write!(f, " {SENTINEL_PREFIX}{number:03}({count})")?;
        }
        Ok(())
    }
}
