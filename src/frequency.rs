use std::collections::BTreeMap;

use serde::Serialize;

use crate::coder::{CodingError, Result, Symbol};

/// Occurrence counts of every distinct symbol in an input.
///
/// Entries are kept in ascending symbol order. Every stored count is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable<S: Ord> {
    counts: BTreeMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Counts how often each distinct symbol occurs in `symbols`.
    pub fn from_symbols<I: IntoIterator<Item = S>>(symbols: I) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        if_tracing! {{
            tracing::debug!(target: "frequency", distinct = counts.len(), "frequency table built");
        }}

        Self { counts }
    }

    /// Builds a table from an already aggregated distribution.
    ///
    /// Repeated symbols have their counts summed.
    ///
    /// # Errors
    ///
    /// Returns [`CodingError::ZeroCount`] if any entry has a count of zero, and
    /// [`CodingError::CountOverflow`] if the counts add up to more than `u64::MAX`.
    pub fn from_counts<I: IntoIterator<Item = (S, u64)>>(entries: I) -> Result<Self> {
        let mut counts = BTreeMap::new();
        // every per-symbol sum and every later tree or split weight is bounded by this total
        let mut total = 0u64;
        for (symbol, count) in entries {
            if count == 0 {
                return Err(CodingError::ZeroCount {
                    symbol: format!("{:?}", symbol),
                });
            }
            total = match total.checked_add(count) {
                Some(total) => total,
                None => {
                    return Err(CodingError::CountOverflow {
                        symbol: format!("{:?}", symbol),
                    });
                }
            };
            *counts.entry(symbol).or_insert(0) += count;
        }
        Ok(Self { counts })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the input the table was built from.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn count(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Iterates over `(symbol, count)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.counts.iter().map(|(symbol, &count)| (symbol, count))
    }

    /// Shannon entropy of the distribution in bits per symbol.
    ///
    /// This is the lower bound for the average codeword length of any prefix code built from
    /// this table. An empty table has an entropy of zero.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;

        self.counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl<S: Symbol> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}
