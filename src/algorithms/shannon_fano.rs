use core::ops::Range;

use crate::{
    coder::{CodingError, PrefixCoder, Result, Symbol},
    frequency::FrequencyTable,
    schema::{Coding, CodingSchema, Codeword, SchemaEntry},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct ShannonFanoCoding;

impl PrefixCoder for ShannonFanoCoding {
    fn build_from_table<S: Symbol>(&self, table: &FrequencyTable<S>) -> Result<Coding<S>> {
        PartitionCoder::new(table)?.coding()
    }
}

/// Top-down coder that splits a count-sorted symbol list into halves of balanced weight.
///
/// Entries are sorted once, by descending count and then ascending symbol, and never
/// reordered afterwards. Every group is a contiguous range of that list.
#[derive(Debug, Clone)]
pub struct PartitionCoder<S> {
    group: Vec<SchemaEntry<S>>,
}

impl<S: Symbol> PartitionCoder<S> {
    /// # Errors
    ///
    /// Returns [`CodingError::EmptyInput`] if the table is empty.
    pub fn new(table: &FrequencyTable<S>) -> Result<Self> {
        if table.is_empty() {
            if_tracing! {{
                tracing::warn!(target: "shannon_fano", "shannon-fano build rejected: input empty");
            }}
            return Err(CodingError::EmptyInput);
        }

        let mut group: Vec<SchemaEntry<S>> = table
            .iter()
            .map(|(symbol, count)| SchemaEntry {
                symbol: symbol.clone(),
                count,
                codeword: Codeword::new(),
            })
            .collect();
        // the table iterates in symbol order and the sort is stable
        group.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(Self { group })
    }

    /// The sorted group the first split is taken over.
    pub fn entries(&self) -> &[SchemaEntry<S>] {
        &self.group
    }

    /// Split index chosen for the whole group, or `None` for a single entry.
    pub fn first_split(&self) -> Option<usize> {
        balanced_split(&self.group)
    }

    /// Runs every split and returns the entries with their finished codewords, still in
    /// sorted order.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(symbols = self.group.len())))]
    pub fn partition(mut self) -> Vec<SchemaEntry<S>> {
        let mut pending: Vec<Range<usize>> = vec![0..self.group.len()];

        while let Some(range) = pending.pop() {
            let slice = &mut self.group[range.clone()];
            let Some(split) = balanced_split(slice) else {
                continue;
            };

            let (left, right) = slice.split_at_mut(split);
            left.iter_mut().for_each(|e| e.codeword.push(false));
            right.iter_mut().for_each(|e| e.codeword.push(true));

            if_tracing! {{
                tracing::trace!(target: "shannon_fano", start = range.start, end = range.end, split = range.start + split, "group split");
            }}

            // groups are disjoint, so the order they are visited in does not matter
            pending.push(range.start + split..range.end);
            pending.push(range.start..range.start + split);
        }

        self.group
    }

    /// Partitions the group and wraps the result, separating out the one-symbol alphabet.
    ///
    /// # Errors
    ///
    /// Never fails for a coder obtained from [`PartitionCoder::new`].
    pub fn coding(self) -> Result<Coding<S>> {
        let mut entries = self.partition();
        match entries.len() {
            0 => Err(CodingError::EmptyInput),
            1 => {
                let SchemaEntry { symbol, count, .. } = entries.remove(0);
                if_tracing! {{
                    tracing::info!(target: "shannon_fano", symbol = ?symbol, count, "single-symbol alphabet, no proper prefix code");
                }}
                Ok(Coding::SingleSymbol { symbol, count })
            }
            _ => Ok(Coding::Prefix {
                schema: CodingSchema::from_entries(entries),
            }),
        }
    }
}

/// Finds the split index `i` in `1..len` minimizing `|sum(after i) - sum(before i)|`.
///
/// The smallest index wins a tie. Returns `None` for fewer than two entries.
fn balanced_split<S>(group: &[SchemaEntry<S>]) -> Option<usize> {
    if group.len() < 2 {
        return None;
    }

    // bounded by the table total, which fits in a u64
    let total: u64 = group.iter().map(|e| e.count).sum();
    let mut left = 0u64;
    let mut best: Option<(usize, u64)> = None;

    for (i, entry) in group.iter().enumerate().take(group.len() - 1) {
        left += entry.count;
        let diff = (total - left).abs_diff(left);
        match best {
            Some((_, best_diff)) if best_diff <= diff => {}
            _ => best = Some((i + 1, diff)),
        }
    }

    best.map(|(index, _)| index)
}
