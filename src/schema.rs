use core::fmt;

use serde::Serialize;

use crate::coder::{CodingError, Result, Symbol};

/// A codeword over the binary alphabet, kept as a string of `'0'` and `'1'`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Codeword(String);

impl Codeword {
    pub const fn new() -> Self {
        Self(String::new())
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(if bit { '1' } else { '0' });
    }

    /// Returns a copy of this codeword extended by one bit.
    pub fn with(&self, bit: bool) -> Self {
        let mut next = self.clone();
        next.push(bit);
        next
    }

    /// Length in bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Codeword {
    type Error = CodingError;

    /// Parses a string of `'0'` and `'1'`; any other character is rejected.
    fn try_from(bits: &str) -> Result<Self> {
        let mut codeword = Self::new();
        for c in bits.chars() {
            match c {
                '0' => codeword.push(false),
                '1' => codeword.push(true),
                _ => {
                    return Err(CodingError::InvalidCodeword {
                        codeword: bits.to_string(),
                    });
                }
            }
        }
        Ok(codeword)
    }
}

/// One `(symbol, count, codeword)` triple of a [`CodingSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry<S> {
    pub symbol: S,
    pub count: u64,
    pub codeword: Codeword,
}

impl<S> SchemaEntry<S> {
    pub fn codeword_len(&self) -> usize {
        self.codeword.len()
    }
}

/// The complete symbol to codeword assignment produced by a strategy.
///
/// A schema is never empty and none of its codewords are empty, so the length accounting
/// methods are always defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CodingSchema<S> {
    entries: Vec<SchemaEntry<S>>,
}

impl<S: Symbol> CodingSchema<S> {
    /// Wraps entries produced by a strategy. Callers uphold the non-empty invariants.
    pub(crate) fn from_entries(entries: Vec<SchemaEntry<S>>) -> Self {
        debug_assert!(!entries.is_empty());
        debug_assert!(entries.iter().all(|e| !e.codeword.is_empty()));
        Self { entries }
    }

    pub fn entries(&self) -> &[SchemaEntry<S>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, SchemaEntry<S>> {
        self.entries.iter()
    }

    pub fn get(&self, symbol: &S) -> Option<&SchemaEntry<S>> {
        self.entries.iter().find(|e| &e.symbol == symbol)
    }

    pub fn codeword(&self, symbol: &S) -> Option<&Codeword> {
        self.get(symbol).map(|e| &e.codeword)
    }

    /// Sum of counts over all entries, equal to the length of the coded input.
    ///
    /// Cannot overflow: every table a strategy accepts has a total that fits in a `u64`.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Total number of bits needed to code the whole input, saturating at `u64::MAX`.
    pub fn total_bits(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.count.saturating_mul(e.codeword_len() as u64))
            .fold(0u64, u64::saturating_add)
    }

    /// Frequency-weighted mean codeword length in bits per symbol.
    pub fn average_codeword_length(&self) -> f64 {
        // summed in floating point so counts near `u64::MAX` still average correctly
        let bits: f64 = self.entries.iter().map(|e| e.count as f64 * e.codeword_len() as f64).sum();
        bits / self.total_count() as f64
    }

    /// Ratio of a fixed-width code to this schema, e.g. `8` bits for one byte per character.
    pub fn compression_factor(&self, fixed_width_bits: u32) -> f64 {
        f64::from(fixed_width_bits) / self.average_codeword_length()
    }

    /// How close the average length gets to the entropy bound, in `(0, 1]` for a sound code.
    pub fn efficiency(&self, entropy: f64) -> f64 {
        entropy / self.average_codeword_length()
    }

    pub fn min_codeword_len(&self) -> usize {
        self.entries.iter().map(SchemaEntry::codeword_len).min().unwrap_or(0)
    }

    pub fn max_codeword_len(&self) -> usize {
        self.entries.iter().map(SchemaEntry::codeword_len).max().unwrap_or(0)
    }

    /// Checks that no codeword is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        // after sorting, a prefix always sorts directly before some word it prefixes
        let mut words: Vec<&Codeword> = self.entries.iter().map(|e| &e.codeword).collect();
        words.sort();
        words.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Orders entries by codeword length, then lexicographically by codeword.
    pub fn sort_by_code(&mut self) {
        self.entries
            .sort_by(|a, b| a.codeword_len().cmp(&b.codeword_len()).then_with(|| a.codeword.cmp(&b.codeword)));
    }

    pub fn into_entries(self) -> Vec<SchemaEntry<S>> {
        self.entries
    }
}

impl<'a, S> IntoIterator for &'a CodingSchema<S> {
    type Item = &'a SchemaEntry<S>;
    type IntoIter = core::slice::Iter<'a, SchemaEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Result of running a strategy over a non-empty distribution.
///
/// A one-symbol alphabet has no proper prefix code: both strategies would give its only
/// symbol the empty codeword. That outcome is kept apart so callers decide how to code a
/// single-symbol stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Coding<S> {
    Prefix { schema: CodingSchema<S> },
    SingleSymbol { symbol: S, count: u64 },
}

impl<S: Symbol> Coding<S> {
    pub fn is_single_symbol(&self) -> bool {
        matches!(self, Coding::SingleSymbol { .. })
    }

    pub fn schema(&self) -> Option<&CodingSchema<S>> {
        match self {
            Coding::Prefix { schema } => Some(schema),
            Coding::SingleSymbol { .. } => None,
        }
    }

    /// Returns the schema, refusing the single-symbol outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CodingError::SingleSymbol`] for a one-symbol alphabet.
    pub fn into_schema(self) -> Result<CodingSchema<S>> {
        match self {
            Coding::Prefix { schema } => Ok(schema),
            Coding::SingleSymbol { symbol, count } => Err(CodingError::SingleSymbol {
                symbol: format!("{:?}", symbol),
                count,
            }),
        }
    }

    /// Returns the schema, giving a lone symbol the one-bit codeword `0`.
    pub fn with_one_bit_fallback(self) -> CodingSchema<S> {
        match self {
            Coding::Prefix { schema } => schema,
            Coding::SingleSymbol { symbol, count } => CodingSchema::from_entries(vec![SchemaEntry {
                symbol,
                count,
                codeword: Codeword::new().with(false),
            }]),
        }
    }
}
