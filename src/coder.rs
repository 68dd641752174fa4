use core::fmt::Debug;

use thiserror::Error;

use crate::{frequency::FrequencyTable, schema::Coding};

/// Represents an error emitted while building a prefix code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodingError {
    /// The symbol sequence or frequency table had no entries.
    ///
    /// No code can be built for an empty alphabet, and any average length over it
    /// would divide by zero.
    #[error("cannot build a prefix code for empty input")]
    EmptyInput,

    /// A pre-aggregated frequency entry carried a zero count.
    #[error("symbol {symbol} has a zero count")]
    ZeroCount { symbol: String },

    /// The counts of a pre-aggregated distribution add up to more than `u64::MAX`.
    #[error("total count overflows at symbol {symbol}")]
    CountOverflow { symbol: String },

    /// A codeword string held a character other than `0` or `1`.
    #[error("invalid codeword {codeword:?}: only '0' and '1' are allowed")]
    InvalidCodeword { codeword: String },

    /// The alphabet has a single distinct symbol and the caller asked for a strict
    /// prefix code, which would need a zero-length codeword.
    #[error("single-symbol alphabet {symbol} ({count} occurrences) has no proper prefix code")]
    SingleSymbol { symbol: String, count: u64 },
}

pub type Result<T, E = CodingError> = core::result::Result<T, E>;

/// Anything that can be an alphabet unit.
///
/// Symbols are enumerated in their natural order, which is also the tie-break used by both
/// strategies, so the produced codes never depend on the order symbols first appear in.
pub trait Symbol: Ord + Clone + Debug {}

impl<T: Ord + Clone + Debug> Symbol for T {}

/// Represents shared behavior for all prefix code strategies.
///
/// Provides [`build_from_table`](PrefixCoder::build_from_table) to build a code for an
/// aggregated distribution and [`build_from_symbols`](PrefixCoder::build_from_symbols) to
/// build one straight from raw input.
///
/// # Note
///
/// Implementations are pure: the same table always yields the same [`Coding`].
pub trait PrefixCoder {
    /// Builds a code for the given distribution.
    ///
    /// # Errors
    ///
    /// Returns [`CodingError::EmptyInput`] if the table has no entries.
    fn build_from_table<S: Symbol>(&self, table: &FrequencyTable<S>) -> Result<Coding<S>>;

    /// Counts `symbols` and builds a code for the resulting distribution.
    ///
    /// # Errors
    ///
    /// Returns [`CodingError::EmptyInput`] if `symbols` yields nothing.
    fn build_from_symbols<S, I>(&self, symbols: I) -> Result<Coding<S>>
    where
        S: Symbol,
        I: IntoIterator<Item = S>,
    {
        let table = FrequencyTable::from_symbols(symbols);
        self.build_from_table(&table)
    }
}
