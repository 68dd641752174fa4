//! Prefix code construction for finite alphabets.
//!
//! Two interchangeable strategies turn a symbol-frequency distribution into a
//! [`CodingSchema`]: a bottom-up Huffman merge ([`CodeTree`]) and a top-down
//! Shannon-Fano partition ([`PartitionCoder`]).
//!
//! ```
//! use prefixcode::build_huffman_schema;
//!
//! let coding = build_huffman_schema("hello".chars())?;
//! let schema = coding.with_one_bit_fallback();
//! assert!(schema.is_prefix_free());
//! assert_eq!(schema.average_codeword_length(), 2.0);
//! # Ok::<(), prefixcode::CodingError>(())
//! ```

#[doc(hidden)]
pub use cfg_if as __cfg_if;

/// Expands its body only when the `tracing` feature is enabled.
#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        $crate::__cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

pub mod algorithms;
pub mod coder;
pub mod frequency;
pub mod registered;
pub mod schema;

#[cfg(test)]
mod tests;

pub use algorithms::huffman::{CodeTree, HuffmanCoding};
pub use algorithms::shannon_fano::{PartitionCoder, ShannonFanoCoding};
pub use coder::{CodingError, PrefixCoder, Result, Symbol};
pub use frequency::FrequencyTable;
pub use registered::{ALL_CODERS, RegisteredCoder, Strategy};
pub use schema::{Coding, CodingSchema, Codeword, SchemaEntry};

/// Builds a Huffman code for the given symbol sequence.
///
/// # Errors
///
/// Returns [`CodingError::EmptyInput`] if `symbols` yields nothing.
pub fn build_huffman_schema<S, I>(symbols: I) -> Result<Coding<S>>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    HuffmanCoding.build_from_symbols(symbols)
}

/// Builds a Shannon-Fano code for the given symbol sequence.
///
/// # Errors
///
/// Returns [`CodingError::EmptyInput`] if `symbols` yields nothing.
pub fn build_shannon_fano_schema<S, I>(symbols: I) -> Result<Coding<S>>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    ShannonFanoCoding.build_from_symbols(symbols)
}
