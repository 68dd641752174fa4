use core::fmt;

use serde::Serialize;

use crate::{
    algorithms::{huffman::HuffmanCoding, shannon_fano::ShannonFanoCoding},
    coder::{PrefixCoder, Result, Symbol},
    frequency::FrequencyTable,
    schema::Coding,
};

/// Selects one of the available strategies at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Bottom-up merge of the two lightest nodes.
    Huffman,
    /// Top-down split into halves of balanced weight.
    ShannonFano,
}

impl Strategy {
    pub fn build_from_table<S: Symbol>(self, table: &FrequencyTable<S>) -> Result<Coding<S>> {
        match self {
            Strategy::Huffman => HuffmanCoding.build_from_table(table),
            Strategy::ShannonFano => ShannonFanoCoding.build_from_table(table),
        }
    }

    pub fn build_from_symbols<S, I>(self, symbols: I) -> Result<Coding<S>>
    where
        S: Symbol,
        I: IntoIterator<Item = S>,
    {
        self.build_from_table(&FrequencyTable::from_symbols(symbols))
    }

    pub fn registration(self) -> &'static RegisteredCoder {
        match self {
            Strategy::Huffman => &ALL_CODERS[0],
            Strategy::ShannonFano => &ALL_CODERS[1],
        }
    }

    /// Looks a strategy up by its name or any of its aliases.
    pub fn from_name(name: &str) -> Option<Strategy> {
        ALL_CODERS
            .iter()
            .find(|coder| coder.name == name || coder.aliases.contains(&name))
            .map(|coder| coder.strategy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registration().name)
    }
}

#[derive(Debug, Clone)]
pub struct RegisteredCoder {
    pub strategy: Strategy,
    pub name: &'static str,
    /// Ordered by priority, all lowercase.
    pub aliases: &'static [&'static str],
    pub short_description: Option<&'static str>,
}

impl RegisteredCoder {
    pub const fn new(
        strategy: Strategy,
        name: &'static str,
        aliases: &'static [&'static str],
        short_description: Option<&'static str>,
    ) -> Self {
        RegisteredCoder {
            strategy,
            name,
            aliases,
            short_description,
        }
    }
}

/// All strategies available in the current build.
#[rustfmt::skip]
pub static ALL_CODERS: &[RegisteredCoder] = &[
    RegisteredCoder::new(Strategy::Huffman, "huffman", &["huff", "huffman_coding"], Some(HUFFMAN_DESCRIPTION)),
    RegisteredCoder::new(Strategy::ShannonFano, "shannon_fano", &["shannon-fano", "sf", "fano"], Some(SHANNON_FANO_DESCRIPTION)),
];

const HUFFMAN_DESCRIPTION: &str = "Huffman coding. Repeatedly merges the two lightest nodes of a min-heap into a binary \
tree; ties go to internal nodes, then symbol order. Optimal average length among prefix codes.";

const SHANNON_FANO_DESCRIPTION: &str = "Shannon-Fano coding. Sorts symbols by descending count and recursively splits them \
where the two halves are closest in weight. Near-balanced, not always optimal.";
