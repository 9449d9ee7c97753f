//! Frequency-ranked integer codes for head symbols and constants
//!
//! Codes are dense (`0..len`) and assigned by descending occurrence count, so
//! code 0 is the most frequent symbol of its category. Equally frequent symbols
//! are ordered by ascending symbol text, which keeps the codes identical across
//! runs over the same data.

use crate::error::{InferError, InferResult};
use ahash::AHashMap;
use modeinfer_types::{ConstantCode, GroundAtom, HeadCode};
use serde::Serialize;
use std::cmp::Reverse;
use tracing::{debug, instrument};

/// Symbol to rank code mapping for one category of symbols
#[derive(Debug, Clone, Default)]
pub struct RankIndex {
    codes: AHashMap<String, u32>,
    /// Symbols indexed by code
    symbols: Vec<String>,
    /// Occurrence counts indexed by code
    counts: Vec<usize>,
}

/// One row of a rank table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub code: u32,
    pub symbol: String,
    pub count: usize,
}

impl RankIndex {
    /// Build an index from occurrence counts
    pub fn from_counts(counts: AHashMap<String, usize>) -> Self {
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|(a_symbol, a_count), (b_symbol, b_count)| {
            (Reverse(a_count), a_symbol).cmp(&(Reverse(b_count), b_symbol))
        });

        let mut index = Self {
            codes: AHashMap::with_capacity(ranked.len()),
            symbols: Vec::with_capacity(ranked.len()),
            counts: Vec::with_capacity(ranked.len()),
        };
        for (code, (symbol, count)) in ranked.into_iter().enumerate() {
            index.codes.insert(symbol.clone(), code as u32);
            index.symbols.push(symbol);
            index.counts.push(count);
        }
        index
    }

    /// Rank code of `symbol`, if it was counted
    pub fn code(&self, symbol: &str) -> Option<u32> {
        self.codes.get(symbol).copied()
    }

    /// Symbol holding `code`
    pub fn symbol(&self, code: u32) -> Option<&str> {
        self.symbols.get(code as usize).map(String::as_str)
    }

    /// Occurrence count of `symbol`
    pub fn count(&self, symbol: &str) -> Option<usize> {
        self.code(symbol).map(|code| self.counts[code as usize])
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Rows in code order
    pub fn entries(&self) -> Vec<RankEntry> {
        self.symbols
            .iter()
            .zip(&self.counts)
            .enumerate()
            .map(|(code, (symbol, &count))| RankEntry {
                code: code as u32,
                symbol: symbol.clone(),
                count,
            })
            .collect()
    }
}

/// Rank tables for both symbol categories of a dataset
#[derive(Debug, Clone, Default)]
pub struct SymbolRanks {
    pub heads: RankIndex,
    pub constants: RankIndex,
}

impl SymbolRanks {
    pub fn head_code(&self, head: &str) -> InferResult<HeadCode> {
        self.heads.code(head).map(HeadCode).ok_or_else(|| InferError::unknown_symbol("head", head))
    }

    pub fn constant_code(&self, constant: &str) -> InferResult<ConstantCode> {
        self.constants
            .code(constant)
            .map(ConstantCode)
            .ok_or_else(|| InferError::unknown_symbol("constant", constant))
    }

    pub fn head_symbol(&self, code: HeadCode) -> Option<&str> {
        self.heads.symbol(code.as_u32())
    }

    pub fn constant_symbol(&self, code: ConstantCode) -> Option<&str> {
        self.constants.symbol(code.as_u32())
    }
}

/// Count heads and constants over all atoms (facts, positives and negatives
/// pooled) and rank them.
#[instrument(skip(atoms))]
pub fn build_ranks<'a, I>(atoms: I) -> SymbolRanks
where
    I: IntoIterator<Item = &'a GroundAtom>,
{
    let mut head_counts: AHashMap<String, usize> = AHashMap::new();
    let mut constant_counts: AHashMap<String, usize> = AHashMap::new();

    for atom in atoms {
        *head_counts.entry(atom.head.clone()).or_default() += 1;
        for arg in &atom.args {
            *constant_counts.entry(arg.clone()).or_default() += 1;
        }
    }

    let ranks = SymbolRanks {
        heads: RankIndex::from_counts(head_counts),
        constants: RankIndex::from_counts(constant_counts),
    };
    debug!(
        heads = ranks.heads.len(),
        constants = ranks.constants.len(),
        "Built frequency rank tables"
    );
    ranks
}
