//! Integer re-encoding of datasets
//!
//! Each atom is rewritten as its head code followed by its constant codes, e.g.
//! `father(harrypotter,jamespotter).` becomes `1,4,0`. Codes come from the rank
//! tables of the whole dataset, so the three collections stay comparable.

use crate::dataset::{Collection, Dataset};
use crate::error::InferResult;
use crate::ranking::SymbolRanks;
use modeinfer_types::{ConstantCode, GroundAtom, HeadCode};
use std::fmt;
use tracing::{debug, instrument};

/// An atom with every symbol replaced by its rank code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompressedAtom {
    pub head: HeadCode,
    pub args: Vec<ConstantCode>,
}

impl fmt::Display for CompressedAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for arg in &self.args {
            write!(f, ",{arg}")?;
        }
        Ok(())
    }
}

pub fn compress_atom(atom: &GroundAtom, ranks: &SymbolRanks) -> InferResult<CompressedAtom> {
    let head = ranks.head_code(&atom.head)?;
    let args = atom
        .args
        .iter()
        .map(|arg| ranks.constant_code(arg))
        .collect::<InferResult<Vec<_>>>()?;
    Ok(CompressedAtom { head, args })
}

/// The three collections of a dataset in compressed form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedDataset {
    pub facts: Vec<CompressedAtom>,
    pub positives: Vec<CompressedAtom>,
    pub negatives: Vec<CompressedAtom>,
}

impl CompressedDataset {
    pub fn collection(&self, collection: Collection) -> &[CompressedAtom] {
        match collection {
            Collection::Facts => &self.facts,
            Collection::Positives => &self.positives,
            Collection::Negatives => &self.negatives,
        }
    }

    /// One compressed atom per line
    pub fn render(&self, collection: Collection) -> String {
        let mut out = String::new();
        for atom in self.collection(collection) {
            out.push_str(&atom.to_string());
            out.push('\n');
        }
        out
    }
}

#[instrument(skip_all, fields(atoms = dataset.len()))]
pub fn compress_dataset(dataset: &Dataset, ranks: &SymbolRanks) -> InferResult<CompressedDataset> {
    let encode = |atoms: &[GroundAtom]| {
        atoms.iter().map(|atom| compress_atom(atom, ranks)).collect::<InferResult<Vec<_>>>()
    };
    let compressed = CompressedDataset {
        facts: encode(dataset.facts.as_slice())?,
        positives: encode(dataset.positives.as_slice())?,
        negatives: encode(dataset.negatives.as_slice())?,
    };
    debug!("Compressed dataset");
    Ok(compressed)
}
