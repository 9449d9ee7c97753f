//! Dataset loading
//!
//! A dataset is three collections of ground atoms: background facts, positive
//! examples and negative examples. Inference pools them; compression keeps them
//! apart.

use crate::error::{InferError, InferResult};
use crate::parser::{ParseOptions, parse_atoms};
use modeinfer_types::GroundAtom;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// The three named input collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Facts,
    Positives,
    Negatives,
}

impl Collection {
    pub const ALL: [Collection; 3] =
        [Collection::Facts, Collection::Positives, Collection::Negatives];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Facts => "facts",
            Collection::Positives => "positives",
            Collection::Negatives => "negatives",
        }
    }

    /// File name used when writing this collection back out
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Facts => "facts.txt",
            Collection::Positives => "pos.txt",
            Collection::Negatives => "neg.txt",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Locations of the input collections; a missing path means an empty collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetPaths {
    pub facts: Option<PathBuf>,
    pub positives: Option<PathBuf>,
    pub negatives: Option<PathBuf>,
}

impl DatasetPaths {
    pub fn get(&self, collection: Collection) -> Option<&Path> {
        match collection {
            Collection::Facts => self.facts.as_deref(),
            Collection::Positives => self.positives.as_deref(),
            Collection::Negatives => self.negatives.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub facts: Vec<GroundAtom>,
    pub positives: Vec<GroundAtom>,
    pub negatives: Vec<GroundAtom>,
}

impl Dataset {
    pub fn new(
        facts: Vec<GroundAtom>,
        positives: Vec<GroundAtom>,
        negatives: Vec<GroundAtom>,
    ) -> Self {
        Self { facts, positives, negatives }
    }

    /// Parse three in-memory texts, one atom per line
    pub fn from_lines(
        facts: &str,
        positives: &str,
        negatives: &str,
        options: &ParseOptions,
    ) -> InferResult<Self> {
        Ok(Self {
            facts: parse_atoms(facts.lines(), Collection::Facts.name(), options)?,
            positives: parse_atoms(positives.lines(), Collection::Positives.name(), options)?,
            negatives: parse_atoms(negatives.lines(), Collection::Negatives.name(), options)?,
        })
    }

    /// Read and parse every collection named in `paths`
    #[instrument(skip(options))]
    pub fn load(paths: &DatasetPaths, options: &ParseOptions) -> InferResult<Self> {
        let mut dataset = Self::default();
        for collection in Collection::ALL {
            let atoms = match paths.get(collection) {
                Some(path) => {
                    let text = read_collection(path)?;
                    let atoms = parse_atoms(text.lines(), collection.name(), options)?;
                    info!(
                        %collection,
                        path = %path.display(),
                        atoms = atoms.len(),
                        "Loaded collection"
                    );
                    atoms
                }
                None => {
                    warn!(%collection, "No path given, treating collection as empty");
                    Vec::new()
                }
            };
            *dataset.collection_mut(collection) = atoms;
        }
        Ok(dataset)
    }

    pub fn collection(&self, collection: Collection) -> &[GroundAtom] {
        match collection {
            Collection::Facts => &self.facts,
            Collection::Positives => &self.positives,
            Collection::Negatives => &self.negatives,
        }
    }

    fn collection_mut(&mut self, collection: Collection) -> &mut Vec<GroundAtom> {
        match collection {
            Collection::Facts => &mut self.facts,
            Collection::Positives => &mut self.positives,
            Collection::Negatives => &mut self.negatives,
        }
    }

    /// Every atom, polarity discarded: positives, then negatives, then facts
    pub fn atoms(&self) -> impl Iterator<Item = &GroundAtom> + '_ {
        self.positives.iter().chain(&self.negatives).chain(&self.facts)
    }

    pub fn len(&self) -> usize {
        self.facts.len() + self.positives.len() + self.negatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_collection(path: &Path) -> InferResult<String> {
    fs::read_to_string(path).map_err(|err| InferError::file(path, &err))
}
