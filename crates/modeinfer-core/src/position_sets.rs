//! Per-slot constant sets
//!
//! For every head code the builder keeps one bitmap of constant codes per
//! argument position. The arity of a head is fixed by the first atom seen with
//! it; later atoms must agree.

use crate::error::{InferError, InferResult};
use crate::ranking::SymbolRanks;
use modeinfer_types::{ConstantCode, GroundAtom, HeadCode, SlotKey};
use roaring::RoaringBitmap;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Constant codes observed at each argument position, keyed by head code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSets {
    heads: BTreeMap<HeadCode, Vec<RoaringBitmap>>,
}

impl PositionSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one encoded atom. Returns the established arity on disagreement.
    pub fn observe(&mut self, head: HeadCode, args: &[ConstantCode]) -> Result<(), usize> {
        let sets = self
            .heads
            .entry(head)
            .or_insert_with(|| vec![RoaringBitmap::new(); args.len()]);
        if sets.len() != args.len() {
            return Err(sets.len());
        }
        for (set, code) in sets.iter_mut().zip(args) {
            set.insert(code.as_u32());
        }
        Ok(())
    }

    /// Arity established for `head`
    pub fn arity(&self, head: HeadCode) -> Option<usize> {
        self.heads.get(&head).map(Vec::len)
    }

    /// Constant set of one slot
    pub fn get(&self, slot: SlotKey) -> Option<&RoaringBitmap> {
        self.heads.get(&slot.head)?.get(slot.position as usize)
    }

    /// All slots in `(head, position)` order
    pub fn slots(&self) -> impl Iterator<Item = (SlotKey, &RoaringBitmap)> + '_ {
        self.heads.iter().flat_map(|(&head, sets)| {
            sets.iter()
                .enumerate()
                .map(move |(position, set)| (SlotKey::new(head, position as u32), set))
        })
    }

    pub fn head_count(&self) -> usize {
        self.heads.len()
    }

    pub fn slot_count(&self) -> usize {
        self.heads.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}

impl FromIterator<(HeadCode, Vec<RoaringBitmap>)> for PositionSets {
    fn from_iter<T: IntoIterator<Item = (HeadCode, Vec<RoaringBitmap>)>>(iter: T) -> Self {
        Self { heads: iter.into_iter().collect() }
    }
}

/// Encode every atom with `ranks` and union its constants into the slot sets
#[instrument(skip(atoms, ranks))]
pub fn build_position_sets<'a, I>(atoms: I, ranks: &SymbolRanks) -> InferResult<PositionSets>
where
    I: IntoIterator<Item = &'a GroundAtom>,
{
    let mut sets = PositionSets::new();
    let mut args = Vec::new();

    for atom in atoms {
        let head = ranks.head_code(&atom.head)?;
        args.clear();
        for arg in &atom.args {
            args.push(ranks.constant_code(arg)?);
        }
        sets.observe(head, &args).map_err(|expected| {
            InferError::arity_mismatch(&atom.head, expected, atom.arity(), &atom.to_string())
        })?;
    }

    debug!(
        heads = sets.head_count(),
        slots = sets.slot_count(),
        "Built position sets"
    );
    Ok(sets)
}
