//! End-to-end type inference
//!
//! Runs the stages in order: rank symbols, build slot sets, cluster. Parsing
//! happens earlier, when the [`Dataset`] is built.

use crate::clustering::{ClusterStrategy, TypeAssignment, cluster_with};
use crate::dataset::Dataset;
use crate::error::InferResult;
use crate::hooks::{ClusterHook, TracingHook};
use crate::position_sets::{PositionSets, build_position_sets};
use crate::ranking::{SymbolRanks, build_ranks};
use modeinfer_types::{GroundAtom, HeadCode, SlotKey, TypeId};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, instrument};

/// Configured type inference run
#[derive(Debug)]
pub struct TypeInferencePipeline {
    strategy: ClusterStrategy,
    hook: Option<Box<dyn ClusterHook>>,
}

impl Default for TypeInferencePipeline {
    fn default() -> Self {
        Self { strategy: ClusterStrategy::default(), hook: Some(Box::new(TracingHook)) }
    }
}

impl TypeInferencePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: ClusterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the cluster event hook
    pub fn with_hook(mut self, hook: impl ClusterHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn without_hook(mut self) -> Self {
        self.hook = None;
        self
    }

    pub fn strategy(&self) -> ClusterStrategy {
        self.strategy
    }

    /// Infer types over all three collections of `dataset`
    pub fn run(&self, dataset: &Dataset) -> InferResult<TypeInference> {
        let atoms: Vec<&GroundAtom> = dataset.atoms().collect();
        self.infer(&atoms)
    }

    /// Infer types over an already pooled list of atoms
    pub fn run_atoms(&self, atoms: &[GroundAtom]) -> InferResult<TypeInference> {
        let atoms: Vec<&GroundAtom> = atoms.iter().collect();
        self.infer(&atoms)
    }

    #[instrument(skip_all, fields(atoms = atoms.len(), strategy = %self.strategy))]
    fn infer(&self, atoms: &[&GroundAtom]) -> InferResult<TypeInference> {
        let started = Instant::now();

        let ranks = build_ranks(atoms.iter().copied());
        let position_sets = build_position_sets(atoms.iter().copied(), &ranks)?;
        let types = cluster_with(&position_sets, self.strategy, self.hook.as_deref());

        info!(
            heads = ranks.heads.len(),
            constants = ranks.constants.len(),
            slots = position_sets.slot_count(),
            types = types.type_count(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Type inference complete"
        );

        Ok(TypeInference { ranks, position_sets, types, atom_count: atoms.len() })
    }
}

/// Infer types with the default pipeline
pub fn infer_types(dataset: &Dataset) -> InferResult<TypeInference> {
    TypeInferencePipeline::default().run(dataset)
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct TypeInference {
    pub ranks: SymbolRanks,
    pub position_sets: PositionSets,
    pub types: TypeAssignment,
    atom_count: usize,
}

/// Size figures of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceSummary {
    pub atoms: usize,
    pub heads: usize,
    pub constants: usize,
    pub slots: usize,
    pub types: usize,
}

impl TypeInference {
    /// `<head_code>_<position> <type_id>` for every slot, in slot order
    pub fn lines(&self) -> Vec<String> {
        self.types.iter().map(|(slot, type_id)| format!("{slot} {type_id}")).collect()
    }

    /// Like [`TypeInference::lines`] but naming the head symbol instead of its code
    pub fn symbolic_lines(&self) -> Vec<String> {
        self.types
            .iter()
            .map(|(slot, type_id)| format!("{} {type_id}", self.slot_name(slot)))
            .collect()
    }

    /// `<head_symbol>_<position>`, falling back to the code form for unknown heads
    pub fn slot_name(&self, slot: SlotKey) -> String {
        match self.ranks.head_symbol(slot.head) {
            Some(head) => format!("{head}_{}", slot.position),
            None => slot.to_string(),
        }
    }

    /// Type of the slot at `position` of the predicate named `head`
    pub fn type_of(&self, head: &str, position: u32) -> Option<TypeId> {
        let head = self.ranks.heads.code(head)?;
        self.types.get(SlotKey::new(HeadCode(head), position))
    }

    pub fn clusters(&self) -> BTreeMap<TypeId, Vec<SlotKey>> {
        self.types.clusters()
    }

    pub fn summary(&self) -> InferenceSummary {
        InferenceSummary {
            atoms: self.atom_count,
            heads: self.ranks.heads.len(),
            constants: self.ranks.constants.len(),
            slots: self.position_sets.slot_count(),
            types: self.types.type_count(),
        }
    }
}
