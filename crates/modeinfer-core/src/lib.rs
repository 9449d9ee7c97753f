#![allow(missing_docs)]
//! Core functionality for modeinfer argument type inference.
//!
//! Given the ground facts, positive examples and negative examples of an
//! inductive logic programming dataset, this crate decides which argument
//! positions of which predicates range over the same domain, by observing which
//! constants co-occur in those positions. The resulting type partition narrows
//! the search space for later mode declaration inference.

/// Clustering of slots into types
pub mod clustering;
/// Integer re-encoding of datasets
pub mod compression;
/// Loading the facts, positive and negative collections
pub mod dataset;
/// Structured error types
pub mod error;
/// Observation hooks for the clusterer
pub mod hooks;
/// Ground atom parsing
pub mod parser;
/// Staged type inference run
pub mod pipeline;
/// Per-slot constant sets
pub mod position_sets;
/// Frequency-ranked symbol codes
pub mod ranking;

pub use clustering::{ClusterStrategy, TypeAssignment, cluster, cluster_with};
pub use compression::{CompressedAtom, CompressedDataset, compress_atom, compress_dataset};
pub use dataset::{Collection, Dataset, DatasetPaths};
pub use error::{InferError, InferResult, ResultExt};
pub use hooks::{ClusterEvent, ClusterHook, RecordingHook, TracingHook};
pub use parser::{ParseOptions, parse_atom, parse_atoms};
pub use pipeline::{InferenceSummary, TypeInference, TypeInferencePipeline, infer_types};
pub use position_sets::{PositionSets, build_position_sets};
pub use ranking::{RankEntry, RankIndex, SymbolRanks, build_ranks};

pub use modeinfer_types::{ConstantCode, GroundAtom, HeadCode, SlotKey, TypeId};
