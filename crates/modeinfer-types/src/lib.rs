//! Modeinfer Types
//!
//! This crate defines the shared vocabulary used throughout the modeinfer workspace
//! (currently `modeinfer-core` and `modeinfer-cli`): ground atoms as read from a
//! dataset, the integer codes substituted for their symbols, and the slot and type
//! identifiers produced by type inference.

#![deny(missing_docs)]

mod atom;
mod codes;

pub use atom::GroundAtom;
pub use codes::{ConstantCode, HeadCode, SlotKey, TypeId};
