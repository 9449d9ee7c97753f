use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank code of a predicate symbol; 0 is the most frequent head
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadCode(pub u32);

/// Rank code of a constant; 0 is the most frequent constant
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantCode(pub u32);

/// Label of an inferred type cluster. Only distinctness is meaningful.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl HeadCode {
    /// Raw code value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl ConstantCode {
    /// Raw code value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl TypeId {
    /// Raw label value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HeadCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ConstantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One argument position of one predicate: the unit that receives a type.
///
/// Ordered by head code first, then position, which is the order slots are
/// scanned in during clustering and reported in output.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    /// Head the slot belongs to
    pub head: HeadCode,
    /// Zero-based argument position
    pub position: u32,
}

impl SlotKey {
    /// Create a slot key
    #[must_use]
    pub const fn new(head: HeadCode, position: u32) -> Self {
        Self { head, position }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.head, self.position)
    }
}
