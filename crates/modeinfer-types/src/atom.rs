use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate symbol applied to an ordered list of constants, e.g. `friends(alice,bob).`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundAtom {
    /// Predicate symbol
    pub head: String,
    /// Constants in argument order
    pub args: Vec<String>,
}

impl GroundAtom {
    /// Create an atom from a head symbol and its arguments
    #[must_use]
    pub fn new(head: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { head: head.into(), args: args.into_iter().map(Into::into).collect() }
    }

    /// Number of arguments
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for GroundAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.head)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ").")
    }
}
