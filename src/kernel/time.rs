use serde::{Deserialize, Serialize};

/// Logical clock of a session: one turn per handled intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Turn {
    pub index: u64,
}

impl Turn {
    pub fn new() -> Self {
        Turn { index: 0 }
    }

    pub fn next(&self) -> Self {
        Turn { index: self.index + 1 }
    }
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}
