use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type WordId = i32;

/// A candidate word. Stored uppercase; never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Word {
    pub id: WordId,
    pub text: String,
}

impl Word {
    pub fn new(id: WordId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Uppercase form used for every gameplay comparison
    pub fn normalized(&self) -> String {
        self.text.trim().to_uppercase()
    }

    pub fn len(&self) -> usize {
        self.normalized().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
