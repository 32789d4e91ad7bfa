//! Saying (quote) types.

use serde::{Deserialize, Serialize};

/// A short quote with its attributed source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saying {
    pub text: String,
    pub from: String,
}

impl Saying {
    pub fn new(text: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from: from.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
