use std::fmt;

use serde::{Deserialize, Serialize};

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Name of a question category.
///
/// Categories are defined by the catalog, in catalog order, so this is an open
/// set rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub category: Category,
    #[serde(rename = "question")]
    pub text: String,
    pub options: [String; OPTION_COUNT],
    /// Index of the correct option, always below [`OPTION_COUNT`].
    pub answer: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.answer)
    }
}
