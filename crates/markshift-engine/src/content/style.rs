use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Character-range style that can be layered on block text.
///
/// The serialized names match the raw interchange format (`"BOLD"`, `"RED"`, ...).
/// How a style looks is decided by the presentation layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Red,
}

impl InlineStyle {
    pub const ALL: [InlineStyle; 5] = [
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Underline,
        InlineStyle::Code,
        InlineStyle::Red,
    ];

    /// Interchange identifier for this style
    pub fn as_str(&self) -> &'static str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
            InlineStyle::Code => "CODE",
            InlineStyle::Red => "RED",
        }
    }

    /// Look up a style by its interchange identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.as_str() == name)
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of styles carried by a single character
pub type StyleSet = BTreeSet<InlineStyle>;
