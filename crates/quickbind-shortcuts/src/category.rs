//! Display categorization for shortcut bindings
//!
//! Categories are a read-only projection for settings screens; dispatch
//! never consults them. An explicit category on a binding is authoritative.
//! Otherwise the action identifier is classified heuristically, prefix
//! before substring: `open-` wins over a `toggle` occurrence, so
//! `open-toggle-list` lands in Navigation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ShortcutBinding;

/// Display grouping for bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Navigation,
    ToggleActions,
    General,
}

impl Category {
    /// Classify an action identifier by the display heuristic alone
    pub fn infer(action: &str) -> Category {
        if action.starts_with("open-") {
            Category::Navigation
        } else if action.contains("toggle") {
            Category::ToggleActions
        } else {
            Category::General
        }
    }

    /// The category a binding displays under: explicit field first,
    /// heuristic fallback otherwise
    pub fn of(binding: &ShortcutBinding) -> Category {
        binding.category.unwrap_or_else(|| Category::infer(&binding.action))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Navigation => write!(f, "Navigation"),
            Category::ToggleActions => write!(f, "Toggle Actions"),
            Category::General => write!(f, "General"),
        }
    }
}
