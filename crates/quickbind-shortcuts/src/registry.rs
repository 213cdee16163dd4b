//! Shortcut registry: the mapping from key combinations to bindings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::models::{KeyCombo, ShortcutBinding};

/// Registry of key combination → binding
///
/// Combination uniqueness is structural (one entry per combo); two
/// combinations may map to the same action. All mutation goes through the
/// shortcut store, which owns conflict checking and persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutRegistry {
    bindings: BTreeMap<KeyCombo, ShortcutBinding>,
}

impl ShortcutRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        ShortcutRegistry::default()
    }

    /// Build a registry from a binding list; later entries win on the same
    /// combination
    pub fn from_bindings(bindings: impl IntoIterator<Item = (KeyCombo, ShortcutBinding)>) -> Self {
        ShortcutRegistry {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Look up the binding for a combination
    pub fn get(&self, key: &KeyCombo) -> Option<&ShortcutBinding> {
        self.bindings.get(key)
    }

    /// Whether a combination is bound
    pub fn contains(&self, key: &KeyCombo) -> bool {
        self.bindings.contains_key(key)
    }

    /// Iterate all bindings in combination order
    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, &ShortcutBinding)> {
        self.bindings.iter()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn insert(
        &mut self,
        key: KeyCombo,
        binding: ShortcutBinding,
    ) -> Option<ShortcutBinding> {
        self.bindings.insert(key, binding)
    }

    pub(crate) fn remove(&mut self, key: &KeyCombo) -> Option<ShortcutBinding> {
        self.bindings.remove(key)
    }

    /// Bindings grouped by display category
    pub fn grouped(&self) -> BTreeMap<Category, Vec<(&KeyCombo, &ShortcutBinding)>> {
        let mut groups: BTreeMap<Category, Vec<(&KeyCombo, &ShortcutBinding)>> = BTreeMap::new();
        for (key, binding) in &self.bindings {
            groups.entry(Category::of(binding)).or_default().push((key, binding));
        }
        groups
    }

    /// Case-insensitive search over action identifiers and descriptions
    pub fn search(&self, query: &str) -> Vec<(&KeyCombo, &ShortcutBinding)> {
        let query = query.to_lowercase();
        self.bindings
            .iter()
            .filter(|(_, binding)| {
                binding.action.to_lowercase().contains(&query)
                    || binding.description.to_lowercase().contains(&query)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ShortcutRegistry {
    type Item = (&'a KeyCombo, &'a ShortcutBinding);
    type IntoIter = std::collections::btree_map::Iter<'a, KeyCombo, ShortcutBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
