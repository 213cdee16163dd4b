//! Conflict detection for shortcut bindings

use std::collections::BTreeMap;

use crate::models::{KeyCombo, ShortcutBinding};
use crate::registry::ShortcutRegistry;

/// Whether binding `new_key` would collide with an existing entry
///
/// True iff `new_key` is present in the registry and owned by an action
/// other than `excluding_action`. Rebinding an action to the combination it
/// already holds is not a conflict. Pure; the store consults this before
/// committing any upsert.
pub fn would_conflict(
    registry: &ShortcutRegistry,
    new_key: &KeyCombo,
    excluding_action: &str,
) -> bool {
    registry
        .get(new_key)
        .is_some_and(|binding| binding.action != excluding_action)
}

/// A combination claimed by more than one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub key: KeyCombo,
    pub actions: Vec<String>,
}

/// Detect every combination bound to more than one distinct action in a
/// proposed binding set
///
/// Used to validate default sets and imported records before they reach the
/// registry. Duplicate entries for the same (combination, action) pair are
/// not conflicts.
pub fn find_conflicts(bindings: &[(KeyCombo, ShortcutBinding)]) -> Vec<Conflict> {
    let mut key_to_actions: BTreeMap<&KeyCombo, Vec<&str>> = BTreeMap::new();

    for (key, binding) in bindings {
        let actions = key_to_actions.entry(key).or_default();
        if !actions.contains(&binding.action.as_str()) {
            actions.push(&binding.action);
        }
    }

    key_to_actions
        .into_iter()
        .filter(|(_, actions)| actions.len() > 1)
        .map(|(key, actions)| Conflict {
            key: key.clone(),
            actions: actions.into_iter().map(String::from).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Key, Modifier};

    fn combo(modifiers: &[Modifier], key: Key) -> KeyCombo {
        KeyCombo::new(modifiers.iter().copied(), key)
    }

    #[test]
    fn test_absent_key_never_conflicts() {
        let registry = ShortcutRegistry::new();
        let key = combo(&[Modifier::Ctrl], Key::Char('k'));
        assert!(!would_conflict(&registry, &key, "anything"));
    }

    #[test]
    fn test_same_action_is_not_a_conflict() {
        let key = combo(&[Modifier::Ctrl], Key::Char('k'));
        let registry = ShortcutRegistry::from_bindings([(
            key.clone(),
            ShortcutBinding::new("open-search", "Search"),
        )]);

        assert!(!would_conflict(&registry, &key, "open-search"));
    }

    #[test]
    fn test_different_action_is_a_conflict() {
        let key = combo(&[Modifier::Ctrl], Key::Char('k'));
        let registry = ShortcutRegistry::from_bindings([(
            key.clone(),
            ShortcutBinding::new("open-search", "Search"),
        )]);

        assert!(would_conflict(&registry, &key, "open-notes"));
    }

    #[test]
    fn test_find_conflicts_reports_all_claimants() {
        let key = combo(&[Modifier::Ctrl], Key::Char('k'));
        let other = combo(&[Modifier::Ctrl], Key::Char('j'));
        let bindings = vec![
            (key.clone(), ShortcutBinding::new("open-search", "Search")),
            (key.clone(), ShortcutBinding::new("open-notes", "Notes")),
            (other, ShortcutBinding::new("open-roadmap", "Roadmap")),
        ];

        let conflicts = find_conflicts(&bindings);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].key, key);
        assert_eq!(conflicts[0].actions, vec!["open-search", "open-notes"]);
    }

    #[test]
    fn test_duplicate_same_action_is_not_reported() {
        let key = combo(&[Modifier::Ctrl], Key::Char('k'));
        let bindings = vec![
            (key.clone(), ShortcutBinding::new("open-search", "Search")),
            (key, ShortcutBinding::new("open-search", "Search again")),
        ];

        assert!(find_conflicts(&bindings).is_empty());
    }
}
