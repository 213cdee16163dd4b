//! Built-in default shortcut set
//!
//! Baked in as code rather than a bundled asset: reset-to-defaults must
//! work with nothing on disk.

use crate::models::{Key, KeyCombo, Modifier, ShortcutBinding};

/// The stock bindings the app ships with
pub fn default_bindings() -> Vec<(KeyCombo, ShortcutBinding)> {
    use Modifier::{Ctrl, Shift};

    vec![
        (
            KeyCombo::new([Ctrl], Key::Char('k')),
            ShortcutBinding::new("open-search", "Open the search palette"),
        ),
        (
            KeyCombo::new([Ctrl], Key::Char('j')),
            ShortcutBinding::new("open-notes", "Open the notes panel"),
        ),
        (
            KeyCombo::new([Ctrl, Shift], Key::Char('r')),
            ShortcutBinding::new("open-roadmap", "Open the learning roadmap"),
        ),
        (
            KeyCombo::new([Ctrl, Shift], Key::Char('u')),
            ShortcutBinding::new("open-profile", "Open the student profile"),
        ),
        (
            KeyCombo::new([Ctrl], Key::Char('b')),
            ShortcutBinding::new("toggle-sidebar", "Show or hide the sidebar"),
        ),
        (
            KeyCombo::new([Ctrl, Shift], Key::Char('t')),
            ShortcutBinding::new("toggle-tutor", "Show or hide the AI tutor"),
        ),
        (
            KeyCombo::new([Ctrl, Shift], Key::Char('g')),
            ShortcutBinding::new("generate-braille", "Generate braille output"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::find_conflicts;

    #[test]
    fn test_defaults_are_conflict_free() {
        assert!(find_conflicts(&default_bindings()).is_empty());
    }

    #[test]
    fn test_defaults_all_require_a_modifier() {
        for (key, binding) in default_bindings() {
            assert!(
                key.has_modifiers(),
                "{} ({}) has no modifier",
                key,
                binding.action
            );
        }
    }

    #[test]
    fn test_defaults_include_search_and_notes() {
        let defaults = default_bindings();
        let actions: Vec<&str> = defaults.iter().map(|(_, b)| b.action.as_str()).collect();
        assert!(actions.contains(&"open-search"));
        assert!(actions.contains(&"open-notes"));
    }
}
