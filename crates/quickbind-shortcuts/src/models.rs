//! Core data models for shortcut bindings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::Category;
use crate::error::ParseError;

/// Keyboard modifier
///
/// Declaration order is the canonical serialization order for combination
/// strings: `ctrl`, `alt`, `shift`, `meta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

impl Modifier {
    /// All modifiers in canonical order
    pub const ALL: [Modifier; 4] = [
        Modifier::Ctrl,
        Modifier::Alt,
        Modifier::Shift,
        Modifier::Meta,
    ];

    /// The lowercase token used in combination strings
    pub fn token(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
            Modifier::Meta => "meta",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Modifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "alt" | "option" => Ok(Modifier::Alt),
            "shift" => Ok(Modifier::Shift),
            "meta" | "cmd" | "command" | "super" => Ok(Modifier::Meta),
            _ => Err(ParseError::UnknownModifier(s.to_string())),
        }
    }
}

/// A non-modifier key token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Char(char),
    F(u8),
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::F(n) => write!(f, "f{}", n),
            Key::Enter => write!(f, "enter"),
            Key::Escape => write!(f, "escape"),
            Key::Tab => write!(f, "tab"),
            Key::Space => write!(f, "space"),
            Key::Backspace => write!(f, "backspace"),
            Key::Delete => write!(f, "delete"),
            Key::Home => write!(f, "home"),
            Key::End => write!(f, "end"),
            Key::PageUp => write!(f, "pageup"),
            Key::PageDown => write!(f, "pagedown"),
            Key::Up => write!(f, "arrowup"),
            Key::Down => write!(f, "arrowdown"),
            Key::Left => write!(f, "arrowleft"),
            Key::Right => write!(f, "arrowright"),
        }
    }
}

impl FromStr for Key {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "tab" => Ok(Key::Tab),
            "space" | " " => Ok(Key::Space),
            "backspace" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            "pageup" => Ok(Key::PageUp),
            "pagedown" => Ok(Key::PageDown),
            "up" | "arrowup" => Ok(Key::Up),
            "down" | "arrowdown" => Ok(Key::Down),
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            s if s.len() > 1 && s.starts_with('f') && s[1..].chars().all(|c| c.is_ascii_digit()) => {
                let num: u8 = s[1..]
                    .parse()
                    .map_err(|_| ParseError::FunctionKeyRange(s.to_string()))?;
                if (1..=12).contains(&num) {
                    Ok(Key::F(num))
                } else {
                    Err(ParseError::FunctionKeyRange(s.to_string()))
                }
            }
            s if s.chars().count() == 1 => Ok(Key::Char(s.chars().next().unwrap())),
            _ => Err(ParseError::UnknownKey(s.to_string())),
        }
    }
}

/// A normalized key combination: a modifier set plus exactly one base key
///
/// Construction normalizes the combination, so two combos built from the
/// same keys in any order compare equal and render the same string:
/// modifiers are sorted into canonical order and deduplicated, and character
/// keys are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCombo {
    modifiers: Vec<Modifier>,
    key: Key,
}

impl KeyCombo {
    /// Build a combination from modifiers (any order) and a base key
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: Key) -> Self {
        let mut modifiers: Vec<Modifier> = modifiers.into_iter().collect();
        modifiers.sort();
        modifiers.dedup();

        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };

        KeyCombo { modifiers, key }
    }

    /// The modifiers, in canonical order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// The base key
    pub fn key(&self) -> Key {
        self.key
    }

    /// Whether at least one modifier is held
    pub fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let parts: Vec<&str> = s.split('+').map(str::trim).collect();

        let mut modifiers = Vec::new();
        for part in &parts[..parts.len() - 1] {
            modifiers.push(Modifier::from_str(part)?);
        }

        let key = Key::from_str(parts[parts.len() - 1])?;

        Ok(KeyCombo::new(modifiers, key))
    }
}

// Combos serialize as their string form so the registry persists as a plain
// JSON object keyed by combination.
impl Serialize for KeyCombo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for KeyCombo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// What a key combination is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutBinding {
    /// Opaque action identifier consumed by the application
    pub action: String,
    /// Human-readable label for display
    pub description: String,
    /// Explicit category; display falls back to an action-string heuristic
    /// when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ShortcutBinding {
    /// Create a binding without an explicit category
    pub fn new(action: impl Into<String>, description: impl Into<String>) -> Self {
        ShortcutBinding {
            action: action.into(),
            description: description.into(),
            category: None,
        }
    }

    /// Create a binding with an explicit category
    pub fn with_category(
        action: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        ShortcutBinding {
            action: action.into(),
            description: description.into(),
            category: Some(category),
        }
    }
}

/// Kind of element focused when a key-down arrived
///
/// Text-editing targets suppress shortcut dispatch entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    TextInput,
    TextArea,
    ContentEditable,
    #[default]
    Other,
}

impl FocusTarget {
    /// Whether the user is typing prose into this target
    pub fn is_text_editing(&self) -> bool {
        !matches!(self, FocusTarget::Other)
    }
}

/// The normalized view of one physical key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// `None` when the pressed key is itself a pure modifier
    pub key: Option<Key>,
    pub target: FocusTarget,
}

impl KeyPress {
    /// A key-down with no modifiers held, focused outside any text control
    pub fn plain(key: Key) -> Self {
        KeyPress {
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            key: Some(key),
            target: FocusTarget::Other,
        }
    }

    /// A key-down with the given modifiers held
    pub fn with(modifiers: &[Modifier], key: Key) -> Self {
        let mut press = KeyPress::plain(key);
        for modifier in modifiers {
            match modifier {
                Modifier::Ctrl => press.ctrl = true,
                Modifier::Alt => press.alt = true,
                Modifier::Shift => press.shift = true,
                Modifier::Meta => press.meta = true,
            }
        }
        press
    }

    /// A pure-modifier key-down (Control, Alt, Shift or Meta in isolation)
    pub fn modifier_only(modifiers: &[Modifier]) -> Self {
        let mut press = KeyPress::with(modifiers, Key::Space);
        press.key = None;
        press
    }

    /// The same press, redirected at a different focus target
    pub fn targeting(mut self, target: FocusTarget) -> Self {
        self.target = target;
        self
    }

    /// The held modifiers, in canonical order
    pub fn modifiers(&self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        if self.ctrl {
            modifiers.push(Modifier::Ctrl);
        }
        if self.alt {
            modifiers.push(Modifier::Alt);
        }
        if self.shift {
            modifiers.push(Modifier::Shift);
        }
        if self.meta {
            modifiers.push(Modifier::Meta);
        }
        modifiers
    }

    /// Whether any modifier is held
    pub fn has_modifiers(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }

    /// Normalize this press into a combination, if it carries a base key
    ///
    /// This is the single normalization algorithm shared by capture
    /// recording and listener dispatch.
    pub fn combo(&self) -> Option<KeyCombo> {
        self.key.map(|key| KeyCombo::new(self.modifiers(), key))
    }
}
