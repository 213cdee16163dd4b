//! Capture state machine for recording a new key combination
//!
//! Drives the "press the new shortcut now" interaction: the session starts
//! idle, enters capturing when the user begins editing a binding, and
//! resolves on the first key-down that carries a base key. A combination
//! must include at least one modifier; a bare key-down rejects the capture
//! so plain typing can never become a shortcut.
//!
//! Retry contract: after any rejection (a modifier-less press or a commit
//! conflict) the session stays rejected until [`CaptureSession::begin`] is
//! called again. It never re-enters capturing on its own.

use crate::error::{CaptureError, RejectReason, StoreError};
use crate::models::{KeyCombo, KeyPress, Modifier};
use crate::store::ShortcutStore;

/// Where a capture session currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    /// Recording; `pending` mirrors the modifiers held so far for display
    Capturing {
        editing: KeyCombo,
        pending: Vec<Modifier>,
    },
    /// A combination was recorded and awaits [`CaptureSession::commit`]
    Resolved { editing: KeyCombo, combo: KeyCombo },
    Rejected { reason: RejectReason },
}

/// One rebinding interaction, from "start editing" to commit or cancel
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    /// Create an idle session
    pub fn new() -> Self {
        CaptureSession::default()
    }

    /// The current state
    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Whether the next key-down will be captured
    pub fn is_recording(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    /// The rejection reason, if the last capture was rejected
    pub fn last_error(&self) -> Option<&RejectReason> {
        match &self.state {
            CaptureState::Rejected { reason } => Some(reason),
            _ => None,
        }
    }

    /// Start recording a replacement for `editing`; allowed from any state
    pub fn begin(&mut self, editing: KeyCombo) {
        self.state = CaptureState::Capturing {
            editing,
            pending: Vec::new(),
        };
    }

    /// Abandon the session with no side effects; allowed from any state
    pub fn cancel(&mut self) {
        self.state = CaptureState::Idle;
    }

    /// Feed one physical key-down into the session
    ///
    /// Ignored unless capturing. A pure-modifier press keeps the session
    /// capturing (updating the pending display); a base key with no
    /// modifiers rejects; a base key with at least one modifier resolves.
    pub fn key_down(&mut self, press: &KeyPress) -> &CaptureState {
        let CaptureState::Capturing { editing, .. } = &self.state else {
            return &self.state;
        };

        match press.combo() {
            None => {
                // Modifier-only press: nothing to resolve yet
                let editing = editing.clone();
                self.state = CaptureState::Capturing {
                    editing,
                    pending: press.modifiers(),
                };
            }
            Some(combo) if !combo.has_modifiers() => {
                self.state = CaptureState::Rejected {
                    reason: RejectReason::NeedsModifier,
                };
            }
            Some(combo) => {
                let editing = editing.clone();
                self.state = CaptureState::Resolved { editing, combo };
            }
        }

        &self.state
    }

    /// Hand the resolved combination to the store
    ///
    /// On success the session returns to idle and the new combination is
    /// returned. On a conflict the session moves to rejected with a
    /// user-facing reason naming the offending combination. On a
    /// persistence failure the binding has been applied in memory; the
    /// session returns to idle and the error propagates.
    pub fn commit(
        &mut self,
        store: &mut ShortcutStore,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<KeyCombo, CaptureError> {
        let CaptureState::Resolved { editing, combo } = &self.state else {
            return Err(CaptureError::NotResolved);
        };
        let (editing, combo) = (editing.clone(), combo.clone());

        match store.upsert(Some(&editing), combo.clone(), action, description) {
            Ok(()) => {
                self.state = CaptureState::Idle;
                Ok(combo)
            }
            Err(StoreError::Conflict { key, action }) => {
                self.state = CaptureState::Rejected {
                    reason: RejectReason::Conflict {
                        key: key.clone(),
                        action: action.clone(),
                    },
                };
                Err(CaptureError::Store(StoreError::Conflict { key, action }))
            }
            Err(other) => {
                self.state = CaptureState::Idle;
                Err(CaptureError::Store(other))
            }
        }
    }
}
