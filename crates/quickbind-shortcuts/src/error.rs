//! Error types for shortcut operations

use thiserror::Error;

use crate::models::KeyCombo;
use quickbind_storage::StorageError;

/// Errors that can occur while parsing a key-combination string
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty key combination")]
    Empty,

    #[error("unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("function key must be f1-f12, got: {0}")]
    FunctionKeyRange(String),
}

/// Errors that can occur in the shortcut store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested combination is already owned by another action.
    /// The registry is left untouched.
    #[error("{key} is already bound to {action}")]
    Conflict { key: KeyCombo, action: String },

    /// The durable write failed. The in-memory mutation has already been
    /// applied; callers must report this rather than pretend success,
    /// because the state that survives a reload now differs.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode shortcut record: {0}")]
    Encode(String),

    #[error("stored shortcut record is corrupt: {0}")]
    Corrupt(String),

    #[error("unsupported shortcut record version: {0}")]
    UnsupportedVersion(u32),
}

/// Why a capture session ended up in the rejected state
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A combination must carry at least one modifier so shortcuts stay
    /// distinguishable from plain typing.
    #[error("needs a modifier")]
    NeedsModifier,

    #[error("{key} is already bound to {action}")]
    Conflict { key: KeyCombo, action: String },
}

/// Errors returned when committing a capture session
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no resolved combination to commit")]
    NotResolved,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure reported by an action sink
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("action dispatch failed: {0}")]
pub struct DispatchError(pub String);
