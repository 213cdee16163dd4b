//! Shortcut binding and conflict resolution
//!
//! This crate is the keyboard-shortcut subsystem of the app:
//! - A persistent registry of key-combination → action bindings with
//!   conflict detection and rename-safe rebinding
//! - A capture state machine for recording a new combination from live
//!   keyboard input
//! - A global key listener that normalizes key-downs, stays out of the way
//!   while the user is typing, and dispatches bound actions
//!
//! The durable store backing the registry lives in `quickbind-storage`.

pub mod capture;
pub mod category;
pub mod conflict;
pub mod defaults;
pub mod error;
pub mod listener;
pub mod models;
pub mod registry;
pub mod store;

// Re-export public types
pub use capture::{CaptureSession, CaptureState};
pub use category::Category;
pub use conflict::{find_conflicts, would_conflict, Conflict};
pub use defaults::default_bindings;
pub use error::{CaptureError, DispatchError, ParseError, RejectReason, StoreError};
pub use listener::{ActionSink, Dispatch, FnSink, KeyListener};
pub use models::{FocusTarget, Key, KeyCombo, KeyPress, Modifier, ShortcutBinding};
pub use registry::ShortcutRegistry;
pub use store::ShortcutStore;
