//! Global key listener: normalizes key-downs and dispatches bound actions
//!
//! The listener holds the shortcut store as a capability and re-reads it on
//! every event, so a rebinding takes effect on the very next key-down with
//! no cache to go stale. Key auto-repeat is handled naturally: every
//! delivered key-down is processed independently, so a held key refires its
//! action at the platform's repeat rate.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::models::KeyPress;
use crate::store::ShortcutStore;

/// Receiver of fired action identifiers
pub trait ActionSink: Send + Sync {
    fn dispatch(&self, action: &str) -> Result<(), DispatchError>;
}

/// Adapter turning a closure into an [`ActionSink`]
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: Fn(&str) -> Result<(), DispatchError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        FnSink(f)
    }
}

impl<F> ActionSink for FnSink<F>
where
    F: Fn(&str) -> Result<(), DispatchError> + Send + Sync,
{
    fn dispatch(&self, action: &str) -> Result<(), DispatchError> {
        (self.0)(action)
    }
}

/// What the listener did with one key-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Focus was inside a text-editing control; shortcuts never fire while
    /// the user is typing prose
    Suppressed,
    /// The listener-active flag is off
    Inactive,
    /// No binding matched; the event passes through unmodified
    NoMatch,
    /// A binding fired. `sink_ok` is false when the sink reported a
    /// failure (already logged); the listener itself stays registered.
    Fired { action: String, sink_ok: bool },
}

impl Dispatch {
    /// Whether the embedder should cancel the platform's default behavior
    /// for this key-down
    pub fn prevent_default(&self) -> bool {
        matches!(self, Dispatch::Fired { .. })
    }
}

/// Process-wide key-down observer
pub struct KeyListener {
    store: Arc<Mutex<ShortcutStore>>,
    sink: Arc<dyn ActionSink>,
}

impl KeyListener {
    pub fn new(store: Arc<Mutex<ShortcutStore>>, sink: Arc<dyn ActionSink>) -> Self {
        KeyListener { store, sink }
    }

    /// Handle one physical key-down
    ///
    /// The bound action is emitted to the sink exactly once per call.
    /// Suppression is checked before the active flag: typing into a text
    /// control never dispatches, whatever the flag says.
    pub fn on_key_down(&self, press: &KeyPress) -> Dispatch {
        if press.target.is_text_editing() {
            return Dispatch::Suppressed;
        }

        let action = {
            let store = self.store.lock();

            if !store.is_active() {
                return Dispatch::Inactive;
            }

            let Some(combo) = press.combo() else {
                return Dispatch::NoMatch;
            };

            match store.registry().get(&combo) {
                Some(binding) => {
                    debug!(key = %combo, action = %binding.action, "shortcut matched");
                    binding.action.clone()
                }
                None => return Dispatch::NoMatch,
            }
        };
        // Lock released before the sink runs: a handler may re-enter the
        // store (e.g. toggle-shortcuts itself).

        let sink_ok = match self.sink.dispatch(&action) {
            Ok(()) => true,
            Err(e) => {
                warn!(action = %action, error = %e, "action sink failed");
                false
            }
        };

        Dispatch::Fired { action, sink_ok }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FocusTarget, Key, KeyCombo, Modifier};
    use quickbind_storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        fired: Mutex<Vec<String>>,
        failures: AtomicUsize,
        fail: bool,
    }

    impl CountingSink {
        fn new(fail: bool) -> Self {
            CountingSink {
                fired: Mutex::new(Vec::new()),
                failures: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl ActionSink for CountingSink {
        fn dispatch(&self, action: &str) -> Result<(), DispatchError> {
            self.fired.lock().push(action.to_string());
            if self.fail {
                self.failures.fetch_add(1, Ordering::SeqCst);
                Err(DispatchError("handler exploded".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn listener_with_defaults(fail: bool) -> (Arc<Mutex<ShortcutStore>>, Arc<CountingSink>, KeyListener) {
        let store = Arc::new(Mutex::new(
            ShortcutStore::load(Box::new(MemoryStore::new())).unwrap(),
        ));
        let sink = Arc::new(CountingSink::new(fail));
        let listener = KeyListener::new(store.clone(), sink.clone());
        (store, sink, listener)
    }

    fn search_press() -> KeyPress {
        KeyPress::with(&[Modifier::Ctrl], Key::Char('k'))
    }

    #[test]
    fn test_bound_combo_fires_action_once() {
        let (_, sink, listener) = listener_with_defaults(false);

        let outcome = listener.on_key_down(&search_press());

        assert_eq!(
            outcome,
            Dispatch::Fired {
                action: "open-search".to_string(),
                sink_ok: true
            }
        );
        assert!(outcome.prevent_default());
        assert_eq!(*sink.fired.lock(), ["open-search"]);
    }

    #[test]
    fn test_unbound_combo_passes_through() {
        let (_, sink, listener) = listener_with_defaults(false);

        let press = KeyPress::with(&[Modifier::Ctrl, Modifier::Alt], Key::Char('q'));
        let outcome = listener.on_key_down(&press);

        assert_eq!(outcome, Dispatch::NoMatch);
        assert!(!outcome.prevent_default());
        assert!(sink.fired.lock().is_empty());
    }

    #[test]
    fn test_inactive_listener_ignores_bound_combos() {
        let (store, sink, listener) = listener_with_defaults(false);
        store.lock().toggle_active().unwrap();

        assert_eq!(listener.on_key_down(&search_press()), Dispatch::Inactive);
        assert!(sink.fired.lock().is_empty());
    }

    #[test]
    fn test_text_targets_suppress_even_when_active() {
        let (_, sink, listener) = listener_with_defaults(false);

        for target in [
            FocusTarget::TextInput,
            FocusTarget::TextArea,
            FocusTarget::ContentEditable,
        ] {
            let press = search_press().targeting(target);
            assert_eq!(listener.on_key_down(&press), Dispatch::Suppressed);
        }
        assert!(sink.fired.lock().is_empty());
    }

    #[test]
    fn test_text_targets_suppress_when_inactive_too() {
        let (store, _, listener) = listener_with_defaults(false);
        store.lock().toggle_active().unwrap();

        let press = search_press().targeting(FocusTarget::TextArea);
        assert_eq!(listener.on_key_down(&press), Dispatch::Suppressed);
    }

    #[test]
    fn test_pure_modifier_press_never_matches() {
        let (_, sink, listener) = listener_with_defaults(false);

        let press = KeyPress::modifier_only(&[Modifier::Ctrl]);
        assert_eq!(listener.on_key_down(&press), Dispatch::NoMatch);
        assert!(sink.fired.lock().is_empty());
    }

    #[test]
    fn test_sink_failure_is_contained() {
        let (_, sink, listener) = listener_with_defaults(true);

        let outcome = listener.on_key_down(&search_press());
        assert_eq!(
            outcome,
            Dispatch::Fired {
                action: "open-search".to_string(),
                sink_ok: false
            }
        );

        // The listener survives and keeps dispatching
        listener.on_key_down(&search_press());
        assert_eq!(sink.failures.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listener_sees_rebinding_immediately() {
        let (store, sink, listener) = listener_with_defaults(false);

        let old = KeyCombo::new([Modifier::Ctrl], Key::Char('k'));
        let new = KeyCombo::new([Modifier::Ctrl, Modifier::Shift], Key::Char('p'));
        store
            .lock()
            .upsert(Some(&old), new, "open-search", "Open the search palette")
            .unwrap();

        assert_eq!(listener.on_key_down(&search_press()), Dispatch::NoMatch);

        let press = KeyPress::with(&[Modifier::Ctrl, Modifier::Shift], Key::Char('p'));
        assert!(matches!(
            listener.on_key_down(&press),
            Dispatch::Fired { .. }
        ));
        assert_eq!(*sink.fired.lock(), ["open-search"]);
    }
}
