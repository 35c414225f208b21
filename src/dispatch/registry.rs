//! Handler registry.
//!
//! Subscriptions live behind `Arc` so a dispatch pass can iterate a cheap
//! snapshot while handlers register and unregister freely. Unregistering
//! clears the subscription's active flag; a pass skips inactive entries it
//! has not reached yet, and never sees entries added after it started.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;

use super::filter::Predicate;

/// Handler callback. Handlers get the whole bot so they can mutate state,
/// send lines, dispatch follow-up events and (un)register handlers.
pub type Handler = Arc<dyn Fn(&mut Bot, &Event) -> HandlerResult + Send + Sync>;

/// Opaque handle returned by [`Registry::register`]. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// One registered handler.
pub struct Subscription {
    pub(crate) id: HandlerId,
    pub(crate) predicate: Predicate,
    pub(crate) handler: Handler,
    active: AtomicBool,
}

impl Subscription {
    #[inline]
    pub fn id(&self) -> HandlerId {
        self.id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("predicate", &self.predicate)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Normalize a command key for lookup.
#[inline]
pub fn normalize(command: &str) -> String {
    command.to_ascii_uppercase()
}

/// Per-command ordered subscription lists.
#[derive(Default)]
pub struct Registry {
    next_id: u64,
    handlers: HashMap<String, Vec<Arc<Subscription>>>,
    keys: HashMap<HandlerId, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `command`.
    pub fn register(&mut self, command: &str, predicate: Predicate, handler: Handler) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        let key = normalize(command);

        let sub = Arc::new(Subscription {
            id,
            predicate,
            handler,
            active: AtomicBool::new(true),
        });
        self.handlers.entry(key.clone()).or_default().push(sub);
        self.keys.insert(id, key);
        id
    }

    /// Remove a handler. Returns `false` when the id is unknown or was
    /// already removed.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let Some(key) = self.keys.remove(&id) else {
            return false;
        };
        if let Some(list) = self.handlers.get_mut(&key) {
            if let Some(pos) = list.iter().position(|s| s.id == id) {
                let sub = list.remove(pos);
                sub.active.store(false, Ordering::Release);
            }
            if list.is_empty() {
                self.handlers.remove(&key);
            }
        }
        true
    }

    /// Current subscriptions for a command, in registration order.
    pub fn snapshot(&self, command: &str) -> Vec<Arc<Subscription>> {
        self.handlers
            .get(&normalize(command))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of live handlers for a command.
    pub fn count(&self, command: &str) -> usize {
        self.handlers
            .get(&normalize(command))
            .map_or(0, Vec::len)
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Total number of live handlers.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("next_id", &self.next_id)
            .field("commands", &self.handlers.len())
            .field("handlers", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler {
        Arc::new(|_: &mut Bot, _: &Event| -> HandlerResult { Ok(()) })
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut reg = Registry::new();
        reg.register("join", Predicate::Always, noop());
        assert_eq!(reg.count("JOIN"), 1);
        assert_eq!(reg.count("Join"), 1);
        assert_eq!(reg.snapshot("JOIN").len(), 1);
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut reg = Registry::new();
        let a = reg.register("X", Predicate::Always, noop());
        let b = reg.register("X", Predicate::Always, noop());
        assert!(reg.unregister(a));
        let c = reg.register("X", Predicate::Always, noop());
        assert!(a < b && b < c);
        let order: Vec<_> = reg.snapshot("X").iter().map(|s| s.id()).collect();
        assert_eq!(order, vec![b, c]);
    }

    #[test]
    fn test_unregister_twice() {
        let mut reg = Registry::new();
        let a = reg.register("X", Predicate::Always, noop());
        assert!(reg.unregister(a));
        assert!(!reg.unregister(a));
        assert!(reg.is_empty());
        assert_eq!(reg.count("X"), 0);
    }

    #[test]
    fn test_snapshot_sees_deactivation() {
        let mut reg = Registry::new();
        let a = reg.register("X", Predicate::Always, noop());
        let snap = reg.snapshot("X");
        assert!(snap[0].is_active());
        reg.unregister(a);
        assert!(!snap[0].is_active());
    }
}
