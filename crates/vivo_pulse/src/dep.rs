//! Per-property dependency sets.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collector;
use crate::watcher::Watcher;

/// The watchers interested in one reactive property.
///
/// Cloning a `Dep` creates a new handle to the **same** set. Entries keep
/// insertion order and are not deduplicated: a watcher that reads a property
/// twice during its bootstrap is notified twice.
#[derive(Clone, Default)]
pub struct Dep {
    subscribers: Rc<RefCell<Vec<Rc<Watcher>>>>,
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dep")
            .field("subscriber_count", &self.len())
            .finish()
    }
}

impl Dep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the active collector, if any.
    pub fn depend(&self) {
        if let Some(watcher) = collector::current() {
            tracing::trace!(watcher = watcher.id(), expr = watcher.expr(), "collected dependency");
            watcher.track(self);
            self.add_watcher(watcher);
        }
    }

    /// Append a watcher unconditionally.
    pub fn add_watcher(&self, watcher: Rc<Watcher>) {
        self.subscribers.borrow_mut().push(watcher);
    }

    /// Remove every entry for `watcher`. Returns how many were removed.
    pub fn remove_watcher(&self, watcher: &Watcher) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|w| w.id() != watcher.id());
        before - subscribers.len()
    }

    /// Update every watcher in insertion order.
    ///
    /// The list is snapshotted first, so watchers may subscribe or stop
    /// while being notified.
    pub fn notify(&self) {
        let subscribers: Vec<Rc<Watcher>> = self.subscribers.borrow().clone();
        tracing::trace!(count = subscribers.len(), "notifying dependency set");
        for watcher in subscribers {
            watcher.update();
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Number of entries belonging to `watcher`.
    pub fn count_of(&self, watcher: &Watcher) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|w| w.id() == watcher.id())
            .count()
    }

    pub fn ptr_eq(&self, other: &Dep) -> bool {
        Rc::ptr_eq(&self.subscribers, &other.subscribers)
    }
}
