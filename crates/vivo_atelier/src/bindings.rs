//! What a compile pass wired up.

use vivo_pulse::WatcherHandle;
use vivo_relief::{CompilerError, Dom, ListenerId};

/// Watchers, listeners and warnings produced by compiling one subtree.
#[derive(Debug, Default)]
pub struct Bindings {
    pub watchers: Vec<WatcherHandle>,
    pub listeners: Vec<ListenerId>,
    /// Non-fatal diagnostics, in the order found
    pub warnings: Vec<CompilerError>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Stop every watcher and remove every listener from `dom`.
    pub fn release(&mut self, dom: &Dom) {
        for watcher in self.watchers.drain(..) {
            watcher.stop();
        }
        for listener in self.listeners.drain(..) {
            dom.remove_event_listener(listener);
        }
    }
}
