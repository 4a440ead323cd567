//! DOM events and listeners.

use std::rc::Rc;

use vivo_carton::String;

use crate::node::NodeId;

/// Identifier handed out when a listener is registered.
pub type ListenerId = u64;

/// Callback invoked on dispatch.
pub type ListenerFn = Rc<dyn Fn(&Event)>;

/// An event delivered to listeners.
///
/// `target_value` is a snapshot of the target's form-control value taken at
/// dispatch time, so listeners can read it without touching the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: String,
    target: NodeId,
    target_value: Option<String>,
}

impl Event {
    pub fn new(kind: impl Into<String>, target: NodeId) -> Self {
        Self {
            kind: kind.into(),
            target,
            target_value: None,
        }
    }

    pub fn with_target_value(mut self, value: Option<String>) -> Self {
        self.target_value = value;
        self
    }

    /// Event name, e.g. `click` or `input`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn target_value(&self) -> Option<&str> {
        self.target_value.as_deref()
    }
}

/// A registered listener.
#[derive(Clone)]
pub struct Listener {
    pub id: ListenerId,
    pub event: String,
    pub callback: ListenerFn,
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}
