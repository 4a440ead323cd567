//! Document arena and the shared [`Dom`] handle.
//!
//! [`Document`] is a plain tree of [`DomNode`]s keyed by [`NodeId`]. Nodes are
//! never freed while the document lives; detaching a node only unlinks it, so
//! ids held by bindings stay valid.
//!
//! [`Dom`] wraps a document in `Rc<RefCell<..>>` so bindings can write into it
//! from change callbacks. Borrows are kept short: event dispatch snapshots the
//! matching listeners and releases the borrow before calling them, so a
//! listener may freely write back into the document.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use vivo_carton::String;

use crate::event::{Event, Listener, ListenerFn, ListenerId};
use crate::node::{Attribute, DomNode, ElementData, NodeId, NodeKind};
use crate::selector::Selector;

/// A tree of DOM nodes.
#[derive(Debug)]
pub struct Document {
    /// All nodes by ID
    nodes: FxHashMap<NodeId, DomNode>,
    /// Listeners per target node
    listeners: FxHashMap<NodeId, Vec<Listener>>,
    /// Document root node ID
    root: NodeId,
    /// Next available node ID
    next_id: NodeId,
    /// Next available listener ID
    next_listener_id: ListenerId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with only its root node.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: FxHashMap::default(),
            listeners: FxHashMap::default(),
            root: 0,
            next_id: 0,
            next_listener_id: 0,
        };
        doc.root = doc.insert(NodeKind::Document);
        doc
    }

    /// Get the document root node ID.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, DomNode::new(id, kind));
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert(NodeKind::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.insert(NodeKind::Text(content.into()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.insert(NodeKind::Comment(content.into()))
    }

    /// Create a detached document fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.insert(NodeKind::Fragment)
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DomNode> {
        self.nodes.get_mut(&id)
    }

    /// Get node count, including detached nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Child IDs of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.nodes
            .get(&id)
            .and_then(DomNode::element)
            .map(|el| el.tag.as_str())
    }

    /// Attributes of an element node, in source order.
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        self.nodes
            .get(&id)
            .and_then(DomNode::element)
            .map(|el| el.attrs.as_slice())
            .unwrap_or(&[])
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(&id)
            .and_then(DomNode::element)
            .and_then(|el| el.attr(name))
    }

    /// Set an attribute, replacing an existing one of the same name in place.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.nodes.get_mut(&id).and_then(DomNode::element_mut) {
            match el.attrs.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.value = value.into(),
                None => el.attrs.push(Attribute::new(name, value)),
            }
        }
    }

    /// Unlink a node from its parent. The node and its subtree stay alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent_id) = self.nodes.get_mut(&id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.remove_child(id);
        }
    }

    /// Append a child to a parent node, moving it out of its previous parent
    /// first. Appending a fragment moves the fragment's children instead and
    /// leaves the fragment empty.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        if parent_id == child_id || !self.nodes.contains_key(&parent_id) {
            return;
        }
        let Some(child) = self.nodes.get(&child_id) else {
            return;
        };

        if matches!(child.kind, NodeKind::Fragment) {
            let moved: Vec<NodeId> = child.children.to_vec();
            for grandchild in moved {
                self.append_child(parent_id, grandchild);
            }
            return;
        }

        self.detach(child_id);
        if let Some(child) = self.nodes.get_mut(&child_id) {
            child.parent = Some(parent_id);
        }
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.push(child_id);
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved: Vec<NodeId> = self.children(from).to_vec();
        for child in moved {
            self.append_child(to, child);
        }
    }

    /// Concatenated text of a node and its descendants. Comments are skipped
    /// unless the node itself is a comment.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::default();
        match self.nodes.get(&id).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) | Some(NodeKind::Comment(text)) => out.push_str(text),
            Some(_) => self.collect_text(id, &mut out),
            None => {}
        }
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            match self.nodes.get(&child).map(|n| &n.kind) {
                Some(NodeKind::Text(text)) => out.push_str(text),
                Some(NodeKind::Comment(_)) | None => {}
                Some(_) => self.collect_text(child, out),
            }
        }
    }

    /// Set the text content of a node.
    ///
    /// Text and comment nodes have their data replaced. Any other node loses
    /// all of its children and, unless `text` is empty, gets a single new text
    /// child.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        match self.nodes.get_mut(&id).map(|n| &mut n.kind) {
            Some(NodeKind::Text(data)) | Some(NodeKind::Comment(data)) => {
                *data = text.into();
                return;
            }
            Some(_) => {}
            None => return,
        }

        let old: Vec<NodeId> = self.children(id).to_vec();
        for child in old {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_id = self.create_text(text);
            self.append_child(id, text_id);
        }
    }

    /// Displayed value of a form control. Falls back to the `value`
    /// attribute, then to the empty string.
    pub fn value(&self, id: NodeId) -> String {
        self.nodes
            .get(&id)
            .and_then(DomNode::element)
            .map(|el| {
                el.value
                    .clone()
                    .or_else(|| el.attr("value").map(String::from))
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Write the displayed value of a form control.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(el) = self.nodes.get_mut(&id).and_then(DomNode::element_mut) {
            el.value = Some(value.into());
        }
    }

    /// Register a listener for `event` on `target`.
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event: &str,
        callback: ListenerFn,
    ) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.entry(target).or_default().push(Listener {
            id,
            event: event.into(),
            callback,
        });
        id
    }

    /// Remove a listener by ID. Returns whether it was registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        for list in self.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|l| l.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Number of listeners registered on a node.
    pub fn listener_count(&self, target: NodeId) -> usize {
        self.listeners.get(&target).map_or(0, Vec::len)
    }

    /// Snapshot the callbacks registered for `event` on `target`.
    pub fn listeners_for(&self, target: NodeId, event: &str) -> Vec<ListenerFn> {
        self.listeners
            .get(&target)
            .map(|list| {
                list.iter()
                    .filter(|l| l.event == event)
                    .map(|l| Rc::clone(&l.callback))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find the first element matching `selector` in the attached tree, in
    /// document order.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_in(self.root, selector)
    }

    /// Find the first descendant of `scope` matching `selector`.
    pub fn query_selector_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(&id)?;
            if node.element().is_some_and(|el| selector.matches(el)) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Collect a node and all its descendants in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }
}

/// Shared handle to a [`Document`].
///
/// Cloning a `Dom` creates a new handle to the **same** document.
#[derive(Clone, Default)]
pub struct Dom {
    inner: Rc<RefCell<Document>>,
}

impl std::fmt::Debug for Dom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.inner.borrow();
        f.debug_struct("Dom")
            .field("node_count", &doc.node_count())
            .finish()
    }
}

impl Dom {
    pub fn new() -> Self {
        Self::from_document(Document::new())
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            inner: Rc::new(RefCell::new(document)),
        }
    }

    /// Access the document by reference.
    ///
    /// # Panics
    ///
    /// Panics if called from inside [`Dom::with_mut`].
    pub fn with<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Access the document mutably.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside another `with`/`with_mut`.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub fn set_text_content(&self, id: NodeId, text: &str) {
        self.with_mut(|doc| doc.set_text_content(id, text));
    }

    pub fn set_value(&self, id: NodeId, value: &str) {
        self.with_mut(|doc| doc.set_value(id, value));
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.with(|doc| doc.text_content(id))
    }

    pub fn value(&self, id: NodeId) -> String {
        self.with(|doc| doc.value(id))
    }

    pub fn add_event_listener(
        &self,
        target: NodeId,
        event: &str,
        callback: impl Fn(&Event) + 'static,
    ) -> ListenerId {
        self.with_mut(|doc| doc.add_event_listener(target, event, Rc::new(callback)))
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.with_mut(|doc| doc.remove_event_listener(id))
    }

    /// Dispatch `event` at `target`. Listeners run in registration order with
    /// the document unborrowed. Returns the number of listeners invoked.
    pub fn dispatch_event(&self, target: NodeId, event: &str) -> usize {
        let (callbacks, target_value) = self.with(|doc| {
            let value = doc
                .get(target)
                .and_then(DomNode::element)
                .map(|_| doc.value(target));
            (doc.listeners_for(target, event), value)
        });

        let event = Event::new(event, target).with_target_value(target_value);
        for callback in &callbacks {
            callback(&event);
        }
        callbacks.len()
    }

    /// Simulate a user typing `value` into a form control: the displayed
    /// value changes, then an `input` event is dispatched.
    pub fn input(&self, target: NodeId, value: &str) -> usize {
        self.set_value(target, value);
        self.dispatch_event(target, "input")
    }
}
