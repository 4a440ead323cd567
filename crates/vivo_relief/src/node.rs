//! DOM node definitions.

use serde::{Deserialize, Serialize};
use vivo_carton::{SmallVec, String};

/// Unique identifier for DOM nodes.
pub type NodeId = u64;

/// Node type discriminant, numbered like the DOM's `nodeType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    Fragment = 11,
}

/// A single `name="value"` attribute, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Element payload.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    pub tag: String,
    pub attrs: Vec<Attribute>,
    /// Live form-control value. `None` until written; reads then fall back
    /// to the `value` attribute.
    pub value: Option<String>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            value: None,
        }
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Node content.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Fragment,
    Element(ElementData),
    Text(String),
    Comment(String),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Document => NodeType::Document,
            NodeKind::Fragment => NodeType::Fragment,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
        }
    }
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub struct DomNode {
    /// Unique node ID
    pub id: NodeId,
    /// Node type and content
    pub kind: NodeKind,
    /// Parent node, `None` while detached
    pub parent: Option<NodeId>,
    /// Child node IDs in document order
    pub children: SmallVec<[NodeId; 4]>,
}

impl DomNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Remove a child.
    pub fn remove_child(&mut self, child_id: NodeId) {
        if let Some(pos) = self.children.iter().position(|&id| id == child_id) {
            self.children.remove(pos);
        }
    }
}
