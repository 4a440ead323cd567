//! HTML serialization.

use vivo_carton::{escape_attr, escape_html, is_void_tag, String};

use crate::document::Document;
use crate::node::{NodeId, NodeKind};

impl Document {
    /// Serialize a node and its subtree. Fragments and the document root
    /// serialize as their children.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::default();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize the children of a node.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::default();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeKind::Document | NodeKind::Fragment => {
                for &child in &node.children {
                    self.write_node(child, out);
                }
            }
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for attr in &el.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(&attr.value));
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void_tag(&el.tag) {
                    return;
                }
                for &child in &node.children {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}
