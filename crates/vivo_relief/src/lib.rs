//! Relief - The sculptured DOM surface that Vivo binds into.
//!
//! This crate owns the document model the rest of Vivo writes to: an arena of
//! nodes addressed by [`NodeId`], the event listener registry, and HTML
//! serialization. It also defines the error codes shared by the markup parser
//! and the template compiler.
//!
//! # Example
//!
//! ```
//! use vivo_relief::Dom;
//!
//! let dom = Dom::new();
//! let div = dom.with_mut(|doc| {
//!     let div = doc.create_element("div");
//!     let text = doc.create_text("hello");
//!     doc.append_child(div, text);
//!     let root = doc.root();
//!     doc.append_child(root, div);
//!     div
//! });
//! assert_eq!(dom.with(|doc| doc.to_html(div)), "<div>hello</div>");
//! ```

pub mod document;
pub mod errors;
pub mod event;
pub mod node;
pub mod selector;
mod serialize;

pub use document::{Document, Dom};
pub use errors::{CompilerError, ErrorCode, Position};
pub use event::{Event, Listener, ListenerId};
pub use node::{Attribute, DomNode, ElementData, NodeId, NodeKind, NodeType};
pub use selector::Selector;
