//! # vivo
//!
//! Vivo - A small reactive view-binding engine in Rust.
//!
//! Data goes in as plain JSON, gets observed, and the directives of a mounted
//! template keep the DOM in step with it. This crate ties the pieces together
//! behind [`App`] and re-exports the sub-crates.
//!
//! ```
//! use vivo::{parse_document, App, AppOptions, Dom};
//!
//! let (doc, _) = parse_document(r#"<div id="app"><input v-model="msg"><p>{{ msg }}</p></div>"#);
//! let dom = Dom::from_document(doc);
//! let app = App::mount(
//!     &dom,
//!     AppOptions::new("#app").data(serde_json::json!({ "msg": "hi" })).unwrap(),
//! )
//! .unwrap();
//!
//! app.set("msg", "hello");
//! assert_eq!(app.html(), r#"<input v-model="msg"><p>hello</p>"#);
//! ```
//!
//! ## Crates
//!
//! - [`carton`] - Shared string and collection helpers
//! - [`relief`] - DOM document, events and errors
//! - [`armature`] - Template parser
//! - [`pulse`] - Reactive store and watchers
//! - [`atelier`] - Template compiler and binding directives

mod app;
mod error;
pub mod render;

/// Shared string and collection helpers.
pub use vivo_carton as carton;

/// DOM document, events and errors.
pub use vivo_relief as relief;

/// Template parser.
pub use vivo_armature as armature;

/// Reactive store and watchers.
pub use vivo_pulse as pulse;

/// Template compiler and binding directives.
pub use vivo_atelier as atelier;

pub use app::{App, AppOptions};
pub use error::VivoError;
pub use render::{parse_assignment, render_template, RenderOptions, Rendered};

pub use vivo_armature::{parse_document, parse_fragment};
pub use vivo_atelier::{CompilerOptions, Instance, MethodTable, MountTarget};
pub use vivo_pulse::{ReactiveObject, Value};
pub use vivo_relief::{Dom, Event, NodeId};
