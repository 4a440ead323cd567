//! # vivo_atelier
//!
//! Atelier - The workshop where Vivo templates become live bindings.
//!
//! [`compile`] walks the children of a mount target once. Element attributes
//! are parsed into [`Directive`]s and dispatched to their handlers; text nodes
//! holding `{{ }}` markers get a text binding. Every live binding is a
//! [`vivo_pulse::Watcher`] whose callback writes into the [`vivo_relief::Dom`].

pub mod bindings;
pub mod compile;
pub mod directives;
pub mod instance;
pub mod options;

pub use bindings::Bindings;
pub use compile::{compile, MountTarget};
pub use directives::Directive;
pub use instance::{Instance, Method, MethodTable};
pub use options::CompilerOptions;
