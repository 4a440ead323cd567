//! # vivo_armature
//!
//! Armature - The structural parser for Vivo templates.
//!
//! Markup is tokenized and built directly into a [`vivo_relief::Document`].
//! Directive attributes and `{{ }}` markers are kept verbatim; the template
//! compiler finds them by walking the resulting tree.
//!
//! ```
//! let (doc, errors) = vivo_armature::parse_document(r#"<p v-text="msg">{{ msg }}</p>"#);
//! assert!(errors.is_empty());
//! let p = doc.children(doc.root())[0];
//! assert_eq!(doc.attribute(p, "v-text"), Some("msg"));
//! assert_eq!(doc.text_content(p), "{{ msg }}");
//! ```

pub mod entity;
pub mod parser;
pub mod tokenizer;

pub use parser::{parse_document, parse_fragment, Parser};
pub use tokenizer::{Callbacks, QuoteType, State, Tokenizer};
