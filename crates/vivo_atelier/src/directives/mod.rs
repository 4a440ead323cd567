//! Binding directives.
//!
//! An attribute name is parsed into a [`Directive`]; the compiler then hands
//! it to the matching handler. Handlers are not guarded against running twice
//! on the same node: each call wires a fresh set of watchers and listeners.

pub mod v_model;
pub mod v_on;
pub mod v_text;

pub use v_model::bind_model;
pub use v_on::bind_on;
pub use v_text::{bind_text, has_interpolation, render_interpolation};

/// Prefix of directive attributes
pub const DIRECTIVE_PREFIX: &str = "v-";
/// Prefix of event shorthand attributes
pub const EVENT_SHORTHAND_PREFIX: &str = "@";

/// A directive attribute, parsed from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `v-model`
    Model,
    /// `v-text`
    Text,
    /// `v-on:event` or `@event`. `None` when the event name is missing.
    On { event: Option<&'a str> },
    /// Any other `v-` name
    Unknown { name: &'a str },
}

impl<'a> Directive<'a> {
    /// Parse an attribute name. Plain attributes return `None`.
    ///
    /// The part after `v-` splits on the first `:` into the directive name
    /// and its argument. The argument is only meaningful for `v-on`.
    pub fn parse(attr_name: &'a str) -> Option<Self> {
        if let Some(event) = attr_name.strip_prefix(EVENT_SHORTHAND_PREFIX) {
            return Some(Directive::On {
                event: non_empty(event),
            });
        }

        let rest = attr_name.strip_prefix(DIRECTIVE_PREFIX)?;
        let (name, arg) = match rest.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (rest, None),
        };

        Some(match name {
            "model" => Directive::Model,
            "text" => Directive::Text,
            "on" => Directive::On {
                event: arg.and_then(non_empty),
            },
            _ => Directive::Unknown { name: rest },
        })
    }

    /// Short name for diagnostics
    pub fn name(&self) -> &'a str {
        match *self {
            Directive::Model => "model",
            Directive::Text => "text",
            Directive::On { .. } => "on",
            Directive::Unknown { name } => name,
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
