//! One-shot rendering: parse a template, mount it, apply writes, serialize.

use vivo_armature::parse_document;
use vivo_pulse::Value;
use vivo_relief::{CompilerError, Dom};

use crate::app::{App, AppOptions};
use crate::error::VivoError;

/// Options for [`render_template`]
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Mount selector
    pub el: String,
    pub strict: bool,
    /// Writes applied after mounting, in order
    pub assignments: Vec<(String, Value)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            el: "#app".to_string(),
            strict: false,
            assignments: Vec::new(),
        }
    }
}

/// Result of [`render_template`]
#[derive(Debug)]
pub struct Rendered {
    /// The whole document, serialized
    pub html: String,
    /// Markup problems; the tree is still rendered
    pub parse_errors: Vec<CompilerError>,
    /// Compile warnings
    pub warnings: Vec<CompilerError>,
}

/// Parse `template` as a document, mount it at `options.el` with `data` as
/// the data root and apply `options.assignments` through the store.
pub fn render_template(
    template: &str,
    data: serde_json::Value,
    options: &RenderOptions,
) -> Result<Rendered, VivoError> {
    let (document, parse_errors) = parse_document(template);
    let dom = Dom::from_document(document);

    let app_options = AppOptions::new(options.el.as_str())
        .data(data)?
        .strict(options.strict);
    let app = App::mount(&dom, app_options)?;

    for (key, value) in &options.assignments {
        tracing::debug!(key = key.as_str(), "applying assignment");
        app.set(key, value.clone());
    }

    let html = dom.with(|doc| doc.inner_html(doc.root())).to_string();
    Ok(Rendered {
        html,
        parse_errors,
        warnings: app.warnings().to_vec(),
    })
}

/// Parse a `key=value` assignment. The value is read as JSON when it parses
/// as JSON and as a plain string otherwise.
pub fn parse_assignment(input: &str) -> Result<(String, Value), VivoError> {
    let Some((key, raw)) = input.split_once('=') else {
        return Err(VivoError::InvalidAssignment(input.to_string()));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(VivoError::InvalidAssignment(input.to_string()));
    }
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(raw),
    };
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_assignment() {
        let (key, value) = parse_assignment("msg=hello").unwrap();
        assert_eq!(key, "msg");
        assert_eq!(value, Value::from("hello"));

        let (_, value) = parse_assignment("n=42").unwrap();
        assert_eq!(value, Value::from(42));

        let (_, value) = parse_assignment("quoted=\"a=b\"").unwrap();
        assert_eq!(value, Value::from("a=b"));

        let (_, value) = parse_assignment("empty=").unwrap();
        assert_eq!(value, Value::from(""));

        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_render_applies_assignments() {
        let options = RenderOptions {
            assignments: vec![("msg".to_string(), Value::from("world"))],
            ..RenderOptions::default()
        };
        let rendered = render_template(
            r#"<div id="app"><p>Hello {{ msg }}</p></div>"#,
            json!({ "msg": "hi" }),
            &options,
        )
        .unwrap();
        assert_eq!(rendered.html, r#"<div id="app"><p>Hello world</p></div>"#);
        assert!(rendered.parse_errors.is_empty());
    }

    #[test]
    fn test_render_requires_object_data() {
        let err = render_template("<div id=\"app\"></div>", json!([1]), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, VivoError::DataNotObject));
    }
}
