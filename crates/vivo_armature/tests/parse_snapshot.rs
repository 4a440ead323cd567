//! Parser snapshot tests.
//!
//! Templates are parsed and serialized back; the snapshot shows the tree
//! shape the compiler will walk.

use vivo_armature::parse_document;

/// Parse and re-serialize, failing on any parse error
fn round(src: &str) -> String {
    let (doc, errors) = parse_document(src);

    if !errors.is_empty() {
        panic!("Parse errors: {:?}", errors);
    }

    doc.inner_html(doc.root()).to_string()
}

// =============================================================================
// Binding Templates
// =============================================================================

mod bindings {
    use super::*;

    #[test]
    fn model_and_interpolation() {
        insta::assert_snapshot!(
            round(r#"<div id="app"><input v-model="msg"><p>{{ msg }}</p></div>"#),
            @r#"<div id="app"><input v-model="msg"><p>{{ msg }}</p></div>"#
        );
    }

    #[test]
    fn event_shorthand() {
        insta::assert_snapshot!(
            round(r#"<button @click="inc" v-on:dblclick='reset'>+</button>"#),
            @r#"<button @click="inc" v-on:dblclick="reset">+</button>"#
        );
    }

    #[test]
    fn unquoted_and_bare_attributes() {
        insta::assert_snapshot!(
            round("<input v-model=name disabled>"),
            @r#"<input v-model="name" disabled>"#
        );
    }
}

// =============================================================================
// Markup Handling
// =============================================================================

mod markup {
    use super::*;

    #[test]
    fn uppercase_tags_are_lowered() {
        insta::assert_snapshot!(round("<DIV><Span>x</SPAN></div>"), @"<div><span>x</span></div>");
    }

    #[test]
    fn doctype_is_dropped() {
        insta::assert_snapshot!(round("<!DOCTYPE html><p>hi</p>"), @"<p>hi</p>");
    }

    #[test]
    fn escaped_text_survives() {
        insta::assert_snapshot!(round("<p>a &amp; b &lt;c&gt;</p>"), @"<p>a &amp; b &lt;c&gt;</p>");
    }
}

#[test]
fn errors_are_reported_with_positions() {
    let (_, errors) = parse_document("<ul>\n  <li>one\n</ol>");
    let codes: Vec<_> = errors.iter().map(|e| format!("{:?}", e.code)).collect();
    insta::assert_debug_snapshot!(codes, @r#"
    [
        "InvalidEndTag",
        "MissingEndTag",
        "MissingEndTag",
    ]
    "#);
    assert_eq!(errors[0].position.map(|p| p.line), Some(3));
}
