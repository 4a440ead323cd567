//! Render snapshot tests.

use serde_json::json;
use vivo::{parse_assignment, render_template, RenderOptions};

fn render(template: &str, data: serde_json::Value, sets: &[&str]) -> String {
    let options = RenderOptions {
        assignments: sets
            .iter()
            .map(|s| parse_assignment(s).unwrap())
            .collect(),
        ..RenderOptions::default()
    };
    let rendered = render_template(template, data, &options)
        .unwrap_or_else(|e| panic!("Render error: {e}"));
    if !rendered.parse_errors.is_empty() {
        panic!("Parse errors: {:?}", rendered.parse_errors);
    }
    rendered.html
}

#[test]
fn initial_render() {
    insta::assert_snapshot!(
        render(
            r#"<div id="app"><h1 v-text="title"></h1><p>{{ greeting }}, {{ name }}!</p></div>"#,
            json!({ "title": "Vivo", "greeting": "Hello", "name": "world" }),
            &[],
        ),
        @r#"<div id="app"><h1 v-text="title">Vivo</h1><p>Hello, world!</p></div>"#
    );
}

#[test]
fn assignments_rerender() {
    insta::assert_snapshot!(
        render(
            r#"<div id="app"><p>{{ a }} and {{ b }}</p></div>"#,
            json!({ "a": 1, "b": 2 }),
            &["a=10", "b=\"two\""],
        ),
        @r#"<div id="app"><p>10 and two</p></div>"#
    );
}

#[test]
fn content_outside_the_target_is_left_alone() {
    insta::assert_snapshot!(
        render(
            r#"<header>{{ msg }}</header><div id="app">{{ msg }}</div>"#,
            json!({ "msg": "hi" }),
            &["msg=yo"],
        ),
        @r#"<header>{{ msg }}</header><div id="app">yo</div>"#
    );
}

#[test]
fn parse_errors_do_not_stop_rendering() {
    let rendered = render_template(
        r#"<div id="app"><p>{{ msg }}</div>"#,
        json!({ "msg": "hi" }),
        &RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(rendered.parse_errors.len(), 1);
    insta::assert_snapshot!(rendered.html, @r#"<div id="app"><p>hi</p></div>"#);
}

#[test]
fn warnings_are_collected() {
    let rendered = render_template(
        r#"<div id="app"><p v-bind:title="t" v-on="x">x</p></div>"#,
        json!({}),
        &RenderOptions::default(),
    )
    .unwrap();
    let messages: Vec<String> = rendered.warnings.iter().map(|w| w.to_string()).collect();
    insta::assert_debug_snapshot!(messages, @r#"
    [
        "Unknown directive. (v-bind:title)",
        "Event binding is missing an event name. (v-on)",
    ]
    "#);
}
