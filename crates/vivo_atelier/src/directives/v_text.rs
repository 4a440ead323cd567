//! Text binding: `{{ }}` interpolation and `v-text`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use vivo_carton::String;
use vivo_pulse::{collector, ReactiveObject, Watcher};
use vivo_relief::{Dom, NodeId};

use crate::bindings::Bindings;
use crate::instance::Instance;

/// Whether a text node holds a marker pair. Greedy, single line.
static INTERPOLATION_TEST: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.+)\}\}").unwrap());

/// One marker, lazily matched so adjacent markers stay separate.
static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.+?)\}\}").unwrap());

/// Check whether text content should be handed to [`bind_text`].
pub fn has_interpolation(text: &str) -> bool {
    INTERPOLATION_TEST.is_match(text)
}

/// Substitute every marker in `source` with the current value of its
/// property. Reads never register dependencies.
pub fn render_interpolation(data: &ReactiveObject, source: &str) -> String {
    collector::untracked(|| {
        let rendered = INTERPOLATION.replace_all(source, |caps: &Captures<'_>| {
            data.get(caps[1].trim()).to_string()
        });
        String::from(&*rendered)
    })
}

/// Bind text content.
///
/// With markers, every marker gets its own watcher and any of them firing
/// re-renders the whole source. Without markers `source` is a property name
/// read once.
pub fn bind_text(
    dom: &Dom,
    node: NodeId,
    source: &str,
    instance: &Instance,
    bindings: &mut Bindings,
) {
    let data = instance.data();

    if !source.contains("{{") {
        let value = collector::untracked(|| data.get(source.trim()));
        dom.set_text_content(node, &value.to_dom_string());
        return;
    }

    let source: String = source.into();
    for caps in INTERPOLATION.captures_iter(&source) {
        let dom = dom.clone();
        let render_data = data.clone();
        let render_source = source.clone();
        let watcher = Watcher::new(data, &caps[1], move |_| {
            let text = render_interpolation(&render_data, &render_source);
            dom.set_text_content(node, &text);
        });
        bindings.watchers.push(watcher);
    }

    let text = render_interpolation(data, &source);
    tracing::debug!(node, text = %text, "text bound");
    dom.set_text_content(node, &text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MethodTable;
    use serde_json::json;
    use vivo_pulse::Value;

    fn setup(data: serde_json::Value, text: &str) -> (Dom, NodeId, Instance) {
        let dom = Dom::new();
        let node = dom.with_mut(|doc| doc.create_text(text));
        let instance = Instance::new(ReactiveObject::from_json(&data), MethodTable::new());
        (dom, node, instance)
    }

    #[test]
    fn test_has_interpolation() {
        assert!(has_interpolation("Hello {{ msg }}"));
        assert!(has_interpolation("{{a}}{{b}}"));
        assert!(!has_interpolation("Hello"));
        assert!(!has_interpolation("{{}}"));
        assert!(!has_interpolation("{{ a\n}}"));
    }

    #[test]
    fn test_render_substitutes_each_marker() {
        let data = ReactiveObject::from_json(&json!({ "a": 1, "b": "x" }));
        assert_eq!(render_interpolation(&data, "{{a}} and {{ b }}"), "1 and x");
        assert_eq!(render_interpolation(&data, "{{ nope }}"), "undefined");
    }

    #[test]
    fn test_one_watcher_per_marker() {
        let (dom, node, instance) = setup(json!({ "a": 1, "b": 2 }), "{{a}} and {{b}} and {{a}}");
        let mut bindings = Bindings::new();
        bind_text(&dom, node, "{{a}} and {{b}} and {{a}}", &instance, &mut bindings);

        assert_eq!(bindings.watcher_count(), 3);
        assert_eq!(dom.text_content(node), "1 and 2 and 1");
    }

    #[test]
    fn test_any_marker_rerenders_whole_text() {
        let (dom, node, instance) = setup(json!({ "a": 1, "b": 2 }), "{{a}} and {{b}}");
        let mut bindings = Bindings::new();
        bind_text(&dom, node, "{{a}} and {{b}}", &instance, &mut bindings);

        instance.set("a", 10);
        assert_eq!(dom.text_content(node), "10 and 2");
        instance.set("b", Value::from("two"));
        assert_eq!(dom.text_content(node), "10 and two");
    }

    #[test]
    fn test_directive_form_reads_once() {
        let dom = Dom::new();
        let p = dom.with_mut(|doc| doc.create_element("p"));
        let instance = Instance::new(
            ReactiveObject::from_json(&json!({ "msg": "hi" })),
            MethodTable::new(),
        );
        let mut bindings = Bindings::new();
        bind_text(&dom, p, " msg ", &instance, &mut bindings);

        assert_eq!(bindings.watcher_count(), 0);
        assert_eq!(dom.text_content(p), "hi");

        instance.set("msg", Value::from("changed"));
        assert_eq!(dom.text_content(p), "hi");
    }

    #[test]
    fn test_directive_form_missing_property_clears() {
        let dom = Dom::new();
        let p = dom.with_mut(|doc| {
            let p = doc.create_element("p");
            let t = doc.create_text("old");
            doc.append_child(p, t);
            p
        });
        let instance = Instance::new(ReactiveObject::new(), MethodTable::new());
        bind_text(&dom, p, "nope", &instance, &mut Bindings::new());
        assert_eq!(dom.text_content(p), "");
    }
}
