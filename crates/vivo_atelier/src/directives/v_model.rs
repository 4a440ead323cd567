//! v-model directive: two-way binding between a property and a form control.

use vivo_carton::{is_form_control, String};
use vivo_pulse::{collector, Value, Watcher};
use vivo_relief::{Dom, Event, NodeId};

use crate::bindings::Bindings;
use crate::instance::Instance;

/// Bind the displayed value of `node` to the property `expr`.
///
/// Data changes are written into the control by a watcher; `input` events
/// write the control's value back through the store. The control is filled
/// once from the initial read.
pub fn bind_model(
    dom: &Dom,
    node: NodeId,
    expr: &str,
    instance: &Instance,
    bindings: &mut Bindings,
) {
    let data = instance.data();
    let key: String = expr.trim().into();

    let tag = dom.with(|doc| doc.tag(node).map(String::from));
    if !tag.as_deref().is_some_and(is_form_control) {
        tracing::warn!(node, tag = ?tag, "v-model on an element that is not a form control");
    }

    let initial = collector::untracked(|| data.get(&key));

    let watcher = {
        let dom = dom.clone();
        Watcher::new(data, &key, move |value| {
            dom.set_value(node, &value.to_dom_string());
        })
    };
    bindings.watchers.push(watcher);

    let listener = {
        let data = data.clone();
        let key = key.clone();
        dom.add_event_listener(node, "input", move |event: &Event| {
            let value = event.target_value().unwrap_or_default();
            data.set(&key, Value::from(value));
        })
    };
    bindings.listeners.push(listener);

    tracing::debug!(node, key = %key, "model bound");
    dom.set_value(node, &initial.to_dom_string());
}
