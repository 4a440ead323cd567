//! v-on directive (`@` shorthand): event binding.

use vivo_relief::{CompilerError, Dom, ErrorCode, Event, NodeId};

use crate::bindings::Bindings;
use crate::instance::Instance;

/// Register the method named `method_name` as a listener for `event`.
///
/// The method is looked up now, not when the event fires. A missing method
/// is an error.
pub fn bind_on(
    dom: &Dom,
    node: NodeId,
    event: &str,
    method_name: &str,
    instance: &Instance,
    bindings: &mut Bindings,
) -> Result<(), CompilerError> {
    let method_name = method_name.trim();
    let Some(method) = instance.methods().get(method_name) else {
        return Err(CompilerError::at_node(
            ErrorCode::MissingMethod,
            node,
            method_name,
        ));
    };

    let context = instance.clone();
    let listener = dom.add_event_listener(node, event, move |e: &Event| method(&context, e));
    bindings.listeners.push(listener);

    tracing::debug!(node, event, method = method_name, "event bound");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MethodTable;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vivo_pulse::{ReactiveObject, Value};

    #[test]
    fn test_method_runs_with_instance_context() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let methods = MethodTable::new().with("onClick", move |vm, e| {
            log.borrow_mut().push((vm.get("name"), e.kind().to_string()));
        });
        let data = ReactiveObject::from_json(&serde_json::json!({ "name": "root" }));
        let instance = Instance::new(data, methods);

        let dom = Dom::new();
        let button = dom.with_mut(|doc| doc.create_element("button"));
        let mut bindings = Bindings::new();
        bind_on(&dom, button, "click", "onClick", &instance, &mut bindings).unwrap();

        assert_eq!(bindings.listener_count(), 1);
        assert!(bindings.watchers.is_empty());

        assert_eq!(dom.dispatch_event(button, "click"), 1);
        assert_eq!(
            *seen.borrow(),
            vec![(Value::from("root"), "click".to_string())]
        );
    }

    #[test]
    fn test_missing_method() {
        let instance = Instance::new(ReactiveObject::new(), MethodTable::new());
        let dom = Dom::new();
        let button = dom.with_mut(|doc| doc.create_element("button"));

        let err = bind_on(&dom, button, "click", "nope", &instance, &mut Bindings::new())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingMethod);
        assert_eq!(err.node, Some(button));
        assert_eq!(dom.dispatch_event(button, "click"), 0);
    }

    #[test]
    fn test_binding_twice_registers_twice() {
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let methods = MethodTable::new().with("hit", move |_, _| *c.borrow_mut() += 1);
        let instance = Instance::new(ReactiveObject::new(), methods);
        let dom = Dom::new();
        let button = dom.with_mut(|doc| doc.create_element("button"));
        let mut bindings = Bindings::new();

        bind_on(&dom, button, "click", "hit", &instance, &mut bindings).unwrap();
        bind_on(&dom, button, "click", "hit", &instance, &mut bindings).unwrap();
        dom.dispatch_event(button, "click");
        assert_eq!(*count.borrow(), 2);
    }
}
