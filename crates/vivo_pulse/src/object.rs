//! Reactive objects: ordered maps of property cells.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use vivo_carton::String;

use crate::dep::Dep;
use crate::observer::Observer;
use crate::value::Value;

/// One property cell.
#[derive(Default)]
pub(crate) struct Property {
    pub(crate) value: RefCell<Value>,
    /// Present once the property has been instrumented
    pub(crate) dep: RefCell<Option<Dep>>,
}

#[derive(Default)]
struct Props {
    entries: Vec<(String, Rc<Property>)>,
    index: FxHashMap<String, usize>,
}

/// A mapping from property names to values.
///
/// Cloning a `ReactiveObject` creates a new handle to the **same** object.
/// Reads of instrumented properties register the active collector; writes of
/// changed values notify. Properties added after the object was observed
/// are plain cells: they store values but never notify.
#[derive(Clone, Default)]
pub struct ReactiveObject {
    props: Rc<RefCell<Props>>,
}

impl fmt::Debug for ReactiveObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let props = self.props.borrow();
        f.debug_struct("ReactiveObject")
            .field(
                "keys",
                &props.entries.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ReactiveObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unobserved object from JSON. Non-object input yields an
    /// empty object.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match Value::from(json) {
            Value::Object(obj) => obj,
            _ => Self::new(),
        }
    }

    fn property(&self, key: &str) -> Option<Rc<Property>> {
        let props = self.props.borrow();
        props
            .index
            .get(key)
            .map(|&i| Rc::clone(&props.entries[i].1))
    }

    pub(crate) fn properties(&self) -> Vec<Rc<Property>> {
        self.props
            .borrow()
            .entries
            .iter()
            .map(|(_, p)| Rc::clone(p))
            .collect()
    }

    /// Read a property. Missing properties read as `undefined`.
    pub fn get(&self, key: &str) -> Value {
        let Some(prop) = self.property(key) else {
            return Value::Undefined;
        };
        let dep = prop.dep.borrow().clone();
        if let Some(dep) = dep {
            dep.depend();
        }
        let value = prop.value.borrow().clone();
        value
    }

    /// Write a property.
    ///
    /// An instrumented property whose value is strictly equal to `value` is
    /// left alone. Otherwise a new object value is observed, stored, and the
    /// property's watchers are notified in order before this returns.
    /// Writing a missing key adds a plain, uninstrumented property.
    pub fn set(&self, key: &str, value: Value) {
        let Some(prop) = self.property(key) else {
            tracing::trace!(key, "adding untracked property");
            self.insert(key, value);
            return;
        };

        let dep = prop.dep.borrow().clone();
        let Some(dep) = dep else {
            *prop.value.borrow_mut() = value;
            return;
        };

        if prop.value.borrow().strict_equals(&value) {
            return;
        }
        Observer::observe(&value);
        *prop.value.borrow_mut() = value;
        tracing::trace!(key, watchers = dep.len(), "property changed");
        dep.notify();
    }

    /// Insert or overwrite a cell without notifying.
    pub fn insert(&self, key: &str, value: Value) {
        let mut props = self.props.borrow_mut();
        if let Some(&i) = props.index.get(key) {
            *props.entries[i].1.value.borrow_mut() = value;
            return;
        }
        let i = props.entries.len();
        props.entries.push((
            key.into(),
            Rc::new(Property {
                value: RefCell::new(value),
                dep: RefCell::new(None),
            }),
        ));
        props.index.insert(key.into(), i);
    }

    /// The dependency set of an instrumented property.
    pub fn dep(&self, key: &str) -> Option<Dep> {
        self.property(key).and_then(|p| p.dep.borrow().clone())
    }

    pub fn is_instrumented(&self, key: &str) -> bool {
        self.dep(key).is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.props.borrow().index.contains_key(key)
    }

    /// Property names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.props
            .borrow()
            .entries
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.props.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.borrow().entries.is_empty()
    }

    pub fn ptr_eq(&self, other: &ReactiveObject) -> bool {
        Rc::ptr_eq(&self.props, &other.props)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.props) as *const () as usize
    }

    /// Convert to JSON without registering dependencies.
    pub fn to_json(&self) -> serde_json::Value {
        let mut seen = FxHashSet::default();
        self.to_json_inner(&mut seen)
    }

    pub(crate) fn to_json_inner(&self, seen: &mut FxHashSet<usize>) -> serde_json::Value {
        if !seen.insert(self.addr()) {
            return serde_json::Value::Null;
        }
        let entries: Vec<(String, Value)> = self
            .props
            .borrow()
            .entries
            .iter()
            .map(|(k, p)| (k.clone(), p.value.borrow().clone()))
            .collect();
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_json_inner(seen)))
            .collect();
        seen.remove(&self.addr());
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ReactiveObject {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let obj = ReactiveObject::new();
        for (key, value) in iter {
            let key: String = key.into();
            obj.insert(&key, value);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watcher::Watcher;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_plain_object_never_notifies() {
        let obj = ReactiveObject::from_json(&json!({ "a": 1 }));
        assert!(!obj.is_instrumented("a"));
        obj.set("a", Value::from(2));
        assert_eq!(obj.get("a"), Value::from(2));
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let obj: ReactiveObject = [("z", Value::from(1)), ("a", Value::from(2))]
            .into_iter()
            .collect();
        obj.set("m", Value::Null);
        assert_eq!(obj.keys(), vec!["z", "a", "m"]);
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn test_missing_key_reads_undefined() {
        let obj = ReactiveObject::new();
        assert!(obj.get("x").is_undefined());
        assert!(!obj.contains_key("x"));
    }

    #[test]
    fn test_property_added_after_observation_is_untracked() {
        let obj = ReactiveObject::from_json(&json!({ "a": 1 }));
        Observer::observe_object(&obj);

        obj.set("late", Value::from("x"));
        assert!(!obj.is_instrumented("late"));

        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let handle = Watcher::new(&obj, "late", move |_| c.set(c.get() + 1));
        assert_eq!(handle.dep_count(), 0);

        obj.set("late", Value::from("y"));
        assert_eq!(calls.get(), 0);
        assert_eq!(obj.get("late"), Value::from("y"));
    }

    #[test]
    fn test_self_reference_serializes_as_null() {
        let obj = ReactiveObject::from_json(&json!({ "a": 1 }));
        obj.insert("me", Value::Object(obj.clone()));
        assert_eq!(obj.to_json(), json!({ "a": 1, "me": null }));
    }
}
