//! The bound instance: a data root plus a method table.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use vivo_carton::String;
use vivo_pulse::{Observer, ReactiveObject, Value};
use vivo_relief::Event;

/// An event handler. It receives the instance it is bound to.
pub type Method = Rc<dyn Fn(&Instance, &Event)>;

/// Named event handlers.
#[derive(Clone, Default)]
pub struct MethodTable {
    methods: FxHashMap<String, Method>,
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.methods.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("MethodTable").field("names", &names).finish()
    }
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method, replacing any previous one of the same name.
    pub fn insert(&mut self, name: &str, method: impl Fn(&Instance, &Event) + 'static) {
        self.methods.insert(name.into(), Rc::new(method));
    }

    /// Builder form of [`MethodTable::insert`].
    pub fn with(mut self, name: &str, method: impl Fn(&Instance, &Event) + 'static) -> Self {
        self.insert(name, method);
        self
    }

    pub fn get(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// What directives bind against.
///
/// Cloning an `Instance` creates a new handle to the same data and methods.
#[derive(Debug, Clone)]
pub struct Instance {
    data: ReactiveObject,
    methods: Rc<MethodTable>,
}

impl Instance {
    /// Create an instance, observing `data`.
    pub fn new(data: ReactiveObject, methods: MethodTable) -> Self {
        let instrumented = Observer::observe_object(&data);
        tracing::debug!(
            instrumented,
            methods = methods.len(),
            "instance created"
        );
        Self {
            data,
            methods: Rc::new(methods),
        }
    }

    pub fn data(&self) -> &ReactiveObject {
        &self.data
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Read a data property.
    pub fn get(&self, key: &str) -> Value {
        self.data.get(key)
    }

    /// Write a data property.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.data.set(key, value.into());
    }

    /// Invoke a method with this instance as its context. Returns `false`
    /// when no such method exists.
    pub fn call_method(&self, name: &str, event: &Event) -> bool {
        match self.methods.get(name) {
            Some(method) => {
                method(self, event);
                true
            }
            None => false,
        }
    }
}
