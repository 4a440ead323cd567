//! Mounting an application onto a document.

use vivo_atelier::{compile, Bindings, CompilerOptions, Instance, MethodTable, MountTarget};
use vivo_carton::String;
use vivo_pulse::{ReactiveObject, Value};
use vivo_relief::{CompilerError, Dom, Event, NodeId};

use crate::error::VivoError;

/// Root configuration: where to mount, the data root and the methods.
#[derive(Debug)]
pub struct AppOptions {
    pub el: MountTarget,
    pub data: ReactiveObject,
    pub methods: MethodTable,
    pub compiler: CompilerOptions,
}

impl AppOptions {
    pub fn new(el: impl Into<MountTarget>) -> Self {
        Self {
            el: el.into(),
            data: ReactiveObject::new(),
            methods: MethodTable::new(),
            compiler: CompilerOptions::default(),
        }
    }

    /// Use a JSON object as the data root.
    pub fn data(mut self, json: serde_json::Value) -> Result<Self, VivoError> {
        if !json.is_object() {
            return Err(VivoError::DataNotObject);
        }
        self.data = ReactiveObject::from_json(&json);
        Ok(self)
    }

    /// Use an existing object as the data root.
    pub fn data_object(mut self, data: ReactiveObject) -> Self {
        self.data = data;
        self
    }

    pub fn method(mut self, name: &str, method: impl Fn(&Instance, &Event) + 'static) -> Self {
        self.methods.insert(name, method);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.compiler.strict = strict;
        self
    }
}

/// A mounted application.
#[derive(Debug)]
pub struct App {
    dom: Dom,
    instance: Instance,
    target: NodeId,
    bindings: Bindings,
}

impl App {
    /// Observe the data, compile the mount target's children and bind them.
    pub fn mount(dom: &Dom, options: AppOptions) -> Result<Self, VivoError> {
        let AppOptions {
            el,
            data,
            methods,
            compiler,
        } = options;

        let target = el.resolve(dom)?;
        let instance = Instance::new(data, methods);
        let bindings = compile(dom, target, &instance, &compiler)?;

        for warning in &bindings.warnings {
            tracing::warn!("{}", warning);
        }
        tracing::info!(
            mount = target,
            watchers = bindings.watcher_count(),
            listeners = bindings.listener_count(),
            "mounted"
        );

        Ok(Self {
            dom: dom.clone(),
            instance,
            target,
            bindings,
        })
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// The node whose children are bound.
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn data(&self) -> &ReactiveObject {
        self.instance.data()
    }

    pub fn get(&self, key: &str) -> Value {
        self.instance.get(key)
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.instance.set(key, value);
    }

    /// Run a method as if an event named after it fired on the target.
    pub fn call_method(&self, name: &str) -> Result<(), VivoError> {
        let event = Event::new(name, self.target);
        if self.instance.call_method(name, &event) {
            Ok(())
        } else {
            Err(VivoError::MethodNotFound(name.into()))
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn warnings(&self) -> &[CompilerError] {
        &self.bindings.warnings
    }

    /// Serialized children of the target.
    pub fn html(&self) -> String {
        self.dom.with(|doc| doc.inner_html(self.target))
    }

    /// Stop every watcher and remove every listener. The DOM keeps its last
    /// rendered state.
    pub fn unmount(&mut self) {
        let watchers = self.bindings.watcher_count();
        let listeners = self.bindings.listener_count();
        self.bindings.release(&self.dom);
        tracing::info!(mount = self.target, watchers, listeners, "unmounted");
    }
}
