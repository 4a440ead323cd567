//! Watchers: live bindings between an expression and a callback.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use vivo_carton::{SmallVec, String};

use crate::collector;
use crate::dep::Dep;
use crate::object::ReactiveObject;
use crate::value::Value;

type Callback = Box<dyn Fn(&Value)>;

fn next_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Watches one bare property of a data root.
///
/// Dependencies are discovered once, by the read made during construction.
/// Later re-reads never register again, so if the watched property is
/// replaced by something it cannot see, the watcher keeps its original
/// subscriptions.
pub struct Watcher {
    id: u64,
    /// Property name, trimmed
    expr: String,
    data: ReactiveObject,
    /// Last value seen
    value: RefCell<Value>,
    callback: Callback,
    /// Dependency sets this watcher joined
    deps: RefCell<SmallVec<[Dep; 2]>>,
    active: Cell<bool>,
}

impl fmt::Debug for Watcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("id", &self.id)
            .field("expr", &self.expr)
            .field("value", &self.value.borrow())
            .field("dep_count", &self.deps.borrow().len())
            .field("active", &self.active.get())
            .finish()
    }
}

impl Watcher {
    /// Create a watcher and run its bootstrap read.
    ///
    /// Surrounding whitespace in `expr` is ignored.
    pub fn new(
        data: &ReactiveObject,
        expr: &str,
        callback: impl Fn(&Value) + 'static,
    ) -> WatcherHandle {
        let watcher = Rc::new(Self {
            id: next_id(),
            expr: expr.trim().into(),
            data: data.clone(),
            value: RefCell::new(Value::Undefined),
            callback: Box::new(callback),
            deps: RefCell::new(SmallVec::new()),
            active: Cell::new(true),
        });

        let value = {
            let _guard = collector::collect(Rc::clone(&watcher));
            watcher.read()
        };
        tracing::debug!(
            watcher = watcher.id,
            expr = %watcher.expr,
            deps = watcher.deps.borrow().len(),
            "watcher created"
        );
        *watcher.value.borrow_mut() = value;

        WatcherHandle { watcher }
    }

    fn read(&self) -> Value {
        self.data.get(&self.expr)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// The cached value.
    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Remember a dependency set so [`Watcher::stop`] can leave it.
    pub(crate) fn track(&self, dep: &Dep) {
        let mut deps = self.deps.borrow_mut();
        if !deps.iter().any(|d| d.ptr_eq(dep)) {
            deps.push(dep.clone());
        }
    }

    /// Re-read without collecting. If the value changed, refresh the cache
    /// and call the callback with the new value.
    pub fn update(&self) {
        if !self.active.get() {
            return;
        }
        let new_value = collector::untracked(|| self.read());
        if new_value.strict_equals(&self.value.borrow()) {
            return;
        }

        tracing::trace!(watcher = self.id, expr = %self.expr, "watcher changed");
        *self.value.borrow_mut() = new_value.clone();
        (self.callback)(&new_value);
    }

    /// Leave every dependency set and ignore further updates.
    pub fn stop(&self) {
        if !self.active.replace(false) {
            return;
        }
        let deps = self.deps.take();
        for dep in &deps {
            dep.remove_watcher(self);
        }
        tracing::debug!(watcher = self.id, deps = deps.len(), "watcher stopped");
    }
}

/// Handle returned for every watcher a binding creates.
///
/// Dropping the handle does not stop the watcher; the dependency sets keep
/// it alive until [`WatcherHandle::stop`] is called.
#[derive(Debug, Clone)]
pub struct WatcherHandle {
    watcher: Rc<Watcher>,
}

impl WatcherHandle {
    pub fn id(&self) -> u64 {
        self.watcher.id
    }

    pub fn expr(&self) -> &str {
        self.watcher.expr()
    }

    /// The cached value.
    pub fn value(&self) -> Value {
        self.watcher.value()
    }

    pub fn is_active(&self) -> bool {
        self.watcher.is_active()
    }

    /// Number of dependency sets joined.
    pub fn dep_count(&self) -> usize {
        self.watcher.deps.borrow().len()
    }

    pub fn watcher(&self) -> Rc<Watcher> {
        Rc::clone(&self.watcher)
    }

    pub fn stop(&self) {
        self.watcher.stop();
    }
}
