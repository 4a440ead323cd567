//! Instrumenting data for dependency tracking.

use rustc_hash::FxHashSet;

use crate::dep::Dep;
use crate::object::ReactiveObject;
use crate::value::Value;

/// Walks values and gives every property of every reachable object a
/// dependency set.
///
/// Properties that already have one keep it, so observing twice does not
/// orphan existing watchers. An object reached a second time during one walk
/// is skipped.
#[derive(Debug, Default)]
pub struct Observer {
    visited: FxHashSet<usize>,
    instrumented: usize,
}

impl Observer {
    /// Instrument `value` if it is an object. Anything else is left as is.
    pub fn observe(value: &Value) {
        if let Value::Object(obj) = value {
            Self::observe_object(obj);
        }
    }

    /// Instrument an object and everything reachable from it. Returns the
    /// number of properties that gained a dependency set.
    pub fn observe_object(obj: &ReactiveObject) -> usize {
        let mut observer = Observer::default();
        observer.walk(obj);
        tracing::trace!(instrumented = observer.instrumented, "observed object");
        observer.instrumented
    }

    fn walk(&mut self, obj: &ReactiveObject) {
        if !self.visited.insert(obj.addr()) {
            return;
        }
        for prop in obj.properties() {
            {
                let mut dep = prop.dep.borrow_mut();
                if dep.is_none() {
                    *dep = Some(Dep::new());
                    self.instrumented += 1;
                }
            }
            let child = prop.value.borrow().clone();
            if let Value::Object(child) = child {
                self.walk(&child);
            }
        }
    }
}
