//! The active dependency collector.
//!
//! While a watcher runs its bootstrap read, it sits on top of a thread-local
//! stack and every instrumented property read registers it. The stack is
//! popped by a guard, so an unwinding read still leaves the collector clean.
//! Nested bootstraps attribute reads to the innermost watcher only.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::watcher::Watcher;

thread_local! {
    /// `None` entries mark untracked sections.
    static STACK: RefCell<Vec<Option<Rc<Watcher>>>> = const { RefCell::new(Vec::new()) };
}

/// Pops its collector entry on drop.
#[must_use = "the collector is popped as soon as the guard is dropped"]
pub struct CollectorGuard {
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for CollectorGuard {
    fn drop(&mut self) {
        STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

fn push(entry: Option<Rc<Watcher>>) -> CollectorGuard {
    STACK.with(|stack| stack.borrow_mut().push(entry));
    CollectorGuard {
        _not_send: PhantomData,
    }
}

/// Make `watcher` the active collector until the guard drops.
pub fn collect(watcher: Rc<Watcher>) -> CollectorGuard {
    push(Some(watcher))
}

/// Run `f` with collection suspended.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    let _guard = push(None);
    f()
}

/// The innermost active collector, if any.
pub fn current() -> Option<Rc<Watcher>> {
    STACK.with(|stack| stack.borrow().last().cloned().flatten())
}

/// Whether any read right now would register a dependency.
pub fn is_collecting() -> bool {
    STACK.with(|stack| matches!(stack.borrow().last(), Some(Some(_))))
}
