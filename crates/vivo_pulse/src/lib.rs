//! # vivo_pulse
//!
//! Pulse - The reactive heartbeat of Vivo.
//!
//! Plain data is turned into [`ReactiveObject`]s whose instrumented
//! properties each own a [`Dep`]. A [`Watcher`] discovers what it depends on
//! by reading its expression once while it is the active collector; after
//! that, every changed write to one of those properties re-runs it
//! synchronously.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use vivo_pulse::{Observer, ReactiveObject, Value, Watcher};
//!
//! let data = ReactiveObject::from_json(&serde_json::json!({ "msg": "hi" }));
//! Observer::observe_object(&data);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = Rc::clone(&seen);
//! let _watcher = Watcher::new(&data, "msg", move |v| log.borrow_mut().push(v.to_string()));
//!
//! data.set("msg", Value::from("hello"));
//! data.set("msg", Value::from("hello"));
//! assert_eq!(*seen.borrow(), vec!["hello".to_string()]);
//! ```

pub mod collector;
pub mod dep;
pub mod object;
pub mod observer;
pub mod value;
pub mod watcher;

pub use dep::Dep;
pub use object::ReactiveObject;
pub use observer::Observer;
pub use value::Value;
pub use watcher::{Watcher, WatcherHandle};
