//! Carton - The artist's toolbox for Vivo.
//!
//! This crate provides the small shared vocabulary every other Vivo crate
//! leans on: the string type, the fast hash maps, stack-optimized vectors,
//! and a handful of tag/text helpers used by both the markup parser and the
//! template compiler.
//!
//! # Example
//!
//! ```
//! use vivo_carton::{is_void_tag, FxHashMap, String};
//!
//! let mut names: FxHashMap<String, u32> = FxHashMap::default();
//! names.insert(String::from("msg"), 1);
//! assert_eq!(names.get("msg"), Some(&1));
//! assert!(is_void_tag("input"));
//! ```

pub mod dom_tag_config;
pub mod general;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;
pub use compact_str::CompactString as String;
pub use compact_str::ToCompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export shared utilities
pub use dom_tag_config::*;
pub use general::*;
