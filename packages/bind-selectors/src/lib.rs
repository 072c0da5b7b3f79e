//! Selector binding for statebind stores.
//!
//! An enhancer that intercepts a store's `get_state`, runs a map of
//! selectors against the state, and returns a shallow copy of the state with
//! each selector's result merged in under its key. The wrapped store's own
//! state is never touched.
//!
//! Derived fields are recomputed only when the store hands out a different
//! state snapshot (by `Arc` identity) than the one last seen.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use statebind_core_store::{reducer, Store, Value};
//! use statebind_memory_store::create_store_with;
//! use statebind_selectors::{bind_selectors, SelectorMap};
//!
//! let selectors = SelectorMap::new()
//!     .with("higher", |s: &Value| s.get("count")?.as_i64().map(|c| Value::from(c + 1)));
//!
//! let count = reducer(|state, _| {
//!     state.cloned().unwrap_or_else(|| {
//!         let mut map = std::collections::BTreeMap::new();
//!         map.insert("count".to_string(), Value::from(5i64));
//!         Arc::new(Value::Map(map))
//!     })
//! });
//!
//! let mut store = create_store_with(count, None, &bind_selectors(&selectors)).unwrap();
//! assert_eq!(store.get_state().unwrap().get("higher"), Some(&Value::from(6i64)));
//! ```

mod bound_store;
mod enhancer;
mod selector_map;

pub use bound_store::BoundStore;
pub use enhancer::{bind, bind_selectors, BoundCreator, Enhancer};
pub use selector_map::{Binding, Selector, SelectorMap};
