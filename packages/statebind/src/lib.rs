//! statebind: reducer stores whose reads carry derived fields.
//!
//! A store holds a state tree that only changes through dispatched actions.
//! Binding selectors to it adds computed fields to every `get_state`, merged
//! into a shallow copy so the store's own state is never polluted.
//!
//! # Example
//!
//! ```rust
//! use statebind::prelude::*;
//!
//! let counter = reducer(|state, _| {
//!     state
//!         .cloned()
//!         .unwrap_or_else(|| json_state(serde_json::json!({ "count": 5 })))
//! });
//! let selectors = SelectorMap::new()
//!     .with("higher", |s: &Value| s.get("count")?.as_i64().map(|c| Value::from(c + 1)));
//!
//! let mut store = create_store_with(counter, None, &bind_selectors(&selectors)).unwrap();
//! assert_eq!(store.get_state().unwrap().get("higher"), Some(&Value::from(6i64)));
//! ```

pub use statebind_core_store as core_store;
pub use statebind_memory_store as memory_store;
pub use statebind_selectors as selectors;
pub use statebind_serde_store as serde_store;

pub mod prelude {
    pub use statebind_core_store::{
        reducer, Action, ActionKind, CreateStore, Error, Reducer, State, Store, StoreEnhancer,
        Value,
    };
    pub use statebind_memory_store::{create_store, create_store_with, MemoryStore};
    pub use statebind_selectors::{bind, bind_selectors, Binding, BoundStore, SelectorMap};
    pub use statebind_serde_store::{json_state, json_to_value, typed_selector};
}
