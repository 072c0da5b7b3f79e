//! Core statebind: the state-container contract.
//!
//! This layer defines what every store in the workspace agrees on:
//! - `Value`: Dynamically typed state tree (the "state" in a store)
//! - `Action`: A named event with an optional payload
//! - `Reducer`: Pure `(state, action) -> state` transition
//! - `Store`: Read, dispatch, and subscribe capabilities
//! - `CreateStore` / `StoreEnhancer`: Store construction and its wrappers
//!
//! # Example
//!
//! ```rust
//! use statebind_core_store::{Error, State, Store};
//!
//! fn current(store: &mut dyn Store) -> Result<State, Error> {
//!     store.get_state()
//! }
//! ```

mod action;
mod error;
mod traits;
mod value;

pub use action::{Action, ActionKind};
pub use error::Error;
pub use traits::{
    reducer, CreateStore, CreateStoreFn, Listener, ListenerId, Reducer, State, Store, StoreEnhancer,
};
pub use value::Value;
