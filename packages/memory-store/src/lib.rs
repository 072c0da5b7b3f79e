pub mod in_memory;

pub use statebind_core_store::{Action, ActionKind, Error, Reducer, State, Store};

pub use in_memory::{create_store, create_store_with, MemoryStore, MemoryStoreCreator};
