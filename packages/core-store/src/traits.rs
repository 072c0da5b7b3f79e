//! Core traits: Store, CreateStore, StoreEnhancer.

use std::sync::Arc;

use crate::{Action, Error, Value};

/// A state snapshot.
///
/// Stores hand out shared references to their state. Two snapshots are the
/// "same state" only when they are the same allocation (`Arc::ptr_eq`), which
/// is what lets wrappers cache work across reads.
pub type State = Arc<Value>;

/// Pure state transition.
///
/// Receives `None` when the store has no state yet (the initialization
/// dispatch without preloaded state) so the reducer can supply its default.
/// Returning the incoming `Arc` unchanged signals "nothing changed".
pub type Reducer = Arc<dyn Fn(Option<&State>, &Action) -> State + Send + Sync>;

/// Build a `Reducer` from a closure.
pub fn reducer<F>(f: F) -> Reducer
where
    F: Fn(Option<&State>, &Action) -> State + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Called after every dispatch.
pub type Listener = Box<dyn Fn() + Send + Sync>;

/// Handle returned by `Store::subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A state container.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Store>`.
pub trait Store: Send + Sync {
    /// Read the current state.
    ///
    /// Plain stores never fail here; wrappers that compute on read may.
    fn get_state(&mut self) -> Result<State, Error>;

    /// Run the reducer for `action`, then notify subscribers.
    ///
    /// Returns the dispatched action.
    fn dispatch(&mut self, action: Action) -> Result<Action, Error>;

    /// Register a listener called after every dispatch.
    fn subscribe(&mut self, listener: Listener) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;

    /// Swap the reducer used by subsequent dispatches.
    fn replace_reducer(&mut self, reducer: Reducer) -> Result<(), Error>;
}

/// A store-construction function.
///
/// Implementors receive the reducer and optional preloaded state and build a
/// concrete store. Enhancers wrap one `CreateStore` in another.
pub trait CreateStore {
    type Store: Store;

    fn create_store(&self, reducer: Reducer, preloaded: Option<State>)
        -> Result<Self::Store, Error>;
}

/// Adapts a closure into a `CreateStore`.
#[derive(Clone)]
pub struct CreateStoreFn<F>(pub F);

impl<F, S> CreateStore for CreateStoreFn<F>
where
    F: Fn(Reducer, Option<State>) -> Result<S, Error>,
    S: Store,
{
    type Store = S;

    fn create_store(&self, reducer: Reducer, preloaded: Option<State>) -> Result<S, Error> {
        (self.0)(reducer, preloaded)
    }
}

impl<C: CreateStore + ?Sized> CreateStore for &C {
    type Store = C::Store;

    fn create_store(&self, reducer: Reducer, preloaded: Option<State>) -> Result<C::Store, Error> {
        (**self).create_store(reducer, preloaded)
    }
}

/// A higher-order wrapper over store construction.
///
/// Given the next `CreateStore`, produce a new one whose stores carry extra
/// behavior. Enhancers compose by feeding one's output into another.
pub trait StoreEnhancer<C: CreateStore> {
    type Output: CreateStore;

    fn enhance(&self, create_store: C) -> Self::Output;
}

// Blanket implementations for references and boxes

impl<T: Store + ?Sized> Store for &mut T {
    fn get_state(&mut self) -> Result<State, Error> {
        (**self).get_state()
    }

    fn dispatch(&mut self, action: Action) -> Result<Action, Error> {
        (**self).dispatch(action)
    }

    fn subscribe(&mut self, listener: Listener) -> ListenerId {
        (**self).subscribe(listener)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        (**self).unsubscribe(id)
    }

    fn replace_reducer(&mut self, reducer: Reducer) -> Result<(), Error> {
        (**self).replace_reducer(reducer)
    }
}

impl<T: Store + ?Sized> Store for Box<T> {
    fn get_state(&mut self) -> Result<State, Error> {
        self.as_mut().get_state()
    }

    fn dispatch(&mut self, action: Action) -> Result<Action, Error> {
        self.as_mut().dispatch(action)
    }

    fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.as_mut().subscribe(listener)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.as_mut().unsubscribe(id)
    }

    fn replace_reducer(&mut self, reducer: Reducer) -> Result<(), Error> {
        self.as_mut().replace_reducer(reducer)
    }
}
