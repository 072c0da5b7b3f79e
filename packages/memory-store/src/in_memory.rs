//! In-memory reducer store.
//!
//! The reference state container: state lives in memory, changes only
//! through dispatched actions, and every dispatch notifies subscribers.

use std::collections::BTreeMap;

use statebind_core_store::{
    Action, ActionKind, CreateStore, Error, Listener, ListenerId, Reducer, State, Store,
    StoreEnhancer,
};

/// A store holding its state in memory.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use statebind_core_store::{reducer, Action, Store, Value};
/// use statebind_memory_store::create_store;
///
/// let counter = reducer(|state, action| match (state, action.kind_str()) {
///     (Some(state), "increment") => {
///         let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
///         let mut next = (**state).clone();
///         if let Value::Map(map) = &mut next {
///             map.insert("count".to_string(), Value::from(count + 1));
///         }
///         Arc::new(next)
///     }
///     (Some(state), _) => state.clone(),
///     (None, _) => Arc::new(Value::map()),
/// });
///
/// let mut store = create_store(counter, None).unwrap();
/// store.dispatch(Action::new("increment")).unwrap();
/// assert!(store.get_state().unwrap().get("count").is_some());
/// ```
pub struct MemoryStore {
    state: State,
    reducer: Reducer,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener: u64,
}

impl MemoryStore {
    /// Create a store, running the reducer once with the init action.
    ///
    /// With no preloaded state the reducer sees `None` and supplies its
    /// default.
    pub fn new(reducer: Reducer, preloaded: Option<State>) -> Self {
        let state = reducer(preloaded.as_ref(), &Action::new(ActionKind::INIT));
        Self {
            state,
            reducer,
            listeners: BTreeMap::new(),
            next_listener: 0,
        }
    }

    /// Get a reference to the current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self) {
        for listener in self.listeners.values() {
            listener();
        }
    }
}

impl Store for MemoryStore {
    fn get_state(&mut self) -> Result<State, Error> {
        Ok(self.state.clone())
    }

    fn dispatch(&mut self, action: Action) -> Result<Action, Error> {
        log::debug!("Dispatching {}...", action.kind());
        self.state = (self.reducer)(Some(&self.state), &action);
        // Subscribers hear about every dispatch, even ones that changed nothing
        self.notify();
        Ok(action)
    }

    fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId::new(self.next_listener);
        self.listeners.insert(id, listener);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn replace_reducer(&mut self, reducer: Reducer) -> Result<(), Error> {
        self.reducer = reducer;
        self.dispatch(Action::new(ActionKind::REPLACE))?;
        Ok(())
    }
}

/// The plain store-construction function, as a `CreateStore`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryStoreCreator;

impl CreateStore for MemoryStoreCreator {
    type Store = MemoryStore;

    fn create_store(
        &self,
        reducer: Reducer,
        preloaded: Option<State>,
    ) -> Result<MemoryStore, Error> {
        Ok(MemoryStore::new(reducer, preloaded))
    }
}

/// Create a plain in-memory store.
pub fn create_store(reducer: Reducer, preloaded: Option<State>) -> Result<MemoryStore, Error> {
    MemoryStoreCreator.create_store(reducer, preloaded)
}

/// Create a store through an enhancer.
///
/// The enhancer wraps the plain construction function, and the result is
/// invoked with the same reducer and preloaded state.
pub fn create_store_with<E>(
    reducer: Reducer,
    preloaded: Option<State>,
    enhancer: &E,
) -> Result<<E::Output as CreateStore>::Store, Error>
where
    E: StoreEnhancer<MemoryStoreCreator>,
{
    enhancer
        .enhance(MemoryStoreCreator)
        .create_store(reducer, preloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;
    use statebind_core_store::{reducer, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn counter() -> Reducer {
        reducer(|state, action| {
            let Some(state) = state else {
                return Arc::new(Value::Map(btree! {
                    "count".to_string() => Value::from(0i64),
                }));
            };
            match action.kind_str() {
                "increment" => {
                    let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
                    let amount = action.payload().as_i64().unwrap_or(1);
                    Arc::new(Value::Map(btree! {
                        "count".to_string() => Value::from(count + amount),
                    }))
                }
                _ => state.clone(),
            }
        })
    }

    fn count_of(store: &mut MemoryStore) -> i64 {
        store
            .get_state()
            .unwrap()
            .get("count")
            .and_then(Value::as_i64)
            .unwrap()
    }

    #[test]
    fn reducer_default_used_without_preloaded_state() {
        let mut store = create_store(counter(), None).unwrap();
        assert_eq!(count_of(&mut store), 0);
    }

    #[test]
    fn preloaded_state_is_kept_by_init() {
        let preloaded = Arc::new(Value::Map(btree! {
            "count".to_string() => Value::from(5i64),
        }));
        let mut store = create_store(counter(), Some(preloaded.clone())).unwrap();
        assert!(Arc::ptr_eq(&store.get_state().unwrap(), &preloaded));
    }

    #[test]
    fn dispatch_runs_reducer() {
        let mut store = create_store(counter(), None).unwrap();
        store
            .dispatch(Action::with_payload("increment", 3i64))
            .unwrap();
        assert_eq!(count_of(&mut store), 3);
    }

    #[test]
    fn unhandled_action_keeps_state_identity() {
        let mut store = create_store(counter(), None).unwrap();
        let before = store.get_state().unwrap();
        store.dispatch(Action::new("unknown")).unwrap();
        assert!(Arc::ptr_eq(&before, store.state()));
    }

    #[test]
    fn listeners_called_on_every_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = create_store(counter(), None).unwrap();

        let seen = calls.clone();
        store.subscribe(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        store.dispatch(Action::new("unknown")).unwrap();
        store.dispatch(Action::new("increment")).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listeners_notified_in_subscription_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_store(counter(), None).unwrap();

        for name in ["first", "second", "third"] {
            let order = order.clone();
            store.subscribe(Box::new(move || order.lock().unwrap().push(name)));
        }

        store.dispatch(Action::new("increment")).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = create_store(counter(), None).unwrap();

        let seen = calls.clone();
        let id = store.subscribe(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(store.listener_count(), 1);
        assert!(store.unsubscribe(id));

        store.dispatch(Action::new("increment")).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn replace_reducer_dispatches_replace() {
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_store(counter(), None).unwrap();

        let seen = kinds.clone();
        store
            .replace_reducer(reducer(move |state, action| {
                seen.lock().unwrap().push(action.kind().clone());
                state.cloned().unwrap_or_else(|| Arc::new(Value::map()))
            }))
            .unwrap();

        assert_eq!(*kinds.lock().unwrap(), vec![ActionKind::REPLACE]);
        // The old state carries over to the new reducer
        assert_eq!(count_of(&mut store), 0);
    }

    struct Passthrough;

    impl StoreEnhancer<MemoryStoreCreator> for Passthrough {
        type Output = MemoryStoreCreator;

        fn enhance(&self, create_store: MemoryStoreCreator) -> MemoryStoreCreator {
            create_store
        }
    }

    #[test]
    fn create_store_with_applies_enhancer() {
        let preloaded = Arc::new(Value::Map(btree! {
            "count".to_string() => Value::from(2i64),
        }));
        let mut store = create_store_with(counter(), Some(preloaded), &Passthrough).unwrap();
        assert_eq!(count_of(&mut store), 2);
    }
}
