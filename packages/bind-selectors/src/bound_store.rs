//! A store whose `get_state` merges selector results into the state.

use std::collections::BTreeMap;
use std::sync::Arc;

use statebind_core_store::{Action, Error, Listener, ListenerId, Reducer, State, Store, Value};

use crate::selector_map::SelectorMap;

/// Last computed snapshot, keyed by the identity of the base state it came from.
enum CacheEntry {
    /// Nothing computed yet. Holds the initial state seen at wrap time.
    Unprimed { last_base: State },
    /// `computed` was derived from `base`.
    Primed { base: State, computed: State },
}

impl CacheEntry {
    /// The cached snapshot if it was derived from this exact base state.
    fn hit(&self, current: &State) -> Option<&State> {
        match self {
            CacheEntry::Primed { base, computed } if Arc::ptr_eq(base, current) => Some(computed),
            _ => None,
        }
    }

    fn last_base(&self) -> &State {
        match self {
            CacheEntry::Unprimed { last_base } => last_base,
            CacheEntry::Primed { base, .. } => base,
        }
    }
}

/// A store with selectors bound to its read accessor.
///
/// `get_state` returns the wrapped store's state shallow-merged with one
/// field per selector. The result is cached and reused for as long as the
/// wrapped store keeps returning the same `Arc`. Every other capability is
/// forwarded to the wrapped store unchanged.
pub struct BoundStore<S> {
    inner: S,
    selectors: SelectorMap,
    cache: CacheEntry,
}

impl<S: Store> BoundStore<S> {
    /// Bind `selectors` to `inner`, validating against its current state.
    ///
    /// Key collisions are checked here, once. Keys a reducer adds to later
    /// states are not re-checked.
    ///
    /// # Errors
    ///
    /// * `InvalidState` - the current state is not a map.
    /// * `DuplicateSelectorKey` - the first selector key (in map order) that
    ///   the current state already has.
    pub fn new(mut inner: S, selectors: SelectorMap) -> Result<Self, Error> {
        let initial = inner.get_state()?;
        if !initial.is_map() {
            return Err(Error::InvalidState {
                type_name: initial.type_name(),
            });
        }

        if let Some(key) = selectors.keys().find(|key| initial.contains_key(key)) {
            return Err(Error::DuplicateSelectorKey {
                key: key.to_string(),
            });
        }

        log::debug!("Binding {} selector(s) to store", selectors.len());
        Ok(Self {
            inner,
            selectors,
            cache: CacheEntry::Unprimed { last_base: initial },
        })
    }

    /// Read the wrapped store's state without derived fields.
    pub fn base_state(&mut self) -> Result<State, Error> {
        self.inner.get_state()
    }

    /// Whether a computed state has been cached yet.
    pub fn is_primed(&self) -> bool {
        matches!(self.cache, CacheEntry::Primed { .. })
    }

    /// The base state the cache was last checked against.
    pub fn last_base_state(&self) -> &State {
        self.cache.last_base()
    }

    pub fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }

    /// Get a reference to the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Get a mutable reference to the wrapped store.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap, discarding the selectors and cache.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Run every selector against `base` and merge the results over it.
    fn compute(&self, base: &Value) -> Result<State, Error> {
        let mut derived = BTreeMap::new();
        for (key, selector) in self.selectors.iter() {
            let value = selector(base).ok_or_else(|| Error::UndefinedSelectorResult {
                key: key.to_string(),
            })?;
            derived.insert(key.to_string(), value);
        }

        // A later state that is no longer a map contributes no fields
        let mut merged = base.as_map().cloned().unwrap_or_default();
        merged.extend(derived);
        Ok(Arc::new(Value::Map(merged)))
    }
}

impl<S: Store> Store for BoundStore<S> {
    /// The computed read accessor.
    ///
    /// # Errors
    ///
    /// * `UndefinedSelectorResult` - a selector returned `None` while
    ///   recomputing. The cache is left as it was.
    fn get_state(&mut self) -> Result<State, Error> {
        let current = self.inner.get_state()?;
        if let Some(computed) = self.cache.hit(&current) {
            log::trace!("Selector cache hit");
            return Ok(computed.clone());
        }

        log::debug!("Recomputing {} selector(s)...", self.selectors.len());
        let computed = self.compute(&current)?;
        self.cache = CacheEntry::Primed {
            base: current,
            computed: computed.clone(),
        };
        Ok(computed)
    }

    fn dispatch(&mut self, action: Action) -> Result<Action, Error> {
        self.inner.dispatch(action)
    }

    fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.inner.unsubscribe(id)
    }

    fn replace_reducer(&mut self, reducer: Reducer) -> Result<(), Error> {
        self.inner.replace_reducer(reducer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;
    use statebind_core_store::reducer;
    use statebind_memory_store::{create_store, MemoryStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn foo_bar() -> MemoryStore {
        create_store(
            reducer(|state, action| match (state, action.kind_str()) {
                (_, "reset") | (None, _) => Arc::new(Value::Map(btree! {
                    "foo".to_string() => Value::from("bar"),
                })),
                (Some(state), _) => state.clone(),
            }),
            None,
        )
        .unwrap()
    }

    fn counted(calls: &Arc<AtomicUsize>) -> SelectorMap {
        let calls = calls.clone();
        SelectorMap::new().with("fake", move |_: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(Value::from(42i64))
        })
    }

    #[test]
    fn starts_unprimed_on_initial_state() {
        let mut inner = foo_bar();
        let initial = inner.get_state().unwrap();
        let store = BoundStore::new(inner, SelectorMap::new()).unwrap();

        assert!(!store.is_primed());
        assert!(Arc::ptr_eq(store.last_base_state(), &initial));
    }

    #[test]
    fn first_read_primes_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = BoundStore::new(foo_bar(), counted(&calls)).unwrap();

        let first = store.get_state().unwrap();
        assert!(store.is_primed());
        let second = store.get_state().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_base_state_recomputes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = BoundStore::new(foo_bar(), counted(&calls)).unwrap();

        let first = store.get_state().unwrap();
        store.dispatch(Action::new("reset")).unwrap();
        let second = store.get_state().unwrap();

        // Equal by value, but a different snapshot
        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn base_state_is_untouched() {
        let mut store = BoundStore::new(
            foo_bar(),
            SelectorMap::new().with("fake", |_: &Value| Some(Value::from(42i64))),
        )
        .unwrap();

        let computed = store.get_state().unwrap();
        let base = store.base_state().unwrap();

        assert!(computed.contains_key("fake"));
        assert!(!base.contains_key("fake"));
        assert_eq!(base.get("foo"), Some(&Value::from("bar")));
    }

    #[test]
    fn no_selectors_still_copies() {
        let mut store = BoundStore::new(foo_bar(), SelectorMap::new()).unwrap();
        let computed = store.get_state().unwrap();
        let base = store.base_state().unwrap();

        assert_eq!(computed, base);
        assert!(!Arc::ptr_eq(&computed, &base));
    }

    #[test]
    fn failed_recompute_leaves_cache_alone() {
        let mut store = BoundStore::new(
            foo_bar(),
            SelectorMap::new().with("missing", |_: &Value| None),
        )
        .unwrap();

        let err = store.get_state().unwrap_err();
        assert_eq!(err.key(), Some("missing"));
        assert!(!store.is_primed());

        // Still failing, not serving anything stale
        assert!(store.get_state().is_err());
    }

    #[test]
    fn selectors_stop_at_first_absent_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let after = calls.clone();
        let selectors = SelectorMap::new()
            .with("missing", |_: &Value| None)
            .with("after", move |_: &Value| {
                after.fetch_add(1, Ordering::SeqCst);
                Some(Value::Null)
            });
        let mut store = BoundStore::new(foo_bar(), selectors).unwrap();

        assert!(store.get_state().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_null_is_a_value() {
        let mut store = BoundStore::new(
            foo_bar(),
            SelectorMap::new().with("nothing", |_: &Value| Some(Value::Null)),
        )
        .unwrap();

        let state = store.get_state().unwrap();
        assert_eq!(state.get("nothing"), Some(&Value::Null));
    }

    #[test]
    fn into_inner_returns_wrapped_store() {
        let store = BoundStore::new(foo_bar(), SelectorMap::new()).unwrap();
        assert_eq!(store.inner().listener_count(), 0);
        let mut inner = store.into_inner();
        assert!(!inner.get_state().unwrap().contains_key("fake"));
    }
}
