//! The selector-binding enhancer and its store-construction wrapper.

use statebind_core_store::{CreateStore, Error, Reducer, State, Store, StoreEnhancer};

use crate::bound_store::BoundStore;
use crate::selector_map::{Binding, SelectorMap};

/// Validate a selector map and build an enhancer from it.
///
/// `None` binds an empty map. The map is snapshotted: changing `input`
/// afterwards does not affect the returned enhancer.
///
/// # Errors
///
/// * `InvalidSelectorMap` - `input` is not a record.
/// * `InvalidSelector` - an entry of `input` is not callable.
pub fn bind(input: Option<&Binding>) -> Result<Enhancer, Error> {
    let selectors = match input {
        Some(binding) => SelectorMap::try_from(binding)?,
        None => SelectorMap::new(),
    };
    Ok(Enhancer { selectors })
}

/// Build an enhancer from an already typed selector map.
pub fn bind_selectors(selectors: &SelectorMap) -> Enhancer {
    Enhancer {
        selectors: selectors.clone(),
    }
}

/// Wraps store construction so that `get_state` returns derived fields.
///
/// Apply it with `wrap` (or through `StoreEnhancer`) to a `CreateStore`, or
/// directly to a built store with `enhance_store`.
#[derive(Clone, Debug, Default)]
pub struct Enhancer {
    selectors: SelectorMap,
}

impl Enhancer {
    /// The validated selectors this enhancer binds.
    pub fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }

    /// Wrap a store-construction function.
    pub fn wrap<C: CreateStore>(&self, create_store: C) -> BoundCreator<C> {
        BoundCreator {
            inner: create_store,
            selectors: self.selectors.clone(),
        }
    }

    /// Bind the selectors to a store that already exists.
    ///
    /// Checks the store's current state the same way store construction
    /// through `wrap` checks the initial state.
    pub fn enhance_store<S: Store>(&self, store: S) -> Result<BoundStore<S>, Error> {
        BoundStore::new(store, self.selectors.clone())
    }
}

impl<C: CreateStore> StoreEnhancer<C> for Enhancer {
    type Output = BoundCreator<C>;

    fn enhance(&self, create_store: C) -> BoundCreator<C> {
        self.wrap(create_store)
    }
}

/// A store-construction function whose stores carry bound selectors.
pub struct BoundCreator<C> {
    inner: C,
    selectors: SelectorMap,
}

impl<C> BoundCreator<C> {
    /// Get a reference to the wrapped construction function.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: CreateStore> CreateStore for BoundCreator<C> {
    type Store = BoundStore<C::Store>;

    /// Build the inner store with the arguments unchanged, then bind.
    ///
    /// # Errors
    ///
    /// * `InvalidState` - the initial state is not a map.
    /// * `DuplicateSelectorKey` - a selector key already exists in the
    ///   initial state.
    fn create_store(
        &self,
        reducer: Reducer,
        preloaded: Option<State>,
    ) -> Result<BoundStore<C::Store>, Error> {
        let store = self.inner.create_store(reducer, preloaded)?;
        BoundStore::new(store, self.selectors.clone())
    }
}
