//! Selector maps and the loosely typed form `bind` accepts.

use std::fmt;
use std::sync::Arc;

use statebind_core_store::{Error, Value};

/// A pure function from base state to a derived value.
///
/// Returning `None` means the selector produced nothing, which is reported
/// as an error on read. Selectors that mean "no value" return
/// `Some(Value::Null)`.
pub type Selector = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// An ordered map from key to selector.
///
/// Every entry is callable by construction. Inserting an existing key
/// replaces its selector but keeps its position. Clones share the selector
/// functions, so cloning is cheap.
#[derive(Clone, Default)]
pub struct SelectorMap {
    entries: Vec<(String, Selector)>,
}

impl SelectorMap {
    /// Create an empty selector map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`.
    pub fn with<F>(mut self, key: impl Into<String>, selector: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.insert(key, selector);
        self
    }

    /// Add a selector under `key`, returning the one it replaced.
    pub fn insert<F>(&mut self, key: impl Into<String>, selector: F) -> Option<Selector>
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.insert_selector(key, Arc::new(selector))
    }

    /// Add an already shared selector under `key`.
    pub fn insert_selector(
        &mut self,
        key: impl Into<String>,
        selector: Selector,
    ) -> Option<Selector> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, selector)),
            None => {
                self.entries.push((key, selector));
                None
            }
        }
    }

    /// Remove the selector under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Selector> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<&Selector> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }
}

impl fmt::Debug for SelectorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl FromIterator<(String, Selector)> for SelectorMap {
    fn from_iter<I: IntoIterator<Item = (String, Selector)>>(iter: I) -> Self {
        let mut map = SelectorMap::new();
        for (key, selector) in iter {
            map.insert_selector(key, selector);
        }
        map
    }
}

/// A dynamically shaped argument for `bind`.
///
/// Mirrors an untyped object graph: plain data, a callable, or an ordered
/// record of further bindings. `bind` validates that it is a record whose
/// every entry is callable.
#[derive(Clone)]
pub enum Binding {
    /// Plain data. A `Value::Map` counts as a record.
    Data(Value),
    /// A callable.
    Selector(Selector),
    /// An ordered record of named bindings.
    Record(Vec<(String, Binding)>),
}

impl Binding {
    /// An empty record.
    pub fn record() -> Self {
        Binding::Record(Vec::new())
    }

    /// A callable binding.
    pub fn selector<F>(selector: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        Binding::Selector(Arc::new(selector))
    }

    /// Builder form of `insert`.
    pub fn with(mut self, key: impl Into<String>, binding: impl Into<Binding>) -> Self {
        self.insert(key, binding);
        self
    }

    /// Set `key` in a record, replacing any existing entry in place.
    ///
    /// Returns `false` (and does nothing) when this binding is not a record.
    pub fn insert(&mut self, key: impl Into<String>, binding: impl Into<Binding>) -> bool {
        let Binding::Record(entries) = self else {
            return false;
        };
        let key = key.into();
        let binding = binding.into();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = binding,
            None => entries.push((key, binding)),
        }
        true
    }

    /// Whether this binding is a structured record.
    pub fn is_record(&self) -> bool {
        matches!(self, Binding::Record(_) | Binding::Data(Value::Map(_)))
    }

    /// Whether this binding can be called as a selector.
    pub fn is_callable(&self) -> bool {
        matches!(self, Binding::Selector(_))
    }

    /// Diagnostic name of this binding's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Binding::Data(value) => value.type_name(),
            Binding::Selector(_) => "function",
            Binding::Record(_) => "record",
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Binding::Selector(_) => f.write_str("Selector(..)"),
            Binding::Record(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
        }
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        Binding::Data(value)
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Binding::Data(Value::from(value))
    }
}

impl From<Selector> for Binding {
    fn from(selector: Selector) -> Self {
        Binding::Selector(selector)
    }
}

impl From<&SelectorMap> for Binding {
    fn from(map: &SelectorMap) -> Self {
        Binding::Record(
            map.iter()
                .map(|(k, s)| (k.to_string(), Binding::Selector(s.clone())))
                .collect(),
        )
    }
}

impl TryFrom<&Binding> for SelectorMap {
    type Error = Error;

    /// Validate a binding as a selector map, snapshotting its selectors.
    ///
    /// Fails with `InvalidSelectorMap` when the binding is not a record,
    /// then with `InvalidSelector` for the first entry that is not callable.
    fn try_from(binding: &Binding) -> Result<Self, Error> {
        match binding {
            Binding::Record(entries) => {
                let mut map = SelectorMap::new();
                for (key, entry) in entries {
                    match entry {
                        Binding::Selector(selector) => {
                            map.insert_selector(key.clone(), selector.clone());
                        }
                        _ => return Err(Error::InvalidSelector { key: key.clone() }),
                    }
                }
                Ok(map)
            }
            // Plain data holds nothing callable, so any entry is invalid
            Binding::Data(Value::Map(data)) => match data.keys().next() {
                Some(key) => Err(Error::InvalidSelector { key: key.clone() }),
                None => Ok(SelectorMap::new()),
            },
            _ => Err(Error::InvalidSelectorMap),
        }
    }
}
