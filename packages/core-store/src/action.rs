//! Actions - the events a store's reducer responds to.

use std::borrow::Cow;
use std::fmt;

use crate::Value;

/// The type tag of an action.
///
/// Uses `Cow` so that the built-in kinds can be constants while user kinds
/// are plain owned strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActionKind(pub Cow<'static, str>);

impl ActionKind {
    /// Dispatched once when a store is created.
    pub const INIT: ActionKind = ActionKind(Cow::Borrowed("@@statebind/INIT"));

    /// Dispatched when a store's reducer is replaced.
    pub const REPLACE: ActionKind = ActionKind(Cow::Borrowed("@@statebind/REPLACE"));

    /// Create a kind from a static string.
    pub const fn from_static(s: &'static str) -> Self {
        ActionKind(Cow::Borrowed(s))
    }

    /// Create a kind from an owned string.
    pub fn new(s: impl Into<String>) -> Self {
        ActionKind(Cow::Owned(s.into()))
    }

    /// Get the kind string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the store's own lifecycle kinds.
    pub fn is_internal(&self) -> bool {
        self.0.starts_with("@@statebind/")
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for ActionKind {
    fn from(s: &'static str) -> Self {
        ActionKind(Cow::Borrowed(s))
    }
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        ActionKind(Cow::Owned(s))
    }
}

/// An event dispatched to a store.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    kind: ActionKind,
    payload: Value,
}

impl Action {
    /// An action with no payload.
    pub fn new(kind: impl Into<ActionKind>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
        }
    }

    /// An action carrying data for the reducer.
    pub fn with_payload(kind: impl Into<ActionKind>, payload: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
        }
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// Shorthand for `kind().as_str()`, handy in reducer `match`es.
    pub fn kind_str(&self) -> &str {
        self.kind.as_str()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}
