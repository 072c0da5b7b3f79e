//! Selectors over a typed view of the state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use statebind_core_store::Value;

use crate::convert::{from_value, to_value};

/// Wrap a function of a typed state into a selector over `Value`.
///
/// The base state is deserialized into `T` on every call and the result is
/// serialized back. If either conversion fails the selector yields no value,
/// which a selector-binding store reports against the selector's key.
pub fn typed_selector<T, R, F>(f: F) -> impl Fn(&Value) -> Option<Value> + Send + Sync + 'static
where
    T: DeserializeOwned,
    R: Serialize,
    F: Fn(&T) -> R + Send + Sync + 'static,
{
    move |state: &Value| {
        let typed: T = match from_value(state.clone()) {
            Ok(typed) => typed,
            Err(e) => {
                log::debug!("typed selector could not read state: {}", e);
                return None;
            }
        };
        match to_value(&f(&typed)) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("typed selector could not encode result: {}", e);
                None
            }
        }
    }
}
