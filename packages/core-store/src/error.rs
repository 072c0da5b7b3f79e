//! Error types shared by every statebind store and enhancer.
//!
//! All of these describe programmer mistakes (a malformed selector map, a
//! state shape the enhancer cannot work with). They are returned to the
//! immediate caller and never recovered internally.

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The selector map argument was not a structured record.
    #[error("The selector map must be specified as an object")]
    InvalidSelectorMap,

    /// A selector map entry was not callable.
    #[error("The selector '{key}' must be a function")]
    InvalidSelector { key: String },

    /// The wrapped store's initial state was not a map.
    #[error("The state must be a structured map, not a '{type_name}'")]
    InvalidState { type_name: &'static str },

    /// A selector key shadows a key of the initial state.
    #[error("The selector key '{key}' cannot be used because it exists in the initial state")]
    DuplicateSelectorKey { key: String },

    /// A selector produced the absent sentinel instead of a value.
    #[error("Selector '{key}' returned no value; to indicate no value, return Value::Null instead")]
    UndefinedSelectorResult { key: String },

    /// Converting a value into a Rust type failed.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Converting a Rust type into a value failed.
    #[error("encode error: {message}")]
    Encode { message: String },
}

impl Error {
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }

    /// The selector key this error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::InvalidSelector { key }
            | Error::DuplicateSelectorKey { key }
            | Error::UndefinedSelectorResult { key } => Some(key),
            _ => None,
        }
    }
}
