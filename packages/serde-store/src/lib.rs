//! Serde Integration for statebind
//!
//! This layer provides typed access to store state via serde. It adds:
//! - Value <-> serde conversions
//! - Value <-> `serde_json::Value` conversions, for building states with `json!`
//! - `typed_selector`: selectors written against a Rust view of the state
//!
//! # Example
//!
//! ```rust
//! use serde::Deserialize;
//! use statebind_serde_store::{json_to_value, typed_selector};
//!
//! #[derive(Deserialize)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! let higher = typed_selector(|s: &Counter| s.count + 1);
//! let state = json_to_value(serde_json::json!({ "count": 5 }));
//! assert_eq!(higher(&state), Some(6i64.into()));
//! ```

mod convert;
mod typed;

pub use convert::{from_value, json_state, json_to_value, to_value, value_to_json};
pub use typed::typed_selector;

// Re-export core types for convenience
pub use statebind_core_store::{Error, State, Value};
