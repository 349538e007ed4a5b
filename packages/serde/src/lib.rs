//! Serde Integration for formpath
//!
//! This layer lets a form store hold and hand out ordinary Rust types:
//! - `options_from`: build a store from any `Serialize` value
//! - `TypedFieldAccess`: read/write fields as Rust types
//! - Value <-> serde and Value <-> `serde_json::Value` conversions
//! - `key_from_json`: checked conversion of dynamic JSON keys into accessor keys
//!
//! # Example
//!
//! ```rust
//! use formpath_serde::{options_from, TypedFieldAccess};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Shipping {
//!     street: String,
//!     express: bool,
//! }
//!
//! let mut store = options_from(&Shipping { street: String::new(), express: false })
//!     .unwrap()
//!     .build();
//!
//! store.set_field_as(|s| s.field("street"), &"Baker Street 221b").unwrap();
//! let shipping: Shipping = store.values_as().unwrap();
//! assert_eq!(shipping.street, "Baker Street 221b");
//! ```

mod convert;
mod typed;

pub use convert::{from_value, json_to_value, key_from_json, to_value, value_to_json};
pub use typed::{options_from, TypedFieldAccess};
