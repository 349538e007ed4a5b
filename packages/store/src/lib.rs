//! formpath store: form state addressed by recorded field paths
//!
//! A [`FormStore`] holds a values tree plus two per-path maps, touched flags
//! and validation errors. Every read and write names its field with an
//! accessor chain over a `PathRecorder`, so paths are never written by hand.
//!
//! - `FormStore`: the state container and its get/set operations
//! - `FormStoreOptions`: construction-time configuration
//! - `Validation` / `ValidationTrigger` / `ValidationAdapter`: pluggable
//!   whole-tree validation, run on change, on blur, or both
//!
//! # Example
//!
//! ```rust
//! use formpath_core::{path, BoxError, Value};
//! use formpath_store::{ErrorMap, FormStoreOptions, Validation, ValidationTrigger};
//!
//! fn require_email(values: &Value) -> Result<ErrorMap, BoxError> {
//!     let mut errors = ErrorMap::new();
//!     if values.get(&path!("email")).and_then(Value::as_str) == Some("") {
//!         errors.insert(path!("email"), Some("email is required".to_string()));
//!     }
//!     Ok(errors)
//! }
//!
//! let mut store = FormStoreOptions::new(Value::from_entries([("email", Value::from(""))]))
//!     .validation(Validation::new(ValidationTrigger::Blur, require_email))
//!     .build();
//!
//! store.set_field_touched(|s| s.field("email"), true).unwrap();
//! assert_eq!(
//!     store.get_field_error(|s| s.field("email")).unwrap().as_deref(),
//!     Some("email is required")
//! );
//! ```

mod state;
mod store;
mod validation;

pub use state::{ErrorMap, FieldState, FormState, TouchedMap};
pub use store::{FormStore, FormStoreOptions, SubscriptionId};
pub use validation::{Validation, ValidationAdapter, ValidationTrigger};

// Re-export core types for convenience
pub use formpath_core::{path, resolve, BoxError, Error, Key, Path, PathRecorder, Value};
