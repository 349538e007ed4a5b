//! Validation timing and the adapter interface.

use std::fmt;

use serde::{Deserialize, Serialize};

use formpath_core::{BoxError, Value};

use crate::state::ErrorMap;

/// When the store re-runs its validation adapter.
///
/// Deserializes from `"change"`, `"blur"` or `"both"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationTrigger {
    /// After every value change.
    Change,
    /// When a field is marked touched.
    Blur,
    /// Both of the above.
    Both,
}

impl ValidationTrigger {
    /// Check whether value changes trigger validation.
    pub fn on_change(self) -> bool {
        matches!(self, ValidationTrigger::Change | ValidationTrigger::Both)
    }

    /// Check whether marking a field touched triggers validation.
    pub fn on_blur(self) -> bool {
        matches!(self, ValidationTrigger::Blur | ValidationTrigger::Both)
    }
}

/// Maps a whole values tree to a whole error map.
///
/// Implementations must be pure and synchronous. The store always passes the
/// full tree and always treats the result as the complete replacement error
/// map. Returning `Err` aborts the store operation that triggered validation.
///
/// Plain functions and closures taking `&Value` implement this trait:
///
/// ```rust
/// use formpath_core::{path, Value};
/// use formpath_store::{ErrorMap, Validation, ValidationTrigger};
///
/// let validation = Validation::new(ValidationTrigger::Change, |values: &Value| {
///     let mut errors = ErrorMap::new();
///     if values.get(&path!("name")).and_then(Value::as_str).map_or(true, str::is_empty) {
///         errors.insert(path!("name"), Some("required".to_string()));
///     }
///     Ok(errors)
/// });
/// ```
pub trait ValidationAdapter: Send + Sync {
    fn validate(&self, values: &Value) -> Result<ErrorMap, BoxError>;
}

impl<F> ValidationAdapter for F
where
    F: Fn(&Value) -> Result<ErrorMap, BoxError> + Send + Sync,
{
    fn validate(&self, values: &Value) -> Result<ErrorMap, BoxError> {
        self(values)
    }
}

/// Validation configuration captured when a store is built.
pub struct Validation {
    when: ValidationTrigger,
    adapter: Box<dyn ValidationAdapter>,
}

impl Validation {
    pub fn new(when: ValidationTrigger, adapter: impl ValidationAdapter + 'static) -> Self {
        Validation {
            when,
            adapter: Box::new(adapter),
        }
    }

    /// The configured trigger.
    pub fn when(&self) -> ValidationTrigger {
        self.when
    }

    /// The configured adapter.
    pub fn adapter(&self) -> &dyn ValidationAdapter {
        self.adapter.as_ref()
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("when", &self.when)
            .finish_non_exhaustive()
    }
}
