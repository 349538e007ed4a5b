//! The state triple held by a form store.

use std::collections::BTreeMap;

use formpath_core::{Path, Value};

/// Per-field "has been interacted with" flags. Absent entries mean `false`.
pub type TouchedMap = BTreeMap<Path, bool>;

/// Per-field validation messages. An absent entry or `None` means no error.
pub type ErrorMap = BTreeMap<Path, Option<String>>;

/// The full `(values, touched, errors)` triple.
///
/// A store replaces its state as a whole on every operation, so a
/// `FormState` observed through [`FormStore::state`](crate::FormStore::state)
/// is always internally consistent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub values: Value,
    pub touched: TouchedMap,
    pub errors: ErrorMap,
}

impl FormState {
    /// Check whether no field currently has an error message.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Option::is_none)
    }

    pub fn touched_at(&self, path: &Path) -> bool {
        self.touched.get(path).copied().unwrap_or(false)
    }

    pub fn error_at(&self, path: &Path) -> Option<&str> {
        self.errors.get(path).and_then(Option::as_deref)
    }
}

/// Everything the store knows about one field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldState {
    pub path: Path,
    pub value: Option<Value>,
    pub touched: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;
    use formpath_core::path;

    #[test]
    fn touched_defaults_to_false() {
        let state = FormState {
            touched: btree! { path!("a") => true, path!("b") => false },
            ..FormState::default()
        };
        assert!(state.touched_at(&path!("a")));
        assert!(!state.touched_at(&path!("b")));
        assert!(!state.touched_at(&path!("never")));
    }

    #[test]
    fn explicit_none_is_no_error() {
        let state = FormState {
            errors: btree! { path!("a") => None, path!("b") => Some("bad".to_string()) },
            ..FormState::default()
        };
        assert_eq!(state.error_at(&path!("a")), None);
        assert_eq!(state.error_at(&path!("b")), Some("bad"));
        assert!(!state.is_valid());
    }

    #[test]
    fn empty_or_cleared_errors_are_valid() {
        assert!(FormState::default().is_valid());
        let state = FormState {
            errors: btree! { path!("a") => None },
            ..FormState::default()
        };
        assert!(state.is_valid());
    }
}
