//! FormStore: values, touched flags and errors addressed by recorded paths.

use std::fmt;

use formpath_core::{resolve, Error, Path, PathRecorder, Value};

use crate::state::{ErrorMap, FieldState, FormState, TouchedMap};
use crate::validation::Validation;

/// Identifies a listener registered with [`FormStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormState, &FormState) + Send>;

/// Construction options for a [`FormStore`].
///
/// # Example
///
/// ```rust
/// use formpath_core::Value;
/// use formpath_store::{ErrorMap, FormStoreOptions, Validation, ValidationTrigger};
///
/// let store = FormStoreOptions::new(Value::from_entries([("name", Value::from(""))]))
///     .validation(Validation::new(ValidationTrigger::Blur, |_: &Value| Ok(ErrorMap::new())))
///     .build();
/// assert!(store.errors().is_empty());
/// ```
#[derive(Debug)]
pub struct FormStoreOptions {
    initial_values: Value,
    initial_touched: TouchedMap,
    initial_errors: ErrorMap,
    validation: Option<Validation>,
}

impl FormStoreOptions {
    pub fn new(initial_values: Value) -> Self {
        FormStoreOptions {
            initial_values,
            initial_touched: TouchedMap::new(),
            initial_errors: ErrorMap::new(),
            validation: None,
        }
    }

    #[must_use]
    pub fn initial_touched(mut self, touched: TouchedMap) -> Self {
        self.initial_touched = touched;
        self
    }

    #[must_use]
    pub fn initial_errors(mut self, errors: ErrorMap) -> Self {
        self.initial_errors = errors;
        self
    }

    #[must_use]
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn build(self) -> FormStore {
        let initial = FormState {
            values: self.initial_values,
            touched: self.initial_touched,
            errors: self.initial_errors,
        };
        FormStore {
            state: initial.clone(),
            initial,
            validation: self.validation,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }
}

/// The single source of truth for a form's `(values, touched, errors)`.
///
/// Every read and write names its field with an accessor expression that is
/// resolved against the current values. Each mutating operation computes the
/// complete next state first and commits it in one assignment; if resolution
/// or validation fails, nothing changes.
///
/// # Example
///
/// ```rust
/// use formpath_core::Value;
/// use formpath_store::FormStore;
///
/// let mut store = FormStore::new(Value::from_entries([
///     ("a", Value::from_entries([("b", Value::from(1))])),
///     ("list", Value::from(vec![1, 2])),
/// ]));
///
/// store.set_field_value(|s| s.field("a")?.field("b"), Value::from(5)).unwrap();
/// assert_eq!(store.get_field_value(|s| s.field("a")?.field("b")).unwrap(), Some(Value::from(5)));
///
/// store.set_field_touched(|s| s.field("list"), true).unwrap();
/// assert!(store.get_field_touched(|s| s.field("list")).unwrap());
/// ```
pub struct FormStore {
    state: FormState,
    initial: FormState,
    validation: Option<Validation>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FormStore {
    /// Create a store with empty touched/error maps and no validation.
    pub fn new(initial_values: Value) -> Self {
        FormStoreOptions::new(initial_values).build()
    }

    /// The current state triple.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &Value {
        &self.state.values
    }

    pub fn touched(&self) -> &TouchedMap {
        &self.state.touched
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.state.errors
    }

    /// Check whether no field currently has an error message.
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref()
    }

    /// Resolve an accessor expression to its path under the current values.
    pub fn path_of<F>(&self, select: F) -> Result<Path, Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        Ok(resolve(&self.state.values, select)?.path)
    }

    pub fn get_field_value<F>(&self, select: F) -> Result<Option<Value>, Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        Ok(resolve(&self.state.values, select)?.cloned())
    }

    /// Replace the value at the selected field.
    ///
    /// Only the ancestors along the field's path are copied; the rest of the
    /// tree is shared with the previous values. When validation runs on
    /// change, the adapter's result replaces the whole error map, including
    /// errors set with [`set_field_error`](Self::set_field_error).
    ///
    /// Writing an array index above
    /// [`MAX_WRITE_INDEX`](formpath_core::MAX_WRITE_INDEX) fails with
    /// [`Error::IndexTooLarge`] and leaves the store unchanged.
    pub fn set_field_value<F>(&mut self, select: F, value: Value) -> Result<(), Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let path = self.path_of(select)?;
        let values = self.state.values.with(&path, value)?;

        let errors = match &self.validation {
            Some(validation) if validation.when().on_change() => {
                Self::validate_with(validation, &values)?
            }
            _ => self.state.errors.clone(),
        };

        log::debug!("set value at '{}'", path);
        self.commit(FormState {
            values,
            touched: self.state.touched.clone(),
            errors,
        });
        Ok(())
    }

    pub fn get_field_touched<F>(&self, select: F) -> Result<bool, Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let path = self.path_of(select)?;
        Ok(self.state.touched_at(&path))
    }

    /// Set the touched flag of the selected field.
    ///
    /// Marking a field touched validates the current values when validation
    /// runs on blur. Clearing the flag never validates.
    pub fn set_field_touched<F>(&mut self, select: F, is_touched: bool) -> Result<(), Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let path = self.path_of(select)?;

        let errors = match &self.validation {
            Some(validation) if is_touched && validation.when().on_blur() => {
                Self::validate_with(validation, &self.state.values)?
            }
            _ => self.state.errors.clone(),
        };

        log::debug!("set touched at '{}' to {}", path, is_touched);
        let mut touched = self.state.touched.clone();
        touched.insert(path, is_touched);
        self.commit(FormState {
            values: self.state.values.clone(),
            touched,
            errors,
        });
        Ok(())
    }

    pub fn get_field_error<F>(&self, select: F) -> Result<Option<String>, Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let path = self.path_of(select)?;
        Ok(self.state.error_at(&path).map(str::to_string))
    }

    /// Set or clear the error message of the selected field.
    ///
    /// Only that field's entry changes; every other error is kept.
    pub fn set_field_error<F>(&mut self, select: F, error: Option<String>) -> Result<(), Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let path = self.path_of(select)?;

        log::debug!("set error at '{}'", path);
        let mut errors = self.state.errors.clone();
        errors.insert(path, error);
        self.commit(FormState {
            errors,
            ..self.state.clone()
        });
        Ok(())
    }

    /// Resolve a field once and gather its value, touched flag and error.
    pub fn field<F>(&self, select: F) -> Result<FieldState, Error>
    where
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let resolved = resolve(&self.state.values, select)?;
        let touched = self.state.touched_at(&resolved.path);
        let error = self.state.error_at(&resolved.path).map(str::to_string);
        Ok(FieldState {
            value: resolved.cloned(),
            path: resolved.path,
            touched,
            error,
        })
    }

    /// Validate the current values now and replace the error map.
    ///
    /// Does nothing when the store has no validation configured.
    pub fn validate(&mut self) -> Result<(), Error> {
        let Some(validation) = &self.validation else {
            return Ok(());
        };
        let errors = Self::validate_with(validation, &self.state.values)?;
        self.commit(FormState {
            errors,
            ..self.state.clone()
        });
        Ok(())
    }

    /// Restore the values, touched flags and errors given at construction.
    ///
    /// The restored values share every subtree with the construction
    /// snapshot; nothing is deep-copied.
    pub fn reset(&mut self) {
        log::debug!("reset form state");
        self.commit(self.initial.clone());
    }

    /// Register a listener called with `(next, previous)` after each commit.
    ///
    /// Failed operations commit nothing and notify nobody.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FormState, &FormState) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    fn validate_with(validation: &Validation, values: &Value) -> Result<ErrorMap, Error> {
        match validation.adapter().validate(values) {
            Ok(errors) => {
                log::trace!("validation produced {} error entries", errors.len());
                Ok(errors)
            }
            Err(e) => {
                log::warn!("validation failed, state left unchanged: {}", e);
                Err(Error::Validation(e))
            }
        }
    }

    fn commit(&mut self, next: FormState) {
        let previous = std::mem::replace(&mut self.state, next);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state, &previous);
        }
    }
}

impl fmt::Debug for FormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStore")
            .field("state", &self.state)
            .field("validation", &self.validation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
