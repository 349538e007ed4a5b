//! Typed field access on top of a form store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use formpath_core::{Error, PathRecorder};
use formpath_store::{FormStore, FormStoreOptions};

use crate::convert::{from_value, to_value};

/// Build store options whose initial values are a serialized Rust value.
///
/// # Example
///
/// ```rust
/// use formpath_serde::{options_from, TypedFieldAccess};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login {
///     user: String,
///     remember: bool,
/// }
///
/// let store = options_from(&Login { user: "ada".into(), remember: false })
///     .unwrap()
///     .build();
/// let remember: Option<bool> = store.get_field_as(|s| s.field("remember")).unwrap();
/// assert_eq!(remember, Some(false));
/// ```
pub fn options_from<T: Serialize>(initial: &T) -> Result<FormStoreOptions, Error> {
    Ok(FormStoreOptions::new(to_value(initial)?))
}

/// Extension trait for typed reads and writes.
///
/// Implemented for [`FormStore`]. Values go through serde, so any type that
/// serializes to a JSON-shaped tree can be read from or written to a field.
pub trait TypedFieldAccess {
    /// Read the selected field and deserialize it.
    ///
    /// Returns `Ok(None)` when nothing exists at the field's path.
    fn get_field_as<T, F>(&self, select: F) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>;

    /// Serialize `data` and store it at the selected field.
    fn set_field_as<T, F>(&mut self, select: F, data: &T) -> Result<(), Error>
    where
        T: Serialize,
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>;

    /// Deserialize the whole values tree.
    fn values_as<T: DeserializeOwned>(&self) -> Result<T, Error>;
}

impl TypedFieldAccess for FormStore {
    fn get_field_as<T, F>(&self, select: F) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let Some(value) = self.get_field_value(select)? else {
            return Ok(None);
        };
        from_value(value).map(Some)
    }

    fn set_field_as<T, F>(&mut self, select: F, data: &T) -> Result<(), Error>
    where
        T: Serialize,
        F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
    {
        let value = to_value(data)?;
        self.set_field_value(select, value)
    }

    fn values_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
        from_value(self.values().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formpath_core::path;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
        zip: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        age: u32,
        address: Address,
        nicknames: Vec<String>,
    }

    fn profile() -> Profile {
        Profile {
            name: "Ada".to_string(),
            age: 36,
            address: Address {
                city: "London".to_string(),
                zip: None,
            },
            nicknames: vec!["Countess".to_string()],
        }
    }

    #[test]
    fn typed_roundtrip_through_store() {
        let mut store = options_from(&profile()).unwrap().build();

        let city: Option<String> = store
            .get_field_as(|s| s.field("address")?.field("city"))
            .unwrap();
        assert_eq!(city.as_deref(), Some("London"));

        let moved = Address {
            city: "Paris".to_string(),
            zip: Some("75001".to_string()),
        };
        store.set_field_as(|s| s.field("address"), &moved).unwrap();

        let recovered: Profile = store.values_as().unwrap();
        assert_eq!(recovered.address, moved);
        assert_eq!(recovered.name, "Ada");
        assert_eq!(
            store.values().get(&path!("address.zip")),
            Some(&formpath_core::Value::from("75001"))
        );
    }

    #[test]
    fn absent_field_reads_none() {
        let store = options_from(&profile()).unwrap().build();
        let missing: Option<String> = store
            .get_field_as(|s| Ok(s.field("nicknames")?.index(4)))
            .unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn wrong_type_is_decode_error() {
        let store = options_from(&profile()).unwrap().build();
        let err = store
            .get_field_as::<u32, _>(|s| s.field("name"))
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn typed_write_extends_arrays() {
        let mut store = options_from(&profile()).unwrap().build();
        store
            .set_field_as(|s| Ok(s.field("nicknames")?.index(1)), &"Enchantress")
            .unwrap();
        let recovered: Profile = store.values_as().unwrap();
        assert_eq!(recovered.nicknames, vec!["Countess", "Enchantress"]);
    }
}
