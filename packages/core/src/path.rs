//! Dot-joined field paths and the keys they are built from.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// One accessor step: a named member or an array index.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    /// A named member. Use [`Key::name`] to build one that is checked.
    Name(String),
    /// A non-negative array index.
    Index(usize),
}

impl Key {
    /// Create a named key, rejecting names that cannot appear in a path.
    ///
    /// ```rust
    /// use formpath_core::Key;
    ///
    /// assert!(Key::name("email").is_ok());
    /// assert!(Key::name("").is_err());
    /// assert!(Key::name("a.b").is_err());
    /// ```
    pub fn name(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        check_name(&name)?;
        Ok(Key::Name(name))
    }

    /// Check that this key can appear in a path.
    ///
    /// `Key::Name` is public, so a name built directly may still be empty or
    /// contain `.`; such keys fail with [`Error::UnsupportedKeyKind`].
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Key::Name(name) => check_name(name),
            Key::Index(_) => Ok(()),
        }
    }

    /// The path component this key renders to.
    pub fn component(&self) -> String {
        match self {
            Key::Name(name) => name.clone(),
            Key::Index(index) => index.to_string(),
        }
    }
}

fn check_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::unsupported_key("empty field name"));
    }
    if name.contains('.') {
        return Err(Error::unsupported_key(format!(
            "field name {:?} contains '.'",
            name
        )));
    }
    Ok(())
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{}", name),
            Key::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Conversion into a [`Key`], used by every accessor on a recorder.
///
/// Conversions from signed integers are checked: a negative value is not an
/// index and fails with [`Error::UnsupportedKeyKind`].
pub trait IntoKey {
    fn into_key(self) -> Result<Key, Error>;
}

impl IntoKey for Key {
    fn into_key(self) -> Result<Key, Error> {
        self.validate()?;
        Ok(self)
    }
}

impl IntoKey for &Key {
    fn into_key(self) -> Result<Key, Error> {
        self.validate()?;
        Ok(self.clone())
    }
}

impl IntoKey for &str {
    fn into_key(self) -> Result<Key, Error> {
        Key::name(self)
    }
}

impl IntoKey for String {
    fn into_key(self) -> Result<Key, Error> {
        Key::name(self)
    }
}

impl IntoKey for &String {
    fn into_key(self) -> Result<Key, Error> {
        Key::name(self.as_str())
    }
}

impl IntoKey for usize {
    fn into_key(self) -> Result<Key, Error> {
        Ok(Key::Index(self))
    }
}

impl IntoKey for u32 {
    fn into_key(self) -> Result<Key, Error> {
        Ok(Key::Index(self as usize))
    }
}

impl IntoKey for i32 {
    fn into_key(self) -> Result<Key, Error> {
        i64::from(self).into_key()
    }
}

impl IntoKey for i64 {
    fn into_key(self) -> Result<Key, Error> {
        usize::try_from(self)
            .map(Key::Index)
            .map_err(|_| Error::unsupported_key(format!("negative index {}", self)))
    }
}

/// Parse a path component as an array index.
///
/// Only canonical base-10 integers count: `"0"` and `"12"` are indices,
/// `"012"`, `"+1"` and `"-1"` are not.
pub fn index_of(component: &str) -> Option<usize> {
    let canonical = !component.is_empty()
        && component.bytes().all(|b| b.is_ascii_digit())
        && (component == "0" || !component.starts_with('0'));
    if canonical {
        component.parse().ok()
    } else {
        None
    }
}

/// A location in a values tree, written as components joined by `.`.
///
/// The empty path denotes the root. Components are never empty and never
/// contain `.`, so every path round-trips through its string form.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    components: Vec<String>,
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Path::default()
    }

    /// Parse a dot-joined path string.
    ///
    /// ```rust
    /// use formpath_core::Path;
    ///
    /// let path = Path::parse("list.0.name").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.to_string(), "list.0.name");
    /// assert!(Path::parse("").unwrap().is_empty());
    /// ```
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s.is_empty() {
            return Ok(Path::root());
        }

        let mut components = Vec::new();
        for (position, component) in s.split('.').enumerate() {
            if component.is_empty() {
                return Err(Error::InvalidPath {
                    path: s.to_string(),
                    message: format!("empty component at position {}", position),
                });
            }
            components.push(component.to_string());
        }
        Ok(Path { components })
    }

    /// Extend this path by one key.
    ///
    /// Fails with [`Error::UnsupportedKeyKind`] for a name that is empty or
    /// contains `.`.
    pub fn child(&self, key: &Key) -> Result<Path, Error> {
        key.validate()?;
        Ok(self.join(key))
    }

    /// Extend by a key that has already been validated.
    pub(crate) fn join(&self, key: &Key) -> Path {
        let mut components = self.components.clone();
        components.push(key.component());
        Path { components }
    }

    /// Check if this is the root path.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl std::str::FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Path::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Macro for creating paths from string literals.
///
/// # Example
///
/// ```rust
/// use formpath_core::path;
///
/// let p = path!("address.city");
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s).expect("invalid path literal")
    };
}
