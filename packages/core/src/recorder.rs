//! Path recording: resolve an accessor chain into a path and a value.
//!
//! A [`PathRecorder`] stands in for a value while an accessor expression
//! runs. Every access yields a child recorder that carries the extended path
//! and the sub-value found there, so the caller never writes a string path:
//!
//! ```rust
//! use formpath_core::{resolve, Value};
//!
//! let values = Value::from_entries([
//!     ("a", Value::from_entries([("b", Value::from(1))])),
//!     ("list", Value::from(vec![1, 2])),
//! ]);
//!
//! let resolved = resolve(&values, |s| s.field("a")?.field("b")).unwrap();
//! assert_eq!(resolved.path.to_string(), "a.b");
//! assert_eq!(resolved.value, Some(&Value::from(1)));
//!
//! let resolved = resolve(&values, |s| Ok(s.field("list")?.index(5))).unwrap();
//! assert_eq!(resolved.path.to_string(), "list.5");
//! assert_eq!(resolved.value, None);
//! ```

use crate::path::{IntoKey, Key, Path};
use crate::{Error, Value};

/// A resolved `(path, value)` pair.
///
/// `value` is `None` when nothing exists at `path` in the resolved tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved<'v> {
    pub path: Path,
    pub value: Option<&'v Value>,
}

impl Resolved<'_> {
    /// Clone the resolved value out of the tree.
    pub fn cloned(&self) -> Option<Value> {
        self.value.cloned()
    }
}

/// An accessor-chain-sensitive stand-in for a value.
///
/// Data access goes through [`get`](Self::get), [`field`](Self::field) and
/// [`index`](Self::index). Reading the recorder's own path and value uses
/// [`path`](Self::path), [`value`](Self::value) and
/// [`into_resolved`](Self::into_resolved), which never look at the data, so
/// a field literally called `path` is still reached with `.field("path")`.
#[derive(Clone, Debug)]
pub struct PathRecorder<'v> {
    path: Path,
    value: Option<&'v Value>,
}

impl<'v> PathRecorder<'v> {
    /// Create the root recorder for a values tree.
    pub fn root(values: &'v Value) -> Self {
        PathRecorder {
            path: Path::root(),
            value: Some(values),
        }
    }

    /// Step into a member or index.
    ///
    /// Never fails because of missing data: stepping through an absent value
    /// yields an absent child, and stepping through `Null` yields `Null`.
    /// Fails with [`Error::UnsupportedKeyKind`] when `key` is not a plain
    /// name or a non-negative index.
    pub fn get(self, key: impl IntoKey) -> Result<Self, Error> {
        let key = key.into_key()?;
        Ok(self.step(key))
    }

    /// Step into a named member.
    pub fn field(self, name: &str) -> Result<Self, Error> {
        self.get(name)
    }

    /// Step into an array index.
    pub fn index(self, index: usize) -> Self {
        self.step(Key::Index(index))
    }

    fn step(self, key: Key) -> Self {
        let component = key.component();
        let value = match self.value {
            None => None,
            Some(Value::Null) => self.value,
            Some(parent) => parent.child(&component),
        };
        PathRecorder {
            path: self.path.join(&key),
            value,
        }
    }

    /// The path recorded so far.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The value reachable at the recorded path, if any.
    pub fn value(&self) -> Option<&'v Value> {
        self.value
    }

    /// Extract the recorded `(path, value)` pair.
    pub fn into_resolved(self) -> Resolved<'v> {
        Resolved {
            path: self.path,
            value: self.value,
        }
    }
}

/// Run an accessor expression against `values`.
///
/// The expression receives the root recorder (empty path, the whole tree)
/// and returns the recorder it navigated to. Resolution is pure: running the
/// same expression twice over the same tree gives identical results.
pub fn resolve<'v, F>(values: &'v Value, select: F) -> Result<Resolved<'v>, Error>
where
    F: for<'r> FnOnce(PathRecorder<'r>) -> Result<PathRecorder<'r>, Error>,
{
    let recorder = select(PathRecorder::root(values))?;
    Ok(recorder.into_resolved())
}

/// Resolve an already-known path against `values`.
///
/// Gives the same value a recorder would after following the path's
/// components one by one.
pub fn resolve_path<'v>(values: &'v Value, path: &Path) -> Resolved<'v> {
    Resolved {
        path: path.clone(),
        value: values.get(path),
    }
}
