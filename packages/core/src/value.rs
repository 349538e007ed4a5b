//! The Value type - the form's values tree.
//!
//! Containers hold their children behind `Arc`, so cloning a `Value` is a
//! reference-count bump and every update can share untouched subtrees with
//! the tree it was derived from.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::path::{index_of, Path};
use crate::Error;

/// A tree-shaped value holding form data.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering
/// - Container variants are `Arc`-wrapped: a `Value` is never mutated in
///   place, updates build a new root with [`Value::with`]
/// - "Absent" is not a variant; lookups return `Option<&Value>` and `None`
///   means the location does not exist
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Explicit null. Distinct from an absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    Array(Arc<Vec<Value>>),
    /// Key-value map with string keys.
    Map(Arc<BTreeMap<String, Value>>),
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(Arc::new(BTreeMap::new()))
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Arc::new(Vec::new()))
    }

    /// Create a bytes value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// Create a map from key/value pairs.
    ///
    /// ```rust
    /// use formpath_core::Value;
    ///
    /// let v = Value::from_entries([("name", Value::from("Ada")), ("age", Value::from(36))]);
    /// assert!(v.is_map());
    /// ```
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Check whether two values are the same shared container.
    ///
    /// Scalars are never shared, so this is `false` unless both values are
    /// arrays or maps pointing at the same allocation.
    pub fn shares_subtree(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Read one path component off this value.
    ///
    /// Maps are looked up by the component string; arrays by canonical
    /// integer components. Scalars have no children.
    pub fn child(&self, component: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(component),
            Value::Array(items) => items.get(index_of(component)?),
            _ => None,
        }
    }

    /// Get a nested value by path.
    ///
    /// A `Null` anywhere along the way resolves to `Null`, matching how a
    /// recorder propagates null through an accessor chain. Anything else
    /// that cannot be followed yields `None`.
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for component in path.iter() {
            if current.is_null() {
                return Some(current);
            }
            current = current.child(component)?;
        }
        Some(current)
    }

    /// Return a new tree with `leaf` placed at `path`.
    ///
    /// Only the ancestors along `path` are rebuilt; every other subtree is
    /// shared with `self`, which is left untouched. Missing, null or scalar
    /// intermediates are replaced by a fresh container: an array when the
    /// next component is an index, a map otherwise. Writing past the end of
    /// an array pads it with `Null`. A non-index name written into an array
    /// turns it into a map keyed by the element indices.
    ///
    /// Fails with [`Error::IndexTooLarge`] when an array index above
    /// [`MAX_WRITE_INDEX`] would have to be written.
    ///
    /// ```rust
    /// use formpath_core::{path, Value};
    ///
    /// let before = Value::from_entries([("a", Value::from_entries([("b", Value::from(1))]))]);
    /// let after = before.with(&path!("a.b"), Value::from(5)).unwrap();
    ///
    /// assert_eq!(after.get(&path!("a.b")), Some(&Value::from(5)));
    /// assert_eq!(before.get(&path!("a.b")), Some(&Value::from(1)));
    /// ```
    pub fn with(&self, path: &Path, leaf: Value) -> Result<Value, Error> {
        set_in(Some(self), path.components(), leaf)
    }
}

/// The largest array index [`Value::with`] will write.
///
/// Writing an index pads the array with `Null` up to it, so the bound keeps a
/// single write from allocating an arbitrarily large array.
pub const MAX_WRITE_INDEX: usize = 1 << 20;

fn write_index(component: &str) -> Result<Option<usize>, Error> {
    match index_of(component) {
        Some(index) if index > MAX_WRITE_INDEX => Err(Error::IndexTooLarge {
            index,
            limit: MAX_WRITE_INDEX,
        }),
        index => Ok(index),
    }
}

fn set_in(node: Option<&Value>, components: &[String], leaf: Value) -> Result<Value, Error> {
    let Some((head, rest)) = components.split_first() else {
        return Ok(leaf);
    };

    match node {
        Some(Value::Map(map)) => {
            let child = set_in(map.get(head), rest, leaf)?;
            let mut next = BTreeMap::clone(map);
            next.insert(head.clone(), child);
            Ok(Value::Map(Arc::new(next)))
        }
        Some(Value::Array(items)) => match write_index(head)? {
            Some(index) => {
                let child = set_in(items.get(index), rest, leaf)?;
                let mut next = Vec::clone(items);
                if index >= next.len() {
                    next.resize(index + 1, Value::Null);
                }
                next[index] = child;
                Ok(Value::Array(Arc::new(next)))
            }
            None => {
                let mut next: BTreeMap<String, Value> = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.clone()))
                    .collect();
                next.insert(head.clone(), set_in(None, rest, leaf)?);
                Ok(Value::Map(Arc::new(next)))
            }
        },
        _ => {
            let index = write_index(head)?;
            let child = set_in(None, rest, leaf)?;
            Ok(match index {
                Some(index) => {
                    let mut next = vec![Value::Null; index];
                    next.push(child);
                    Value::Array(Arc::new(next))
                }
                None => Value::from_entries([(head.clone(), child)]),
            })
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(Arc::new(v.into_iter().map(Into::into).collect()))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(Arc::new(v))
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(Arc::new(iter.into_iter().map(Into::into).collect()))
    }
}
