//! formpath core: values, paths and path recording
//!
//! This layer lets calling code address a field inside a nested values tree
//! with an ordinary accessor chain instead of a hand-written string path:
//! - `Value`: the values tree, with `Arc`-shared containers
//! - `Path` / `Key`: validated dot-joined paths and the steps they are built from
//! - `PathRecorder`: stand-in value that records every access made on it
//! - `resolve`: run an accessor chain and extract the `(path, value)` pair
//! - `Value::with`: copy-on-write update along a path
//!
//! # Example
//!
//! ```rust
//! use formpath_core::{path, resolve, Value};
//!
//! let values = Value::from_entries([("user", Value::from_entries([("name", Value::from("Ada"))]))]);
//!
//! let resolved = resolve(&values, |s| s.field("user")?.field("name")).unwrap();
//! assert_eq!(resolved.path, path!("user.name"));
//!
//! let updated = values.with(&resolved.path, Value::from("Grace")).unwrap();
//! assert_eq!(updated.get(&path!("user.name")), Some(&Value::from("Grace")));
//! ```

mod error;
mod path;
mod recorder;
mod value;

pub use error::{BoxError, Error};
pub use path::{index_of, IntoKey, Key, Path};
pub use recorder::{resolve, resolve_path, PathRecorder, Resolved};
pub use value::{Value, MAX_WRITE_INDEX};
