//! Error types shared by every formpath layer.

/// A boxed error returned by validation adapters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while resolving, updating, or validating form values.
///
/// Traversing through a missing intermediate value is never an error; it
/// resolves to a well-formed path with an absent value instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An accessor used a key that is neither a plain field name nor a
    /// non-negative integer index.
    #[error("unsupported key kind: {kind}")]
    UnsupportedKeyKind { kind: String },

    /// A path string could not be parsed.
    #[error("invalid path {path:?}: {message}")]
    InvalidPath { path: String, message: String },

    /// A write would pad an array past the largest writable index.
    #[error("array index {index} exceeds the write limit of {limit}")]
    IndexTooLarge { index: usize, limit: usize },

    /// The validation adapter failed instead of returning an error map.
    #[error("validation failed: {0}")]
    Validation(#[source] BoxError),

    /// A value could not be decoded into a typed representation.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A typed representation could not be encoded into a value.
    #[error("encode error: {message}")]
    Encode { message: String },
}

impl Error {
    /// Create an `UnsupportedKeyKind` error describing the offending key.
    pub fn unsupported_key(kind: impl Into<String>) -> Self {
        Error::UnsupportedKeyKind { kind: kind.into() }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }

    /// Check whether this error came from a malformed accessor key.
    pub fn is_unsupported_key(&self) -> bool {
        matches!(self, Error::UnsupportedKeyKind { .. })
    }
}
