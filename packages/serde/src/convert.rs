//! Conversions between Value and serde types.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use formpath_core::{Error, IntoKey, Key, Value};

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    // Convert Value to serde_json::Value first, then deserialize
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::decode(e.to_string()))
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
    Ok(json_to_value(json))
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Bytes(b) => {
            // JSON doesn't have bytes, so we base64 encode
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&b);
            serde_json::Value::String(encoded)
        }
        Value::Array(items) => serde_json::Value::Array(
            unwrap_or_clone(items)
                .into_iter()
                .map(value_to_json)
                .collect(),
        ),
        Value::Map(map) => serde_json::Value::Object(
            unwrap_or_clone(map)
                .into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for very large numbers
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => arr.into_iter().map(json_to_value).collect(),
        serde_json::Value::Object(map) => {
            Value::from_entries(map.into_iter().map(|(k, v)| (k, json_to_value(v))))
        }
    }
}

/// Turn a dynamic JSON key into an accessor key.
///
/// Strings become field names and non-negative integers become indices.
/// Anything else (negative or fractional numbers, booleans, null, arrays,
/// objects) fails with [`Error::UnsupportedKeyKind`].
pub fn key_from_json(key: &serde_json::Value) -> Result<Key, Error> {
    match key {
        serde_json::Value::String(name) => name.into_key(),
        serde_json::Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(index), _) => usize::try_from(index)
                .map(Key::Index)
                .map_err(|_| Error::unsupported_key(format!("index {} out of range", index))),
            (None, Some(negative)) => negative.into_key(),
            (None, None) => Err(Error::unsupported_key(format!("fractional index {}", n))),
        },
        serde_json::Value::Null => Err(Error::unsupported_key("null key")),
        serde_json::Value::Bool(b) => Err(Error::unsupported_key(format!("boolean key {}", b))),
        serde_json::Value::Array(_) => Err(Error::unsupported_key("array key")),
        serde_json::Value::Object(_) => Err(Error::unsupported_key("object key")),
    }
}

fn unwrap_or_clone<T: Clone>(shared: Arc<T>) -> T {
    Arc::try_unwrap(shared).unwrap_or_else(|shared| (*shared).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formpath_core::path;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestStruct {
        name: String,
        age: u32,
        active: bool,
    }

    #[test]
    fn roundtrip_struct() {
        let original = TestStruct {
            name: "Alice".to_string(),
            age: 30,
            active: true,
        };

        let value = to_value(&original).unwrap();
        assert_eq!(value.get(&path!("age")), Some(&Value::Integer(30)));
        let recovered: TestStruct = from_value(value).unwrap();

        assert_eq!(original, recovered);
    }

    #[test]
    fn json_to_value_numbers() {
        let json = serde_json::json!({
            "integer": 42,
            "float": 2.75,
            "negative": -100
        });

        let value = json_to_value(json);
        assert_eq!(value.get(&path!("integer")), Some(&Value::Integer(42)));
        assert_eq!(value.get(&path!("negative")), Some(&Value::Integer(-100)));
        match value.get(&path!("float")) {
            Some(Value::Float(f)) => assert!((f - 2.75).abs() < 0.001),
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn value_to_json_nan_becomes_null() {
        assert_eq!(value_to_json(Value::Float(f64::NAN)), serde_json::Value::Null);
    }

    #[test]
    fn value_to_json_bytes() {
        let json = value_to_json(Value::bytes(vec![1u8, 2, 3, 4]));

        // Should be base64 encoded
        if let serde_json::Value::String(s) = json {
            use base64::Engine;
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(&s)
                .unwrap();
            assert_eq!(decoded, vec![1, 2, 3, 4]);
        } else {
            panic!("expected string");
        }
    }

    #[test]
    fn value_to_json_keeps_shared_source_intact() {
        let value = json_to_value(serde_json::json!({"list": [1, 2], "a": {"b": 1}}));
        let kept = value.clone();
        let json = value_to_json(value);
        assert_eq!(json, serde_json::json!({"list": [1, 2], "a": {"b": 1}}));
        assert_eq!(kept.get(&path!("a.b")), Some(&Value::Integer(1)));
    }

    #[test]
    fn from_value_error() {
        let value = Value::String("not a struct".to_string());
        let result: Result<TestStruct, _> = from_value(value);
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn roundtrip_option() {
        let some_value = to_value(&Some(42)).unwrap();
        let none_value = to_value(&None::<i32>).unwrap();
        assert_eq!(none_value, Value::Null);

        assert_eq!(from_value::<Option<i32>>(some_value).unwrap(), Some(42));
        assert_eq!(from_value::<Option<i32>>(none_value).unwrap(), None);
    }

    #[test]
    fn to_value_rejects_non_string_map_keys() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(to_value(&map), Err(Error::Encode { .. })));
    }

    #[test]
    fn json_keys() {
        assert_eq!(
            key_from_json(&serde_json::json!("email")).unwrap(),
            Key::Name("email".to_string())
        );
        assert_eq!(key_from_json(&serde_json::json!(3)).unwrap(), Key::Index(3));

        for bad in [
            serde_json::json!(-1),
            serde_json::json!(1.5),
            serde_json::json!(true),
            serde_json::json!(null),
            serde_json::json!([0]),
            serde_json::json!({"k": 0}),
            serde_json::json!(""),
            serde_json::json!("a.b"),
        ] {
            assert!(
                key_from_json(&bad).unwrap_err().is_unsupported_key(),
                "{} should be rejected",
                bad
            );
        }
    }
}
