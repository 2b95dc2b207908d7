//! Values produced by the PHP unserializer.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Key of a PHP array entry. PHP arrays accept integer and string keys only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhpKey {
    Int(i64),
    String(String),
}

impl PhpKey {
    /// Check whether this key matches a textual key.
    ///
    /// Integer keys match their decimal representation, so `"0"` finds the
    /// entry stored under `i:0`.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Int(i) => key.parse::<i64>().is_ok_and(|k| k == *i),
            Self::String(s) => s == key,
        }
    }
}

impl fmt::Display for PhpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for PhpKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

/// A decoded PHP value.
///
/// Arrays and object properties keep the order in which they were serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<(PhpKey, PhpValue)>),
    Object {
        class: String,
        properties: Vec<(PhpKey, PhpValue)>,
    },
    /// Back-reference (`r:` / `R:`) to an earlier value slot.
    Reference(i64),
}

impl PhpValue {
    /// Look up an array entry or object property by key.
    ///
    /// # Examples
    /// ```
    /// use wxr_parser::php::unserialize;
    ///
    /// let value = unserialize(r#"a:1:{s:5:"width";i:1200;}"#).unwrap();
    /// assert_eq!(value.get("width").and_then(|v| v.as_i64()), Some(1200));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PhpValue> {
        self.entries()?
            .iter()
            .find(|(k, _)| k.matches(key))
            .map(|(_, v)| v)
    }

    /// Entries of an array or properties of an object.
    #[must_use]
    pub fn entries(&self) -> Option<&[(PhpKey, PhpValue)]> {
        match self {
            Self::Array(entries) => Some(entries),
            Self::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is a container (array or object) rather than a scalar.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object { .. })
    }
}

fn serialize_entries<S: Serializer>(
    entries: &[(PhpKey, PhpValue)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

impl Serialize for PhpValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) | Self::Reference(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(entries) => serialize_entries(entries, serializer),
            Self::Object { properties, .. } => serialize_entries(properties, serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PhpValue {
        PhpValue::Array(vec![
            (PhpKey::String("file".into()), PhpValue::String("a.png".into())),
            (PhpKey::Int(0), PhpValue::Int(7)),
        ])
    }

    #[test]
    fn test_key_matches() {
        assert!(PhpKey::Int(3).matches("3"));
        assert!(!PhpKey::Int(3).matches("03x"));
        assert!(PhpKey::String("width".into()).matches("width"));
        assert!(!PhpKey::String("3".into()).matches("width"));
    }

    #[test]
    fn test_get() {
        let value = sample();
        assert_eq!(value.get("file").and_then(PhpValue::as_str), Some("a.png"));
        assert_eq!(value.get("0").and_then(PhpValue::as_i64), Some(7));
        assert!(value.get("missing").is_none());
        assert!(PhpValue::Int(1).get("file").is_none());
    }

    #[test]
    fn test_is_structured() {
        assert!(sample().is_structured());
        assert!(PhpValue::Object {
            class: "stdClass".into(),
            properties: vec![]
        }
        .is_structured());
        assert!(!PhpValue::String("a".into()).is_structured());
        assert!(!PhpValue::Null.is_structured());
    }

    #[test]
    fn test_serialize_array_as_map() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"file":"a.png","0":7}"#);
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serde_json::to_string(&PhpValue::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&PhpValue::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&PhpValue::Float(0.5)).unwrap(), "0.5");
    }
}
