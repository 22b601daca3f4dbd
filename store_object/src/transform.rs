//! Value transformers
//!
//! A transformer converts a value on its way between the store and a model
//! property, one function per direction.

use chrono::{DateTime, Utc};
use std::fmt::{self, Debug};
use std::sync::Arc;
use type_mapping::StoreValue;

/// One direction of a transformer
pub type TransformFn = Arc<dyn Fn(StoreValue) -> Result<StoreValue, String> + Send + Sync>;

/// Pair of conversions applied to a single property
#[derive(Clone)]
pub struct ValueTransformer {
    to_property: TransformFn,
    to_store: TransformFn,
}

impl Debug for ValueTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueTransformer").finish_non_exhaustive()
    }
}

impl ValueTransformer {
    /// Create a transformer from its store→property and property→store functions
    pub fn new<P, S>(to_property: P, to_store: S) -> Self
    where
        P: Fn(StoreValue) -> Result<StoreValue, String> + Send + Sync + 'static,
        S: Fn(StoreValue) -> Result<StoreValue, String> + Send + Sync + 'static,
    {
        Self {
            to_property: Arc::new(to_property),
            to_store: Arc::new(to_store),
        }
    }

    /// Convert a raw store value into the property's value
    pub fn to_property(&self, value: StoreValue) -> Result<StoreValue, String> {
        (self.to_property)(value)
    }

    /// Convert a property value into the value to store
    pub fn to_store(&self, value: StoreValue) -> Result<StoreValue, String> {
        (self.to_store)(value)
    }

    /// The same transformer with both directions swapped
    pub fn reversed(self) -> Self {
        Self {
            to_property: self.to_store,
            to_store: self.to_property,
        }
    }

    /// Timestamps stored as integer Unix seconds, exposed as RFC 3339 text.
    /// `NULL` passes through unchanged.
    pub fn unix_timestamp() -> Self {
        Self::new(
            |value| match value {
                StoreValue::Null => Ok(StoreValue::Null),
                StoreValue::Integer(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
                    .map(|dt| StoreValue::Text(dt.to_rfc3339()))
                    .ok_or_else(|| format!("timestamp {} out of range", secs)),
                other => Err(format!("expected INTEGER timestamp, found {}", other.kind())),
            },
            |value| match value {
                StoreValue::Null => Ok(StoreValue::Null),
                StoreValue::Text(text) => DateTime::parse_from_rfc3339(&text)
                    .map(|dt| StoreValue::Integer(dt.timestamp()))
                    .map_err(|e| format!("invalid timestamp '{}': {}", text, e)),
                other => Err(format!("expected TEXT timestamp, found {}", other.kind())),
            },
        )
    }

    /// JSON documents stored as text. Both directions check that the text
    /// parses, so malformed JSON never reaches the store or the model.
    pub fn json_text() -> Self {
        fn check(value: StoreValue) -> Result<StoreValue, String> {
            match value {
                StoreValue::Null => Ok(StoreValue::Null),
                StoreValue::Text(text) => serde_json::from_str::<serde_json::Value>(&text)
                    .map(|_| StoreValue::Text(text))
                    .map_err(|e| format!("invalid JSON: {}", e)),
                other => Err(format!("expected TEXT JSON, found {}", other.kind())),
            }
        }
        Self::new(check, check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_timestamp_both_directions() {
        let transformer = ValueTransformer::unix_timestamp();

        let property = transformer.to_property(StoreValue::Integer(0)).unwrap();
        assert_eq!(property, StoreValue::Text("1970-01-01T00:00:00+00:00".into()));

        let stored = transformer
            .to_store(StoreValue::Text("1970-01-02T00:00:00Z".into()))
            .unwrap();
        assert_eq!(stored, StoreValue::Integer(86_400));
    }

    #[test]
    fn test_unix_timestamp_rejects_wrong_kind() {
        let transformer = ValueTransformer::unix_timestamp();
        assert!(transformer.to_property(StoreValue::Text("x".into())).is_err());
        assert!(transformer.to_store(StoreValue::Text("yesterday".into())).is_err());
        assert_eq!(
            transformer.to_store(StoreValue::Null).unwrap(),
            StoreValue::Null
        );
    }

    #[test]
    fn test_reversed_swaps_directions() {
        let transformer = ValueTransformer::new(
            |_| Ok(StoreValue::Text("property".into())),
            |_| Ok(StoreValue::Text("store".into())),
        )
        .reversed();

        assert_eq!(
            transformer.to_property(StoreValue::Null).unwrap(),
            StoreValue::Text("store".into())
        );
        assert_eq!(
            transformer.to_store(StoreValue::Null).unwrap(),
            StoreValue::Text("property".into())
        );
    }

    #[test]
    fn test_json_text_validates() {
        let transformer = ValueTransformer::json_text();
        let doc = StoreValue::Text(r#"{"tags":["a","b"]}"#.into());
        assert_eq!(transformer.to_store(doc.clone()).unwrap(), doc);
        assert!(transformer.to_property(StoreValue::Text("{oops".into())).is_err());
        assert!(transformer.to_store(StoreValue::Integer(1)).is_err());
    }
}
