//! Conversions between Rust property types and store values
//!
//! Model properties are read and written through these two traits. Reading a
//! value back never coerces across storage classes: an `i64` property only
//! accepts `INTEGER`, a `String` only `TEXT`, and so on.

use crate::types::{StoreValue, ValueKind};
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

/// A store value could not be interpreted as the requested Rust type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {found}{}", .detail.as_ref().map(|d| format!(" ({d})")).unwrap_or_default())]
pub struct ConversionError {
    pub expected: ValueKind,
    pub found: ValueKind,
    pub detail: Option<String>,
}

impl ConversionError {
    pub fn mismatch(expected: ValueKind, found: &StoreValue) -> Self {
        Self {
            expected,
            found: found.kind(),
            detail: None,
        }
    }

    pub fn invalid(expected: ValueKind, detail: impl Into<String>) -> Self {
        Self {
            expected,
            found: expected,
            detail: Some(detail.into()),
        }
    }
}

/// Convert a property value into its store representation
pub trait ToStoreValue {
    fn to_store_value(&self) -> StoreValue;
}

/// Rebuild a property value from its store representation
pub trait FromStoreValue: Sized {
    /// Storage class this type is read from
    const KIND: ValueKind;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError>;
}

macro_rules! integer_conversions {
    ($($ty:ty),*) => {
        $(
            impl ToStoreValue for $ty {
                fn to_store_value(&self) -> StoreValue {
                    StoreValue::Integer(*self as i64)
                }
            }

            impl FromStoreValue for $ty {
                const KIND: ValueKind = ValueKind::Integer;

                fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
                    match value {
                        StoreValue::Integer(v) => <$ty>::try_from(v).map_err(|_| {
                            ConversionError::invalid(
                                ValueKind::Integer,
                                format!("{} out of range for {}", v, stringify!($ty)),
                            )
                        }),
                        other => Err(ConversionError::mismatch(ValueKind::Integer, &other)),
                    }
                }
            }
        )*
    };
}

integer_conversions!(i8, i16, i32, i64, u8, u16, u32);

impl ToStoreValue for bool {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Integer(*self as i64)
    }
}

impl FromStoreValue for bool {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        match value {
            StoreValue::Integer(v) => Ok(v != 0),
            other => Err(ConversionError::mismatch(ValueKind::Integer, &other)),
        }
    }
}

impl ToStoreValue for f64 {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Real(*self)
    }
}

impl FromStoreValue for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        match value {
            StoreValue::Real(v) => Ok(v),
            other => Err(ConversionError::mismatch(ValueKind::Real, &other)),
        }
    }
}

impl ToStoreValue for f32 {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Real(*self as f64)
    }
}

impl FromStoreValue for f32 {
    const KIND: ValueKind = ValueKind::Real;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        f64::from_store_value(value).map(|v| v as f32)
    }
}

impl ToStoreValue for String {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Text(self.clone())
    }
}

impl FromStoreValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        match value {
            StoreValue::Text(v) => Ok(v),
            other => Err(ConversionError::mismatch(ValueKind::Text, &other)),
        }
    }
}

impl ToStoreValue for Vec<u8> {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Blob(self.clone())
    }
}

impl FromStoreValue for Vec<u8> {
    const KIND: ValueKind = ValueKind::Blob;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        match value {
            StoreValue::Blob(v) => Ok(v),
            other => Err(ConversionError::mismatch(ValueKind::Blob, &other)),
        }
    }
}

impl ToStoreValue for Uuid {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Text(self.to_string())
    }
}

impl FromStoreValue for Uuid {
    const KIND: ValueKind = ValueKind::Text;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        let text = String::from_store_value(value)?;
        Uuid::parse_str(&text).map_err(|e| ConversionError::invalid(ValueKind::Text, e.to_string()))
    }
}

impl ToStoreValue for DateTime<Utc> {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Text(self.to_rfc3339())
    }
}

impl FromStoreValue for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Text;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        let text = String::from_store_value(value)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ConversionError::invalid(ValueKind::Text, e.to_string()))
    }
}

impl ToStoreValue for NaiveDate {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Text(self.format("%Y-%m-%d").to_string())
    }
}

impl FromStoreValue for NaiveDate {
    const KIND: ValueKind = ValueKind::Text;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        let text = String::from_store_value(value)?;
        NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map_err(|e| ConversionError::invalid(ValueKind::Text, e.to_string()))
    }
}

impl ToStoreValue for serde_json::Value {
    fn to_store_value(&self) -> StoreValue {
        StoreValue::Text(self.to_string())
    }
}

impl FromStoreValue for serde_json::Value {
    const KIND: ValueKind = ValueKind::Text;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        let text = String::from_store_value(value)?;
        serde_json::from_str(&text).map_err(|e| ConversionError::invalid(ValueKind::Text, e.to_string()))
    }
}

impl<T: ToStoreValue> ToStoreValue for Option<T> {
    fn to_store_value(&self) -> StoreValue {
        match self {
            Some(v) => v.to_store_value(),
            None => StoreValue::Null,
        }
    }
}

impl<T: FromStoreValue> FromStoreValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn from_store_value(value: StoreValue) -> Result<Self, ConversionError> {
        match value {
            StoreValue::Null => Ok(None),
            other => T::from_store_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_round_trip() {
        let value = 42i32.to_store_value();
        assert_eq!(value, StoreValue::Integer(42));
        assert_eq!(i32::from_store_value(value).unwrap(), 42);
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = i8::from_store_value(StoreValue::Integer(1000)).unwrap_err();
        assert_eq!(err.expected, ValueKind::Integer);
        assert!(err.detail.is_some());
    }

    #[test]
    fn test_no_cross_kind_coercion() {
        let err = i64::from_store_value(StoreValue::Text("7".into())).unwrap_err();
        assert_eq!(err.expected, ValueKind::Integer);
        assert_eq!(err.found, ValueKind::Text);

        let err = f64::from_store_value(StoreValue::Integer(7)).unwrap_err();
        assert_eq!(err.expected, ValueKind::Real);
        assert_eq!(err.found, ValueKind::Integer);
    }

    #[test]
    fn test_null_into_required_property_fails() {
        let err = String::from_store_value(StoreValue::Null).unwrap_err();
        assert_eq!(err.found, ValueKind::Null);
    }

    #[test]
    fn test_optional_values() {
        assert_eq!(Option::<String>::from_store_value(StoreValue::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::from_store_value(StoreValue::Text("x".into())).unwrap(),
            Some("x".to_string())
        );
        assert_eq!(None::<i64>.to_store_value(), StoreValue::Null);
    }

    #[test]
    fn test_bool_stored_as_integer() {
        assert_eq!(true.to_store_value(), StoreValue::Integer(1));
        assert!(bool::from_store_value(StoreValue::Integer(5)).unwrap());
        assert!(!bool::from_store_value(StoreValue::Integer(0)).unwrap());
    }

    #[test]
    fn test_uuid_and_timestamp_as_text() {
        let id = Uuid::new_v4();
        assert_eq!(Uuid::from_store_value(id.to_store_value()).unwrap(), id);

        let now = Utc::now();
        let restored = DateTime::<Utc>::from_store_value(now.to_store_value()).unwrap();
        assert_eq!(restored, now);

        let err = Uuid::from_store_value(StoreValue::Text("not-a-uuid".into())).unwrap_err();
        assert_eq!(err.expected, ValueKind::Text);
    }

    #[test]
    fn test_json_as_text() {
        let value = serde_json::json!({"a": [1, 2]});
        let stored = value.to_store_value();
        assert_eq!(stored, StoreValue::Text("{\"a\":[1,2]}".into()));
        assert_eq!(serde_json::Value::from_store_value(stored).unwrap(), value);
    }
}
