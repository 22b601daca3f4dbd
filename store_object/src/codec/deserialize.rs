//! Row to model conversion

use crate::descriptor::ModelDescriptor;
use crate::errors::AdapterError;
use crate::row::StoreRow;
use crate::traits::{PropertyError, TableModel};

/// Build a model from a stored row.
///
/// Every stored column of the mapping must be present in the row. The model
/// starts from `T::default()`, so omitted properties keep their defaults, and
/// it is only handed back once every column has been applied.
pub fn deserialize<T: TableModel>(
    mut row: StoreRow,
    descriptor: &ModelDescriptor,
) -> Result<T, AdapterError> {
    let mut model = T::default();

    for (key, column) in descriptor.mapping().columns() {
        let raw = row
            .take(column)
            .ok_or_else(|| AdapterError::missing_column(column))?;

        let value = match descriptor.transformer_for(key) {
            Some(transformer) => transformer
                .to_property(raw)
                .map_err(|message| AdapterError::transform(key, message))?,
            None => raw,
        };

        model
            .set_property(key, value)
            .map_err(|e| property_error(descriptor, column, e))?;
    }

    model.set_row_id(row.row_id());
    trace_log!(
        "Deserialized {} row {}",
        descriptor.model_name(),
        row.row_id()
    );
    Ok(model)
}

fn property_error(descriptor: &ModelDescriptor, column: &str, error: PropertyError) -> AdapterError {
    match error {
        PropertyError::Conversion(e) => match e.detail {
            // Right storage class, but the value does not fit the property
            Some(detail) => AdapterError::InvalidValue {
                column: column.to_string(),
                expected: e.expected,
                detail,
            },
            None => AdapterError::TypeMismatch {
                column: column.to_string(),
                expected: e.expected,
                found: e.found,
            },
        },
        PropertyError::Unknown(key) => AdapterError::invalid_mapping(
            descriptor.model_name(),
            format!("property '{}' cannot be set", key),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::RowId;
    use crate::test_models::{Event, Note, OrderLine, User};
    use type_mapping::{StoreValue, ValueKind};

    fn user_row() -> StoreRow {
        StoreRow::new(RowId::new(12))
            .with_value("id", 7i64)
            .with_value("name", "Ann")
            .with_value("email", StoreValue::Null)
    }

    #[test]
    fn test_deserialize_user() {
        let descriptor = ModelDescriptor::resolve::<User>().unwrap();
        let user: User = deserialize(user_row(), &descriptor).unwrap();
        assert_eq!(user.id, Some(7));
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, None);
        assert_eq!(user.row_id, RowId::new(12));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let descriptor = ModelDescriptor::resolve::<User>().unwrap();
        let row = StoreRow::new(RowId::new(1))
            .with_value("id", 1i64)
            .with_value("name", "Bo");
        let err = deserialize::<User>(row, &descriptor).unwrap_err();
        assert_eq!(err, AdapterError::missing_column("email"));
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let descriptor = ModelDescriptor::resolve::<User>().unwrap();
        let row = StoreRow::new(RowId::new(1))
            .with_value("ID", 1i64)
            .with_value("name", "Bo")
            .with_value("email", StoreValue::Null);
        let err = deserialize::<User>(row, &descriptor).unwrap_err();
        assert_eq!(err, AdapterError::missing_column("id"));
    }

    #[test]
    fn test_type_mismatch_names_column_and_kind() {
        let descriptor = ModelDescriptor::resolve::<User>().unwrap();
        let row = user_row().with_value("name", 42i64);
        let err = deserialize::<User>(row, &descriptor).unwrap_err();
        assert_eq!(
            err,
            AdapterError::TypeMismatch {
                column: "name".to_string(),
                expected: ValueKind::Text,
                found: ValueKind::Integer,
            }
        );
    }

    #[test]
    fn test_out_of_range_value_keeps_detail() {
        let descriptor = ModelDescriptor::resolve::<OrderLine>().unwrap();
        let row = StoreRow::new(RowId::new(1))
            .with_value("order_id", 1i64)
            .with_value("line", 1i64)
            .with_value("qty", -3i64);
        let err = deserialize::<OrderLine>(row, &descriptor).unwrap_err();
        assert_eq!(
            err,
            AdapterError::InvalidValue {
                column: "qty".to_string(),
                expected: ValueKind::Integer,
                detail: "-3 out of range for u32".to_string(),
            }
        );
        assert!(err.to_string().contains("out of range for u32"));
    }

    #[test]
    fn test_renamed_and_omitted_columns() {
        let descriptor = ModelDescriptor::resolve::<Note>().unwrap();
        let row = StoreRow::new(RowId::new(2))
            .with_value("id", 1i64)
            .with_value("title", "t")
            .with_value("note_body", "b");
        let note: Note = deserialize(row, &descriptor).unwrap();
        assert_eq!(note.body, "b");
        assert!(!note.draft);
    }

    #[test]
    fn test_transform_applies_on_read() {
        let descriptor = ModelDescriptor::resolve::<Event>().unwrap();
        let row = StoreRow::new(RowId::new(1))
            .with_value("id", 1i64)
            .with_value("at", 0i64);
        let event: Event = deserialize(row, &descriptor).unwrap();
        assert_eq!(event.at, "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_transform_failure_is_reported() {
        let descriptor = ModelDescriptor::resolve::<Event>().unwrap();
        let row = StoreRow::new(RowId::new(1))
            .with_value("id", 1i64)
            .with_value("at", "noon");
        let err = deserialize::<Event>(row, &descriptor).unwrap_err();
        assert!(matches!(err, AdapterError::TransformError { ref key, .. } if key == "at"));
    }
}
