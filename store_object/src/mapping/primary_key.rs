//! Primary key resolution

use super::column_mapping::{ColumnMapping, ColumnTarget};
use crate::errors::AdapterError;

/// Property used as the primary key when a model declares none
pub const CONVENTIONAL_PRIMARY_KEY: &str = "id";

/// One primary key member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub key: String,
    pub column: String,
}

/// Ordered, non-empty set of columns identifying a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyColumns {
    members: Vec<PrimaryKey>,
}

impl PrimaryKeyColumns {
    /// Resolve the primary key from the declared keys, falling back to `id`
    pub fn resolve(
        model: &str,
        declared: &[&str],
        mapping: &ColumnMapping,
    ) -> Result<Self, AdapterError> {
        let keys: Vec<&str> = if declared.is_empty() {
            if mapping.get(CONVENTIONAL_PRIMARY_KEY).is_none() {
                return Err(AdapterError::NoPrimaryKey {
                    model: model.to_string(),
                });
            }
            vec![CONVENTIONAL_PRIMARY_KEY]
        } else {
            declared.to_vec()
        };

        let mut members: Vec<PrimaryKey> = Vec::with_capacity(keys.len());
        for key in keys {
            let column = match mapping.get(key) {
                Some(ColumnTarget::Column(column)) => column,
                Some(ColumnTarget::Omitted) => {
                    return Err(AdapterError::invalid_mapping(
                        model,
                        format!("primary key '{}' is omitted from the mapping", key),
                    ))
                }
                None => {
                    return Err(AdapterError::invalid_mapping(
                        model,
                        format!("primary key '{}' is not a property", key),
                    ))
                }
            };
            if members.iter().any(|m| m.key == key) {
                return Err(AdapterError::invalid_mapping(
                    model,
                    format!("primary key '{}' is declared twice", key),
                ));
            }
            members.push(PrimaryKey {
                key: key.to_string(),
                column: column.clone(),
            });
        }

        Ok(Self { members })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrimaryKey> {
        self.members.iter()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.column.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.key.as_str())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.members.iter().any(|m| m.column == column)
    }

    /// The single member of a one-column key
    pub fn single(&self) -> Option<&PrimaryKey> {
        match self.members.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false once resolved
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ColumnOverride, PropertyDef};

    const ORDER_LINE: &[PropertyDef] = &[
        PropertyDef::new("order_id", "INTEGER"),
        PropertyDef::new("line", "INTEGER"),
        PropertyDef::new("sku", "TEXT"),
    ];

    const USER: &[PropertyDef] = &[
        PropertyDef::new("id", "INTEGER"),
        PropertyDef::new("name", "TEXT"),
    ];

    #[test]
    fn test_conventional_id_fallback() {
        let mapping = ColumnMapping::resolve("User", USER, &[]).unwrap();
        let pk = PrimaryKeyColumns::resolve("User", &[], &mapping).unwrap();
        assert_eq!(pk.columns().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(pk.single().map(|m| m.key.as_str()), Some("id"));
    }

    #[test]
    fn test_fallback_follows_renamed_column() {
        let mapping =
            ColumnMapping::resolve("User", USER, &[("id", ColumnOverride::Column("user_id"))])
                .unwrap();
        let pk = PrimaryKeyColumns::resolve("User", &[], &mapping).unwrap();
        assert_eq!(pk.columns().collect::<Vec<_>>(), vec!["user_id"]);
    }

    #[test]
    fn test_no_declared_and_no_id() {
        let mapping = ColumnMapping::resolve("OrderLine", ORDER_LINE, &[]).unwrap();
        let err = PrimaryKeyColumns::resolve("OrderLine", &[], &mapping).unwrap_err();
        assert_eq!(
            err,
            AdapterError::NoPrimaryKey {
                model: "OrderLine".to_string()
            }
        );
    }

    #[test]
    fn test_composite_key_keeps_declared_order() {
        let mapping = ColumnMapping::resolve("OrderLine", ORDER_LINE, &[]).unwrap();
        let pk = PrimaryKeyColumns::resolve("OrderLine", &["line", "order_id"], &mapping).unwrap();
        assert_eq!(pk.columns().collect::<Vec<_>>(), vec!["line", "order_id"]);
        assert!(pk.single().is_none());
        assert!(pk.contains_column("order_id"));
    }

    #[test]
    fn test_omitted_primary_key_is_invalid() {
        let mapping =
            ColumnMapping::resolve("User", USER, &[("id", ColumnOverride::Omit)]).unwrap();
        let err = PrimaryKeyColumns::resolve("User", &[], &mapping).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidMapping { .. }));
    }

    #[test]
    fn test_unknown_or_repeated_primary_key_is_invalid() {
        let mapping = ColumnMapping::resolve("OrderLine", ORDER_LINE, &[]).unwrap();
        assert!(matches!(
            PrimaryKeyColumns::resolve("OrderLine", &["missing"], &mapping),
            Err(AdapterError::InvalidMapping { .. })
        ));
        assert!(matches!(
            PrimaryKeyColumns::resolve("OrderLine", &["sku", "sku"], &mapping),
            Err(AdapterError::InvalidMapping { .. })
        ));
    }
}
