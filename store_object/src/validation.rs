//! Validation module
//!
//! Table and column names are written into SQL text unquoted, so every name
//! that comes out of a model declaration is checked here first.

use thiserror::Error;

/// Validation errors for database identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),

    #[error(
        "Invalid characters in name '{0}': only alphanumeric characters and underscores are allowed"
    )]
    InvalidCharacters(String),

    #[error("Name '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

/// Keywords SQLite will not accept as bare identifiers, plus the row address
/// names a user column would shadow
const RESERVED_KEYWORDS: &[&str] = &[
    "ADD",
    "ALL",
    "ALTER",
    "AND",
    "AS",
    "AUTOINCREMENT",
    "BETWEEN",
    "CASE",
    "CHECK",
    "COLLATE",
    "COMMIT",
    "CONSTRAINT",
    "CREATE",
    "DEFAULT",
    "DEFERRABLE",
    "DELETE",
    "DISTINCT",
    "DROP",
    "ELSE",
    "ESCAPE",
    "EXCEPT",
    "EXISTS",
    "FOREIGN",
    "FROM",
    "GROUP",
    "HAVING",
    "IN",
    "INDEX",
    "INSERT",
    "INTERSECT",
    "INTO",
    "IS",
    "ISNULL",
    "JOIN",
    "LIMIT",
    "NOT",
    "NOTNULL",
    "NULL",
    "ON",
    "OR",
    "ORDER",
    "PRIMARY",
    "REFERENCES",
    "RETURNING",
    "SELECT",
    "SET",
    "TABLE",
    "THEN",
    "TO",
    "TRANSACTION",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USING",
    "VALUES",
    "WHEN",
    "WHERE",
    // Names of the store's own row address
    "ROWID",
    "OID",
    "_ROWID_",
    // System alias used by SELECT statements
    "__ROWID__",
];

/// Check that a name can be used as a bare SQL identifier
pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    let first_char = name.chars().next().ok_or(ValidationError::Empty)?;

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    if is_reserved_keyword(name) {
        return Err(ValidationError::ReservedKeyword(name.to_string()));
    }

    Ok(())
}

/// Check if a name is a reserved SQL keyword
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}
