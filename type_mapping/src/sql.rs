//! SQL type conversion utilities
//!
//! This module maps Rust type names, as written in a model declaration,
//! to the SQLite column types used for DDL generation.

/// Map a Rust type name to the SQLite type used in `CREATE TABLE`
pub fn rust_type_to_sqlite_type(rust_type: &str) -> &'static str {
    // Normalize type string by removing all whitespace for consistent matching
    let normalized = rust_type.replace(' ', "");
    let inner = optional_inner_type(&normalized).unwrap_or(&normalized);
    match inner {
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "bool" => "INTEGER",
        "f32" | "f64" => "REAL",
        "Vec<u8>" => "BLOB",
        "String" | "&str" => "TEXT",
        "Uuid" | "uuid::Uuid" => "TEXT",
        "DateTime<Utc>" | "chrono::DateTime<chrono::Utc>" | "NaiveDate" | "chrono::NaiveDate" => {
            "TEXT"
        }
        "serde_json::Value" | "Value" => "TEXT",
        _ => "TEXT", // default fallback
    }
}

/// Check if a Rust type is Optional (nullable in SQL)
pub fn is_optional_type(rust_type: &str) -> bool {
    let normalized = rust_type.replace(' ', "");
    optional_inner_type(&normalized).is_some()
}

fn optional_inner_type(normalized: &str) -> Option<&str> {
    ["Option<", "std::option::Option<", "core::option::Option<"]
        .iter()
        .find_map(|prefix| normalized.strip_prefix(prefix))
        .and_then(|rest| rest.strip_suffix('>'))
}
