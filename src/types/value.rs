//! Parameter `Value` and `SqlType` definitions for sqlbind.

use std::any::Any;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Decimal;

/// SQL-facing type a parameter is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    /// UTF-8 text.
    Text,
    /// Binary blob.
    Blob,
    /// 32-bit signed integer.
    Integer,
    /// Boolean.
    Boolean,
    /// Date and time.
    DateTime,
    /// 64-bit floating point.
    Double,
    /// Fixed-point decimal.
    Decimal,
    /// Unique identifier (UUID).
    Identifier,
    /// Generic object.
    Object,
}

impl SqlType {
    /// Returns the name of the type as shown in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Blob => "BLOB",
            SqlType::Integer => "INTEGER",
            SqlType::Boolean => "BOOLEAN",
            SqlType::DateTime => "DATETIME",
            SqlType::Double => "DOUBLE",
            SqlType::Decimal => "DECIMAL",
            SqlType::Identifier => "IDENTIFIER",
            SqlType::Object => "OBJECT",
        }
    }

    /// Returns whether parameters of this type are dropped from the set
    /// unless explicitly enabled in [`BindOptions`](crate::binder::BindOptions).
    #[must_use]
    pub fn is_omitted_by_default(&self) -> bool {
        matches!(self, SqlType::Decimal | SqlType::Identifier)
    }
}

/// Runtime value supplied for a placeholder.
///
/// The first nine variants map to a [`SqlType`]. The remaining ones are value
/// kinds callers may hold but the binder refuses with
/// [`SqlBindError::UnsupportedParameterType`](crate::SqlBindError::UnsupportedParameterType).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// String value.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
    /// 32-bit signed integer value.
    Int32(i32),
    /// Boolean value.
    Bool(bool),
    /// Timestamp value (UTC, no offset).
    DateTime(NaiveDateTime),
    /// 64-bit floating point value.
    Double(f64),
    /// Fixed-point decimal value.
    Decimal(Decimal),
    /// Unique identifier value.
    Uuid(Uuid),
    /// Opaque object, stored as JSON.
    Object(serde_json::Value),

    /// Null marker.
    Null,
    /// Single character.
    Char(char),
    /// 8-bit signed integer.
    Int8(i8),
    /// 16-bit unsigned integer.
    UInt16(u16),
    /// 32-bit unsigned integer.
    UInt32(u32),
    /// 64-bit unsigned integer.
    UInt64(u64),
}

impl Value {
    /// Returns the SQL type this value binds as, or None for unsupported kinds.
    #[must_use]
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            Value::Text(_) => Some(SqlType::Text),
            Value::Blob(_) => Some(SqlType::Blob),
            Value::Int32(_) => Some(SqlType::Integer),
            Value::Bool(_) => Some(SqlType::Boolean),
            Value::DateTime(_) => Some(SqlType::DateTime),
            Value::Double(_) => Some(SqlType::Double),
            Value::Decimal(_) => Some(SqlType::Decimal),
            Value::Uuid(_) => Some(SqlType::Identifier),
            Value::Object(_) => Some(SqlType::Object),
            Value::Null
            | Value::Char(_)
            | Value::Int8(_)
            | Value::UInt16(_)
            | Value::UInt32(_)
            | Value::UInt64(_) => None,
        }
    }

    /// Returns a short name for the value kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Int32(_) => "i32",
            Value::Bool(_) => "bool",
            Value::DateTime(_) => "datetime",
            Value::Double(_) => "f64",
            Value::Decimal(_) => "decimal",
            Value::Uuid(_) => "uuid",
            Value::Object(_) => "object",
            Value::Null => "null",
            Value::Char(_) => "char",
            Value::Int8(_) => "i8",
            Value::UInt16(_) => "u16",
            Value::UInt32(_) => "u32",
            Value::UInt64(_) => "u64",
        }
    }

    /// Returns true if this value is the null marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to extract an i32 value.
    #[must_use]
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract a bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an f64 value.
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Classifies a dynamically typed value.
    ///
    /// Recognizes the Rust types with a `From` conversion into [`Value`], `()`
    /// as the null marker, and `Value` itself. Returns None for anything else.
    #[must_use]
    pub fn from_any(value: &dyn Any) -> Option<Value> {
        macro_rules! downcast {
            ($($ty:ty),+ $(,)?) => {
                $(
                    if let Some(v) = value.downcast_ref::<$ty>() {
                        return Some(Value::from(v.clone()));
                    }
                )+
            };
        }

        downcast!(
            Value,
            String,
            &'static str,
            Vec<u8>,
            i32,
            bool,
            NaiveDateTime,
            DateTime<Utc>,
            f64,
            Decimal,
            Uuid,
            serde_json::Value,
            char,
            i8,
            u16,
            u32,
            u64,
        );
        if value.is::<()>() {
            return Some(Value::Null);
        }
        None
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v.naive_utc())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Object(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A value whose concrete type is only known at runtime.
///
/// Implemented for every `'static` type so heterogeneous lists can be written
/// as `&[&dyn DynamicValue]`.
pub trait DynamicValue: Any {
    /// Returns self as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the Rust type name of the concrete value.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> DynamicValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Value read back from a result column, one variant per SQLite storage class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    /// SQL NULL.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Binary blob.
    Blob(Vec<u8>),
}

impl ColumnValue {
    /// Returns true if this value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Attempts to extract an i64 value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ColumnValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract an f64 value.
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            ColumnValue::Real(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to extract a byte slice.
    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            ColumnValue::Blob(b) => Some(b.as_slice()),
            _ => None,
        }
    }
}

/// Represents a single row returned by a query.
///
/// Columns keep their result order, and repeated column names are kept as
/// separate entries.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: Vec<(String, ColumnValue)>,
}

impl Row {
    /// Creates a new empty row.
    #[must_use]
    pub fn new() -> Self {
        Row { values: Vec::new() }
    }

    /// Appends a column value to the row.
    pub fn push(&mut self, column: String, value: ColumnValue) {
        self.values.push((column, value));
    }

    /// Gets the value of the first column named `column`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Gets a value by column position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&ColumnValue> {
        self.values.get(index).map(|(_, value)| value)
    }

    /// Returns the number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the columns and values, in result order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Result of query execution containing rows and column names.
#[derive(Debug, Default)]
pub struct QueryResult {
    /// Ordered list of column names.
    pub columns: Vec<String>,
    /// Result rows.
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a new empty result with the given column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        QueryResult {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row to the result.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Returns the number of rows in the result.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Gets a row by index.
    #[must_use]
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_type_of_supported_values() {
        assert_eq!(Value::from("x").sql_type(), Some(SqlType::Text));
        assert_eq!(Value::from(vec![1u8, 2]).sql_type(), Some(SqlType::Blob));
        assert_eq!(Value::from(5).sql_type(), Some(SqlType::Integer));
        assert_eq!(Value::from(true).sql_type(), Some(SqlType::Boolean));
        assert_eq!(Value::from(1.5).sql_type(), Some(SqlType::Double));
        assert_eq!(
            Value::from(Decimal::new(1, 0)).sql_type(),
            Some(SqlType::Decimal)
        );
        assert_eq!(Value::from(Uuid::nil()).sql_type(), Some(SqlType::Identifier));
        assert_eq!(
            Value::from(serde_json::json!({"k": 1})).sql_type(),
            Some(SqlType::Object)
        );
    }

    #[test]
    fn test_unsupported_values_have_no_sql_type() {
        for v in [
            Value::Null,
            Value::from('c'),
            Value::from(1i8),
            Value::from(1u16),
            Value::from(1u32),
            Value::from(1u64),
        ] {
            assert!(v.sql_type().is_none(), "{} should be unsupported", v.type_name());
        }
    }

    #[test]
    fn test_option_none_is_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(7)), Value::Int32(7));
    }

    #[test]
    fn test_utc_datetime_is_normalized() {
        let utc = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(Value::from(utc), Value::DateTime(utc.naive_utc()));
    }

    #[test]
    fn test_from_any_recognized() {
        assert_eq!(Value::from_any(&"a"), Some(Value::Text("a".into())));
        assert_eq!(Value::from_any(&String::from("b")), Some(Value::Text("b".into())));
        assert_eq!(Value::from_any(&3i32), Some(Value::Int32(3)));
        assert_eq!(Value::from_any(&()), Some(Value::Null));
        assert_eq!(Value::from_any(&9u64), Some(Value::UInt64(9)));
        assert_eq!(Value::from_any(&Value::Bool(true)), Some(Value::Bool(true)));
    }

    #[test]
    fn test_from_any_unrecognized() {
        assert_eq!(Value::from_any(&3i64), None);
        assert_eq!(Value::from_any(&1.5f32), None);
        assert_eq!(Value::from_any(&vec![1i32]), None);
    }

    #[test]
    fn test_dynamic_value_type_name() {
        let v: &dyn DynamicValue = &42i64;
        assert_eq!(v.type_name(), "i64");
    }

    #[test]
    fn test_row_access() {
        let mut row = Row::new();
        row.push("id".into(), ColumnValue::Integer(1));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("id").and_then(ColumnValue::as_integer), Some(1));
        assert_eq!(row.get_index(0), Some(&ColumnValue::Integer(1)));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_row_keeps_repeated_columns() {
        let mut row = Row::new();
        row.push("id".into(), ColumnValue::Integer(1));
        row.push("id".into(), ColumnValue::Integer(2));
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("id"), Some(&ColumnValue::Integer(1)));
        assert_eq!(row.get_index(1), Some(&ColumnValue::Integer(2)));
    }
}
