//! Conversions between sqlbind types and rusqlite.

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqliteValue, ValueRef};
use rusqlite::Statement;

use crate::binder::{BoundParameter, ParameterSink};
use crate::error::{Result, SqlBindError};
use crate::types::{ColumnValue, Value};

/// Format used for `DATETIME` parameters.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let output = match self {
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            Value::Int32(i) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*i))),
            Value::Bool(b) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*b))),
            Value::DateTime(dt) => {
                ToSqlOutput::Owned(SqliteValue::Text(dt.format(DATETIME_FORMAT).to_string()))
            }
            Value::Double(f) => ToSqlOutput::Owned(SqliteValue::Real(*f)),
            Value::Decimal(d) => ToSqlOutput::Owned(SqliteValue::Text(d.to_string())),
            Value::Uuid(u) => ToSqlOutput::Owned(SqliteValue::Text(u.to_string())),
            Value::Object(json) => ToSqlOutput::Owned(SqliteValue::Text(json.to_string())),
            other => {
                return Err(rusqlite::Error::ToSqlConversionFailure(
                    format!("cannot bind {} value", other.type_name()).into(),
                ))
            }
        };
        Ok(output)
    }
}

impl ParameterSink for Statement<'_> {
    fn attach(&mut self, parameter: &BoundParameter) -> Result<()> {
        let index = self
            .parameter_index(&parameter.name)?
            .ok_or_else(|| SqlBindError::UnknownParameter(parameter.name.clone()))?;
        self.raw_bind_parameter(index, &parameter.value)?;
        Ok(())
    }
}

impl From<ValueRef<'_>> for ColumnValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => ColumnValue::Null,
            ValueRef::Integer(i) => ColumnValue::Integer(i),
            ValueRef::Real(f) => ColumnValue::Real(f),
            ValueRef::Text(t) => ColumnValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => ColumnValue::Blob(b.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Decimal;
    use chrono::NaiveDate;
    use rusqlite::Connection;

    fn select_one(value: &Value) -> ColumnValue {
        let conn = Connection::open_in_memory().unwrap();
        conn.query_row("SELECT ?1", [value], |row| {
            Ok(ColumnValue::from(row.get_ref(0)?))
        })
        .unwrap()
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(select_one(&Value::from("hi")), ColumnValue::Text("hi".into()));
        assert_eq!(select_one(&Value::from(7)), ColumnValue::Integer(7));
        assert_eq!(select_one(&Value::from(true)), ColumnValue::Integer(1));
        assert_eq!(select_one(&Value::from(2.5)), ColumnValue::Real(2.5));
        assert_eq!(
            select_one(&Value::from(vec![0u8, 1])),
            ColumnValue::Blob(vec![0, 1])
        );
    }

    #[test]
    fn test_text_encoded_conversions() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(
            select_one(&Value::from(dt)),
            ColumnValue::Text("2024-03-01 12:30:00".into())
        );
        assert_eq!(
            select_one(&Value::from(Decimal::new(1999, 2))),
            ColumnValue::Text("19.99".into())
        );
        assert_eq!(
            select_one(&Value::from(serde_json::json!([1, 2]))),
            ColumnValue::Text("[1,2]".into())
        );
    }

    #[test]
    fn test_unsupported_value_fails_conversion() {
        assert!(Value::Null.to_sql().is_err());
        assert!(Value::UInt64(1).to_sql().is_err());
    }

    #[test]
    fn test_attach_unknown_name() {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn.prepare("SELECT @a").unwrap();
        let parameter = BoundParameter::new("@b", crate::types::SqlType::Integer, Value::Int32(1));
        let err = stmt.attach(&parameter).unwrap_err();
        assert!(matches!(err, SqlBindError::UnknownParameter(name) if name == "@b"));
    }
}
