//! sqlbind - SQLite helper with `@name` placeholder binding
//!
//! Statements carry `@name` placeholders. Values are supplied as an ordered
//! list and paired with the placeholders strictly by position:
//!
//! ```
//! use sqlbind::{bind, SqlType, Value};
//!
//! let params = bind(
//!     "insert into t values(@a,@b,@c)",
//!     &[Value::from("x"), Value::from(5), Value::from(true)],
//! )
//! .unwrap();
//!
//! assert_eq!(params.names(), vec!["@a", "@b", "@c"]);
//! assert_eq!(params.get(1).unwrap().sql_type, SqlType::Integer);
//! ```

pub mod binder;
pub mod error;
pub mod helper;
pub mod types;

pub use binder::{bind, BindOptions, Binder, BoundParameter, BoundParameterSet, ParameterSink};
pub use error::{Result, SqlBindError};
pub use helper::{HelperConfig, SqliteHelper};
pub use types::{ColumnValue, Decimal, DynamicValue, QueryResult, Row, SqlType, Value};
