//! Value types shared by the binder and the execution layer.

mod decimal;
mod value;

pub use decimal::Decimal;
pub use value::{ColumnValue, DynamicValue, QueryResult, Row, SqlType, Value};
