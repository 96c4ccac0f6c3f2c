//! Binder module for statement parameters.
//!
//! The binder turns statement text with `@name` placeholders and an ordered
//! list of values into a [`BoundParameterSet`]:
//! - Placeholders are scanned in order of appearance
//! - Each value is paired with the placeholder at the same position
//! - Each value is classified into a [`SqlType`](crate::types::SqlType)

mod binding;
mod parameter;
pub mod placeholder;

pub use binding::{bind, BindOptions, Binder};
pub use parameter::{BoundParameter, BoundParameterSet, ParameterSink};
pub use placeholder::{placeholder_names, Placeholder, Placeholders};
