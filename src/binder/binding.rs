//! Positional binding of values to statement placeholders.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::parameter::{BoundParameter, BoundParameterSet};
use super::placeholder::placeholder_names;
use crate::error::{Result, SqlBindError};
use crate::types::{DynamicValue, Value};

/// Options controlling how values are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindOptions {
    /// Add decimal and identifier parameters to the set (default: false).
    ///
    /// When false those values are classified and then dropped, so their
    /// placeholders stay unbound.
    pub include_decimal_and_identifier_parameters: bool,
    /// Fail when the placeholder and value counts differ (default: true).
    ///
    /// When false, trailing placeholders without a value are left unbound.
    /// More values than placeholders is always an error.
    pub require_matching_count: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            include_decimal_and_identifier_parameters: false,
            require_matching_count: true,
        }
    }
}

impl BindOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether decimal and identifier parameters are added.
    #[must_use]
    pub fn with_decimal_and_identifier_parameters(mut self, include: bool) -> Self {
        self.include_decimal_and_identifier_parameters = include;
        self
    }

    /// Sets whether placeholder and value counts must match.
    #[must_use]
    pub fn with_require_matching_count(mut self, require: bool) -> Self {
        self.require_matching_count = require;
        self
    }
}

/// Builds bound parameter sets from statement text and ordered values.
///
/// The value at position `i` is always bound to the `i`th placeholder in the
/// statement. Names are never matched against anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binder {
    options: BindOptions,
}

impl Binder {
    /// Creates a binder with the given options.
    #[must_use]
    pub fn new(options: BindOptions) -> Self {
        Binder { options }
    }

    /// Returns the binder options.
    #[must_use]
    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// Binds `values` to the placeholders of `statement`.
    ///
    /// # Errors
    ///
    /// Returns `PlaceholderCountMismatch` when the counts disagree (see
    /// [`BindOptions::require_matching_count`]) and `UnsupportedParameterType`
    /// for a value with no SQL type.
    pub fn bind(&self, statement: &str, values: &[Value]) -> Result<BoundParameterSet> {
        let mut set = BoundParameterSet::new();
        self.bind_into(&mut set, statement, values)?;
        Ok(set)
    }

    /// Appends the parameters for `statement` to an existing set.
    ///
    /// Parameters appended before a failing value remain in `set`.
    ///
    /// # Errors
    ///
    /// Same as [`Binder::bind`].
    pub fn bind_into(
        &self,
        set: &mut BoundParameterSet,
        statement: &str,
        values: &[Value],
    ) -> Result<()> {
        self.bind_each(
            set,
            statement,
            values.len(),
            values.iter().map(|v| Ok(Cow::Borrowed(v))),
        )
    }

    /// Binds values whose types are only known at runtime.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Binder::bind`], returns
    /// `UnknownParameterType` for a value [`Value::from_any`] does not
    /// recognize.
    pub fn bind_dynamic(
        &self,
        statement: &str,
        values: &[&dyn DynamicValue],
    ) -> Result<BoundParameterSet> {
        let classified = values.iter().enumerate().map(|(position, &value)| {
            Value::from_any(value.as_any())
                .map(Cow::Owned)
                .ok_or_else(|| SqlBindError::UnknownParameterType {
                    position,
                    type_name: value.type_name(),
                })
        });

        let mut set = BoundParameterSet::new();
        self.bind_each(&mut set, statement, values.len(), classified)?;
        Ok(set)
    }

    fn bind_each<'v, I>(
        &self,
        set: &mut BoundParameterSet,
        statement: &str,
        value_count: usize,
        values: I,
    ) -> Result<()>
    where
        I: Iterator<Item = Result<Cow<'v, Value>>>,
    {
        let names = placeholder_names(statement);
        if names.is_empty() {
            return Ok(());
        }
        self.check_count(names.len(), value_count)?;

        let before = set.len();
        for (position, (name, value)) in names.into_iter().zip(values).enumerate() {
            let value = value?;
            let Some(sql_type) = Value::sql_type(&value) else {
                return Err(SqlBindError::UnsupportedParameterType {
                    position,
                    type_name: Value::type_name(&value),
                });
            };

            if sql_type.is_omitted_by_default()
                && !self.options.include_decimal_and_identifier_parameters
            {
                warn!(
                    parameter = name,
                    sql_type = sql_type.name(),
                    "parameter classified but not added to the set"
                );
                continue;
            }
            set.push(BoundParameter::new(name, sql_type, value.into_owned()));
        }

        debug!(statement, bound = set.len() - before, "bound statement parameters");
        Ok(())
    }

    fn check_count(&self, placeholders: usize, values: usize) -> Result<()> {
        let matches = if self.options.require_matching_count {
            values == placeholders
        } else {
            values <= placeholders
        };
        if matches {
            Ok(())
        } else {
            Err(SqlBindError::PlaceholderCountMismatch {
                placeholders,
                values,
            })
        }
    }
}

/// Binds `values` to the placeholders of `statement` with default options.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn bind(statement: &str, values: &[Value]) -> Result<BoundParameterSet> {
    Binder::default().bind(statement, values)
}
