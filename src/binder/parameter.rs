//! Bound parameters and the ordered set attached to a pending statement.

use crate::error::Result;
use crate::types::{SqlType, Value};

/// A placeholder name paired with a typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    /// Placeholder name including the leading `@`.
    pub name: String,
    /// SQL type the value is bound as.
    pub sql_type: SqlType,
    /// The value.
    pub value: Value,
}

impl BoundParameter {
    /// Creates a new bound parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType, value: Value) -> Self {
        BoundParameter {
            name: name.into(),
            sql_type,
            value,
        }
    }
}

/// Destination for bound parameters, typically a prepared statement.
pub trait ParameterSink {
    /// Attaches one parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the parameter.
    fn attach(&mut self, parameter: &BoundParameter) -> Result<()>;
}

/// Ordered collection of bound parameters for a single statement execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParameterSet {
    parameters: Vec<BoundParameter>,
}

impl BoundParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, parameter: BoundParameter) {
        self.parameters.push(parameter);
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if the set holds no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Gets a parameter by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BoundParameter> {
        self.parameters.get(index)
    }

    /// Returns an iterator over the parameters in binding order.
    pub fn iter(&self) -> std::slice::Iter<'_, BoundParameter> {
        self.parameters.iter()
    }

    /// Returns the parameter names in binding order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Attaches every parameter to `sink`, in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error reported by the sink.
    pub fn attach_to<S: ParameterSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        self.parameters.iter().try_for_each(|p| sink.attach(p))
    }
}

impl<'a> IntoIterator for &'a BoundParameterSet {
    type Item = &'a BoundParameter;
    type IntoIter = std::slice::Iter<'a, BoundParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl IntoIterator for BoundParameterSet {
    type Item = BoundParameter;
    type IntoIter = std::vec::IntoIter<BoundParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        names: Vec<String>,
    }

    impl ParameterSink for RecordingSink {
        fn attach(&mut self, parameter: &BoundParameter) -> Result<()> {
            self.names.push(parameter.name.clone());
            Ok(())
        }
    }

    #[test]
    fn test_push_preserves_order() {
        let mut set = BoundParameterSet::new();
        set.push(BoundParameter::new("@b", SqlType::Integer, Value::Int32(2)));
        set.push(BoundParameter::new("@a", SqlType::Integer, Value::Int32(1)));
        assert_eq!(set.names(), vec!["@b", "@a"]);
        assert_eq!(set.get(1).map(|p| &p.value), Some(&Value::Int32(1)));
    }

    #[test]
    fn test_attach_to_sink() {
        let mut set = BoundParameterSet::new();
        set.push(BoundParameter::new("@x", SqlType::Text, Value::from("x")));
        set.push(BoundParameter::new("@y", SqlType::Boolean, Value::Bool(true)));

        let mut sink = RecordingSink::default();
        set.attach_to(&mut sink).unwrap();
        assert_eq!(sink.names, vec!["@x", "@y"]);
    }
}
