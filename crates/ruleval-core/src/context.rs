//! What a predicate sees when it runs.

use crate::error::{Result, ValidationError};
use crate::validator::{EqualityPolicy, Validator};
use crate::value::Record;
use serde_json::Value;

/// One rule applied to one field.
///
/// Predicates read their own value and parameters from here, and reach
/// sibling fields through [`data`](Self::data).
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    validator: &'a Validator,
    /// Field under validation.
    pub field: &'a str,
    /// Its current value; `None` when the record has no such field.
    pub value: Option<&'a Value>,
    pub parameters: &'a [String],
    /// Canonical rule name.
    pub rule: &'a str,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(
        validator: &'a Validator,
        field: &'a str,
        rule: &'a str,
        parameters: &'a [String],
    ) -> Self {
        Self {
            validator,
            field,
            value: validator.value(field),
            parameters,
            rule,
        }
    }

    pub fn validator(&self) -> &'a Validator {
        self.validator
    }

    /// Value of another field of the record.
    pub fn data(&self, field: &str) -> Option<&'a Value> {
        self.validator.value(field)
    }

    pub fn record(&self) -> &'a Record {
        self.validator.data()
    }

    /// Parameter at `index`, if given.
    pub fn parameter(&self, index: usize) -> Option<&'a str> {
        self.parameters.get(index).map(String::as_str)
    }

    /// Fail with [`ValidationError::MissingParameters`] unless at least
    /// `count` parameters were given.
    pub fn require_parameters(&self, count: usize) -> Result<()> {
        if self.parameters.len() < count {
            return Err(ValidationError::MissingParameters {
                rule: crate::rule::snake_case(self.rule),
                required: count,
                given: self.parameters.len(),
            });
        }
        Ok(())
    }

    /// Whether this field also carries one of `names`.
    pub fn has_rule(&self, names: &[&str]) -> bool {
        self.validator.has_rule(self.field, names)
    }

    pub fn equality(&self) -> EqualityPolicy {
        self.validator.equality()
    }
}
