//! Per-field rule tables.

use crate::rule::{studly_case, ParsedRule, RuleExpr};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rules for one field as a caller writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRules {
    /// `"required|between:3,10"`
    Piped(String),
    /// Already exploded, one expression per item.
    List(Vec<RuleExpr>),
}

impl FieldRules {
    /// Explode into one expression per rule. Piped text is split on `|`;
    /// lists pass through unchanged.
    pub fn explode(self) -> Vec<RuleExpr> {
        match self {
            Self::Piped(text) => text.split('|').map(RuleExpr::from).collect(),
            Self::List(items) => items,
        }
    }
}

impl From<&str> for FieldRules {
    fn from(text: &str) -> Self {
        Self::Piped(text.to_string())
    }
}

impl From<String> for FieldRules {
    fn from(text: String) -> Self {
        Self::Piped(text)
    }
}

impl From<Vec<RuleExpr>> for FieldRules {
    fn from(items: Vec<RuleExpr>) -> Self {
        Self::List(items)
    }
}

impl<const N: usize> From<[RuleExpr; N]> for FieldRules {
    fn from(items: [RuleExpr; N]) -> Self {
        Self::List(items.into())
    }
}

/// Normalized rule table: field name to its ordered rule expressions.
///
/// Field order is declaration order and is the evaluation order.
///
/// ```rust
/// use ruleval_core::RuleSet;
///
/// let rules = RuleSet::from([("name", "required|between:3,10"), ("age", "numeric")]);
/// assert_eq!(rules.rules_for("name").len(), 2);
/// assert!(rules.has_rule("age", &["Numeric"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    fields: IndexMap<String, Vec<RuleExpr>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rules of one field.
    pub fn insert(&mut self, field: impl Into<String>, rules: impl Into<FieldRules>) -> &mut Self {
        self.fields.insert(field.into(), rules.into().explode());
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn field(mut self, field: impl Into<String>, rules: impl Into<FieldRules>) -> Self {
        self.insert(field, rules);
        self
    }

    /// Rule expressions of a field; empty when the field has none.
    pub fn rules_for(&self, field: &str) -> &[RuleExpr] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleExpr])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `field` carries any of `names`. Names are compared in
    /// canonical form, so `"numeric"` and `"Numeric"` are equivalent.
    pub fn has_rule(&self, field: &str, names: &[&str]) -> bool {
        let wanted: Vec<String> = names.iter().map(|name| studly_case(name)).collect();
        self.rules_for(field)
            .iter()
            .map(ParsedRule::parse)
            .any(|rule| wanted.contains(&rule.name))
    }
}

impl<K, R> FromIterator<(K, R)> for RuleSet
where
    K: Into<String>,
    R: Into<FieldRules>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (field, rules) in iter {
            set.insert(field, rules);
        }
        set
    }
}

impl<K, R, const N: usize> From<[(K, R); N]> for RuleSet
where
    K: Into<String>,
    R: Into<FieldRules>,
{
    fn from(entries: [(K, R); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = IndexMap::<String, FieldRules>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
