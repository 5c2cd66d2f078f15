//! Field error messages collected during one validation run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered, append-only messages per field.
///
/// A field appears only once a message has been added for it. Queries on
/// an absent field answer empty, never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBag {
    messages: IndexMap<String, Vec<String>>,
}

impl MessageBag {
    /// Create an empty message bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Append several messages for a field.
    pub fn add_all<I, S>(&mut self, field: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field = field.into();
        for message in messages {
            self.add(field.clone(), message);
        }
    }

    /// Merge another bag into this one, keeping each field's order.
    pub fn merge(&mut self, other: MessageBag) {
        for (field, messages) in other.messages {
            self.add_all(field, messages);
        }
    }

    /// Whether the field has at least one message.
    pub fn has(&self, field: &str) -> bool {
        self.messages.contains_key(field)
    }

    /// First message of a field, `""` when there is none.
    pub fn first(&self, field: &str) -> &str {
        self.messages
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All messages of a field in insertion order.
    pub fn get(&self, field: &str) -> &[String] {
        self.messages
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Independent copy of every field's messages.
    pub fn all(&self) -> IndexMap<String, Vec<String>> {
        self.messages.clone()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages across fields.
    pub fn len(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Fields with messages, in the order they first failed.
    pub fn field_names(&self) -> Vec<&str> {
        self.messages.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }
}

impl fmt::Display for MessageBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {} error(s)", self.len())
    }
}
