//! # ruleval core
//!
//! Rule-string validation of JSON records.
//!
//! A [`Validator`] takes a record, a [`RuleSet`] mapping each field to rules
//! such as `"required|between:3,10"`, and optional custom messages and
//! labels. [`Validator::passes`] runs every rule in declaration order and
//! collects one message per failed rule in a [`MessageBag`].
//!
//! ## Example
//!
//! ```rust
//! use ruleval_core::Validator;
//! use serde_json::json;
//!
//! let mut validator = Validator::builder(
//!     json!({"foo": null, "bar": 10}),
//!     [("foo", "required_if:bar,10")],
//! )
//! .attribute("bar", "the bar")
//! .build();
//!
//! assert!(validator.fails().unwrap());
//! assert_eq!(
//!     validator.errors().first("foo"),
//!     "The foo field is required when the bar is 10."
//! );
//! ```
//!
//! ## Messages
//!
//! The template for a failed rule comes from, in order: custom messages,
//! the translator's `custom.<field>.<rule>` key, the size variant
//! (`between.numeric`, `between.array`, `between.string`), the translator's
//! `<rule>` key and finally the registry's fallback message. Placeholders
//! such as `:attribute`, `:min` or `:values` are then replaced.
//!
//! ## Extending
//!
//! New rules go into a [`RuleRegistry`], shared through an `Arc` between
//! every validator that should see them. [`ValidatorFactory`] bundles a
//! registry with a translator.
//!
//! ## Optional Features
//!
//! - `tracing` (default) - Emit `tracing` events for runs, dispatch and
//!   failures

mod compose;
mod context;
mod error;
mod message_bag;
mod registry;
mod rule;
mod rules;
mod ruleset;
mod tracing_macros;
mod validator;
pub mod value;


pub use compose::replace_placeholders;
pub use context::RuleContext;
pub use error::{Result, ValidationError};
pub use message_bag::MessageBag;
pub use registry::{Predicate, Replacer, RuleRegistry};
pub use rule::{snake_case, studly_case, ParsedRule, RuleExpr};
pub use ruleset::{FieldRules, RuleSet};
pub use validator::{
    EqualityPolicy, Validator, ValidatorBuilder, ValidatorFactory, NUMERIC_RULES, SIZE_RULES,
};
pub use value::Record;

pub use ruleval_i18n::{LocaleTranslator, Translator};
