//! # ruleval
//!
//! Declarative validation of JSON records with rule strings and
//! locale-aware error messages.
//!
//! ## Quick Start
//!
//! ```rust
//! use ruleval::prelude::*;
//!
//! let mut validator = Validator::make(
//!     json!({"name": "Al", "age": "x", "color": "F00"}),
//!     [
//!         ("name", "required|between:3,10"),
//!         ("age", "numeric"),
//!         ("color", "in:0F0,00F"),
//!     ],
//! );
//!
//! assert!(validator.fails().unwrap());
//! let errors = validator.errors();
//! assert_eq!(errors.first("name"), "The name must be between 3 and 10 characters.");
//! assert_eq!(errors.first("age"), "The age must be a number.");
//! assert_eq!(errors.first("color"), "The selected color is invalid.");
//! ```
//!
//! ## Crates
//!
//! - [`ruleval_core`] - rule parsing, the predicate catalogue, message
//!   resolution and the validator
//! - [`ruleval_i18n`] - locale dictionaries and the translator
//!
//! ## Optional Features
//!
//! - `tracing` (default) - Emit `tracing` events from the engine
//! - `config` - Read the locale pair from `RULEVAL_LOCALE` /
//!   `RULEVAL_FALLBACK_LOCALE` and `.env` files
//! - `full` - All optional features enabled
//!
//! ```toml
//! [dependencies]
//! ruleval = { version = "0.1", features = ["config"] }
//! ```

pub use ruleval_core::*;

pub use ruleval_i18n::{Dictionary, Entry, I18nError, LocaleConfig};

#[cfg(feature = "config")]
pub use ruleval_i18n::config;

// Re-export commonly used external types
pub use serde_json::{json, Map, Value};

/// Prelude module - import everything you need with `use ruleval::prelude::*`
pub mod prelude {
    pub use ruleval_core::{
        EqualityPolicy, MessageBag, ParsedRule, RuleContext, RuleExpr, RuleRegistry, RuleSet,
        ValidationError, Validator, ValidatorBuilder, ValidatorFactory,
    };
    pub use ruleval_i18n::{Dictionary, LocaleConfig, LocaleTranslator, Translator};
    pub use serde_json::{json, Value};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_imports_work() {
        let mut validator = Validator::make(json!({"a": 1}), RuleSet::new());
        assert!(validator.passes().unwrap());
    }
}
