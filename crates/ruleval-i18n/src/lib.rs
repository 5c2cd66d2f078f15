//! # ruleval i18n
//!
//! Locale dictionaries and translation for validation messages.
//!
//! A [`Dictionary`] holds one nested tree of message templates per locale.
//! A [`LocaleTranslator`] resolves dotted keys (`"between.numeric"`,
//! `"attributes.email"`) against the current locale and then the fallback
//! locale. When nothing matches, the key itself comes back, which is how
//! callers detect a missing translation.
//!
//! ## Example
//!
//! ```rust
//! use ruleval_i18n::{Dictionary, LocaleConfig, LocaleTranslator, Translator};
//!
//! let mut dictionary = Dictionary::english();
//! dictionary.set("de", "required", "Das Feld :attribute ist erforderlich.");
//!
//! let translator = LocaleTranslator::new(LocaleConfig::new("de", "en"), dictionary);
//! assert_eq!(translator.trans("required"), "Das Feld :attribute ist erforderlich.");
//! assert_eq!(translator.trans("numeric"), "The :attribute must be a number.");
//! ```
//!
//! ## Optional Features
//!
//! - `config` - Load the locale pair from `RULEVAL_LOCALE` /
//!   `RULEVAL_FALLBACK_LOCALE` and `.env` files

mod dictionary;
mod error;
mod locale;
mod translator;

#[cfg(feature = "config")]
pub mod config;

pub use dictionary::{Dictionary, Entry};
pub use error::{I18nError, Result};
pub use locale::LocaleConfig;
pub use translator::{LocaleTranslator, Translator};
