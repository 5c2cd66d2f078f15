//! Key to message resolution over a locale chain.

use crate::dictionary::{Dictionary, Entry};
use crate::locale::LocaleConfig;
use std::sync::{PoisonError, RwLock};

/// Trait for resolving message keys.
///
/// A key that cannot be resolved is returned unchanged. Callers detect a
/// miss by comparing the result with the key they asked for, so
/// implementations must echo the exact input on a miss.
pub trait Translator: Send + Sync {
    /// Resolve a dotted key such as `"between.numeric"`.
    ///
    /// # Arguments
    ///
    /// * `key` - Dotted lookup path
    /// * `locale` - Locale to use instead of the current one
    fn resolve(&self, key: &str, locale: Option<&str>) -> String;

    /// Resolve a key with the current locale.
    fn trans(&self, key: &str) -> String {
        self.resolve(key, None)
    }

    /// Resolve a key with the current locale, `None` on a miss.
    fn translate(&self, key: &str) -> Option<String> {
        let resolved = self.trans(key);
        (resolved != key).then_some(resolved)
    }
}

/// [`Translator`] backed by a [`Dictionary`] and a settable locale pair.
///
/// ## Example
///
/// ```rust
/// use ruleval_i18n::{LocaleTranslator, Translator};
///
/// let translator = LocaleTranslator::english();
/// assert_eq!(translator.trans("required"), "The :attribute field is required.");
/// assert_eq!(translator.trans("no.such.key"), "no.such.key");
/// ```
#[derive(Debug)]
pub struct LocaleTranslator {
    config: RwLock<LocaleConfig>,
    dictionary: Dictionary,
}

impl Default for LocaleTranslator {
    fn default() -> Self {
        Self::english()
    }
}

impl LocaleTranslator {
    pub fn new(config: LocaleConfig, dictionary: Dictionary) -> Self {
        Self {
            config: RwLock::new(config),
            dictionary,
        }
    }

    /// Bundled English messages, `en` as current and fallback locale.
    pub fn english() -> Self {
        Self::new(LocaleConfig::default(), Dictionary::english())
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Snapshot of the current locale pair.
    ///
    /// Lookups never fail, so a lock poisoned by a panicking writer is
    /// read through; a locale pair is replaced one field at a time and is
    /// never left half written.
    pub fn config(&self) -> LocaleConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn locale(&self) -> String {
        self.config().locale
    }

    pub fn fallback_locale(&self) -> String {
        self.config().fallback_locale
    }

    /// Switch the current locale for every holder of this translator.
    pub fn set_locale(&self, locale: impl Into<String>) {
        let locale = locale.into();
        tracing::debug!(locale = %locale, "switching locale");
        self.config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .locale = locale;
    }

    pub fn set_fallback_locale(&self, locale: impl Into<String>) {
        self.config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fallback_locale = locale.into();
    }

    /// Find the entry for `key` in the first locale of the chain that has
    /// it. The entry may be a group.
    pub fn lookup(&self, key: &str, locale: Option<&str>) -> Option<&Entry> {
        let config = self.config();
        let chain = config.chain(locale);
        chain
            .iter()
            .find_map(|candidate| self.dictionary.lookup(candidate, key))
    }
}

impl Translator for LocaleTranslator {
    fn resolve(&self, key: &str, locale: Option<&str>) -> String {
        // A group is not a message; it resolves to the key like a miss.
        match self.lookup(key, locale).and_then(Entry::as_text) {
            Some(text) => text.to_string(),
            None => {
                tracing::trace!(key, ?locale, "translation missing");
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bilingual() -> LocaleTranslator {
        let mut dictionary = Dictionary::english();
        dictionary.set("nl", "required", "Het :attribute veld is verplicht.");
        dictionary.set("nl", "attributes.email", "E-mailadres");
        LocaleTranslator::new(LocaleConfig::new("nl", "en"), dictionary)
    }

    #[test]
    fn resolves_from_current_locale() {
        let translator = bilingual();
        assert_eq!(
            translator.trans("required"),
            "Het :attribute veld is verplicht."
        );
        assert_eq!(translator.trans("attributes.email"), "E-mailadres");
    }

    #[test]
    fn falls_back_to_fallback_locale() {
        let translator = bilingual();
        assert_eq!(
            translator.trans("numeric"),
            "The :attribute must be a number."
        );
    }

    #[test]
    fn explicit_locale_overrides_current() {
        let translator = bilingual();
        assert_eq!(
            translator.resolve("required", Some("en")),
            "The :attribute field is required."
        );
    }

    #[test]
    fn miss_echoes_key() {
        let translator = bilingual();
        assert_eq!(translator.trans("custom.foo.required"), "custom.foo.required");
        assert_eq!(translator.translate("custom.foo.required"), None);
        assert_eq!(translator.resolve("required", Some("xx")), "The :attribute field is required.");
    }

    #[test]
    fn group_resolves_to_key() {
        let translator = LocaleTranslator::english();
        assert_eq!(translator.trans("between"), "between");
        assert!(translator.lookup("between", None).is_some());
    }

    #[test]
    fn locale_switch_is_visible() {
        let translator = bilingual();
        translator.set_locale("en");
        assert_eq!(translator.locale(), "en");
        assert_eq!(
            translator.trans("required"),
            "The :attribute field is required."
        );

        translator.set_locale("nl");
        translator.set_fallback_locale("");
        assert_eq!(translator.trans("numeric"), "numeric");
    }

    #[test]
    fn poisoned_locale_lock_still_resolves() {
        let translator = std::sync::Arc::new(bilingual());
        let poisoner = std::sync::Arc::clone(&translator);
        let outcome = std::thread::spawn(move || {
            let _guard = poisoner.config.write().unwrap();
            panic!("poison the locale pair");
        })
        .join();
        assert!(outcome.is_err());

        assert_eq!(translator.trans("attributes.email"), "E-mailadres");
        translator.set_locale("en");
        assert_eq!(translator.trans("attributes.email"), "Email address");
    }

    #[test]
    fn empty_locales_resolve_nothing() {
        let translator = LocaleTranslator::new(LocaleConfig::new("", ""), Dictionary::english());
        assert_eq!(translator.trans("required"), "required");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unknown_keys_echo(segments in prop::collection::vec("[a-z]{1,6}", 1..4)) {
            let key = format!("zz.{}", segments.join("."));
            let translator = LocaleTranslator::english();
            prop_assert_eq!(translator.trans(&key), key);
        }

        #[test]
        fn stored_keys_resolve(
            segments in prop::collection::vec("[a-z]{1,6}", 1..4),
            text in "[A-Za-z :]{1,30}",
        ) {
            let key = segments.join(".");
            let mut dictionary = Dictionary::new();
            dictionary.set("xx", &key, text.clone());

            let translator = LocaleTranslator::new(LocaleConfig::new("yy", "xx"), dictionary);
            prop_assert_eq!(translator.trans(&key), text);
        }
    }
}
