//! Current and fallback locale selection.

use serde::{Deserialize, Serialize};

fn default_locale() -> String {
    "en".to_string()
}

/// The locale pair a translator resolves against.
///
/// Lookups try `locale` first and then `fallback_locale`. Both default to
/// `"en"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_locale")]
    pub fallback_locale: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            fallback_locale: default_locale(),
        }
    }
}

impl LocaleConfig {
    pub fn new(locale: impl Into<String>, fallback_locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            fallback_locale: fallback_locale.into(),
        }
    }

    /// Locales to try, in order.
    ///
    /// `requested` replaces the current locale when given. Empty codes are
    /// dropped; the fallback is kept even when it repeats the primary.
    pub fn chain<'a>(&'a self, requested: Option<&'a str>) -> Vec<&'a str> {
        [
            requested.unwrap_or(self.locale.as_str()),
            self.fallback_locale.as_str(),
        ]
        .into_iter()
        .filter(|locale| !locale.is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_english() {
        let config = LocaleConfig::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.fallback_locale, "en");
    }

    #[test]
    fn chain_keeps_duplicates() {
        let config = LocaleConfig::default();
        assert_eq!(config.chain(None), vec!["en", "en"]);
    }

    #[test]
    fn chain_prefers_requested_locale() {
        let config = LocaleConfig::new("de", "en");
        assert_eq!(config.chain(Some("fr")), vec!["fr", "en"]);
        assert_eq!(config.chain(None), vec!["de", "en"]);
    }

    #[test]
    fn chain_drops_empty_locales() {
        let config = LocaleConfig::new("", "en");
        assert_eq!(config.chain(None), vec!["en"]);

        let config = LocaleConfig::new("de", "");
        assert_eq!(config.chain(Some("")), Vec::<&str>::new());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: LocaleConfig = serde_json::from_str(r#"{"locale": "nl"}"#).unwrap();
        assert_eq!(config, LocaleConfig::new("nl", "en"));
    }
}
