//! Environment-driven locale configuration.
//!
//! Reads the locale pair from `RULEVAL_LOCALE` and `RULEVAL_FALLBACK_LOCALE`,
//! optionally after loading a `.env` file.
//!
//! # Example
//!
//! ```ignore
//! use ruleval_i18n::config::load_dotenv;
//! use ruleval_i18n::LocaleConfig;
//!
//! load_dotenv();
//! let config = LocaleConfig::from_env()?;
//! ```

use crate::error::Result;
use crate::locale::LocaleConfig;

/// Prefix of the environment variables read by [`LocaleConfig::from_env`].
pub const ENV_PREFIX: &str = "RULEVAL_";

impl LocaleConfig {
    /// Load the locale pair from `RULEVAL_*` environment variables.
    ///
    /// Unset variables keep their `"en"` default.
    pub fn from_env() -> Result<Self> {
        Self::from_env_prefixed(ENV_PREFIX)
    }

    /// Load the locale pair from variables starting with `prefix`
    /// (`{prefix}LOCALE`, `{prefix}FALLBACK_LOCALE`).
    pub fn from_env_prefixed(prefix: &str) -> Result<Self> {
        let config = envy::prefixed(prefix).from_env::<LocaleConfig>()?;
        tracing::debug!(
            locale = %config.locale,
            fallback = %config.fallback_locale,
            "loaded locale configuration"
        );
        Ok(config)
    }
}

/// Load environment variables from a `.env` file in the working directory.
///
/// A missing file is not an error. Variables already set win.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Load environment variables from a specific file.
pub fn load_dotenv_from<P: AsRef<std::path::Path>>(path: P) {
    let _ = dotenvy::from_path(path);
}
