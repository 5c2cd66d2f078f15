//! Shared catalogue of rule predicates, placeholder replacers and fallback
//! messages.
//!
//! Validators hold the registry behind an [`Arc`], so a rule added through
//! [`RuleRegistry::extend`] is visible to every validator sharing that
//! registry and to nobody else.

use crate::context::RuleContext;
use crate::error::Result;
use crate::rule::studly_case;
use crate::validator::Validator;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// A rule predicate. `Ok(false)` records a failure; `Err` aborts the run.
pub type Predicate = Arc<dyn Fn(&RuleContext<'_>) -> Result<bool> + Send + Sync>;

/// Values for a rule's own placeholders, such as `("min", "3")`.
///
/// Called with the validator, the field and the rule parameters. The
/// values are substituted together with `:attribute` in one pass.
pub type Replacer =
    Arc<dyn Fn(&Validator, &str, &[String]) -> Vec<(&'static str, String)> + Send + Sync>;

#[derive(Default)]
struct Catalogue {
    predicates: HashMap<String, Predicate>,
    replacers: HashMap<String, Replacer>,
    fallback_messages: HashMap<String, String>,
}

/// Rule name to predicate, replacer and default message.
///
/// ```rust
/// use ruleval_core::{RuleRegistry, Validator};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let registry = Arc::new(RuleRegistry::default());
/// registry.extend(
///     "even",
///     |ctx| ctx.value.and_then(|v| v.as_i64()).is_some_and(|n| n % 2 == 0),
///     Some("The :attribute must be even."),
/// );
///
/// let mut validator = Validator::builder(json!({"n": 3}), [("n", "even")])
///     .registry(registry)
///     .build();
/// assert!(validator.fails().unwrap());
/// assert_eq!(validator.errors().first("n"), "The n must be even.");
/// ```
pub struct RuleRegistry {
    catalogue: RwLock<Catalogue>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl RuleRegistry {
    /// A registry without any rules.
    pub fn empty() -> Self {
        Self {
            catalogue: RwLock::new(Catalogue::default()),
        }
    }

    /// A registry with every built-in rule and replacer.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        crate::rules::register_builtins(&registry);
        crate::compose::register_replacers(&registry);
        registry
    }

    /// Register an infallible predicate under `name`.
    ///
    /// The name is canonicalized, so `"custom_rule"` is also reachable as
    /// `"custom-rule"` or `"CustomRule"`. `message` becomes the rule's
    /// fallback message; `None` clears a previous one. An existing replacer
    /// for the name is kept.
    pub fn extend<F>(&self, name: &str, predicate: F, message: Option<&str>)
    where
        F: Fn(&RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.extend_fallible(name, move |ctx| Ok(predicate(ctx)), message);
    }

    /// Register a predicate that may raise a configuration error, for
    /// example through [`RuleContext::require_parameters`].
    pub fn extend_fallible<F>(&self, name: &str, predicate: F, message: Option<&str>)
    where
        F: Fn(&RuleContext<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        let name = studly_case(name.trim());
        crate::trace_debug!(rule = %name, "registering validation rule");

        let mut catalogue = self.write();
        catalogue.predicates.insert(name.clone(), Arc::new(predicate));
        catalogue
            .fallback_messages
            .insert(name, message.unwrap_or_default().to_string());
    }

    /// Register a placeholder replacer for `name`, replacing any previous
    /// one.
    pub fn replacer<F>(&self, name: &str, replacer: F)
    where
        F: Fn(&Validator, &str, &[String]) -> Vec<(&'static str, String)> + Send + Sync + 'static,
    {
        self.write()
            .replacers
            .insert(studly_case(name.trim()), Arc::new(replacer));
    }

    /// Set a fallback message directly. `key` is either a canonical rule
    /// name or `"field.snake_rule"`.
    pub fn fallback_message(&self, key: impl Into<String>, message: impl Into<String>) {
        self.write()
            .fallback_messages
            .insert(key.into(), message.into());
    }

    /// Whether a predicate is registered for the name in any casing.
    pub fn contains(&self, name: &str) -> bool {
        self.read()
            .predicates
            .contains_key(&studly_case(name.trim()))
    }

    /// Canonical names of every registered predicate, sorted.
    pub fn rule_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().predicates.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn define(&self, name: &str, predicate: fn(&RuleContext<'_>) -> Result<bool>) {
        self.write()
            .predicates
            .insert(name.to_string(), Arc::new(predicate));
    }

    pub(crate) fn define_replacer(
        &self,
        name: &str,
        replacer: fn(&Validator, &str, &[String]) -> Vec<(&'static str, String)>,
    ) {
        self.write()
            .replacers
            .insert(name.to_string(), Arc::new(replacer));
    }

    /// The predicate is cloned out so the lock is released before it runs.
    pub(crate) fn predicate(&self, name: &str) -> Option<Predicate> {
        self.read().predicates.get(name).cloned()
    }

    pub(crate) fn replacer_for(&self, name: &str) -> Option<Replacer> {
        self.read().replacers.get(name).cloned()
    }

    /// First non-empty fallback under `"field.snake_rule"`, then the
    /// canonical rule name.
    pub(crate) fn fallback_for(&self, field: &str, rule: &str, snake: &str) -> Option<String> {
        let catalogue = self.read();
        let keys = [format!("{field}.{snake}"), rule.to_string()];
        let found = keys
            .iter()
            .filter_map(|key| catalogue.fallback_messages.get(key))
            .find(|message| !message.is_empty())
            .cloned();
        found
    }

    // Writes only insert map entries, so a poisoned catalogue is
    // still consistent and stays usable.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Catalogue> {
        self.catalogue.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Catalogue> {
        self.catalogue.write().unwrap_or_else(PoisonError::into_inner)
    }
}
