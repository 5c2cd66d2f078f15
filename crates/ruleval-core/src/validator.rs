//! The validation engine: evaluates a rule set against a record and
//! collects one message per failed rule.

use crate::context::RuleContext;
use crate::error::{Result, ValidationError};
use crate::message_bag::MessageBag;
use crate::registry::RuleRegistry;
use crate::rule::{snake_case, studly_case, ParsedRule};
use crate::ruleset::RuleSet;
use crate::value::{self, Record};
use ruleval_i18n::{LocaleTranslator, Translator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Rules whose message depends on the value's kind.
pub const SIZE_RULES: [&str; 4] = ["Size", "Between", "Min", "Max"];

/// Rules that declare a field numeric.
pub const NUMERIC_RULES: [&str; 2] = ["Numeric", "Integer"];

/// How `required_if` compares the other field's value with its expected
/// parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EqualityPolicy {
    /// Text of the value equals the parameter exactly: `10` matches `"10"`
    /// but not `"10.0"`.
    #[default]
    Strict,
    /// Numbers and booleans compare numerically with the parameter, so `10`
    /// matches `"10.0"` and `true` matches `"1"`.
    Loose,
}

impl EqualityPolicy {
    /// Missing and `null` values never match.
    pub fn matches(self, actual: Option<&Value>, expected: &str) -> bool {
        let actual = match actual {
            None | Some(Value::Null) => return false,
            Some(actual) => actual,
        };

        match (self, actual) {
            (Self::Strict, _) | (Self::Loose, Value::String(_)) => {
                value::stringify(actual) == expected
            }
            (Self::Loose, Value::Number(_) | Value::Bool(_)) => {
                match (value::to_number(Some(actual)), value::parse_number(expected)) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            (Self::Loose, _) => value::stringify(actual) == expected,
        }
    }
}

/// Validates one record against one rule set.
///
/// ```rust
/// use ruleval_core::Validator;
/// use serde_json::json;
///
/// let mut validator = Validator::make(json!({"name": "Al"}), [("name", "required|between:3,10")]);
/// assert!(validator.fails().unwrap());
/// assert_eq!(
///     validator.errors().first("name"),
///     "The name must be between 3 and 10 characters."
/// );
/// ```
pub struct Validator {
    pub(crate) data: Record,
    pub(crate) rules: RuleSet,
    pub(crate) custom_messages: HashMap<String, String>,
    pub(crate) custom_attributes: HashMap<String, String>,
    pub(crate) custom_values: HashMap<String, HashMap<String, String>>,
    pub(crate) registry: Arc<RuleRegistry>,
    pub(crate) translator: Arc<dyn Translator>,
    pub(crate) equality: EqualityPolicy,
    errors: MessageBag,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("data", &self.data)
            .field("rules", &self.rules)
            .field("custom_messages", &self.custom_messages)
            .field("custom_attributes", &self.custom_attributes)
            .field("custom_values", &self.custom_values)
            .field("equality", &self.equality)
            .field("errors", &self.errors)
            .finish()
    }
}

impl Validator {
    /// Validator with the built-in rules and English messages.
    pub fn make(data: impl Into<Value>, rules: impl Into<RuleSet>) -> Self {
        Self::builder(data, rules).build()
    }

    pub fn builder(data: impl Into<Value>, rules: impl Into<RuleSet>) -> ValidatorBuilder {
        ValidatorBuilder::new(data, rules)
    }

    /// Run every rule and report whether all of them held.
    ///
    /// Each call starts from an empty [`MessageBag`]. A configuration
    /// error aborts the run and leaves no messages behind.
    pub fn passes(&mut self) -> Result<bool> {
        match self.run() {
            Ok(errors) => {
                self.errors = errors;
                Ok(!self.errors.has_errors())
            }
            Err(err) => {
                self.errors.clear();
                Err(err)
            }
        }
    }

    /// Negation of [`passes`](Self::passes).
    pub fn fails(&mut self) -> Result<bool> {
        self.passes().map(|passed| !passed)
    }

    /// Messages of the last run.
    pub fn errors(&self) -> &MessageBag {
        &self.errors
    }

    /// Register a rule in this validator's registry.
    ///
    /// The rule reaches only validators holding the same
    /// `Arc<RuleRegistry>`. [`Validator::make`] and a builder without
    /// [`ValidatorBuilder::registry`] get a registry of their own, so rules
    /// meant for later validators belong in a shared registry or a
    /// [`ValidatorFactory`].
    pub fn extend<F>(&self, name: &str, predicate: F, message: Option<&str>)
    where
        F: Fn(&RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.registry.extend(name, predicate, message);
    }

    pub fn data(&self) -> &Record {
        &self.data
    }

    /// Mutable access to the record, for validating it again.
    pub fn data_mut(&mut self) -> &mut Record {
        &mut self.data
    }

    pub fn set_data(&mut self, data: impl Into<Value>) {
        self.data = into_record(data.into());
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn has_rule(&self, field: &str, names: &[&str]) -> bool {
        self.rules.has_rule(field, names)
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    pub fn equality(&self) -> EqualityPolicy {
        self.equality
    }

    /// `numeric`, `array` or `string`, from the field's other rules.
    pub fn attribute_type(&self, field: &str) -> &'static str {
        if self.has_rule(field, &NUMERIC_RULES) {
            "numeric"
        } else if self.has_rule(field, &["Array"]) {
            "array"
        } else {
            "string"
        }
    }

    /// Message template for a failed rule, before placeholders are
    /// replaced. First hit wins:
    ///
    /// 1. custom message for `"field.snake_rule"`, then for the rule name
    /// 2. translation of `"custom.field.snake_rule"`
    /// 3. for size rules, translation of `"snake_rule.<type>"`
    /// 4. translation of `"snake_rule"`
    /// 5. the registry's fallback message, else `"snake_rule"` itself
    pub fn message_for(&self, field: &str, rule: &str) -> String {
        let rule = studly_case(rule.trim());
        let snake = snake_case(&rule);

        if let Some(message) = self.inline_message(field, &rule, &snake) {
            return message.to_string();
        }

        if let Some(message) = self
            .translator
            .translate(&format!("custom.{field}.{snake}"))
        {
            return message;
        }

        if SIZE_RULES.contains(&rule.as_str()) {
            let key = format!("{snake}.{}", self.attribute_type(field));
            if let Some(message) = self.translator.translate(&key) {
                return message;
            }
        }

        if let Some(message) = self.translator.translate(&snake) {
            return message;
        }

        self.registry
            .fallback_for(field, &rule, &snake)
            .unwrap_or(snake)
    }

    fn inline_message(&self, field: &str, rule: &str, snake: &str) -> Option<&str> {
        [format!("{field}.{snake}"), rule.to_string()]
            .iter()
            .filter_map(|key| self.custom_messages.get(key))
            .map(String::as_str)
            .find(|message| !message.is_empty())
    }

    fn run(&self) -> Result<MessageBag> {
        crate::trace_debug!(fields = self.rules.len(), "validation run started");
        let mut errors = MessageBag::new();

        for (field, expressions) in self.rules.iter() {
            for expression in expressions {
                let rule = ParsedRule::parse(expression);
                if rule.is_blank() {
                    continue;
                }
                if let Some(message) = self.check(field, &rule)? {
                    errors.add(field, message);
                }
            }
        }

        crate::trace_debug!(errors = errors.len(), "validation run finished");
        Ok(errors)
    }

    /// `Some(message)` when the rule failed.
    fn check(&self, field: &str, rule: &ParsedRule) -> Result<Option<String>> {
        let Some(predicate) = self.registry.predicate(&rule.name) else {
            crate::trace_warn!(field, rule = %rule.name, "no predicate registered");
            return Err(ValidationError::UnknownRule(rule.name.clone()));
        };

        crate::trace_trace!(
            field,
            rule = %rule.name,
            parameters = rule.parameters.len(),
            "dispatching rule"
        );

        let context = RuleContext::new(self, field, &rule.name, &rule.parameters);
        if predicate(&context)? {
            return Ok(None);
        }

        let message = self.message_for(field, &rule.name);
        let message = self.do_replacements(&message, field, &rule.name, &rule.parameters);
        crate::trace_debug!(field, rule = %rule.name, "rule failed");
        Ok(Some(message))
    }
}

fn into_record(data: Value) -> Record {
    match data {
        Value::Object(record) => record,
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        other => {
            crate::trace_warn!(kind = %kind_of(&other), "record is not an object, validating an empty one");
            Record::new()
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builder for a [`Validator`] with custom messages, labels, registry or
/// translator.
pub struct ValidatorBuilder {
    data: Record,
    rules: RuleSet,
    custom_messages: HashMap<String, String>,
    custom_attributes: HashMap<String, String>,
    custom_values: HashMap<String, HashMap<String, String>>,
    registry: Option<Arc<RuleRegistry>>,
    translator: Option<Arc<dyn Translator>>,
    equality: EqualityPolicy,
}

impl ValidatorBuilder {
    pub fn new(data: impl Into<Value>, rules: impl Into<RuleSet>) -> Self {
        Self {
            data: into_record(data.into()),
            rules: rules.into(),
            custom_messages: HashMap::new(),
            custom_attributes: HashMap::new(),
            custom_values: HashMap::new(),
            registry: None,
            translator: None,
            equality: EqualityPolicy::default(),
        }
    }

    /// Custom message keyed by `"field.snake_rule"` or a canonical rule
    /// name such as `"Required"`.
    pub fn message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.custom_messages.insert(key.into(), message.into());
        self
    }

    pub fn messages<I, K, V>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_messages
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Display label for a field.
    pub fn attribute(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.custom_attributes.insert(field.into(), label.into());
        self
    }

    pub fn attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Display label for one raw value of a field.
    pub fn value_label(
        mut self,
        field: impl Into<String>,
        raw: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.custom_values
            .entry(field.into())
            .or_default()
            .insert(raw.into(), label.into());
        self
    }

    pub fn value_labels<I, K, V>(mut self, field: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_values
            .entry(field.into())
            .or_default()
            .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn equality(mut self, equality: EqualityPolicy) -> Self {
        self.equality = equality;
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            data: self.data,
            rules: self.rules,
            custom_messages: self.custom_messages,
            custom_attributes: self.custom_attributes,
            custom_values: self.custom_values,
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(RuleRegistry::with_builtins())),
            translator: self
                .translator
                .unwrap_or_else(|| Arc::new(LocaleTranslator::english())),
            equality: self.equality,
            errors: MessageBag::new(),
        }
    }
}

/// Makes validators that share one registry and one translator.
///
/// ```rust
/// use ruleval_core::ValidatorFactory;
/// use serde_json::json;
///
/// let factory = ValidatorFactory::default();
/// factory.extend("custom_rule", |ctx| ctx.value.is_some(), Some("Nope."));
///
/// let mut validator = factory.create(
///     json!({}),
///     [("x", "custom-rule")],
///     [("x.custom_rule", "Give me an :attribute.")],
///     [("x", "ex")],
/// );
/// assert!(validator.fails().unwrap());
/// assert_eq!(validator.errors().first("x"), "Give me an ex.");
/// ```
#[derive(Clone)]
pub struct ValidatorFactory {
    registry: Arc<RuleRegistry>,
    translator: Arc<dyn Translator>,
    equality: EqualityPolicy,
}

impl Default for ValidatorFactory {
    fn default() -> Self {
        Self::new(
            Arc::new(RuleRegistry::with_builtins()),
            Arc::new(LocaleTranslator::english()),
        )
    }
}

impl fmt::Debug for ValidatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorFactory")
            .field("registry", &self.registry)
            .field("equality", &self.equality)
            .finish()
    }
}

impl ValidatorFactory {
    pub fn new(registry: Arc<RuleRegistry>, translator: Arc<dyn Translator>) -> Self {
        Self {
            registry,
            translator,
            equality: EqualityPolicy::default(),
        }
    }

    pub fn with_equality(mut self, equality: EqualityPolicy) -> Self {
        self.equality = equality;
        self
    }

    /// Validator with custom messages and field labels.
    pub fn create<M, MK, MV, A, AK, AV>(
        &self,
        data: impl Into<Value>,
        rules: impl Into<RuleSet>,
        messages: M,
        attributes: A,
    ) -> Validator
    where
        M: IntoIterator<Item = (MK, MV)>,
        MK: Into<String>,
        MV: Into<String>,
        A: IntoIterator<Item = (AK, AV)>,
        AK: Into<String>,
        AV: Into<String>,
    {
        self.make(data, rules)
            .messages(messages)
            .attributes(attributes)
            .build()
    }

    /// Builder preloaded with the shared registry and translator.
    pub fn make(&self, data: impl Into<Value>, rules: impl Into<RuleSet>) -> ValidatorBuilder {
        ValidatorBuilder::new(data, rules)
            .registry(Arc::clone(&self.registry))
            .translator(Arc::clone(&self.translator))
            .equality(self.equality)
    }

    /// Register a rule for every validator this factory makes.
    pub fn extend<F>(&self, name: &str, predicate: F, message: Option<&str>)
    where
        F: Fn(&RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.registry.extend(name, predicate, message);
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }
}
