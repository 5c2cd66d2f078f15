//! Placeholder substitution for failure messages.
//!
//! Tokens are `:` followed by letters. A token without a value is left as
//! written.

use crate::registry::RuleRegistry;
use crate::rule::snake_case;
use crate::rules::date::parse_date;
use crate::validator::Validator;
use crate::value::stringify;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r":([A-Za-z]+)").expect("placeholder regex is valid"))
}

/// Replace every `:name` token that has a value in `values`.
///
/// ```rust
/// use ruleval_core::replace_placeholders;
///
/// let text = replace_placeholders(
///     "Between :min and :max, not :other.",
///     &[("min", "3".to_string()), ("max", "10".to_string())],
/// );
/// assert_eq!(text, "Between 3 and 10, not :other.");
/// ```
pub fn replace_placeholders(message: &str, values: &[(&str, String)]) -> String {
    placeholder()
        .replace_all(message, |caps: &Captures<'_>| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

impl Validator {
    /// Human-readable name of a field: custom label, then the
    /// `attributes.<field>` or `fields.<field>` translation, then the field
    /// name in snake case with spaces.
    pub fn display_label(&self, field: &str) -> String {
        if let Some(label) = self.custom_attributes.get(field).filter(|l| !l.is_empty()) {
            return label.clone();
        }

        for prefix in ["attributes", "fields"] {
            if let Some(label) = self.translator.translate(&format!("{prefix}.{field}")) {
                return label;
            }
        }

        snake_case(field).replace('_', " ")
    }

    /// Human-readable form of a raw value of `field`: custom value label,
    /// then the `values.<field>.<raw>` translation, then `raw` itself.
    pub fn display_value(&self, field: &str, raw: &str) -> String {
        let custom = self
            .custom_values
            .get(field)
            .and_then(|labels| labels.get(raw))
            .filter(|label| !label.is_empty());
        if let Some(label) = custom {
            return label.clone();
        }

        self.translator
            .translate(&format!("values.{field}.{raw}"))
            .unwrap_or_else(|| raw.to_string())
    }

    /// Fill the generic `:attribute` / `:field` label and the rule's own
    /// placeholders in a single pass, so substituted text is never
    /// scanned again.
    pub fn do_replacements(
        &self,
        message: &str,
        field: &str,
        rule: &str,
        parameters: &[String],
    ) -> String {
        let label = self.display_label(field);
        let mut values = vec![("attribute", label.clone()), ("field", label)];
        if let Some(replacer) = self.registry.replacer_for(rule) {
            values.extend(replacer(self, field, parameters));
        }
        replace_placeholders(message, &values)
    }

    fn display_labels(&self, fields: &[String], separator: &str) -> String {
        fields
            .iter()
            .map(|field| self.display_label(field))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

type Placeholders = Vec<(&'static str, String)>;

fn present(pairs: Vec<(&'static str, Option<String>)>) -> Placeholders {
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
}

fn first(parameters: &[String]) -> Option<String> {
    parameters.first().cloned()
}

fn replace_between(_: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    present(vec![
        ("min", first(parameters)),
        ("max", parameters.get(1).cloned()),
    ])
}

fn replace_size(_: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    present(vec![("size", first(parameters))])
}

fn replace_min(_: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    present(vec![("min", first(parameters))])
}

fn replace_max(_: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    present(vec![("max", first(parameters))])
}

fn replace_in(validator: &Validator, field: &str, parameters: &[String]) -> Placeholders {
    let values = parameters
        .iter()
        .map(|raw| validator.display_value(field, raw))
        .collect::<Vec<_>>()
        .join(", ");
    vec![("values", values)]
}

fn replace_required_with(validator: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    vec![("values", validator.display_labels(parameters, " / "))]
}

fn replace_required_if(validator: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    let Some(other) = parameters.first() else {
        return Vec::new();
    };
    let value = validator
        .value(other)
        .map(|current| validator.display_value(other, &stringify(current)));

    present(vec![("other", Some(validator.display_label(other))), ("value", value)])
}

fn replace_same(validator: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    present(vec![(
        "other",
        parameters.first().map(|other| validator.display_label(other)),
    )])
}

fn replace_date_format(_: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    present(vec![("format", first(parameters))])
}

/// A parameter that is not a date names the field holding the date.
fn replace_before(validator: &Validator, _: &str, parameters: &[String]) -> Placeholders {
    let date = parameters.first().map(|reference| match parse_date(reference) {
        Some(_) => reference.clone(),
        None => validator.display_label(reference),
    });
    present(vec![("date", date)])
}

pub(crate) fn register_replacers(registry: &RuleRegistry) {
    registry.define_replacer("Between", replace_between);
    registry.define_replacer("Size", replace_size);
    registry.define_replacer("Min", replace_min);
    registry.define_replacer("Max", replace_max);
    registry.define_replacer("In", replace_in);
    registry.define_replacer("NotIn", replace_in);
    registry.define_replacer("RequiredWith", replace_required_with);
    registry.define_replacer("RequiredWithAll", replace_required_with);
    registry.define_replacer("RequiredWithout", replace_required_with);
    registry.define_replacer("RequiredWithoutAll", replace_required_with);
    registry.define_replacer("RequiredIf", replace_required_if);
    registry.define_replacer("Same", replace_same);
    registry.define_replacer("Different", replace_same);
    registry.define_replacer("DateFormat", replace_date_format);
    registry.define_replacer("Before", replace_before);
    registry.define_replacer("After", replace_before);
}
