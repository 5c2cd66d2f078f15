//! Pattern rules.

use crate::context::RuleContext;
use crate::error::{Result, ValidationError};
use crate::value::stringify;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified email regex
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        )
        .expect("email regex is valid")
    })
}

/// Text to match against, `None` for missing and `null` values.
fn subject(ctx: &RuleContext<'_>) -> Option<String> {
    match ctx.value? {
        Value::Null => None,
        value => Some(stringify(value)),
    }
}

/// Compile a pattern written bare (`^a+$`) or delimited with flags
/// (`/^a+$/i`). `g` and `u` are accepted and have no effect.
fn compile(rule: &str, pattern: &str) -> Result<Regex> {
    let invalid = |reason: String| ValidationError::InvalidPattern {
        rule: rule.to_string(),
        pattern: pattern.to_string(),
        reason,
    };

    let delimited = pattern
        .strip_prefix('/')
        .and_then(|rest| rest.rsplit_once('/'));

    let Some((body, flags)) = delimited else {
        return Regex::new(pattern).map_err(|err| invalid(err.to_string()));
    };

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'g' | 'u' => &mut builder,
            other => return Err(invalid(format!("unsupported flag `{other}`"))),
        };
    }
    builder.build().map_err(|err| invalid(err.to_string()))
}

/// `regex:pattern`; the pattern is the whole text after the first `:`.
pub(super) fn regex(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    let pattern = compile("regex", &ctx.parameters[0])?;
    Ok(subject(ctx).is_some_and(|text| pattern.is_match(&text)))
}

pub(super) fn email(ctx: &RuleContext<'_>) -> Result<bool> {
    Ok(subject(ctx).is_some_and(|text| email_regex().is_match(&text)))
}
