//! Size rules. What "size" means depends on the field's other rules: a
//! field declared `numeric`/`integer` is measured by its value, an array by
//! its item count, anything else by its trimmed length.

use crate::context::RuleContext;
use crate::error::Result;
use crate::validator::NUMERIC_RULES;
use crate::value::{length_of, parse_number, to_number};
use serde_json::Value;

pub(crate) fn size_of(ctx: &RuleContext<'_>) -> f64 {
    if ctx.has_rule(&NUMERIC_RULES) {
        if let Some(number) = to_number(ctx.value) {
            return number;
        }
    }
    match ctx.value {
        Some(Value::Array(items)) => items.len() as f64,
        other => length_of(other) as f64,
    }
}

/// Parameter `index` as a number. Non-numeric bounds never hold.
fn bound(ctx: &RuleContext<'_>, index: usize) -> Option<f64> {
    ctx.parameter(index).and_then(parse_number)
}

/// `between:min,max`, inclusive.
pub(super) fn between(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(2)?;
    let size = size_of(ctx);
    Ok(match (bound(ctx, 0), bound(ctx, 1)) {
        (Some(min), Some(max)) => min <= size && size <= max,
        _ => false,
    })
}

pub(super) fn size(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    Ok(bound(ctx, 0).is_some_and(|expected| size_of(ctx) == expected))
}

pub(super) fn min(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    Ok(bound(ctx, 0).is_some_and(|min| size_of(ctx) >= min))
}

pub(super) fn max(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    Ok(bound(ctx, 0).is_some_and(|max| size_of(ctx) <= max))
}

pub(super) fn array(ctx: &RuleContext<'_>) -> Result<bool> {
    Ok(matches!(ctx.value, Some(Value::Array(_))))
}
