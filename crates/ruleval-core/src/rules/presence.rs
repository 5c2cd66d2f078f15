//! `required` and the rules that make a field required depending on
//! other fields.

use crate::context::RuleContext;
use crate::error::Result;
use crate::value::is_present;
use serde_json::Value;

pub(super) fn required(ctx: &RuleContext<'_>) -> Result<bool> {
    Ok(is_present(ctx.value))
}

/// Present and one of `"yes"`, `"on"`, `"1"`, `"true"`, `1` or `true`.
pub(super) fn accepted(ctx: &RuleContext<'_>) -> Result<bool> {
    let acceptable = match ctx.value {
        Some(Value::String(s)) => matches!(s.as_str(), "yes" | "on" | "1" | "true"),
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::Bool(b)) => *b,
        _ => false,
    };
    Ok(is_present(ctx.value) && acceptable)
}

/// `required_if:other,value`
pub(super) fn required_if(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(2)?;
    let other = ctx.data(&ctx.parameters[0]);
    if ctx.equality().matches(other, &ctx.parameters[1]) {
        return required(ctx);
    }
    Ok(true)
}

/// Required when at least one of the other fields is present.
pub(super) fn required_with(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    if !all_missing(ctx) {
        return required(ctx);
    }
    Ok(true)
}

/// Required when every other field is present.
pub(super) fn required_with_all(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    if !any_missing(ctx) {
        return required(ctx);
    }
    Ok(true)
}

/// Required when at least one of the other fields is missing.
pub(super) fn required_without(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    if any_missing(ctx) {
        return required(ctx);
    }
    Ok(true)
}

/// Required when every other field is missing.
pub(super) fn required_without_all(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    if all_missing(ctx) {
        return required(ctx);
    }
    Ok(true)
}

fn any_missing(ctx: &RuleContext<'_>) -> bool {
    ctx.parameters
        .iter()
        .any(|other| !is_present(ctx.data(other)))
}

fn all_missing(ctx: &RuleContext<'_>) -> bool {
    ctx.parameters
        .iter()
        .all(|other| !is_present(ctx.data(other)))
}
