use crate::context::RuleContext;
use crate::error::Result;
use crate::value::stringify;

/// The value's text is one of the parameters. A missing field is never a
/// member.
pub(super) fn in_list(ctx: &RuleContext<'_>) -> Result<bool> {
    Ok(ctx
        .value
        .map(stringify)
        .is_some_and(|text| ctx.parameters.contains(&text)))
}

pub(super) fn not_in_list(ctx: &RuleContext<'_>) -> Result<bool> {
    in_list(ctx).map(|member| !member)
}
