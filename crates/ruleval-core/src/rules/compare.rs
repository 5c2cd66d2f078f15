use crate::context::RuleContext;
use crate::error::Result;

/// `same:other`: the value equals the other field's value, missing
/// included.
pub(super) fn same(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    Ok(ctx.value == ctx.data(&ctx.parameters[0]))
}

pub(super) fn different(ctx: &RuleContext<'_>) -> Result<bool> {
    same(ctx).map(|equal| !equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check;
    use serde_json::json;

    #[test]
    fn same_values() {
        let data = json!({"password": "secret", "confirm": "secret", "other": "nope"});
        assert!(check(same, data.clone(), "confirm", "", &["password"]).unwrap());
        assert!(!check(same, data.clone(), "other", "", &["password"]).unwrap());
        assert!(check(different, data, "other", "", &["password"]).unwrap());
    }

    #[test]
    fn types_matter() {
        let data = json!({"a": 1, "b": "1"});
        assert!(!check(same, data.clone(), "a", "", &["b"]).unwrap());
        assert!(check(different, data, "a", "", &["b"]).unwrap());
    }

    #[test]
    fn needs_the_other_field_name() {
        assert!(check(same, json!({}), "a", "", &[]).is_err());
        assert!(check(different, json!({}), "a", "", &[]).is_err());
    }
}
