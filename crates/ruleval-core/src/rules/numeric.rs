use crate::context::RuleContext;
use crate::error::Result;
use crate::value::to_number;

/// The value coerces to a number.
pub(super) fn numeric(ctx: &RuleContext<'_>) -> Result<bool> {
    Ok(to_number(ctx.value).is_some())
}

/// The value coerces to a finite number without a fractional part.
pub(super) fn integer(ctx: &RuleContext<'_>) -> Result<bool> {
    Ok(to_number(ctx.value).is_some_and(|n| n.is_finite() && n.fract() == 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check;
    use serde_json::json;

    #[test]
    fn numeric_values() {
        for value in [json!(1), json!(-2.5), json!("3"), json!(" 4.5 "), json!("1e2"), json!(true)] {
            assert!(check(numeric, json!({ "a": value }), "a", "numeric", &[]).unwrap());
        }
        for value in [json!("abc"), json!("1a"), json!({"x": 1}), json!([1, 2])] {
            assert!(!check(numeric, json!({ "a": value }), "a", "numeric", &[]).unwrap());
        }
        assert!(!check(numeric, json!({}), "a", "numeric", &[]).unwrap());
    }

    #[test]
    fn integer_values() {
        for value in [json!(1), json!(-7), json!("12"), json!(3.0), json!("1e3")] {
            assert!(check(integer, json!({ "a": value }), "a", "integer", &[]).unwrap());
        }
        for value in [json!(1.5), json!("2.25"), json!("x"), json!("Infinity")] {
            assert!(!check(integer, json!({ "a": value }), "a", "integer", &[]).unwrap());
        }
    }
}
