//! Date rules on top of `chrono`.
//!
//! Dates are compared as naive UTC date-times. A bare date is midnight.

use crate::context::RuleContext;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or
/// `YYYY-MM-DDTHH:MM:SS`.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
        return Some(zoned.naive_utc());
    }
    if let Some(naive) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(naive);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn date_value(value: Option<&Value>) -> Option<NaiveDateTime> {
    value.and_then(Value::as_str).and_then(parse_date)
}

/// Date given as parameter, or held by the field the parameter names.
fn reference(ctx: &RuleContext<'_>) -> Option<NaiveDateTime> {
    let parameter = ctx.parameter(0)?;
    parse_date(parameter).or_else(|| date_value(ctx.data(parameter)))
}

pub(super) fn date(ctx: &RuleContext<'_>) -> Result<bool> {
    Ok(date_value(ctx.value).is_some())
}

/// `date_format:%d/%m/%Y`: the whole value parses under the format.
pub(super) fn date_format(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    let format = ctx.parameters[0].as_str();
    let Some(text) = ctx.value.and_then(Value::as_str) else {
        return Ok(false);
    };

    Ok(DateTime::parse_from_str(text, format).is_ok()
        || NaiveDateTime::parse_from_str(text, format).is_ok()
        || NaiveDate::parse_from_str(text, format).is_ok()
        || NaiveTime::parse_from_str(text, format).is_ok())
}

pub(super) fn before(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    Ok(match (date_value(ctx.value), reference(ctx)) {
        (Some(value), Some(reference)) => value < reference,
        _ => false,
    })
}

pub(super) fn after(ctx: &RuleContext<'_>) -> Result<bool> {
    ctx.require_parameters(1)?;
    Ok(match (date_value(ctx.value), reference(ctx)) {
        (Some(value), Some(reference)) => value > reference,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check;
    use serde_json::json;

    #[test]
    fn accepted_date_shapes() {
        assert!(parse_date("2024-02-29").is_some());
        assert!(parse_date("2024-02-29 10:30:00").is_some());
        assert!(parse_date("2024-02-29T10:30:00").is_some());
        assert!(parse_date("2024-02-29T10:30:00+02:00").is_some());
        assert!(parse_date("2023-02-29").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn offsets_are_normalized() {
        assert_eq!(
            parse_date("2024-01-01T02:00:00+02:00"),
            parse_date("2024-01-01 00:00:00")
        );
    }

    #[test]
    fn date_rule() {
        assert!(check(date, json!({"d": "2020-01-01"}), "d", "date", &[]).unwrap());
        assert!(!check(date, json!({"d": "01/01/2020"}), "d", "date", &[]).unwrap());
        assert!(!check(date, json!({"d": 20200101}), "d", "date", &[]).unwrap());
        assert!(!check(date, json!({}), "d", "date", &[]).unwrap());
    }

    #[test]
    fn date_format_rule() {
        assert!(check(date_format, json!({"d": "31/12/2020"}), "d", "", &["%d/%m/%Y"]).unwrap());
        assert!(!check(date_format, json!({"d": "2020-12-31"}), "d", "", &["%d/%m/%Y"]).unwrap());
        assert!(check(date_format, json!({"d": "23:59"}), "d", "", &["%H:%M"]).unwrap());
        assert!(
            check(date_format, json!({"d": "2020-12-31 23:59"}), "d", "", &["%Y-%m-%d %H:%M"])
                .unwrap()
        );
        assert!(check(date_format, json!({"d": "x"}), "d", "", &[]).is_err());
    }

    #[test]
    fn before_and_after_literal_dates() {
        let data = json!({"d": "2020-06-15"});
        assert!(check(before, data.clone(), "d", "", &["2020-06-16"]).unwrap());
        assert!(!check(before, data.clone(), "d", "", &["2020-06-15"]).unwrap());
        assert!(check(after, data.clone(), "d", "", &["2020-06-14 23:59:59"]).unwrap());
        assert!(!check(after, data, "d", "", &["2020-06-15"]).unwrap());
    }

    #[test]
    fn before_and_after_other_field() {
        let data = json!({"start": "2020-01-01", "end": "2020-02-01", "bad": "soon"});
        assert!(check(after, data.clone(), "end", "", &["start"]).unwrap());
        assert!(check(before, data.clone(), "start", "", &["end"]).unwrap());
        assert!(!check(before, data.clone(), "start", "", &["bad"]).unwrap());
        assert!(!check(after, data.clone(), "bad", "", &["start"]).unwrap());
        assert!(!check(after, data, "end", "", &["missing"]).unwrap());
    }
}
