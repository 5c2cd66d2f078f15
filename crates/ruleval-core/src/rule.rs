//! Rule expressions and their parsed, canonical form.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// One rule before parsing.
///
/// The text form is `"name:p1,p2"`. The list form is `[name, p1, p2]` and
/// keeps its parameters verbatim, so it is the way to pass parameters that
/// contain `,` or `|`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleExpr {
    Text(String),
    List(#[serde(deserialize_with = "scalar_list")] Vec<String>),
}

/// Accepts `["between", 3, 10]` as well as `["between", "3", "10"]`.
fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items.iter().map(crate::value::stringify).collect())
}

impl From<&str> for RuleExpr {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RuleExpr {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<S: Into<String>> From<Vec<S>> for RuleExpr {
    fn from(items: Vec<S>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String> + Clone, const N: usize> From<[S; N]> for RuleExpr {
    fn from(items: [S; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for RuleExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => match items.split_first() {
                Some((name, [])) => f.write_str(name),
                Some((name, params)) => write!(f, "{}:{}", name, params.join(",")),
                None => Ok(()),
            },
        }
    }
}

/// A rule name in canonical form plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRule {
    /// Canonical name, e.g. `RequiredIf`.
    pub name: String,
    pub parameters: Vec<String>,
}

impl ParsedRule {
    /// Parse a rule expression.
    ///
    /// ```rust
    /// use ruleval_core::{ParsedRule, RuleExpr};
    ///
    /// let rule = ParsedRule::parse(&RuleExpr::from("required_if:bar,10"));
    /// assert_eq!(rule.name, "RequiredIf");
    /// assert_eq!(rule.parameters, vec!["bar", "10"]);
    ///
    /// let rule = ParsedRule::parse(&RuleExpr::from("regex:/^a{1,3}$/"));
    /// assert_eq!(rule.parameters, vec!["/^a{1,3}$/"]);
    /// ```
    pub fn parse(expr: &RuleExpr) -> Self {
        match expr {
            RuleExpr::Text(text) => Self::parse_str(text),
            RuleExpr::List(items) => match items.split_first() {
                Some((name, parameters)) => Self {
                    name: studly_case(name.trim()),
                    parameters: parameters.to_vec(),
                },
                None => Self::blank(),
            },
        }
    }

    /// Parse the text form `"name:p1,p2"`.
    pub fn parse_str(text: &str) -> Self {
        let Some((name, rest)) = text.split_once(':') else {
            return Self {
                name: studly_case(text.trim()),
                parameters: Vec::new(),
            };
        };

        let parameters = if rest.is_empty() {
            Vec::new()
        } else if name.trim().eq_ignore_ascii_case("regex") {
            vec![rest.to_string()]
        } else {
            rest.split(',').map(str::to_string).collect()
        };

        Self {
            name: studly_case(name.trim()),
            parameters,
        }
    }

    fn blank() -> Self {
        Self {
            name: String::new(),
            parameters: Vec::new(),
        }
    }

    /// A blank expression parses to an empty name and is never dispatched.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }

    /// `snake_case` form of the name, used for message keys.
    pub fn snake_name(&self) -> String {
        snake_case(&self.name)
    }
}

/// Canonicalize a rule name: `required_with_all`, `required-with-all` and
/// `RequiredWithAll` all become `RequiredWithAll`.
pub fn studly_case(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");
    let mut out = String::with_capacity(spaced.len());
    let mut word_start = true;
    for c in spaced.chars() {
        if c.is_whitespace() {
            word_start = true;
            continue;
        }
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = false;
    }
    out
}

fn case_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"(.)([A-Z])").expect("case boundary regex is valid"))
}

/// `RequiredWithAll` -> `required_with_all`.
pub fn snake_case(name: &str) -> String {
    case_boundary()
        .replace_all(name, "${1}_${2}")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(studly_case("required_if"), "RequiredIf");
        assert_eq!(studly_case("required-if"), "RequiredIf");
        assert_eq!(studly_case("RequiredIf"), "RequiredIf");
        assert_eq!(studly_case("required_with_all"), "RequiredWithAll");
        assert_eq!(studly_case("not in"), "NotIn");
        assert_eq!(studly_case(""), "");
    }

    #[test]
    fn snake_names() {
        assert_eq!(snake_case("RequiredWithAll"), "required_with_all");
        assert_eq!(snake_case("Between"), "between");
        assert_eq!(snake_case("firstName"), "first_name");
        assert_eq!(snake_case("NotIn"), "not_in");
    }

    #[test]
    fn text_form() {
        let rule = ParsedRule::parse_str(" between :3,10");
        assert_eq!(rule.name, "Between");
        assert_eq!(rule.parameters, vec!["3", "10"]);

        let rule = ParsedRule::parse_str("required");
        assert_eq!(rule.name, "Required");
        assert!(rule.parameters.is_empty());

        let rule = ParsedRule::parse_str("min:");
        assert!(rule.parameters.is_empty());
    }

    #[test]
    fn regex_parameter_is_not_split() {
        let rule = ParsedRule::parse_str("REGEX:^[a-z]{2,4}:x$");
        assert_eq!(rule.name, "REGEX");
        assert_eq!(rule.parameters, vec!["^[a-z]{2,4}:x$"]);
    }

    #[test]
    fn list_form_keeps_parameters() {
        let rule = ParsedRule::parse(&RuleExpr::from(["in", "a,b", "c|d"]));
        assert_eq!(rule.name, "In");
        assert_eq!(rule.parameters, vec!["a,b", "c|d"]);

        let rule = ParsedRule::parse(&RuleExpr::List(Vec::new()));
        assert!(rule.is_blank());
    }

    #[test]
    fn blank_expression() {
        assert!(ParsedRule::parse_str("").is_blank());
        assert!(ParsedRule::parse_str("   ").is_blank());
    }

    #[test]
    fn list_form_deserializes_scalars() {
        let expr: RuleExpr = serde_json::from_str(r#"["between", 3, 10]"#).unwrap();
        assert_eq!(expr, RuleExpr::from(["between", "3", "10"]));
        assert_eq!(expr.to_string(), "between:3,10");
    }
}
