//! Built-in predicate catalogue.
//!
//! Every predicate has the same shape: it reads the field value and the
//! rule parameters from a [`RuleContext`](crate::RuleContext) and answers
//! whether the rule holds.

mod compare;
pub(crate) mod date;
mod membership;
mod numeric;
mod pattern;
mod presence;
mod size;

use crate::registry::RuleRegistry;

pub(crate) fn register_builtins(registry: &RuleRegistry) {
    registry.define("Required", presence::required);
    registry.define("Accepted", presence::accepted);
    registry.define("RequiredIf", presence::required_if);
    registry.define("RequiredWith", presence::required_with);
    registry.define("RequiredWithAll", presence::required_with_all);
    registry.define("RequiredWithout", presence::required_without);
    registry.define("RequiredWithoutAll", presence::required_without_all);

    registry.define("In", membership::in_list);
    registry.define("NotIn", membership::not_in_list);

    registry.define("Numeric", numeric::numeric);
    registry.define("Integer", numeric::integer);

    registry.define("Between", size::between);
    registry.define("Size", size::size);
    registry.define("Min", size::min);
    registry.define("Max", size::max);
    registry.define("Array", size::array);

    registry.define("Regex", pattern::regex);
    registry.define("Email", pattern::email);

    registry.define("Same", compare::same);
    registry.define("Different", compare::different);

    registry.define("Date", date::date);
    registry.define("DateFormat", date::date_format);
    registry.define("Before", date::before);
    registry.define("After", date::after);
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::context::RuleContext;
    use crate::error::Result;
    use crate::ruleset::RuleSet;
    use crate::validator::Validator;
    use serde_json::Value;

    /// Run one predicate against `field` of `data`, with `rules` as the
    /// field's full rule list.
    pub(crate) fn check(
        predicate: fn(&RuleContext<'_>) -> Result<bool>,
        data: Value,
        field: &str,
        rules: &str,
        parameters: &[&str],
    ) -> Result<bool> {
        let validator = Validator::make(data, RuleSet::from([(field, rules)]));
        let parameters: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
        predicate(&RuleContext::new(&validator, field, "Test", &parameters))
    }
}
