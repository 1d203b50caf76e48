//! Rule evaluation and error aggregation.
//!
//! Evaluation is asynchronous end to end so custom validators can await
//! remote checks; their failures always reach the caller. Fields are
//! validated one after another in declaration order.
//!
//! ```
//! use futures::executor::block_on;
//! use serde_json::json;
//! use smart_form::prelude::*;
//!
//! let fields = vec![smart_form::field("name", FieldType::Input).rule(rules::required())];
//! let data = json!({"name": ""});
//! let errors = block_on(smart_form::validate_form(data.as_object().unwrap(), &fields));
//! assert_eq!(errors.get("name"), Some("This field is required"));
//! ```

use serde_json::Value;

use crate::error::ErrorMap;
use crate::field::FieldSchema;
use crate::i18n::{english_catalog, keys, render, MessageResolver};
use crate::patterns::Pattern;
use crate::path::get_nested_value;
use crate::rule::{Rule, RuleType, Verdict};
use crate::value::{format_number, is_blank, to_js_number, to_js_string, FormData};

/// Evaluate one rule. Returns the failure message, or `None` when the value
/// passes.
pub async fn validate_rule(value: Option<&Value>, rule: &Rule, field_name: &str) -> Option<String> {
    validate_rule_with(value, rule, field_name, english_catalog()).await
}

/// [`validate_rule`] with fallback messages from `resolver`.
pub async fn validate_rule_with(
    value: Option<&Value>,
    rule: &Rule,
    field_name: &str,
    resolver: &dyn MessageResolver,
) -> Option<String> {
    let value = match value {
        Some(v) if !is_blank(Some(v)) => v,
        _ => {
            return if rule.required {
                Some(failure(rule, resolver, keys::REQUIRED, field_name, vec![]))
            } else {
                None
            };
        }
    };

    if let Some(msg) = check_constraints(value, rule, field_name, resolver) {
        return Some(msg);
    }

    let validator = rule.validator.as_ref()?;
    let generic = || failure(rule, resolver, keys::VALIDATION_FAILED, field_name, vec![]);
    match validator.call(value).await {
        Ok(Verdict::Valid) => None,
        Ok(Verdict::Invalid) => Some(generic()),
        Ok(Verdict::Message(msg)) if msg.is_empty() => Some(generic()),
        Ok(Verdict::Message(msg)) => Some(rule.message.clone().unwrap_or(msg)),
        Err(err) => {
            tracing::warn!(field = field_name, error = %err, "custom validator returned an error");
            Some(generic())
        }
    }
}

/// The declarative checks of a rule, applied to a non-blank value.
fn check_constraints(
    value: &Value,
    rule: &Rule,
    field_name: &str,
    resolver: &dyn MessageResolver,
) -> Option<String> {
    let text = to_js_string(value);
    let length = text.chars().count();

    if let Some(len) = rule.len {
        if length != len {
            let params = vec![("len", len.to_string())];
            return Some(failure(rule, resolver, keys::LENGTH, field_name, params));
        }
    }

    if rule.is_numeric() {
        let Some(number) = to_js_number(value) else {
            return Some(failure(rule, resolver, keys::NOT_A_NUMBER, field_name, vec![]));
        };
        if let Some(min) = rule.min.filter(|min| number < *min) {
            let params = vec![("min", format_number(min))];
            return Some(failure(rule, resolver, keys::TOO_SMALL, field_name, params));
        }
        if let Some(max) = rule.max.filter(|max| number > *max) {
            let params = vec![("max", format_number(max))];
            return Some(failure(rule, resolver, keys::TOO_BIG, field_name, params));
        }
    } else {
        if let Some(min) = rule.min.filter(|min| (length as f64) < *min) {
            let params = vec![("min", format_number(min))];
            return Some(failure(rule, resolver, keys::TOO_SHORT, field_name, params));
        }
        if let Some(max) = rule.max.filter(|max| (length as f64) > *max) {
            let params = vec![("max", format_number(max))];
            return Some(failure(rule, resolver, keys::TOO_LONG, field_name, params));
        }
    }

    if let Some(re) = &rule.pattern {
        if !re.is_match(&text) {
            return Some(failure(rule, resolver, keys::PATTERN, field_name, vec![]));
        }
    }

    match rule.kind {
        Some(RuleType::Email) if !Pattern::Email.is_match(&text) => Some(failure(
            rule,
            resolver,
            keys::INVALID_EMAIL,
            field_name,
            vec![],
        )),
        Some(RuleType::Url) if !Pattern::Url.is_match(&text) => Some(failure(
            rule,
            resolver,
            keys::INVALID_URL,
            field_name,
            vec![],
        )),
        _ => None,
    }
}

/// The rule's own message, or the rendered fallback for `key`.
fn failure(
    rule: &Rule,
    resolver: &dyn MessageResolver,
    key: &str,
    field_name: &str,
    mut params: Vec<(&str, String)>,
) -> String {
    if let Some(msg) = &rule.message {
        return msg.clone();
    }
    params.push(("field", field_name.to_string()));
    render(resolver, key, &params)
}

/// Evaluate rules in order and return the first failure.
pub async fn validate_field(value: Option<&Value>, rules: &[Rule], field_name: &str) -> Option<String> {
    validate_field_with(value, rules, field_name, english_catalog()).await
}

/// [`validate_field`] with fallback messages from `resolver`.
pub async fn validate_field_with(
    value: Option<&Value>,
    rules: &[Rule],
    field_name: &str,
    resolver: &dyn MessageResolver,
) -> Option<String> {
    for (idx, rule) in rules.iter().enumerate() {
        if let Some(msg) = validate_rule_with(value, rule, field_name, resolver).await {
            tracing::trace!(field = field_name, rule = idx, error = %msg, "rule failed");
            return Some(msg);
        }
    }
    None
}

/// Validate every field against `data` and collect the failures.
///
/// Values are looked up by dot-path, the same addressing used for defaults.
/// Fields are validated sequentially in the given order.
pub async fn validate_form(data: &FormData, fields: &[FieldSchema]) -> ErrorMap {
    validate_form_with(data, fields, english_catalog()).await
}

/// [`validate_form`] with fallback messages from `resolver`.
pub async fn validate_form_with(
    data: &FormData,
    fields: &[FieldSchema],
    resolver: &dyn MessageResolver,
) -> ErrorMap {
    validate_fields(data, fields.iter(), resolver).await
}

pub(crate) async fn validate_fields<'a, I>(
    data: &FormData,
    fields: I,
    resolver: &dyn MessageResolver,
) -> ErrorMap
where
    I: IntoIterator<Item = &'a FieldSchema>,
{
    let mut errors = ErrorMap::new();
    let mut checked = 0usize;
    for field in fields {
        checked += 1;
        let value = get_nested_value(data, &field.name);
        if let Some(msg) = validate_field_with(value, &field.rules, &field.name, resolver).await {
            errors.insert(field.name.clone(), msg);
        }
    }
    tracing::debug!(fields = checked, errors = errors.len(), "form validated");
    errors
}
