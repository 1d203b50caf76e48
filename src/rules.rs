//! Factories for the common validation rules.
//!
//! Each factory returns one [`Rule`] carrying a default message; the `*_msg`
//! variants take the message explicitly. The free functions use the English
//! catalog; [`RuleFactory`] draws default messages from any
//! [`MessageResolver`].
//!
//! ```
//! use smart_form::rules;
//!
//! let rules = vec![rules::required(), rules::min_length(3), rules::max_length_msg(20, "Too long")];
//! assert!(rules[0].required);
//! assert_eq!(rules[2].message.as_deref(), Some("Too long"));
//! ```

use std::future::Future;

use regex_lite::Regex;
use serde_json::Value;

use crate::i18n::{english_catalog, keys, render, MessageResolver};
use crate::patterns::Pattern;
use crate::rule::{Rule, RuleType, Validator, ValidatorError, Verdict};
use crate::value::format_number;

/// Rule factories with default messages from a [`MessageResolver`].
///
/// # Example
/// ```
/// use smart_form::i18n;
/// use smart_form::rules::RuleFactory;
///
/// let zh = i18n::chinese();
/// let rules = RuleFactory::new(&zh);
/// assert_eq!(rules.required().message.as_deref(), Some("此字段为必填项"));
/// ```
#[derive(Clone, Copy)]
pub struct RuleFactory<'a> {
    resolver: &'a dyn MessageResolver,
}

impl Default for RuleFactory<'static> {
    fn default() -> Self {
        Self {
            resolver: english_catalog(),
        }
    }
}

impl<'a> RuleFactory<'a> {
    pub fn new(resolver: &'a dyn MessageResolver) -> Self {
        Self { resolver }
    }

    fn text(&self, key: &str, params: &[(&str, String)]) -> String {
        render(self.resolver, key, params)
    }

    pub fn required(&self) -> Rule {
        required_msg(self.text(keys::RULE_REQUIRED, &[]))
    }

    pub fn email(&self) -> Rule {
        email_msg(self.text(keys::RULE_EMAIL, &[]))
    }

    pub fn phone(&self) -> Rule {
        phone_msg(self.text(keys::RULE_PHONE, &[]))
    }

    pub fn url(&self) -> Rule {
        url_msg(self.text(keys::RULE_URL, &[]))
    }

    pub fn min_length(&self, length: usize) -> Rule {
        let msg = self.text(keys::RULE_MIN_LENGTH, &[("length", length.to_string())]);
        min_length_msg(length, msg)
    }

    pub fn max_length(&self, length: usize) -> Rule {
        let msg = self.text(keys::RULE_MAX_LENGTH, &[("length", length.to_string())]);
        max_length_msg(length, msg)
    }

    pub fn min(&self, value: f64) -> Rule {
        let msg = self.text(keys::RULE_MIN, &[("value", format_number(value))]);
        min_msg(value, msg)
    }

    pub fn max(&self, value: f64) -> Rule {
        let msg = self.text(keys::RULE_MAX, &[("value", format_number(value))]);
        max_msg(value, msg)
    }

    pub fn pattern(&self, re: Regex) -> Rule {
        pattern_msg(re, self.text(keys::RULE_PATTERN, &[]))
    }

    /// Rule from a built-in pattern. Phone, email and URL keep their own
    /// messages; every other pattern uses the generic format message.
    pub fn matches(&self, pattern: Pattern) -> Rule {
        let key = match pattern {
            Pattern::Phone => keys::RULE_PHONE,
            Pattern::Email => keys::RULE_EMAIL,
            Pattern::Url => keys::RULE_URL,
            _ => keys::RULE_PATTERN,
        };
        pattern_msg(pattern.regex().clone(), self.text(key, &[]))
    }
}

/// Value must not be absent, `null` or `""`.
pub fn required() -> Rule {
    RuleFactory::default().required()
}

pub fn required_msg(msg: impl Into<String>) -> Rule {
    Rule::new().required().message(msg)
}

/// Value must look like an email address.
pub fn email() -> Rule {
    RuleFactory::default().email()
}

pub fn email_msg(msg: impl Into<String>) -> Rule {
    Rule::new().kind(RuleType::Email).message(msg)
}

/// Value must match [`Pattern::Phone`].
pub fn phone() -> Rule {
    RuleFactory::default().phone()
}

pub fn phone_msg(msg: impl Into<String>) -> Rule {
    Rule::new().pattern(Pattern::Phone.regex().clone()).message(msg)
}

/// Value must be an `http(s)://` URL.
pub fn url() -> Rule {
    RuleFactory::default().url()
}

pub fn url_msg(msg: impl Into<String>) -> Rule {
    Rule::new().kind(RuleType::Url).message(msg)
}

/// At least `length` characters.
pub fn min_length(length: usize) -> Rule {
    RuleFactory::default().min_length(length)
}

pub fn min_length_msg(length: usize, msg: impl Into<String>) -> Rule {
    Rule::new().min(length as f64).message(msg)
}

/// At most `length` characters.
pub fn max_length(length: usize) -> Rule {
    RuleFactory::default().max_length(length)
}

pub fn max_length_msg(length: usize, msg: impl Into<String>) -> Rule {
    Rule::new().max(length as f64).message(msg)
}

/// Numeric value not less than `value`.
pub fn min(value: f64) -> Rule {
    RuleFactory::default().min(value)
}

pub fn min_msg(value: f64, msg: impl Into<String>) -> Rule {
    Rule::new().kind(RuleType::Number).min(value).message(msg)
}

/// Numeric value not greater than `value`.
pub fn max(value: f64) -> Rule {
    RuleFactory::default().max(value)
}

pub fn max_msg(value: f64, msg: impl Into<String>) -> Rule {
    Rule::new().kind(RuleType::Number).max(value).message(msg)
}

/// Stringified value must match `re`.
pub fn pattern(re: Regex) -> Rule {
    RuleFactory::default().pattern(re)
}

pub fn pattern_msg(re: Regex, msg: impl Into<String>) -> Rule {
    Rule::new().pattern(re).message(msg)
}

/// Rule from a built-in [`Pattern`].
pub fn matches(pattern: Pattern) -> Rule {
    RuleFactory::default().matches(pattern)
}

/// Wrap a synchronous check. The check is not called here.
///
/// It may return `bool`, a failure message (`String`/`&str`), `()` or
/// `Option` of those.
pub fn custom<F, V>(check: F) -> Rule
where
    F: Fn(&Value) -> V + Send + Sync + 'static,
    V: Into<Verdict> + 'static,
{
    Rule::new().validator(Validator::new(check))
}

/// Wrap an asynchronous check.
///
/// # Example
/// ```
/// use smart_form::rules;
/// use smart_form::rule::ValidatorError;
///
/// let unique = rules::custom_async(|value: serde_json::Value| async move {
///     Ok::<_, ValidatorError>(value != "taken")
/// });
/// assert!(unique.validator.is_some());
/// ```
pub fn custom_async<F, Fut, V>(check: F) -> Rule
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, ValidatorError>> + Send + 'static,
    V: Into<Verdict> + 'static,
{
    Rule::new().validator(Validator::from_async(check))
}

/// Build a rule from a predicate returning `bool` or a message.
///
/// `false` fails with `message` (or the generic failure message when `None`);
/// a returned string fails with that string.
pub fn create_validator<F, V>(check: F, message: Option<String>) -> Rule
where
    F: Fn(&Value) -> V + Send + Sync + 'static,
    V: Into<Verdict> + 'static,
{
    Rule::new().validator(Validator::new(move |value| {
        let verdict: Verdict = check(value).into();
        match (verdict, &message) {
            (Verdict::Invalid, Some(msg)) => Verdict::Message(msg.clone()),
            (verdict, _) => verdict,
        }
    }))
}

/// Collect rules into a sequence, dropping the `None` entries.
///
/// ```
/// use smart_form::rules::{self, combine_rules};
///
/// let strict = false;
/// let list = combine_rules([Some(rules::required()), strict.then(|| rules::min_length(8))]);
/// assert_eq!(list.len(), 1);
/// ```
pub fn combine_rules<I>(rules: I) -> Vec<Rule>
where
    I: IntoIterator<Item = Option<Rule>>,
{
    rules.into_iter().flatten().collect()
}
