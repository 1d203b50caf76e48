//! Localized validation messages.
//!
//! Every built-in message has a stable key (see [`keys`]) and a template with
//! `{param}` placeholders. A [`MessageResolver`] maps keys to templates; keys
//! it does not know fall back to the built-in English catalog.
//!
//! # Example
//!
//! ```
//! use smart_form::i18n::{render, FnResolver};
//!
//! let resolver = FnResolver::new(|key| match key {
//!     "required" => Some("{field} darf nicht leer sein".into()),
//!     _ => None,
//! });
//! assert_eq!(
//!     render(&resolver, "required", &[("field", "Name".into())]),
//!     "Name darf nicht leer sein"
//! );
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

/// Message keys used by the rule factories and the validation engine.
pub mod keys {
    // Default messages attached by the rule factories.
    pub const RULE_REQUIRED: &str = "rule.required";
    pub const RULE_EMAIL: &str = "rule.email";
    pub const RULE_PHONE: &str = "rule.phone";
    pub const RULE_URL: &str = "rule.url";
    pub const RULE_MIN_LENGTH: &str = "rule.min_length";
    pub const RULE_MAX_LENGTH: &str = "rule.max_length";
    pub const RULE_MIN: &str = "rule.min";
    pub const RULE_MAX: &str = "rule.max";
    pub const RULE_PATTERN: &str = "rule.pattern";

    // Engine fallbacks, used when a rule carries no message of its own.
    pub const REQUIRED: &str = "required";
    pub const LENGTH: &str = "length";
    pub const TOO_SHORT: &str = "too_short";
    pub const TOO_LONG: &str = "too_long";
    pub const NOT_A_NUMBER: &str = "not_a_number";
    pub const TOO_SMALL: &str = "too_small";
    pub const TOO_BIG: &str = "too_big";
    pub const PATTERN: &str = "pattern";
    pub const INVALID_EMAIL: &str = "invalid_email";
    pub const INVALID_URL: &str = "invalid_url";
    pub const VALIDATION_FAILED: &str = "validation_failed";
}

/// Resolves a message key to a template string.
///
/// Return `None` to fall back to the English default.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, key: &str) -> Option<String>;
}

/// [`MessageResolver`] backed by a `HashMap<String, String>`.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    map: HashMap<String, String>,
}

impl MapResolver {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    /// Add or replace a single template.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.map.insert(key.into(), template.into());
        self
    }
}

impl MessageResolver for MapResolver {
    fn resolve(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }
}

/// A [`MessageResolver`] that delegates to a closure.
pub struct FnResolver<F: Fn(&str) -> Option<String> + Send + Sync> {
    f: F,
}

impl<F: Fn(&str) -> Option<String> + Send + Sync> FnResolver<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: Fn(&str) -> Option<String> + Send + Sync> MessageResolver for FnResolver<F> {
    fn resolve(&self, key: &str) -> Option<String> {
        (self.f)(key)
    }
}

/// Replace `{param}` placeholders with values.
fn apply_params(template: &str, params: &[(&str, String)]) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        result = result.replace(&format!("{{{}}}", key), value);
    }
    result
}

/// Render the message for `key`, falling back to English and finally to the
/// key itself.
pub fn render(resolver: &dyn MessageResolver, key: &str, params: &[(&str, String)]) -> String {
    let template = resolver
        .resolve(key)
        .or_else(|| english_catalog().resolve(key))
        .unwrap_or_else(|| key.to_string());
    apply_params(&template, params)
}

/// The shared English catalog, built once per process.
pub fn english_catalog() -> &'static MapResolver {
    static ENGLISH: OnceLock<MapResolver> = OnceLock::new();
    ENGLISH.get_or_init(english)
}

/// Create a [`MapResolver`] with the English (default) messages.
pub fn english() -> MapResolver {
    let mut m = HashMap::new();
    m.insert(keys::RULE_REQUIRED.into(), "This field is required".into());
    m.insert(
        keys::RULE_EMAIL.into(),
        "Please enter a valid email address".into(),
    );
    m.insert(
        keys::RULE_PHONE.into(),
        "Please enter a valid phone number".into(),
    );
    m.insert(keys::RULE_URL.into(), "Please enter a valid URL".into());
    m.insert(
        keys::RULE_MIN_LENGTH.into(),
        "Must be at least {length} characters".into(),
    );
    m.insert(
        keys::RULE_MAX_LENGTH.into(),
        "Must be at most {length} characters".into(),
    );
    m.insert(keys::RULE_MIN.into(), "Must not be less than {value}".into());
    m.insert(
        keys::RULE_MAX.into(),
        "Must not be greater than {value}".into(),
    );
    m.insert(keys::RULE_PATTERN.into(), "Invalid format".into());

    m.insert(keys::REQUIRED.into(), "{field} is required".into());
    m.insert(
        keys::LENGTH.into(),
        "{field} must be exactly {len} characters".into(),
    );
    m.insert(
        keys::TOO_SHORT.into(),
        "{field} must be at least {min} characters".into(),
    );
    m.insert(
        keys::TOO_LONG.into(),
        "{field} must be at most {max} characters".into(),
    );
    m.insert(keys::NOT_A_NUMBER.into(), "{field} must be a number".into());
    m.insert(
        keys::TOO_SMALL.into(),
        "{field} must not be less than {min}".into(),
    );
    m.insert(
        keys::TOO_BIG.into(),
        "{field} must not be greater than {max}".into(),
    );
    m.insert(keys::PATTERN.into(), "{field} has an invalid format".into());
    m.insert(
        keys::INVALID_EMAIL.into(),
        "{field} must be a valid email address".into(),
    );
    m.insert(keys::INVALID_URL.into(), "{field} must be a valid URL".into());
    m.insert(
        keys::VALIDATION_FAILED.into(),
        "{field} failed validation".into(),
    );
    MapResolver::new(m)
}

/// Create a [`MapResolver`] with Simplified Chinese messages.
pub fn chinese() -> MapResolver {
    let mut m = HashMap::new();
    m.insert(keys::RULE_REQUIRED.into(), "此字段为必填项".into());
    m.insert(keys::RULE_EMAIL.into(), "请输入有效的邮箱地址".into());
    m.insert(keys::RULE_PHONE.into(), "请输入有效的手机号码".into());
    m.insert(keys::RULE_URL.into(), "请输入有效的URL地址".into());
    m.insert(
        keys::RULE_MIN_LENGTH.into(),
        "长度不能少于{length}个字符".into(),
    );
    m.insert(
        keys::RULE_MAX_LENGTH.into(),
        "长度不能超过{length}个字符".into(),
    );
    m.insert(keys::RULE_MIN.into(), "值不能小于{value}".into());
    m.insert(keys::RULE_MAX.into(), "值不能大于{value}".into());
    m.insert(keys::RULE_PATTERN.into(), "格式不正确".into());

    m.insert(keys::REQUIRED.into(), "{field}是必填项".into());
    m.insert(keys::LENGTH.into(), "{field}长度必须为{len}个字符".into());
    m.insert(keys::TOO_SHORT.into(), "{field}长度不能少于{min}个字符".into());
    m.insert(keys::TOO_LONG.into(), "{field}长度不能超过{max}个字符".into());
    m.insert(keys::NOT_A_NUMBER.into(), "{field}必须是数字".into());
    m.insert(keys::TOO_SMALL.into(), "{field}不能小于{min}".into());
    m.insert(keys::TOO_BIG.into(), "{field}不能大于{max}".into());
    m.insert(keys::PATTERN.into(), "{field}格式不正确".into());
    m.insert(
        keys::INVALID_EMAIL.into(),
        "{field}必须是有效的邮箱地址".into(),
    );
    m.insert(keys::INVALID_URL.into(), "{field}必须是有效的URL地址".into());
    m.insert(keys::VALIDATION_FAILED.into(), "{field}验证失败".into());
    MapResolver::new(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_english() {
        let resolver = MapResolver::default();
        let msg = render(&resolver, keys::REQUIRED, &[("field", "email".into())]);
        assert_eq!(msg, "email is required");
    }

    #[test]
    fn unknown_key_renders_itself() {
        assert_eq!(render(&english(), "nope", &[]), "nope");
    }

    #[test]
    fn catalogs_cover_the_same_keys() {
        let en = english();
        let zh = chinese();
        assert_eq!(en.map.len(), zh.map.len());
        for key in en.map.keys() {
            assert!(zh.resolve(key).is_some(), "missing zh key {}", key);
        }
    }

    #[test]
    fn custom_failures_use_the_engine_key() {
        assert!(english().resolve("rule.custom").is_none());
        assert_eq!(
            render(&chinese(), keys::VALIDATION_FAILED, &[("field", "code".into())]),
            "code验证失败"
        );
    }
}
