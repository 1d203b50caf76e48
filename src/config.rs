//! Declarative form definitions loaded from JSON.
//!
//! A configuration describes the fields, their rules and simple visibility
//! conditions without any closures, so it can live in a file or be sent by a
//! server. It is turned into [`FieldSchema`]s (or directly into a
//! [`FormValidator`]) with [`FormConfig::into_fields`] /
//! [`FormConfig::into_validator`].
//!
//! ```
//! use smart_form::config::FormConfig;
//!
//! let config = FormConfig::load(r#"{
//!     "locale": "en",
//!     "fields": [
//!         {"name": "email", "type": "input", "rules": [{"required": true}, {"type": "email"}]},
//!         {"name": "company", "type": "input", "visibleWhen": {"field": "isBusiness", "equals": true}}
//!     ]
//! }"#).unwrap();
//! let fields = config.into_fields().unwrap();
//! assert_eq!(fields.len(), 2);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;
use crate::field::{Condition, FieldOption, FieldSchema, FieldType};
use crate::i18n::{self, MessageResolver};
use crate::input::FormInput;
use crate::path::{get_nested_value, is_valid_field_name};
use crate::patterns::Pattern;
use crate::rule::{Rule, RuleType};
use crate::validator::FormValidator;
use crate::value::is_truthy;

/// Language of the built-in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn resolver(self) -> i18n::MapResolver {
        match self {
            Locale::En => i18n::english(),
            Locale::Zh => i18n::chinese(),
        }
    }
}

/// Whole-form configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    #[serde(default)]
    pub locale: Locale,
    pub fields: Vec<FieldConfig>,
}

/// One field of a [`FormConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Declarative rule. `pattern` is a regex source; `preset` names a built-in
/// [`Pattern`] (`"phone"`, `"idCard"`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Show a field only when another field's value equals `equals`, or, without
/// `equals`, when that value is truthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleWhen {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
}

impl VisibleWhen {
    fn into_condition(self) -> Condition {
        Condition::new(move |data| {
            let current = get_nested_value(data, &self.field);
            match (&self.equals, current) {
                (Some(expected), Some(actual)) => expected == actual,
                (Some(expected), None) => expected.is_null(),
                (None, Some(actual)) => is_truthy(actual),
                (None, None) => false,
            }
        })
    }
}

impl RuleConfig {
    fn into_rule(self, field: &str) -> Result<Rule, FormError> {
        let mut rule = Rule {
            required: self.required,
            min: self.min,
            max: self.max,
            len: self.len,
            kind: self.kind,
            message: self.message,
            ..Rule::default()
        };
        if let Some(source) = self.pattern {
            let re = Regex::new(&source).map_err(|e| FormError::InvalidPattern {
                field: field.to_string(),
                pattern: source.clone(),
                reason: e.to_string(),
            })?;
            rule.pattern = Some(re);
        } else if let Some(preset) = self.preset {
            let pattern = Pattern::from_name(&preset).ok_or_else(|| FormError::UnknownPreset {
                field: field.to_string(),
                preset: preset.clone(),
            })?;
            rule.pattern = Some(pattern.regex().clone());
        }
        Ok(rule)
    }
}

impl FieldConfig {
    /// Build the field schema. Fails on an invalid name or rule pattern.
    pub fn into_schema(self) -> Result<FieldSchema, FormError> {
        if !is_valid_field_name(&self.name) {
            return Err(FormError::InvalidFieldName(self.name));
        }
        let rules = self
            .rules
            .into_iter()
            .map(|rule| rule.into_rule(&self.name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldSchema {
            name: self.name,
            field_type: self.field_type,
            label: self.label,
            placeholder: self.placeholder,
            default_value: self.default_value,
            options: self.options,
            rules,
            disabled: self.disabled,
            dependencies: self.dependencies,
            conditional: self.visible_when.map(VisibleWhen::into_condition),
            order: self.order,
        })
    }
}

impl FormConfig {
    /// Load a configuration from any [`FormInput`].
    pub fn load<I: FormInput + ?Sized>(input: &I) -> Result<Self, FormError> {
        let json = input.to_json_value()?;
        serde_json::from_value(json).map_err(|e| FormError::InvalidConfig(e.to_string()))
    }

    /// Build every field, rejecting duplicate names.
    pub fn into_fields(self) -> Result<Vec<FieldSchema>, FormError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            if !seen.insert(field.name.clone()) {
                return Err(FormError::DuplicateField(field.name));
            }
            fields.push(field.into_schema()?);
        }
        tracing::debug!(fields = fields.len(), "form configuration loaded");
        Ok(fields)
    }

    /// Build a [`FormValidator`] using the configured locale's messages.
    pub fn into_validator(self) -> Result<FormValidator, FormError> {
        let resolver: Arc<dyn MessageResolver> = Arc::new(self.locale.resolver());
        let fields = self.into_fields()?;
        Ok(FormValidator::new(fields).with_resolver(resolver))
    }
}
