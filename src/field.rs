use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rule::Rule;
use crate::value::FormData;

/// Widget kind a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    #[default]
    Input,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
    DateRange,
    Time,
    TimeRange,
    Number,
    Switch,
    Slider,
    Rate,
    Upload,
    Cascader,
    TreeSelect,
    AutoComplete,
    Custom,
}

/// One choice of a select/radio/checkbox field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: Value,
    #[serde(default)]
    pub disabled: bool,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }
}

/// Visibility predicate over the current form data.
#[derive(Clone)]
pub struct Condition {
    predicate: Arc<dyn Fn(&FormData) -> bool + Send + Sync>,
}

impl Condition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&FormData) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    pub fn evaluate(&self, data: &FormData) -> bool {
        (self.predicate)(data)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}

/// Declarative definition of one form field.
///
/// `name` is a dot-path (`"address.city"`): defaults are written to and values
/// are read from that nested location of the form data.
///
/// # Example
/// ```
/// use smart_form::prelude::*;
///
/// let field = smart_form::field("email", FieldType::Input)
///     .label("E-mail")
///     .rule(rules::required())
///     .rule(rules::email())
///     .order(2);
/// assert!(smart_form::fields::is_field_required(&field));
/// ```
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub field_type: FieldType,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub default_value: Option<Value>,
    pub options: Vec<FieldOption>,
    pub rules: Vec<Rule>,
    pub disabled: bool,
    /// Names of the fields this one depends on.
    pub dependencies: Vec<String>,
    pub conditional: Option<Condition>,
    pub order: Option<i32>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: None,
            placeholder: None,
            default_value: None,
            options: vec![],
            rules: vec![],
            disabled: false,
            dependencies: vec![],
            conditional: None,
            order: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn option(mut self, option: FieldOption) -> Self {
        self.options.push(option);
        self
    }

    /// Append a rule. Rules are evaluated in the order they were added.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn depends_on(mut self, field: impl Into<String>) -> Self {
        self.dependencies.push(field.into());
        self
    }

    /// Show (and validate) the field only while `predicate` holds.
    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&FormData) -> bool + Send + Sync + 'static,
    {
        self.conditional = Some(Condition::new(predicate));
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditional = Some(condition);
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Sort key; unset order counts as 0.
    pub fn effective_order(&self) -> i32 {
        self.order.unwrap_or(0)
    }
}
