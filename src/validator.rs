use std::sync::Arc;

use crate::engine::{validate_field_with, validate_fields};
use crate::error::ErrorMap;
use crate::field::FieldSchema;
use crate::fields::{extract_default_values, filter_visible_fields, sort_fields};
use crate::i18n::{self, MessageResolver};
use crate::path::{deep_merge, get_nested_value};
use crate::value::FormData;

/// A form's fields together with the outcome of its last validation.
///
/// Only fields that are visible for the data being validated take part;
/// hidden fields never produce errors.
///
/// # Example
/// ```
/// use futures::executor::block_on;
/// use serde_json::json;
/// use smart_form::prelude::*;
///
/// let mut form = FormValidator::new(vec![
///     smart_form::field("name", FieldType::Input).rule(rules::required()),
///     smart_form::field("company", FieldType::Input)
///         .rule(rules::required())
///         .visible_when(|data| data.get("business") == Some(&json!(true))),
/// ]);
///
/// let data = json!({"name": "Ada", "business": false});
/// assert!(block_on(form.validate(data.as_object().unwrap())));
/// assert!(form.errors().is_empty());
/// ```
pub struct FormValidator {
    fields: Vec<FieldSchema>,
    resolver: Arc<dyn MessageResolver>,
    errors: ErrorMap,
}

impl FormValidator {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self {
            fields,
            resolver: Arc::new(i18n::english()),
            errors: ErrorMap::new(),
        }
    }

    /// Use `resolver` for fallback messages.
    pub fn with_resolver(mut self, resolver: Arc<dyn MessageResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields to render for `data`: visible ones, sorted by order.
    pub fn visible_fields(&self, data: &FormData) -> Vec<&FieldSchema> {
        sort_fields(filter_visible_fields(&self.fields, data))
    }

    /// Default values merged with `initial` (caller values win).
    pub fn initial_data(&self, initial: &FormData) -> FormData {
        let mut data = extract_default_values(&self.fields);
        deep_merge(&mut data, initial);
        data
    }

    /// Validate all visible fields, replacing the stored errors.
    ///
    /// Returns `true` when no field failed.
    pub async fn validate(&mut self, data: &FormData) -> bool {
        let visible = filter_visible_fields(&self.fields, data);
        let errors = validate_fields(data, visible, self.resolver.as_ref()).await;
        tracing::debug!(errors = errors.len(), "form validator updated");
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate one field against `data` without touching the stored errors.
    ///
    /// Unknown fields pass.
    pub async fn validate_field(&self, name: &str, data: &FormData) -> Option<String> {
        let field = self.field(name)?;
        let value = get_nested_value(data, &field.name);
        validate_field_with(value, &field.rules, &field.name, self.resolver.as_ref()).await
    }

    /// Errors from the last [`validate`](Self::validate) (or
    /// [`set_errors`](Self::set_errors)).
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors = ErrorMap::new();
    }

    /// Replace the stored errors, e.g. with errors reported by a server.
    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
