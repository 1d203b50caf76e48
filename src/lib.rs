//! # smart-form: schema-driven form validation
//!
//! Declare a form as a list of [`FieldSchema`](field::FieldSchema)s, each
//! with ordered [`Rule`](rule::Rule)s and an optional visibility condition,
//! then validate form data against it to get an [`ErrorMap`](error::ErrorMap)
//! with the first failing message per field.
//!
//! ## Quick Start
//!
//! ```rust
//! use futures::executor::block_on;
//! use serde_json::json;
//! use smart_form::prelude::*;
//!
//! let fields = vec![
//!     smart_form::field("userName", FieldType::Input)
//!         .rule(rules::required())
//!         .rule(rules::min_length(3)),
//!     smart_form::field("contact.email", FieldType::Input)
//!         .default_value("")
//!         .rule(rules::email()),
//!     smart_form::field("age", FieldType::Number).rule(rules::min(18.0)),
//! ];
//!
//! assert_eq!(smart_form::fields::format_field_label(&fields[0]), "User Name");
//!
//! let data = json!({"userName": "al", "contact": {"email": "nope"}, "age": 30});
//! let errors = block_on(smart_form::validate_form(data.as_object().unwrap(), &fields));
//! assert_eq!(errors.get("userName"), Some("Must be at least 3 characters"));
//! assert_eq!(errors.get("contact.email"), Some("Please enter a valid email address"));
//! assert!(!errors.contains("age"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod fields;
pub mod format;
pub mod i18n;
pub mod input;
pub mod path;
pub mod patterns;
pub mod rule;
pub mod rules;
pub mod validator;
pub mod value;

pub use engine::{
    validate_field, validate_field_with, validate_form, validate_form_with, validate_rule,
    validate_rule_with,
};
pub use error::{ErrorMap, FormError};
pub use value::FormData;

// Re-export regex_lite so callers can build `pattern` rules without a
// separate dependency.
pub use regex_lite;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create a field schema.
pub fn field(name: impl Into<String>, field_type: field::FieldType) -> field::FieldSchema {
    field::FieldSchema::new(name, field_type)
}

/// Create an empty rule; chain constraints onto it.
pub fn rule() -> rule::Rule {
    rule::Rule::new()
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `smart-form`.
pub mod prelude {
    pub use crate::config::{FieldConfig, FormConfig, Locale, RuleConfig, VisibleWhen};
    pub use crate::error::{ErrorMap, FormError};
    pub use crate::field::{Condition, FieldOption, FieldSchema, FieldType};
    pub use crate::format::{prettify_errors, treeify_errors, ErrorTree};
    pub use crate::i18n::{FnResolver, MapResolver, MessageResolver};
    pub use crate::input::FormInput;
    pub use crate::patterns::Pattern;
    pub use crate::rule::{Rule, RuleType, Validator, ValidatorError, Verdict};
    pub use crate::rules;
    pub use crate::validator::FormValidator;
    pub use crate::value::FormData;
}
