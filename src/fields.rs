//! Pure helpers over field schemas: defaults, visibility, ordering, labels.

use crate::field::FieldSchema;
use crate::path::set_nested_value;
use crate::rule::Rule;
use crate::value::FormData;

/// Collect every field's default value at its dot-path.
///
/// Fields without a default are left out entirely.
pub fn extract_default_values(fields: &[FieldSchema]) -> FormData {
    let mut defaults = FormData::new();
    for field in fields {
        if let Some(value) = &field.default_value {
            set_nested_value(&mut defaults, &field.name, value.clone());
        }
    }
    defaults
}

/// Keep fields without a condition and fields whose condition holds for
/// `data`.
///
/// Conditions are re-evaluated on every call.
pub fn filter_visible_fields<'a>(fields: &'a [FieldSchema], data: &FormData) -> Vec<&'a FieldSchema> {
    fields
        .iter()
        .filter(|field| match &field.conditional {
            Some(condition) => condition.evaluate(data),
            None => true,
        })
        .collect()
}

/// Stable ascending sort by `order` (unset counts as 0). The input is left
/// untouched.
pub fn sort_fields<'a, I>(fields: I) -> Vec<&'a FieldSchema>
where
    I: IntoIterator<Item = &'a FieldSchema>,
{
    let mut sorted: Vec<&FieldSchema> = fields.into_iter().collect();
    sorted.sort_by_key(|field| field.effective_order());
    sorted
}

/// Display label: the explicit label, otherwise derived from the name
/// (`"firstName"` → `"First Name"`).
pub fn format_field_label(field: &FieldSchema) -> String {
    if let Some(label) = field.label.as_deref().filter(|l| !l.is_empty()) {
        return label.to_string();
    }

    let mut spaced = String::with_capacity(field.name.len() + 4);
    for ch in field.name.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

/// `true` when any of the field's rules is `required`.
pub fn is_field_required(field: &FieldSchema) -> bool {
    field.rules.iter().any(|rule| rule.required)
}

pub fn get_field_rules(field: &FieldSchema) -> &[Rule] {
    &field.rules
}

/// Stable element id for a rendered field: `"{name}-{index}"`.
pub fn generate_field_id(field: &FieldSchema, index: usize) -> String {
    format!("{}-{}", field.name, index)
}
