//! Dot-path access into form data.
//!
//! ```
//! use smart_form::path::{get_nested_value, set_nested_value};
//! use smart_form::FormData;
//!
//! let mut data = FormData::new();
//! set_nested_value(&mut data, "user.address.city", "Paris".into());
//! assert_eq!(get_nested_value(&data, "user.address.city").unwrap(), "Paris");
//! assert!(get_nested_value(&data, "user.phone").is_none());
//! ```

use serde_json::{Map, Value};

use crate::value::{to_js_string, FormData};

/// Whether `name` is a usable dot-path: non-empty segments separated by `.`.
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(|segment| !segment.is_empty())
}

/// Read the value at `path`.
///
/// Objects are traversed by key and arrays by numeric index. Returns `None`
/// as soon as a segment is missing or the current value cannot be indexed.
pub fn get_nested_value<'a>(obj: &'a FormData, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = obj.get(first)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate objects.
///
/// Any non-object value found at an intermediate segment is replaced by an
/// empty object.
pub fn set_nested_value(obj: &mut FormData, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    insert_at(obj, &segments, value);
}

/// Remove the value at `path`, returning it.
pub fn remove_nested_value(obj: &mut FormData, path: &str) -> Option<Value> {
    let (parent, leaf) = match path.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, path),
    };
    let mut current = obj;
    if let Some(parent) = parent {
        for segment in parent.split('.') {
            current = current.get_mut(segment)?.as_object_mut()?;
        }
    }
    current.remove(leaf)
}

/// Insert `value` under `segments`, replacing non-object intermediates.
fn insert_at(obj: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [leaf] => {
            obj.insert(leaf.to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = obj
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match slot {
                Value::Object(map) => insert_at(map, rest, value),
                other => {
                    let mut map = Map::new();
                    insert_at(&mut map, rest, value);
                    *other = Value::Object(map);
                }
            }
        }
    }
}

/// Recursively merge `source` into `target`.
///
/// Objects merge key by key; any other source value, `null` included,
/// replaces the target value.
pub fn deep_merge(target: &mut FormData, source: &FormData) {
    for (key, incoming) in source {
        if let (Some(Value::Object(existing)), Value::Object(nested)) =
            (target.get_mut(key), incoming)
        {
            deep_merge(existing, nested);
            continue;
        }
        target.insert(key.clone(), incoming.clone());
    }
}

/// Flatten form data into `(key, value)` pairs with bracketed keys, as used
/// by multipart form submissions: `user[name]`, `tags[0]`.
///
/// `null` becomes the empty string.
pub fn to_entries(data: &FormData) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for (key, value) in data {
        append_entries(key.clone(), value, &mut entries);
    }
    entries
}

fn append_entries(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                append_entries(format!("{}[{}]", key, idx), item, out);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                append_entries(format!("{}[{}]", key, sub), item, out);
            }
        }
        Value::Null => out.push((key, String::new())),
        Value::String(s) => out.push((key, s.clone())),
        other => out.push((key, to_js_string(other))),
    }
}

/// Rebuild nested form data from bracketed `(key, value)` pairs.
///
/// Every nested level becomes an object (array indices turn into string
/// keys); values stay strings.
pub fn from_entries<I, K, V>(entries: I) -> FormData
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut obj = FormData::new();
    for (key, value) in entries {
        let key = key.as_ref();
        let value = Value::String(value.into());
        if !(key.contains('[') && key.contains(']')) {
            obj.insert(key.to_string(), value);
            continue;
        }
        let segments: Vec<&str> = key
            .split(|c| c == '[' || c == ']')
            .filter(|s| !s.is_empty())
            .collect();
        insert_at(&mut obj, &segments, value);
    }
    obj
}
