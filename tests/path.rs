use serde_json::{json, Value};
use smart_form::path::{
    deep_merge, from_entries, get_nested_value, set_nested_value, to_entries,
};
use smart_form::FormData;

fn data(v: Value) -> FormData {
    v.as_object().cloned().unwrap()
}

#[test]
fn set_then_get() {
    let mut obj = FormData::new();
    set_nested_value(&mut obj, "a.b.c", json!(42));
    assert_eq!(get_nested_value(&obj, "a.b.c"), Some(&json!(42)));
    assert_eq!(Value::Object(obj), json!({"a": {"b": {"c": 42}}}));
}

#[test]
fn set_keeps_sibling_keys() {
    let mut obj = data(json!({"a": {"x": 1}}));
    set_nested_value(&mut obj, "a.y", json!(2));
    assert_eq!(Value::Object(obj), json!({"a": {"x": 1, "y": 2}}));
}

#[test]
fn get_missing_segments() {
    let obj = data(json!({"a": {"b": null}, "s": "text"}));
    assert_eq!(get_nested_value(&obj, "a.b"), Some(&Value::Null));
    assert_eq!(get_nested_value(&obj, "a.b.c"), None);
    assert_eq!(get_nested_value(&obj, "s.len"), None);
    assert_eq!(get_nested_value(&obj, "nope"), None);
}

#[test]
fn merge_nested_objects() {
    let mut target = data(json!({"a": {"x": 1, "y": 2}, "keep": true, "n": 5}));
    let source = data(json!({"a": {"y": 3, "z": 4}, "n": null, "new": [1]}));
    deep_merge(&mut target, &source);
    assert_eq!(
        Value::Object(target),
        json!({"a": {"x": 1, "y": 3, "z": 4}, "keep": true, "n": null, "new": [1]})
    );
}

#[test]
fn merge_null_clears_nested_values() {
    let mut target = data(json!({"a": {"x": 1}, "b": {"y": 2}}));
    deep_merge(&mut target, &data(json!({"a": {"x": null}, "b": null})));
    assert_eq!(Value::Object(target), json!({"a": {"x": null}, "b": null}));
}

#[test]
fn bracketed_entries() {
    let obj = data(json!({
        "name": "Ada",
        "age": 36,
        "price": 1.0,
        "rate": 2.5,
        "agreed": true,
        "note": null,
        "tags": ["a", "b"],
        "address": {"city": "London"}
    }));
    let entries = to_entries(&obj);
    assert!(entries.contains(&("name".to_string(), "Ada".to_string())));
    assert!(entries.contains(&("age".to_string(), "36".to_string())));
    assert!(entries.contains(&("price".to_string(), "1".to_string())));
    assert!(entries.contains(&("rate".to_string(), "2.5".to_string())));
    assert!(entries.contains(&("agreed".to_string(), "true".to_string())));
    assert!(entries.contains(&("note".to_string(), String::new())));
    assert!(entries.contains(&("tags[1]".to_string(), "b".to_string())));
    assert!(entries.contains(&("address[city]".to_string(), "London".to_string())));
}

#[test]
fn entries_back_to_objects() {
    let obj = from_entries(vec![
        ("name", "Ada"),
        ("address[city]", "London"),
        ("address[geo][lat]", "51.5"),
        ("tags[0]", "a"),
    ]);
    assert_eq!(
        Value::Object(obj),
        json!({
            "name": "Ada",
            "address": {"city": "London", "geo": {"lat": "51.5"}},
            "tags": {"0": "a"}
        })
    );
}
