use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use serde_json::{json, Value};
use smart_form::prelude::*;
use smart_form::regex_lite::Regex;
use smart_form::{validate_field, validate_form, validate_rule};

fn data(v: Value) -> FormData {
    v.as_object().cloned().unwrap()
}

fn check(value: Value, rule: &Rule) -> Option<String> {
    block_on(validate_rule(Some(&value), rule, "x"))
}

// -----------------------------------------------------------------------
// Blank values
// -----------------------------------------------------------------------

#[test]
fn required_rejects_blank_values() {
    let rule = smart_form::rule().required();
    assert_eq!(block_on(validate_rule(None, &rule, "x")).unwrap(), "x is required");
    assert_eq!(check(Value::Null, &rule).unwrap(), "x is required");
    assert_eq!(check(json!(""), &rule).unwrap(), "x is required");
    assert!(check(json!(0), &rule).is_none());
    assert!(check(json!(false), &rule).is_none());
}

#[test]
fn blank_optional_values_skip_every_check() {
    let rule = smart_form::rule()
        .min(3.0)
        .len(9)
        .pattern(Regex::new("^z").unwrap())
        .kind(RuleType::Email)
        .validator(Validator::new(|_: &Value| false));
    assert!(block_on(validate_rule(None, &rule, "x")).is_none());
    assert!(check(json!(""), &rule).is_none());
    assert!(check(Value::Null, &rule).is_none());
}

// -----------------------------------------------------------------------
// Length checks
// -----------------------------------------------------------------------

#[test]
fn min_length() {
    let rule = smart_form::rule().min(3.0);
    assert_eq!(check(json!("ab"), &rule).unwrap(), "x must be at least 3 characters");
    assert!(check(json!("abcd"), &rule).is_none());
}

#[test]
fn max_length() {
    let rule = smart_form::rule().max(3.0);
    assert_eq!(check(json!("abcd"), &rule).unwrap(), "x must be at most 3 characters");
    assert!(check(json!("abc"), &rule).is_none());
}

#[test]
fn exact_length() {
    let rule = smart_form::rule().len(4);
    assert_eq!(check(json!("abc"), &rule).unwrap(), "x must be exactly 4 characters");
    assert!(check(json!("abcd"), &rule).is_none());
    assert!(check(json!(1234), &rule).is_none());
}

#[test]
fn length_counts_characters() {
    let rule = smart_form::rule().max(2.0);
    assert!(check(json!("中文"), &rule).is_none());
}

#[test]
fn numbers_are_stringified_for_length() {
    let rule = smart_form::rule().min(3.0);
    assert!(check(json!(12), &rule).is_some());
    assert!(check(json!(123), &rule).is_none());
}

// -----------------------------------------------------------------------
// Numeric checks
// -----------------------------------------------------------------------

#[test]
fn number_bounds() {
    let rule = smart_form::rule().kind(RuleType::Number).min(18.0).max(65.0);
    assert_eq!(check(json!(17), &rule).unwrap(), "x must not be less than 18");
    assert_eq!(check(json!("70"), &rule).unwrap(), "x must not be greater than 65");
    assert!(check(json!(30), &rule).is_none());
    assert!(check(json!(" 18 "), &rule).is_none());
}

#[test]
fn number_rules_ignore_length_semantics() {
    // "100" is 3 characters long, far below a length bound of 18.
    let rule = smart_form::rule().kind(RuleType::Number).min(18.0);
    assert!(check(json!(100), &rule).is_none());
}

#[test]
fn non_numeric_values_fail_number_rules() {
    let rule = smart_form::rule().kind(RuleType::Number);
    assert_eq!(check(json!("abc"), &rule).unwrap(), "x must be a number");
    assert_eq!(check(json!({"a": 1}), &rule).unwrap(), "x must be a number");
}

// -----------------------------------------------------------------------
// Patterns and types
// -----------------------------------------------------------------------

#[test]
fn pattern_check() {
    let rule = smart_form::rule().pattern(Regex::new(r"^\d+$").unwrap());
    assert_eq!(check(json!("12a"), &rule).unwrap(), "x has an invalid format");
    assert!(check(json!("123"), &rule).is_none());
    assert!(check(json!(123), &rule).is_none());
}

#[test]
fn email_and_url_types() {
    let email = smart_form::rule().kind(RuleType::Email);
    assert_eq!(check(json!("nope"), &email).unwrap(), "x must be a valid email address");
    assert!(check(json!("a@b.io"), &email).is_none());

    let url = smart_form::rule().kind(RuleType::Url);
    assert_eq!(check(json!("example.com"), &url).unwrap(), "x must be a valid URL");
    assert!(check(json!("http://example.com"), &url).is_none());
}

#[test]
fn rule_message_overrides_every_failure() {
    let rule = smart_form::rule().required().min(3.0).message("bad");
    assert_eq!(block_on(validate_rule(None, &rule, "x")).unwrap(), "bad");
    assert_eq!(check(json!("ab"), &rule).unwrap(), "bad");
}

#[test]
fn checks_run_in_fixed_order() {
    // Length is checked before pattern, pattern before type.
    let rule = smart_form::rule()
        .min(5.0)
        .pattern(Regex::new("^a").unwrap())
        .kind(RuleType::Email);
    assert_eq!(check(json!("b"), &rule).unwrap(), "x must be at least 5 characters");
    assert_eq!(check(json!("bbbbbb"), &rule).unwrap(), "x has an invalid format");
    assert_eq!(check(json!("abbbbb"), &rule).unwrap(), "x must be a valid email address");
}

// -----------------------------------------------------------------------
// Custom validators
// -----------------------------------------------------------------------

#[test]
fn custom_validator_verdicts() {
    let even = rules::custom(|v: &Value| v.as_i64().map_or(false, |n| n % 2 == 0));
    assert!(check(json!(4), &even).is_none());
    assert_eq!(check(json!(5), &even).unwrap(), "x failed validation");

    let named = rules::custom(|v: &Value| {
        if v == "admin" {
            Some("name is reserved")
        } else {
            None
        }
    });
    assert_eq!(check(json!("admin"), &named).unwrap(), "name is reserved");
    assert!(check(json!("ada"), &named).is_none());
}

#[test]
fn validator_errors_become_generic_failures() {
    let rule = smart_form::rule().validator(Validator::fallible(|_: &Value| {
        Err::<bool, ValidatorError>("backend down".into())
    }));
    assert_eq!(check(json!("a"), &rule).unwrap(), "x failed validation");

    let with_message = rule.clone().message("could not verify");
    assert_eq!(check(json!("a"), &with_message).unwrap(), "could not verify");
}

#[test]
fn async_validator_failures_reach_the_caller() {
    let rule = rules::custom_async(|value: Value| async move {
        if value == "taken" {
            Err::<bool, ValidatorError>("already registered".into())
        } else {
            Ok(true)
        }
    });
    assert_eq!(check(json!("taken"), &rule).unwrap(), "x failed validation");
    assert!(check(json!("free"), &rule).is_none());

    let message = rules::custom_async(|_: Value| async { Ok::<_, ValidatorError>("nope") });
    assert_eq!(check(json!("a"), &message).unwrap(), "nope");
}

#[test]
fn validator_not_called_when_an_earlier_check_fails() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let rule = smart_form::rule().min(3.0).validator(Validator::new(move |_: &Value| {
        counter.fetch_add(1, Ordering::SeqCst);
        true
    }));
    assert!(check(json!("ab"), &rule).is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(check(json!("abc"), &rule).is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn create_validator_messages() {
    let rule = rules::create_validator(|v: &Value| v != "x", Some("must not be x".into()));
    assert_eq!(check(json!("x"), &rule).unwrap(), "must not be x");

    let returns_text = rules::create_validator(
        |v: &Value| if v == "x" { "custom text" } else { "" },
        Some("unused".into()),
    );
    assert_eq!(check(json!("x"), &returns_text).unwrap(), "custom text");

    let unnamed = rules::create_validator(|v: &Value| v != "x", None);
    assert_eq!(check(json!("x"), &unnamed).unwrap(), "x failed validation");
}

// -----------------------------------------------------------------------
// Fields and forms
// -----------------------------------------------------------------------

#[test]
fn first_failing_rule_wins() {
    let rules = vec![rules::required(), rules::min_length(5), rules::email()];
    let msg = block_on(validate_field(Some(&json!("a@b")), &rules, "email"));
    assert_eq!(msg.unwrap(), "Must be at least 5 characters");

    let msg = block_on(validate_field(Some(&json!("abcdef")), &rules, "email"));
    assert_eq!(msg.unwrap(), "Please enter a valid email address");

    assert!(block_on(validate_field(Some(&json!("a@b.cd")), &rules, "email")).is_none());
    assert!(block_on(validate_field(None, &[], "email")).is_none());
}

#[test]
fn form_reports_required_field() {
    let fields = vec![smart_form::field("name", FieldType::Input).rule(rules::required())];
    let errors = block_on(validate_form(&data(json!({"name": ""})), &fields));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("name"), Some("This field is required"));

    let errors = block_on(validate_form(&data(json!({"name": "ok"})), &fields));
    assert!(errors.is_empty());
}

#[test]
fn form_resolves_dot_paths() {
    let fields = vec![
        smart_form::field("address.city", FieldType::Input).rule(rules::required()),
        smart_form::field("address.zip", FieldType::Input).rule(rules::max_length(5)),
    ];
    let input = data(json!({"address": {"city": "Paris", "zip": "750011"}}));
    let errors = block_on(validate_form(&input, &fields));
    assert!(!errors.contains("address.city"));
    assert_eq!(errors.get("address.zip"), Some("Must be at most 5 characters"));
}

#[test]
fn form_errors_follow_declaration_order() {
    let fields = vec![
        smart_form::field("b", FieldType::Input).rule(rules::required()),
        smart_form::field("a", FieldType::Input).rule(rules::required()),
        smart_form::field("c", FieldType::Input),
    ];
    let errors = block_on(validate_form(&FormData::new(), &fields));
    assert_eq!(errors.fields(), vec!["b", "a"]);
}

#[test]
fn form_validation_is_idempotent() {
    let fields = vec![
        smart_form::field("name", FieldType::Input).rule(rules::min_length(3)),
        smart_form::field("age", FieldType::Number).rule(rules::min(18.0)),
    ];
    let input = data(json!({"name": "al", "age": 10}));
    let first = block_on(validate_form(&input, &fields));
    let second = block_on(validate_form(&input, &fields));
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn fields_are_validated_sequentially() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let make = |name: &'static str| {
        let log = log.clone();
        smart_form::field(name, FieldType::Input).rule(rules::custom_async(move |_: Value| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(format!("start {}", name));
                futures::future::ready(()).await;
                log.lock().unwrap().push(format!("end {}", name));
                Ok::<_, ValidatorError>(true)
            }
        }))
    };
    let fields = vec![make("first"), make("second")];
    let input = data(json!({"first": "1", "second": "2"}));
    assert!(block_on(validate_form(&input, &fields)).is_empty());
    assert_eq!(
        *log.lock().unwrap(),
        vec!["start first", "end first", "start second", "end second"]
    );
}
