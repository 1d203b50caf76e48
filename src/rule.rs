use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error type custom validators may fail with.
pub type ValidatorError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by a [`Validator`].
pub type ValidatorFuture = BoxFuture<'static, Result<Verdict, ValidatorError>>;

/// Declared value type of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// The value must coerce to a number; `min`/`max` become numeric bounds.
    Number,
    Email,
    Url,
}

/// Outcome of a custom validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    /// Failed; the rule's message (or the generic one) is reported.
    Invalid,
    /// Failed with this message, unless the rule carries its own.
    Message(String),
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

impl From<()> for Verdict {
    fn from(_: ()) -> Self {
        Verdict::Valid
    }
}

impl From<String> for Verdict {
    fn from(msg: String) -> Self {
        Verdict::Message(msg)
    }
}

impl From<&str> for Verdict {
    fn from(msg: &str) -> Self {
        Verdict::Message(msg.to_string())
    }
}

impl<V: Into<Verdict>> From<Option<V>> for Verdict {
    fn from(opt: Option<V>) -> Self {
        opt.map(Into::into).unwrap_or(Verdict::Valid)
    }
}

/// A custom check attached to a [`Rule`].
///
/// Construction never calls the function; it runs only when the rule is
/// evaluated against a non-blank value.
#[derive(Clone)]
pub struct Validator {
    check: Arc<dyn Fn(&Value) -> ValidatorFuture + Send + Sync>,
}

impl Validator {
    /// Wrap an infallible synchronous check.
    ///
    /// # Example
    /// ```
    /// use smart_form::rule::Validator;
    ///
    /// let even = Validator::new(|v: &serde_json::Value| v.as_i64().map_or(false, |n| n % 2 == 0));
    /// ```
    pub fn new<F, V>(check: F) -> Self
    where
        F: Fn(&Value) -> V + Send + Sync + 'static,
        V: Into<Verdict> + 'static,
    {
        Self::fallible(move |value| Ok::<V, ValidatorError>(check(value)))
    }

    /// Wrap a synchronous check that may fail with an error.
    ///
    /// An `Err` counts as a failed validation; the error text itself is not
    /// surfaced.
    pub fn fallible<F, V>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<V, ValidatorError> + Send + Sync + 'static,
        V: Into<Verdict> + 'static,
    {
        Self {
            check: Arc::new(move |value: &Value| {
                let result: Result<Verdict, ValidatorError> = check(value).map(Into::into);
                future::ready(result).boxed()
            }),
        }
    }

    /// Wrap an asynchronous check. The value is cloned into the future.
    pub fn from_async<F, Fut, V>(check: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, ValidatorError>> + Send + 'static,
        V: Into<Verdict> + 'static,
    {
        Self {
            check: Arc::new(move |value: &Value| {
                let pending = check(value.clone());
                async move {
                    let result: Result<Verdict, ValidatorError> = pending.await.map(Into::into);
                    result
                }
                .boxed()
            }),
        }
    }

    /// Run the check.
    pub fn call(&self, value: &Value) -> ValidatorFuture {
        (self.check)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// A single validation constraint.
///
/// All constraints are optional; evaluation checks them in a fixed order and
/// reports the first one that fails:
///
/// 1. `required` against blank values (absent, `null`, `""`);
///    blank values pass every other check
/// 2. `len`, exact length of the stringified value
/// 3. `min` / `max` as length bounds, or as numeric bounds when
///    `kind` is [`RuleType::Number`] (non-numeric values fail first)
/// 4. `pattern`
/// 5. built-in email / URL format for those kinds
/// 6. the custom `validator`
///
/// # Example
/// ```
/// use smart_form::rule::{Rule, RuleType};
///
/// let age = Rule::new().kind(RuleType::Number).min(18.0).message("Adults only");
/// assert!(!age.required);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub len: Option<usize>,
    pub pattern: Option<Regex>,
    pub kind: Option<RuleType>,
    pub validator: Option<Validator>,
    /// Replaces every message this rule would otherwise produce.
    pub message: Option<String>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    pub fn pattern(mut self, re: Regex) -> Self {
        self.pattern = Some(re);
        self
    }

    pub fn kind(mut self, kind: RuleType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Whether `min`/`max` are numeric bounds rather than length bounds.
    pub fn is_numeric(&self) -> bool {
        self.kind == Some(RuleType::Number)
    }
}
