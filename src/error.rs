use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Errors raised while loading form definitions or form data.
///
/// Validation failures are never reported through this type; they surface as
/// messages in an [`ErrorMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// Input could not be parsed as JSON.
    InvalidJson(String),
    /// Input file could not be read.
    Io(String),
    /// JSON input parsed, but did not have the expected shape.
    InvalidConfig(String),
    /// Form data must be a JSON object.
    NotAnObject { received: String },
    /// A field name is not a valid dot-path.
    InvalidFieldName(String),
    /// Two fields share the same name.
    DuplicateField(String),
    /// A rule's `pattern` failed to compile.
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
    /// A rule referenced an unknown built-in pattern.
    UnknownPreset { field: String, preset: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidJson(e) => write!(f, "Invalid JSON: {}", e),
            FormError::Io(e) => write!(f, "Failed to read file: {}", e),
            FormError::InvalidConfig(e) => write!(f, "Invalid form configuration: {}", e),
            FormError::NotAnObject { received } => {
                write!(f, "Form data must be an object, received {}", received)
            }
            FormError::InvalidFieldName(name) => write!(f, "Invalid field name \"{}\"", name),
            FormError::DuplicateField(name) => write!(f, "Duplicate field \"{}\"", name),
            FormError::InvalidPattern {
                field,
                pattern,
                reason,
            } => write!(
                f,
                "Invalid pattern /{}/ on field \"{}\": {}",
                pattern, field, reason
            ),
            FormError::UnknownPreset { field, preset } => {
                write!(f, "Unknown pattern preset \"{}\" on field \"{}\"", preset, field)
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Returns the JSON type name for a value.
#[doc(hidden)]
pub fn value_type_name(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
    .to_string()
}

/// Result of a validation pass: field name → first failing message.
///
/// Only one message is kept per field. Entries keep the order in which the
/// fields were validated, which is the declaration order of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(String, String)>,
}

impl ErrorMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Set the message for a field, replacing any previous one in place.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, msg)| msg.as_str())
    }

    /// Whether the field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Remove a field's message, returning it.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(name, _)| name == field)?;
        Some(self.entries.remove(idx).1)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no field failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first failing field in validation order.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.entries
            .first()
            .map(|(name, msg)| (name.as_str(), msg.as_str()))
    }

    /// Iterate `(field, message)` pairs in validation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, msg)| (name.as_str(), msg.as_str()))
    }

    /// Names of all failing fields.
    pub fn fields(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ErrorMap::new();
        for (field, message) in iter {
            map.insert(field, message);
        }
        map
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}
