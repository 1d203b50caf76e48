use serde_json::Value;

use crate::error::{value_type_name, FormError};
use crate::value::FormData;

/// Sources that form configuration and form data can be loaded from.
///
/// Implemented for JSON strings (`&str`, `String`), raw bytes (`&[u8]`),
/// file paths (`Path`, `PathBuf`) and `serde_json::Value`.
pub trait FormInput {
    /// Convert this input into a `serde_json::Value`.
    fn to_json_value(&self) -> Result<Value, FormError>;

    /// Parse the input as form data. The top level must be a JSON object.
    fn to_form_data(&self) -> Result<FormData, FormError> {
        match self.to_json_value()? {
            Value::Object(map) => Ok(map),
            other => Err(FormError::NotAnObject {
                received: value_type_name(&other),
            }),
        }
    }
}

impl FormInput for Value {
    fn to_json_value(&self) -> Result<Value, FormError> {
        Ok(self.clone())
    }
}

impl FormInput for str {
    fn to_json_value(&self) -> Result<Value, FormError> {
        serde_json::from_str(self).map_err(|e| FormError::InvalidJson(e.to_string()))
    }
}

impl FormInput for String {
    fn to_json_value(&self) -> Result<Value, FormError> {
        self.as_str().to_json_value()
    }
}

impl FormInput for [u8] {
    fn to_json_value(&self) -> Result<Value, FormError> {
        serde_json::from_slice(self).map_err(|e| FormError::InvalidJson(e.to_string()))
    }
}

impl FormInput for std::path::Path {
    fn to_json_value(&self) -> Result<Value, FormError> {
        let content = std::fs::read_to_string(self).map_err(|e| FormError::Io(e.to_string()))?;
        content.as_str().to_json_value()
    }
}

impl FormInput for std::path::PathBuf {
    fn to_json_value(&self) -> Result<Value, FormError> {
        self.as_path().to_json_value()
    }
}
