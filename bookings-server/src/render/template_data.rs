//! Data bag handed from handlers to templates

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::forms::Form;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    pub string_map: HashMap<String, String>,
    pub int_map: HashMap<String, i64>,
    pub data: HashMap<String, Value>,
    pub form: Form,
    pub flash: String,
    pub warning: String,
    pub error: String,
    pub is_authenticated: bool,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }

    pub fn with_string(mut self, key: &str, value: impl Into<String>) -> Self {
        self.string_map.insert(key.to_string(), value.into());
        self
    }

    pub fn with_int(mut self, key: &str, value: i64) -> Self {
        self.int_map.insert(key.to_string(), value);
        self
    }

    /// Attach any serializable value under `data.<key>`
    pub fn with_data(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::error!(key, error = %e, "Template data not serializable");
            Value::Null
        });
        self.data.insert(key.to_string(), value);
        self
    }
}
