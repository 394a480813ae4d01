//! Config flow step results
//!
//! A config flow walks the user through a sequence of steps. Each step
//! produces one of three results: show a form, create the config entry,
//! or abort the flow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Generate a new flow id.
pub fn new_flow_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Result of a single config flow step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResult {
    /// Show a form for the given step and wait for user input.
    Form {
        step_id: String,
        /// Always present, empty if no schema
        data_schema: Vec<FormField>,
        /// Errors from the previous submission, keyed by field ("base" for
        /// flow-wide errors)
        errors: HashMap<String, String>,
    },
    /// The flow finished; create a config entry from the collected data.
    CreateEntry {
        title: String,
        data: HashMap<String, serde_json::Value>,
    },
    /// The flow cannot continue.
    Abort { reason: String },
}

impl FlowResult {
    /// Convenience constructor for a form with no errors.
    pub fn form(step_id: impl Into<String>, data_schema: Vec<FormField>) -> Self {
        FlowResult::Form {
            step_id: step_id.into(),
            data_schema,
            errors: HashMap::new(),
        }
    }

    /// Convenience constructor for an abort result.
    pub fn abort(reason: impl Into<String>) -> Self {
        FlowResult::Abort {
            reason: reason.into(),
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, FlowResult::Form { .. })
    }

    pub fn is_create_entry(&self) -> bool {
        matches!(self, FlowResult::CreateEntry { .. })
    }
}

/// A single field in a form schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl FormField {
    /// A required string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: "string".to_string(),
            required: Some(true),
            default: None,
        }
    }

    /// An optional string field.
    pub fn optional_string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: "string".to_string(),
            required: Some(false),
            default: None,
        }
    }
}
