//! Config flow for the Vivint integration
//!
//! A linear wizard: show the credentials form, validate them against the
//! cloud service, then create the entry. Only one account instance is
//! allowed.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use ha_integration::flow::new_flow_id;
use ha_integration::{ConfigEntry, FlowResult, FormField};

/// Errors the cloud client can raise while validating credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CloudError {
    #[error("cannot connect to the cloud service")]
    CannotConnect,
    #[error("invalid authentication")]
    InvalidAuth,
}

/// Session with the Vivint Sky cloud service, provided by the API client.
///
/// The service pushes events over channel subscriptions once connected;
/// the flow only needs the initial credential check.
#[async_trait]
pub trait CloudSession: Send + Sync {
    async fn connect(&self, username: &str, password: &str) -> Result<(), CloudError>;
}

/// Handle a config flow for Vivint.
pub struct VivintConfigFlow<'a> {
    flow_id: String,
    session: &'a dyn CloudSession,
    current_entries: &'a [ConfigEntry],
}

impl<'a> VivintConfigFlow<'a> {
    pub fn new(session: &'a dyn CloudSession, current_entries: &'a [ConfigEntry]) -> Self {
        Self {
            flow_id: new_flow_id(),
            session,
            current_entries,
        }
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Show the setup form to the user.
    fn show_setup_form(&self, errors: HashMap<String, String>) -> FlowResult {
        FlowResult::Form {
            step_id: "user".to_string(),
            data_schema: vec![
                FormField::optional_string("username"),
                FormField::optional_string("password"),
            ],
            errors,
        }
    }

    /// Handle the initial step.
    pub async fn step_user(&self, user_input: Option<&HashMap<String, Value>>) -> FlowResult {
        if !self.current_entries.is_empty() {
            return FlowResult::abort("single_instance_allowed");
        }

        let Some(input) = user_input else {
            return self.show_setup_form(HashMap::new());
        };

        let username = input
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let password = input
            .get("password")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if let Err(err) = self.session.connect(username, password).await {
            debug!("Cloud login failed: {err}");
            let errors = HashMap::from([("base".to_string(), "connection_error".to_string())]);
            return self.show_setup_form(errors);
        }

        FlowResult::CreateEntry {
            title: "Vivint".to_string(),
            data: HashMap::from([
                ("username".to_string(), Value::from(username)),
                ("password".to_string(), Value::from(password)),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSession {
        result: Result<(), CloudError>,
    }

    #[async_trait]
    impl CloudSession for StaticSession {
        async fn connect(&self, _username: &str, _password: &str) -> Result<(), CloudError> {
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_no_input_shows_form() {
        let session = StaticSession { result: Ok(()) };
        let flow = VivintConfigFlow::new(&session, &[]);

        let result = flow.step_user(None).await;
        assert!(result.is_form());
        assert!(!flow.flow_id().is_empty());
    }

    #[tokio::test]
    async fn test_second_instance_aborts() {
        let session = StaticSession { result: Ok(()) };
        let existing = [ConfigEntry::new(crate::DOMAIN, "Vivint")];
        let flow = VivintConfigFlow::new(&session, &existing);

        let result = flow.step_user(None).await;
        let FlowResult::Abort { reason } = result else {
            panic!("expected abort");
        };
        assert_eq!(reason, "single_instance_allowed");
    }
}
