//! Tests for the Vivint config flow
//!
//! Walks the wizard through its abort, error, and create-entry outcomes
//! against a mock cloud session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use ha_integration::{ConfigEntry, FlowResult};
use ha_vivint::{CloudError, CloudSession, VivintConfigFlow};

/// Mock session recording connect attempts.
struct MockSession {
    result: Result<(), CloudError>,
    attempts: AtomicUsize,
}

impl MockSession {
    fn new(result: Result<(), CloudError>) -> Self {
        Self {
            result,
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CloudSession for MockSession {
    async fn connect(&self, _username: &str, _password: &str) -> Result<(), CloudError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

fn credentials() -> HashMap<String, Value> {
    HashMap::from([
        ("username".to_string(), json!("user@example.com")),
        ("password".to_string(), json!("hunter2")),
    ])
}

#[tokio::test]
async fn test_full_flow_creates_entry() {
    let session = MockSession::new(Ok(()));
    let flow = VivintConfigFlow::new(&session, &[]);

    // First step shows the credentials form without touching the cloud
    let result = flow.step_user(None).await;
    let FlowResult::Form {
        step_id,
        data_schema,
        errors,
    } = result
    else {
        panic!("expected form");
    };
    assert_eq!(step_id, "user");
    assert!(errors.is_empty());
    let fields: Vec<_> = data_schema.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(fields, ["username", "password"]);
    assert_eq!(session.attempts.load(Ordering::SeqCst), 0);

    // Submitting valid credentials creates the entry
    let input = credentials();
    let result = flow.step_user(Some(&input)).await;
    let FlowResult::CreateEntry { title, data } = result else {
        panic!("expected create_entry");
    };
    assert_eq!(title, "Vivint");
    assert_eq!(data.get("username"), Some(&json!("user@example.com")));
    assert_eq!(data.get("password"), Some(&json!("hunter2")));
    assert_eq!(session.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_connection_error_reshows_form() {
    let session = MockSession::new(Err(CloudError::CannotConnect));
    let flow = VivintConfigFlow::new(&session, &[]);

    let input = credentials();
    let result = flow.step_user(Some(&input)).await;
    let FlowResult::Form { errors, .. } = result else {
        panic!("expected form");
    };
    assert_eq!(errors.get("base"), Some(&"connection_error".to_string()));
}

#[tokio::test]
async fn test_bad_credentials_reshow_form() {
    let session = MockSession::new(Err(CloudError::InvalidAuth));
    let flow = VivintConfigFlow::new(&session, &[]);

    let input = credentials();
    let result = flow.step_user(Some(&input)).await;
    let FlowResult::Form { errors, .. } = result else {
        panic!("expected form");
    };
    assert_eq!(errors.get("base"), Some(&"connection_error".to_string()));
}

#[tokio::test]
async fn test_single_instance_aborts_before_validation() {
    let session = MockSession::new(Ok(()));
    let existing = [ConfigEntry::new("vivint", "Vivint")];
    let flow = VivintConfigFlow::new(&session, &existing);

    let input = credentials();
    let result = flow.step_user(Some(&input)).await;
    let FlowResult::Abort { reason } = result else {
        panic!("expected abort");
    };
    assert_eq!(reason, "single_instance_allowed");
    assert_eq!(session.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_fields_default_to_empty() {
    let session = MockSession::new(Ok(()));
    let flow = VivintConfigFlow::new(&session, &[]);

    // Optional fields may be absent; the flow still validates with empties
    let input = HashMap::new();
    let result = flow.step_user(Some(&input)).await;
    let FlowResult::CreateEntry { data, .. } = result else {
        panic!("expected create_entry");
    };
    assert_eq!(data.get("username"), Some(&json!("")));
}
