//! Shared fixtures for in-crate unit tests.

use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::datastore::DataClient;
use crate::middleware::AuthUser;
use crate::AppState;

/// App state whose datastore points at an unroutable local address: any
/// remote call fails fast, so tests can tell "rejected before the call"
/// from "failed during the call".
pub fn test_state() -> AppState {
    let client = DataClient::new("http://127.0.0.1:9", "test-key", Duration::from_secs(2))
        .expect("test client");
    AppState::new(client)
}

pub fn test_user(role: &str) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: Some("user@example.com".to_string()),
        role: role.to_string(),
        metadata: Value::Null,
        created_at: None,
    }
}
