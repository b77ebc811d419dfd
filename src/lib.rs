use std::sync::Arc;

pub mod api;
pub mod config;
pub mod datastore;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

#[cfg(test)]
pub mod testing;

use datastore::DataClient;
use services::PreferenceService;

/// Shared application state. The datastore handle is constructed once at
/// startup and cloned into every handler and middleware via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DataClient>,
    pub prefs: PreferenceService,
}

impl AppState {
    pub fn new(data: DataClient) -> Self {
        let data = Arc::new(data);
        Self {
            prefs: PreferenceService::new(data.clone()),
            data,
        }
    }
}
