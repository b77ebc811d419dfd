use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::AppConfig;

use super::error::DataError;
use super::query::SelectQuery;

/// A row as returned by the datastore: one JSON object.
pub type Row = serde_json::Map<String, Value>;

/// Identity claims returned by the auth provider for a verified token.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Client handle for the hosted datastore and its auth endpoint.
///
/// Constructed once at startup and shared behind `Arc`; holds no mutable
/// state. Every request carries the configured timeout, so a hung upstream
/// call fails instead of hanging the API request.
#[derive(Debug)]
pub struct DataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DataClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        let base_url = base_url.into();
        let api_key = api_key.into();
        if base_url.trim().is_empty() {
            return Err(DataError::ConfigMissing("DATASTORE_URL"));
        }
        if api_key.trim().is_empty() {
            return Err(DataError::ConfigMissing("DATASTORE_API_KEY"));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DataError> {
        Self::new(
            config.datastore.url.clone(),
            config.datastore.api_key.clone(),
            Duration::from_secs(config.datastore.request_timeout_secs),
        )
    }

    /// Run a read query and return all matching rows.
    pub async fn fetch(&self, query: SelectQuery) -> Result<Vec<Row>, DataError> {
        let url = format!("{}/rest/v1/{}", self.base_url, query.table_name());
        let response = self
            .http
            .get(&url)
            .query(&query.into_params())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Service {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| DataError::Decode(e.to_string()))
    }

    /// Run a read query expecting at most one row.
    pub async fn fetch_optional(&self, query: SelectQuery) -> Result<Option<Row>, DataError> {
        let mut rows = self.fetch(query.limit(1)).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    /// Insert-or-update one record, keyed on `conflict_key`.
    pub async fn upsert(
        &self,
        table: &str,
        record: Value,
        conflict_key: &str,
    ) -> Result<(), DataError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let response = self
            .http
            .post(&url)
            .query(&[("on_conflict", conflict_key)])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Service {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Verify a caller's bearer token against the auth endpoint.
    ///
    /// `Ok(None)` means the provider rejected the token (invalid, expired,
    /// or unknown user); `Err` means the verification itself failed.
    pub async fn verify_token(&self, token: &str) -> Result<Option<VerifiedUser>, DataError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let user = response
                .json::<VerifiedUser>()
                .await
                .map_err(|e| DataError::Decode(e.to_string()))?;
            return Ok(Some(user));
        }

        match status.as_u16() {
            // the provider rejected the token or knows no such user
            401 | 403 | 404 => Ok(None),
            _ => Err(DataError::Service {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
