use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub datastore: DatastoreConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Connection settings for the hosted datastore / auth provider.
/// `url` and `api_key` have no defaults; the client refuses to start
/// without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreConfig {
    pub url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Datastore overrides
        if let Ok(v) = env::var("DATASTORE_URL") {
            self.datastore.url = v;
        }
        if let Ok(v) = env::var("DATASTORE_API_KEY") {
            self.datastore.api_key = v;
        }
        if let Ok(v) = env::var("DATASTORE_REQUEST_TIMEOUT_SECS") {
            self.datastore.request_timeout_secs =
                v.parse().unwrap_or(self.datastore.request_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            datastore: DatastoreConfig {
                url: String::new(),
                api_key: String::new(),
                request_timeout_secs: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            datastore: DatastoreConfig {
                url: String::new(),
                api_key: String::new(),
                request_timeout_secs: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            datastore: DatastoreConfig {
                url: String::new(),
                api_key: String::new(),
                request_timeout_secs: 10,
            },
            api: ApiConfig {
                enable_request_logging: false,
                enable_cors: true,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.datastore.request_timeout_secs, 30);
        assert!(config.api.enable_request_logging);
        assert!(config.datastore.url.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.datastore.request_timeout_secs, 10);
        assert!(!config.api.enable_request_logging);
    }
}
