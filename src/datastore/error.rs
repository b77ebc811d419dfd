use thiserror::Error;

/// Errors from the remote datastore client
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Data service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Data service returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Unexpected data service response: {0}")]
    Decode(String),
}
