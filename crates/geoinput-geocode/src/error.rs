use geoinput_core::GeoInputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {body}")]
    Api {
        status: u16,
        body: serde_json::Value,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("missing API key")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, GeocodeError>;

impl From<GeocodeError> for GeoInputError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::Http(e) => GeoInputError::Network(e.to_string()),
            GeocodeError::Api { status, body } => GeoInputError::Api { status, body },
            GeocodeError::Parse(msg) => GeoInputError::Parse(msg),
            GeocodeError::InvalidUrl(msg) => GeoInputError::Config(format!("invalid base URL: {msg}")),
            GeocodeError::MissingApiKey => GeoInputError::Config("missing API key".to_string()),
        }
    }
}
