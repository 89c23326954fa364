use thiserror::Error;

/// All errors that can occur in geoinput-core.
#[derive(Debug, Error)]
pub enum GeoInputError {
    /// A request superseded by a newer one. Never shown to the user.
    #[error("request canceled")]
    Canceled,

    #[error("API error (HTTP {status}): {body}")]
    Api {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl GeoInputError {
    /// `true` for outcomes of superseded requests, which are dropped silently.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

/// Exit codes used by the CLI.
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
    ConfigError = 4,
    NetworkError = 6,
}

pub type Result<T> = std::result::Result<T, GeoInputError>;
