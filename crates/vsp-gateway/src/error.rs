use thiserror::Error;

/// Errors returned by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    HttpError(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

/// Errors raised while building a [`RequestConfig`](crate::RequestConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
