/// Shared error type used across all Sitewrench crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    /// The management store could not be reached, or could not produce the
    /// requested class instance.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A builder input violated its declared range. Raised before any store
    /// interaction takes place.
    #[error("{field}: value {value} out of range ({expected})")]
    Validation {
        field: &'static str,
        value: i64,
        expected: &'static str,
    },

    #[error("parse: {0}")]
    Parse(String),

    #[error("format: {0}")]
    Format(String),

    #[error("config: {0}")]
    Config(String),

    #[error("auth: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, Error>;
