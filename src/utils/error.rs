use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    #[error("Provider returned malformed output: {detail}")]
    ProviderMalformedOutput { detail: String },

    #[error("Insufficient words after filtering: got {got}, need at least {needed}")]
    InsufficientWords { got: usize, needed: usize },

    #[error("Placement exhausted: only {placed} of the required {needed} words fit the grid")]
    PlacementExhausted { placed: usize, needed: usize },

    #[error("Internal consistency violation: {message}")]
    InternalConsistency { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfig { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl From<reqwest::Error> for GenError {
    fn from(err: reqwest::Error) -> Self {
        GenError::ProviderUnavailable {
            reason: err.to_string(),
        }
    }
}

impl GenError {
    /// Transient provider-side failures worth another round-trip. Anything
    /// else points at our own code or configuration, where a retry would
    /// just repeat the same failure.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            GenError::ProviderUnavailable { .. }
                | GenError::ProviderMalformedOutput { .. }
                | GenError::InsufficientWords { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
