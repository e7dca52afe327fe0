//! Error types shared by metadata sources, the generator and the docs endpoint.

use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a generation pass.
///
/// Malformed route templates are never reported here: they compose to a
/// best-effort string instead.
#[derive(Debug, Error)]
pub enum Error {
    /// No discoverable metadata source: nothing to scan, nothing parseable,
    /// or an unreadable manifest.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Whether this error means no metadata source could be supplied.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = Error::configuration("no Rust files found in ./api");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "configuration error: no Rust files found in ./api"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<String>("not json").unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
        assert!(!err.is_configuration());
    }
}
