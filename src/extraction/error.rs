use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CreateExtractorError {
    /// The pattern does not compile, or is too large once compiled
    #[error("Invalid {field} pattern: {pattern}")]
    InvalidPattern { field: &'static str, pattern: String },

    #[error("The {field} pattern {pattern} matches an empty string")]
    MatchesEmptyString { field: &'static str, pattern: String },

    #[error("Invalid extraction config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CreateExtractorError {
    fn from(err: serde_json::Error) -> Self {
        CreateExtractorError::InvalidConfig(err.to_string())
    }
}
