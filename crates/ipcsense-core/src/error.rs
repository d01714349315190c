//! Error types for ipcsense

/// Result type alias using ipcsense's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ipcsense operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifacts missing, unreadable, or inconsistent
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Override rule table errors
    #[error("policy error: {0}")]
    Policy(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new policy error
    pub fn policy(msg: impl Into<String>) -> Self {
        Self::Policy(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::artifact("model_config.json not found");
        assert_eq!(err.to_string(), "artifact error: model_config.json not found");

        let err = Error::policy("duplicate rule 'theft'");
        assert_eq!(err.to_string(), "policy error: duplicate rule 'theft'");
    }
}
