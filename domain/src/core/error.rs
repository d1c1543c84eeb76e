//! Domain error types

use thiserror::Error;

/// Errors detected while constructing the consensus graph.
///
/// All of these are fatal: a run that hits one never starts a branch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Roster must contain at least one persona")]
    EmptyRoster,

    #[error("Persona at index {index} is blank")]
    BlankPersona { index: usize },

    #[error("Invalid prompt template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid sampling config: {field} {reason}")]
    InvalidSampling { field: &'static str, reason: String },

    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: String, reason: String },
}

impl ConfigurationError {
    pub(crate) fn sampling(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidSampling {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn template(reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidTemplate(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster_display() {
        assert_eq!(
            ConfigurationError::EmptyRoster.to_string(),
            "Roster must contain at least one persona"
        );
    }

    #[test]
    fn test_sampling_error_display() {
        let err = ConfigurationError::sampling("temperature", "must be within [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "Invalid sampling config: temperature must be within [0, 1], got 1.5"
        );
    }
}
