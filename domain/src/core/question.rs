//! Question value object

use super::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// A question to be answered by every persona in the roster (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, ConfigurationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ConfigurationError::EmptyQuestion);
        }
        Ok(Self { content })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = ConfigurationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl TryFrom<String> for Question {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}
