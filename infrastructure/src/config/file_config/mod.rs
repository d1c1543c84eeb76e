//! Raw TOML configuration data types
//!
//! These structs mirror the config file one section per module. They are
//! deserialized as-is; conversion into validated domain values happens in
//! the `to_*` methods so that every problem can be reported at once via
//! [`FileConfig::validate`].

mod artifacts;
mod execution;
mod prompt;
mod roster;
mod sampling;
mod vertex;

pub use artifacts::FileArtifactsConfig;
pub use execution::FileExecutionConfig;
pub use prompt::FilePromptConfig;
pub use roster::FileRosterConfig;
pub use sampling::FileSamplingConfig;
pub use vertex::{DEFAULT_ACCESS_TOKEN_ENV, FileVertexConfig};

use serde::{Deserialize, Serialize};
use simulacra_domain::ConfigurationError;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model and decoding parameters
    pub sampling: FileSamplingConfig,
    /// Persona labels
    pub roster: FileRosterConfig,
    /// Prompt template
    pub prompt: FilePromptConfig,
    /// Failure policy, timeout, retries
    pub execution: FileExecutionConfig,
    /// Project and credentials
    pub vertex: FileVertexConfig,
    /// Artifact storage
    pub artifacts: FileArtifactsConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected problems.
    ///
    /// Credentials are not checked here; they may still come from the
    /// command line.
    pub fn validate(&self) -> Vec<ConfigurationError> {
        let mut issues = Vec::new();

        issues.extend(self.sampling.to_sampling_config().err());
        issues.extend(self.roster.to_roster().err());
        issues.extend(self.prompt.to_template().err());
        issues.extend(self.execution.to_execution_params().err());

        if self.vertex.access_token_env.trim().is_empty() {
            issues.push(ConfigurationError::InvalidSetting {
                field: "vertex.access_token_env".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        issues
    }
}
