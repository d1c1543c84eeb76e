//! Execution configuration from TOML (`[execution]` section)

use serde::{Deserialize, Serialize};
use simulacra_application::ExecutionParams;
use simulacra_domain::{ConfigurationError, FailurePolicy};
use std::time::Duration;

/// Raw execution configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// `best-effort` or `all-or-nothing`
    pub failure_policy: String,
    /// Per-attempt generation timeout; 0 disables it
    pub timeout_secs: u64,
    /// Generation attempts per branch (at least 1)
    pub attempts: u32,
    pub allow_empty_responses: bool,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default().as_str().to_string(),
            timeout_secs: 60,
            attempts: 1,
            allow_empty_responses: false,
        }
    }
}

impl FileExecutionConfig {
    pub fn parse_failure_policy(&self) -> Result<FailurePolicy, ConfigurationError> {
        self.failure_policy
            .parse()
            .map_err(|reason| ConfigurationError::InvalidSetting {
                field: "execution.failure_policy".to_string(),
                reason,
            })
    }

    pub fn to_execution_params(&self) -> Result<ExecutionParams, ConfigurationError> {
        if self.attempts == 0 {
            return Err(ConfigurationError::InvalidSetting {
                field: "execution.attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));

        Ok(ExecutionParams::default()
            .with_failure_policy(self.parse_failure_policy()?)
            .with_generation_timeout(timeout)
            .with_generation_attempts(self.attempts)
            .with_empty_responses_allowed(self.allow_empty_responses))
    }
}
