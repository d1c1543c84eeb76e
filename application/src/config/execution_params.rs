//! Execution parameters for the fan-out
//!
//! [`ExecutionParams`] groups the static parameters that control how the
//! [`FanOutRunner`](crate::use_cases::fan_out::FanOutRunner) runs each branch.
//! They tune how a branch runs, never how many branches run.

use serde::{Deserialize, Serialize};
use simulacra_domain::FailurePolicy;
use std::time::Duration;

/// Branch execution parameters.
///
/// None of these change the fan-out degree: the roster alone decides how
/// many branches run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// What a failed branch means for the run.
    pub failure_policy: FailurePolicy,
    /// Upper bound for a single generation call. `None` waits forever.
    pub generation_timeout: Option<Duration>,
    /// Total generation attempts per branch (1 = no retry).
    pub generation_attempts: u32,
    /// Accept an empty completion as a valid answer.
    pub allow_empty_responses: bool,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::BestEffort,
            generation_timeout: Some(Duration::from_secs(60)),
            generation_attempts: 1,
            allow_empty_responses: false,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Set total attempts per branch; values below 1 are raised to 1
    pub fn with_generation_attempts(mut self, attempts: u32) -> Self {
        self.generation_attempts = attempts.max(1);
        self
    }

    pub fn with_empty_responses_allowed(mut self, allowed: bool) -> Self {
        self.allow_empty_responses = allowed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ExecutionParams::default();
        assert_eq!(params.failure_policy, FailurePolicy::BestEffort);
        assert_eq!(params.generation_timeout, Some(Duration::from_secs(60)));
        assert_eq!(params.generation_attempts, 1);
        assert!(!params.allow_empty_responses);
    }

    #[test]
    fn test_attempts_floor() {
        let params = ExecutionParams::default().with_generation_attempts(0);
        assert_eq!(params.generation_attempts, 1);
    }

    #[test]
    fn test_builder_chain() {
        let params = ExecutionParams::default()
            .with_failure_policy(FailurePolicy::AllOrNothing)
            .with_generation_timeout(None)
            .with_generation_attempts(3);
        assert!(params.failure_policy.aborts_on_failure());
        assert!(params.generation_timeout.is_none());
        assert_eq!(params.generation_attempts, 3);
    }
}
