//! Branch failure policy

use serde::{Deserialize, Serialize};

/// What a failed branch means for the whole run.
///
/// - `BestEffort` (default): the failed branch contributes nothing and the
///   run decides from the branches that completed. With no completed
///   branches both sums are zero and the decision is `spaces`.
/// - `AllOrNothing`: the first failure cancels the remaining branches and the
///   run reports an error instead of a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    #[default]
    BestEffort,
    AllOrNothing,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::BestEffort => "best-effort",
            FailurePolicy::AllOrNothing => "all-or-nothing",
        }
    }

    /// Whether a single branch failure should stop the run
    pub fn aborts_on_failure(&self) -> bool {
        matches!(self, FailurePolicy::AllOrNothing)
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "best-effort" => Ok(FailurePolicy::BestEffort),
            "all-or-nothing" => Ok(FailurePolicy::AllOrNothing),
            _ => Err(format!(
                "Unknown failure policy: {}. Valid: best-effort, all-or-nothing",
                s
            )),
        }
    }
}
