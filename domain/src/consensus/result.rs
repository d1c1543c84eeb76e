//! Complete result of a consensus run

use super::branch::BranchOutcome;
use super::decision::Decision;
use super::reducer::CollectedMetrics;
use serde::{Deserialize, Serialize};

/// Terminal record of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// The original question
    pub question: String,
    /// Roster labels, in roster order
    pub personas: Vec<String>,
    /// One outcome per persona, in roster order
    pub outcomes: Vec<BranchOutcome>,
    pub metrics: CollectedMetrics,
    pub decision: Decision,
}

impl ConsensusResult {
    pub fn new(
        question: impl Into<String>,
        personas: Vec<String>,
        outcomes: Vec<BranchOutcome>,
        metrics: CollectedMetrics,
        decision: Decision,
    ) -> Self {
        Self {
            question: question.into(),
            personas,
            outcomes,
            metrics,
            decision,
        }
    }

    pub fn completed_outcomes(&self) -> impl Iterator<Item = &BranchOutcome> {
        self.outcomes.iter().filter(|o| o.is_completed())
    }

    pub fn failed_outcomes(&self) -> impl Iterator<Item = &BranchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactHandle;
    use crate::consensus::branch::BranchResult;
    use crate::persona::Roster;

    #[test]
    fn test_json_shape() {
        let roster = Roster::new(["a", "b"]).unwrap();
        let outcomes = vec![
            BranchOutcome::Completed(BranchResult::new(
                0,
                roster.get(0).unwrap().clone(),
                ArtifactHandle::new("artifact-0"),
                2,
                1,
            )),
            BranchOutcome::failed(1, roster.get(1).unwrap().clone(), "timed out"),
        ];
        let metrics = CollectedMetrics {
            tabs_counts: vec![2],
            spaces_counts: vec![1],
        };
        let result =
            ConsensusResult::new("q", roster.labels(), outcomes, metrics, Decision::Tabs);

        assert_eq!(result.completed_outcomes().count(), 1);
        assert_eq!(result.failed_outcomes().count(), 1);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["decision"], "tabs");
        assert_eq!(json["outcomes"][0]["status"], "completed");
        assert_eq!(json["outcomes"][0]["tabs_count"], 2);
        assert_eq!(json["outcomes"][1]["status"], "failed");
        assert_eq!(json["outcomes"][1]["reason"], "timed out");
    }
}
