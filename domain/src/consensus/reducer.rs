//! Fan-in collection and the sum-based decision rule

use super::branch::{BranchOutcome, BranchResult};
use super::decision::Decision;
use serde::{Deserialize, Serialize};

/// Scores gathered from every completed branch.
///
/// Both lists hold exactly one entry per completed branch. Entries are kept
/// in roster order so fixtures are reproducible; the decision only looks at
/// the sums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedMetrics {
    pub tabs_counts: Vec<u64>,
    pub spaces_counts: Vec<u64>,
}

impl CollectedMetrics {
    pub fn sum_tabs(&self) -> u64 {
        self.tabs_counts.iter().sum()
    }

    pub fn sum_spaces(&self) -> u64 {
        self.spaces_counts.iter().sum()
    }

    /// Number of branches that contributed
    pub fn branches(&self) -> usize {
        self.tabs_counts.len()
    }

    pub fn decide(&self) -> Decision {
        Decision::from_sums(self.sum_tabs(), self.sum_spaces())
    }
}

/// Collects branch outcomes and reduces them to a [`Decision`].
///
/// # Example
///
/// ```
/// use simulacra_domain::{CollectReducer, Decision};
///
/// let (metrics, decision) = CollectReducer::collect_and_decide(&[]);
/// assert_eq!(metrics.branches(), 0);
/// assert_eq!(decision, Decision::Spaces);
/// ```
pub struct CollectReducer;

impl CollectReducer {
    /// Gather the scores of completed branches; failed branches are skipped
    pub fn collect(outcomes: &[BranchOutcome]) -> CollectedMetrics {
        let mut completed: Vec<&BranchResult> =
            outcomes.iter().filter_map(|o| o.as_completed()).collect();
        completed.sort_by_key(|r| r.persona_index);

        CollectedMetrics {
            tabs_counts: completed.iter().map(|r| r.tabs_count).collect(),
            spaces_counts: completed.iter().map(|r| r.spaces_count).collect(),
        }
    }

    pub fn collect_and_decide(outcomes: &[BranchOutcome]) -> (CollectedMetrics, Decision) {
        let metrics = Self::collect(outcomes);
        let decision = metrics.decide();
        (metrics, decision)
    }
}
