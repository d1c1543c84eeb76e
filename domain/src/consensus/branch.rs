//! Per-branch results

use crate::artifact::ArtifactHandle;
use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// Scores produced by one completed branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchResult {
    /// Position of the persona in the roster (0-based)
    pub persona_index: usize,
    pub persona: Persona,
    /// Where the generated answer was stored
    pub artifact: ArtifactHandle,
    pub tabs_count: u64,
    pub spaces_count: u64,
}

impl BranchResult {
    pub fn new(
        persona_index: usize,
        persona: Persona,
        artifact: ArtifactHandle,
        tabs_count: u64,
        spaces_count: u64,
    ) -> Self {
        Self {
            persona_index,
            persona,
            artifact,
            tabs_count,
            spaces_count,
        }
    }
}

/// What happened to one branch of the fan-out.
///
/// A run produces exactly one outcome per roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BranchOutcome {
    Completed(BranchResult),
    Failed {
        persona_index: usize,
        persona: Persona,
        reason: String,
        /// Stopped because a sibling failed, not because of its own error
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        cancelled: bool,
    },
}

impl BranchOutcome {
    pub fn failed(persona_index: usize, persona: Persona, reason: impl Into<String>) -> Self {
        BranchOutcome::Failed {
            persona_index,
            persona,
            reason: reason.into(),
            cancelled: false,
        }
    }

    /// A branch stopped before finishing because the run was aborted
    pub fn cancelled(persona_index: usize, persona: Persona) -> Self {
        BranchOutcome::Failed {
            persona_index,
            persona,
            reason: "cancelled".to_string(),
            cancelled: true,
        }
    }

    pub fn persona_index(&self) -> usize {
        match self {
            BranchOutcome::Completed(result) => result.persona_index,
            BranchOutcome::Failed { persona_index, .. } => *persona_index,
        }
    }

    pub fn persona(&self) -> &Persona {
        match self {
            BranchOutcome::Completed(result) => &result.persona,
            BranchOutcome::Failed { persona, .. } => persona,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, BranchOutcome::Completed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, BranchOutcome::Failed { cancelled: true, .. })
    }

    pub fn as_completed(&self) -> Option<&BranchResult> {
        match self {
            BranchOutcome::Completed(result) => Some(result),
            BranchOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            BranchOutcome::Completed(_) => None,
            BranchOutcome::Failed { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::Roster;

    fn persona(label: &str) -> Persona {
        Roster::new([label]).unwrap().get(0).unwrap().clone()
    }

    #[test]
    fn test_cancellation_is_not_inferred_from_reason_text() {
        let genuine = BranchOutcome::failed(0, persona("a"), "cancelled");
        assert!(!genuine.is_cancelled());

        let stopped = BranchOutcome::cancelled(1, persona("b"));
        assert!(stopped.is_cancelled());
        assert!(!stopped.is_completed());
        assert_eq!(stopped.failure_reason(), Some("cancelled"));
    }

    #[test]
    fn test_cancelled_flag_serialization() {
        let genuine = serde_json::to_value(BranchOutcome::failed(0, persona("a"), "boom")).unwrap();
        assert_eq!(genuine["status"], "failed");
        assert!(genuine.get("cancelled").is_none());

        let stopped = serde_json::to_value(BranchOutcome::cancelled(1, persona("b"))).unwrap();
        assert_eq!(stopped["cancelled"], true);

        let parsed: BranchOutcome = serde_json::from_value(genuine).unwrap();
        assert!(!parsed.is_cancelled());
    }
}
