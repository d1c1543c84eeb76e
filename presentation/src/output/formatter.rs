//! Output formatter trait

use simulacra_domain::ConsensusResult;

/// Trait for formatting consensus results
pub trait OutputFormatter {
    /// Only the decision word
    fn format_decision(&self, result: &ConsensusResult) -> String;

    /// Per-persona report with totals
    fn format_full(&self, result: &ConsensusResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &ConsensusResult) -> String;
}
