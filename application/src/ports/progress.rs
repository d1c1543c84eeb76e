//! Progress notification port
//!
//! Defines the interface for reporting progress during a consensus run.

use simulacra_domain::{CollectedMetrics, Decision, Persona};

/// Callback for progress updates during a consensus run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain text, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called once before any branch is spawned
    fn on_fan_out_start(&self, total_branches: usize);

    /// Called as each branch finishes, in completion order
    fn on_branch_complete(&self, persona_index: usize, persona: &Persona, success: bool);

    /// Called after the fan-in barrier
    fn on_fan_out_complete(&self, completed: usize, failed: usize);

    /// Called once the reducer has decided
    fn on_decision(&self, _metrics: &CollectedMetrics, _decision: Decision) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_fan_out_start(&self, _total_branches: usize) {}
    fn on_branch_complete(&self, _persona_index: usize, _persona: &Persona, _success: bool) {}
    fn on_fan_out_complete(&self, _completed: usize, _failed: usize) {}
}
