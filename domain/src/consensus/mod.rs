//! Consensus domain
//!
//! Everything that happens after the personas have answered: scoring each
//! answer, collecting the per-branch scores, and deciding the winner.
//!
//! ```text
//!  roster ──► branch 0 ─► generate ─┬─► count "tabs"   ─┐
//!         ├─► branch 1 ─► ...       └─► count "spaces" ─┤
//!         └─► branch N-1 ...                            ▼
//!                                   CollectReducer ─► Decision
//! ```

pub mod branch;
pub mod decision;
pub mod policy;
pub mod reducer;
pub mod result;
pub mod scoring;

// Re-export main types
pub use branch::{BranchOutcome, BranchResult};
pub use decision::Decision;
pub use policy::FailurePolicy;
pub use reducer::{CollectReducer, CollectedMetrics};
pub use result::ConsensusResult;
pub use scoring::count_word_occurrences;
