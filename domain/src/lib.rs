//! Domain layer for simulacra-consensus
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Simulacra
//!
//! A single question is put to a [`Roster`] of personas. Each persona answers
//! independently (one *branch* per roster entry), and every answer is scored
//! by counting whole-word occurrences of `tabs` and `spaces`.
//!
//! ## Consensus
//!
//! The [`CollectReducer`] gathers the per-branch counts into
//! [`CollectedMetrics`] and decides the winner by comparing sums:
//! `tabs` wins only on a strict majority, everything else is `spaces`.

pub mod artifact;
pub mod consensus;
pub mod core;
pub mod persona;
pub mod prompt;
pub mod sampling;

// Re-export commonly used types
pub use artifact::ArtifactHandle;
pub use consensus::{
    BranchOutcome, BranchResult, CollectReducer, CollectedMetrics, ConsensusResult, Decision,
    FailurePolicy, count_word_occurrences,
};
pub use core::{error::ConfigurationError, question::Question};
pub use persona::{Persona, Roster};
pub use prompt::PromptTemplate;
pub use sampling::{SamplingConfig, SamplingConfigBuilder};
