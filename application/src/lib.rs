//! Application layer for simulacra-consensus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    artifact_store::{ArtifactStore, StoreError},
    progress::{NoProgress, ProgressNotifier},
    text_generator::{GeneratorError, TextGenerator},
};
pub use use_cases::count_occurrences::{ArtifactReadFailure, WordOccurrenceScorer};
pub use use_cases::fan_out::{BranchError, FanOutRunner};
pub use use_cases::generate_response::{GenerationFailure, GenerationWorker};
pub use use_cases::run_consensus::{RunConsensusError, RunConsensusInput, RunConsensusUseCase};
