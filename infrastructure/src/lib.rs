//! Infrastructure layer for simulacra-consensus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod artifacts;
pub mod config;
pub mod vertex;

// Re-export commonly used types
pub use artifacts::{FileArtifactStore, InMemoryArtifactStore};
pub use config::{
    ConfigLoader, FileArtifactsConfig, FileConfig, FileExecutionConfig, FilePromptConfig,
    FileRosterConfig, FileSamplingConfig, FileVertexConfig,
};
pub use vertex::VertexAiGenerator;
