//! Artifact store adapters
//!
//! - [`InMemoryArtifactStore`]: process-local, for single runs and tests
//! - [`FileArtifactStore`]: one file per artifact under a run directory

mod file;
mod memory;

pub use file::FileArtifactStore;
pub use memory::InMemoryArtifactStore;
