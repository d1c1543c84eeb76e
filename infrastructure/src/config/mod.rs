//! Configuration file loading for simulacra-consensus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SIMULACRA_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./simulacra.toml` or `./.simulacra.toml`
//! 4. Global: `~/.config/simulacra-consensus/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_ACCESS_TOKEN_ENV, FileArtifactsConfig, FileConfig, FileExecutionConfig,
    FilePromptConfig, FileRosterConfig, FileSamplingConfig, FileVertexConfig,
};
pub use loader::ConfigLoader;
