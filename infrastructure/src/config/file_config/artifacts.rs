//! Artifact storage configuration from TOML (`[artifacts]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArtifactsConfig {
    /// Keep responses on disk under this directory (one `run-*` folder per
    /// run). Unset keeps them in memory.
    pub dir: Option<PathBuf>,
}
