//! Vertex AI configuration from TOML (`[vertex]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Raw Vertex AI configuration from TOML
///
/// The token itself is never stored in a file, only the name of the
/// environment variable holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVertexConfig {
    pub project_id: Option<String>,
    pub access_token_env: String,
    /// Base URL override (proxies, local fakes)
    pub endpoint: Option<String>,
}

impl Default for FileVertexConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            access_token_env: DEFAULT_ACCESS_TOKEN_ENV.to_string(),
            endpoint: None,
        }
    }
}

impl FileVertexConfig {
    /// Read the access token from the configured environment variable
    pub fn access_token(&self) -> Option<String> {
        std::env::var(&self.access_token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
