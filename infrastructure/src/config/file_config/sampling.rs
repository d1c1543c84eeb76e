//! Sampling configuration from TOML (`[sampling]` section)

use serde::{Deserialize, Serialize};
use simulacra_domain::{ConfigurationError, SamplingConfig, SamplingConfigBuilder};

/// Raw sampling configuration from TOML
///
/// Every field falls back to the built-in default, so a partial section is
/// fine. Ranges are only checked by [`to_sampling_config`](Self::to_sampling_config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSamplingConfig {
    /// Publisher model id, e.g. `text-bison@001`
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    /// Vertex AI region
    pub location: String,
}

impl Default for FileSamplingConfig {
    fn default() -> Self {
        let builder = SamplingConfigBuilder::default();
        Self {
            model: builder.model,
            temperature: builder.temperature,
            max_output_tokens: builder.max_output_tokens,
            top_p: builder.top_p,
            top_k: builder.top_k,
            location: builder.location,
        }
    }
}

impl FileSamplingConfig {
    pub fn to_builder(&self) -> SamplingConfigBuilder {
        SamplingConfig::builder()
            .model(self.model.clone())
            .temperature(self.temperature)
            .max_output_tokens(self.max_output_tokens)
            .top_p(self.top_p)
            .top_k(self.top_k)
            .location(self.location.clone())
    }

    pub fn to_sampling_config(&self) -> Result<SamplingConfig, ConfigurationError> {
        self.to_builder().build()
    }
}
