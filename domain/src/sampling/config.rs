//! Sampling configuration value object

use crate::core::error::ConfigurationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "text-bison@001";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 16;
pub const DEFAULT_TOP_P: f32 = 0.8;
pub const DEFAULT_TOP_K: u32 = 40;
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Generation parameters for the text model (Value Object)
///
/// Constructed once per run, validated, then shared read-only by every
/// branch. Fields are private so an invalid config cannot be assembled by hand.
///
/// # Example
///
/// ```
/// use simulacra_domain::SamplingConfig;
///
/// let config = SamplingConfig::default();
/// assert_eq!(config.model(), "text-bison@001");
///
/// let hot = SamplingConfig::builder().temperature(1.5).build();
/// assert!(hot.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SamplingConfigBuilder")]
pub struct SamplingConfig {
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
    location: String,
}

impl SamplingConfig {
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn top_p(&self) -> f32 {
        self.top_p
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

/// Unvalidated sampling parameters; `build()` checks every range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfigBuilder {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    pub location: String,
}

impl Default for SamplingConfigBuilder {
    fn default() -> Self {
        let defaults = SamplingConfig::default();
        Self {
            model: defaults.model,
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
            top_p: defaults.top_p,
            top_k: defaults.top_k,
            location: defaults.location,
        }
    }
}

impl SamplingConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn build(self) -> Result<SamplingConfig, ConfigurationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigurationError::sampling("model", "cannot be empty"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigurationError::sampling(
                "temperature",
                format!("must be within [0, 1], got {}", self.temperature),
            ));
        }
        if self.max_output_tokens == 0 {
            return Err(ConfigurationError::sampling(
                "max_output_tokens",
                "must be greater than 0",
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigurationError::sampling(
                "top_p",
                format!("must be within (0, 1], got {}", self.top_p),
            ));
        }
        if self.top_k == 0 {
            return Err(ConfigurationError::sampling("top_k", "must be at least 1"));
        }
        if self.location.trim().is_empty() {
            return Err(ConfigurationError::sampling("location", "cannot be empty"));
        }

        Ok(SamplingConfig {
            model: self.model,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
            top_k: self.top_k,
            location: self.location,
        })
    }
}

impl TryFrom<SamplingConfigBuilder> for SamplingConfig {
    type Error = ConfigurationError;

    fn try_from(builder: SamplingConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SamplingConfig::default();
        assert_eq!(config.model(), "text-bison@001");
        assert_eq!(config.temperature(), 0.2);
        assert_eq!(config.max_output_tokens(), 16);
        assert_eq!(config.top_p(), 0.8);
        assert_eq!(config.top_k(), 40);
        assert_eq!(config.location(), "us-central1");
    }

    #[test]
    fn test_builder_defaults_are_valid() {
        assert_eq!(
            SamplingConfig::builder().build().unwrap(),
            SamplingConfig::default()
        );
    }

    #[test]
    fn test_temperature_bounds() {
        assert!(SamplingConfig::builder().temperature(0.0).build().is_ok());
        assert!(SamplingConfig::builder().temperature(1.0).build().is_ok());
        assert!(SamplingConfig::builder().temperature(-0.1).build().is_err());
        assert!(SamplingConfig::builder().temperature(f32::NAN).build().is_err());
    }

    #[test]
    fn test_top_p_bounds() {
        assert!(SamplingConfig::builder().top_p(1.0).build().is_ok());
        let err = SamplingConfig::builder().top_p(0.0).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidSampling { field: "top_p", .. }
        ));
    }

    #[test]
    fn test_zero_tokens_and_top_k() {
        assert!(SamplingConfig::builder().max_output_tokens(0).build().is_err());
        assert!(SamplingConfig::builder().top_k(0).build().is_err());
    }

    #[test]
    fn test_blank_model_and_location() {
        assert!(SamplingConfig::builder().model(" ").build().is_err());
        assert!(SamplingConfig::builder().location("").build().is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: SamplingConfig =
            serde_json::from_str(r#"{"model":"text-bison@002","top_k":10}"#).unwrap();
        assert_eq!(ok.model(), "text-bison@002");
        assert_eq!(ok.top_k(), 10);
        assert_eq!(ok.temperature(), 0.2);

        let bad: Result<SamplingConfig, _> = serde_json::from_str(r#"{"temperature":2.0}"#);
        assert!(bad.is_err());
    }
}
