//! Prompt configuration from TOML (`[prompt]` section)

use serde::{Deserialize, Serialize};
use simulacra_domain::{ConfigurationError, PromptTemplate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    /// Template with exactly one `{persona}` and one `{question}` slot
    pub template: Option<String>,
}

impl FilePromptConfig {
    pub fn to_template(&self) -> Result<PromptTemplate, ConfigurationError> {
        match &self.template {
            Some(source) => PromptTemplate::parse(source.clone()),
            None => Ok(PromptTemplate::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;

    #[test]
    fn test_custom_template() {
        let toml_str = r#"
[prompt]
template = "You are a {persona}. {question}"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let template = config.prompt.to_template().unwrap();
        assert_eq!(template.source(), "You are a {persona}. {question}");
    }

    #[test]
    fn test_template_missing_slot() {
        let config: FileConfig =
            toml::from_str("[prompt]\ntemplate = \"only {question}\"\n").unwrap();
        assert!(config.prompt.to_template().is_err());
    }
}
