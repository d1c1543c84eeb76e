//! Roster configuration from TOML (`[roster]` section)

use serde::{Deserialize, Serialize};
use simulacra_domain::{ConfigurationError, Roster};

/// Raw roster configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRosterConfig {
    /// Persona labels; unset means the built-in engineering roster
    pub personas: Option<Vec<String>>,
}

impl FileRosterConfig {
    pub fn to_roster(&self) -> Result<Roster, ConfigurationError> {
        match &self.personas {
            Some(labels) => Roster::new(labels.iter().cloned()),
            None => Ok(Roster::engineering()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;
    use simulacra_domain::ConfigurationError;

    #[test]
    fn test_unset_uses_engineering_roster() {
        let config = FileConfig::default();
        assert_eq!(config.roster.to_roster().unwrap().len(), 33);
    }

    #[test]
    fn test_custom_roster() {
        let toml_str = r#"
[roster]
personas = ["kernel hacker", "web developer"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let roster = config.roster.to_roster().unwrap();
        assert_eq!(roster.labels(), vec!["kernel hacker", "web developer"]);
    }

    #[test]
    fn test_empty_roster_rejected() {
        let config: FileConfig = toml::from_str("[roster]\npersonas = []\n").unwrap();
        assert_eq!(
            config.roster.to_roster().unwrap_err(),
            ConfigurationError::EmptyRoster
        );
    }
}
