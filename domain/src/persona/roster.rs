//! Persona roster value objects

use crate::core::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// The built-in roster: one simulacrum per engineering role.
///
/// `devops engineer` appears twice on purpose; duplicates run as
/// independent branches.
const DEFAULT_PERSONAS: [&str; 33] = [
    "senior software engineer",
    "junior software engineer",
    "software engineer",
    "lead software engineer",
    "devops engineer",
    "software engineering manager",
    "software architect",
    "frontend engineer",
    "backend engineer",
    "full stack engineer",
    "software development engineer in test",
    "quality assurance engineer",
    "devops engineer",
    "system engineer",
    "data engineer",
    "database administrator",
    "security engineer",
    "product manager",
    "project manager",
    "scrum master",
    "ui/ux designer",
    "data scientist",
    "machine learning engineer",
    "site reliability engineer",
    "network engineer",
    "cloud engineer",
    "mobile developer",
    "web developer",
    "web designer",
    "principal engineer",
    "director of engineering",
    "vp of engineering",
    "chief technology officer",
];

/// A role label used to parameterize one branch's prompt (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Persona(String);

impl Persona {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, non-empty list of personas.
///
/// The roster length *is* the fan-out degree: one branch is spawned per entry.
///
/// # Example
///
/// ```
/// use simulacra_domain::Roster;
///
/// let roster = Roster::new(["backend engineer", "backend engineer"]).unwrap();
/// assert_eq!(roster.len(), 2);
/// assert!(Roster::new(Vec::<String>::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    personas: Vec<Persona>,
}

impl Roster {
    /// Build a roster, rejecting an empty list or blank labels
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let personas = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                let label = label.into();
                if label.trim().is_empty() {
                    Err(ConfigurationError::BlankPersona { index })
                } else {
                    Ok(Persona(label))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if personas.is_empty() {
            return Err(ConfigurationError::EmptyRoster);
        }

        Ok(Self { personas })
    }

    /// The built-in 33-persona engineering roster
    pub fn engineering() -> Self {
        Self {
            personas: DEFAULT_PERSONAS
                .iter()
                .map(|p| Persona(p.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Persona> {
        self.personas.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.personas.iter().map(|p| p.to_string()).collect()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::engineering()
    }
}
