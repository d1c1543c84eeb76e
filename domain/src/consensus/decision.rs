//! Final categorical decision

use serde::{Deserialize, Serialize};

/// Outcome of a consensus run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Tabs,
    Spaces,
}

impl Decision {
    /// Decide from the two sums.
    ///
    /// `Tabs` only wins on a strict majority; a tie (including `0 == 0`)
    /// goes to `Spaces`.
    pub fn from_sums(sum_tabs: u64, sum_spaces: u64) -> Self {
        if sum_tabs > sum_spaces {
            Decision::Tabs
        } else {
            Decision::Spaces
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Tabs => "tabs",
            Decision::Spaces => "spaces",
        }
    }

    /// The word each branch counts for this side
    pub fn word(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tabs" => Ok(Decision::Tabs),
            "spaces" => Ok(Decision::Spaces),
            other => Err(format!("Unknown decision: {}. Valid: tabs, spaces", other)),
        }
    }
}
