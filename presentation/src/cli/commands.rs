//! CLI command definitions

use clap::{Parser, ValueEnum};
use simulacra_domain::FailurePolicy;
use std::path::PathBuf;

/// Output format for consensus results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the decision word (`tabs` or `spaces`)
    Decision,
    /// Per-persona table with counts, failures and totals
    Full,
    /// JSON output
    Json,
}

/// Failure policy as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Decide from whichever branches completed
    BestEffort,
    /// Abort the run on the first failed branch
    AllOrNothing,
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::BestEffort => FailurePolicy::BestEffort,
            PolicyArg::AllOrNothing => FailurePolicy::AllOrNothing,
        }
    }
}

/// CLI arguments for simulacra-consensus
#[derive(Parser, Debug)]
#[command(name = "simulacra-consensus")]
#[command(author, version, about = "Ask a roster of simulated engineers: tabs or spaces?")]
#[command(long_about = r#"
Simulacra Consensus puts one question to a roster of personas through a
Vertex AI text model, counts how often each answer says "tabs" and
"spaces", and prints the winner.

Every persona is answered concurrently. Tabs win only with strictly more
mentions than spaces; ties (including no mentions at all) go to spaces.

Configuration files are loaded from (in priority order):
1. SIMULACRA_<SECTION>__<KEY>   Environment variables
2. --config <path>              Explicit config file
3. ./simulacra.toml             Project-level config
4. ~/.config/simulacra-consensus/config.toml   Global config

Example:
  simulacra-consensus --project my-gcp-project "Tabs or spaces?"
  simulacra-consensus -p my-gcp-project --persona "kernel hacker" --persona "web developer" "Tabs or spaces?"
  simulacra-consensus -p my-gcp-project --policy all-or-nothing --output full "Tabs or spaces?"
"#)]
pub struct Cli {
    /// The question to put to every persona
    pub question: Option<String>,

    /// Google Cloud project id
    #[arg(short, long, value_name = "PROJECT", env = "GOOGLE_CLOUD_PROJECT")]
    pub project: Option<String>,

    /// Personas to ask (can be specified multiple times, replaces the roster)
    #[arg(long, value_name = "PERSONA")]
    pub persona: Vec<String>,

    /// What a failed branch means for the run
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Per-attempt generation timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Generation attempts per persona
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: Option<u32>,

    /// Keep generated answers under this directory
    #[arg(long, value_name = "DIR")]
    pub artifact_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "decision")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
