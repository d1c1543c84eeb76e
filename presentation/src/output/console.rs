//! Console output formatter for consensus results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use simulacra_domain::{BranchOutcome, ConsensusResult, Decision};

const WIDTH: usize = 60;

/// Formats consensus results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The decision word on its own line, uncolored so it can be piped
    pub fn format_decision(result: &ConsensusResult) -> String {
        format!("{}\n", result.decision)
    }

    /// Format the complete run: one row per persona, then totals
    pub fn format_full(result: &ConsensusResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Simulacra Consensus"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            result.question
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Personas:".cyan().bold(),
            result.personas.len()
        ));

        output.push_str(&Self::section_header("Answers"));
        output.push_str(&format!(
            "{:>3}  {:<32} {:>5} {:>6}\n",
            "#", "persona", "tabs", "spaces"
        ));
        for outcome in &result.outcomes {
            output.push_str(&Self::outcome_row(outcome));
        }

        let failed: Vec<_> = result.failed_outcomes().collect();
        if !failed.is_empty() {
            output.push_str(&Self::section_header("Failures"));
            for outcome in failed {
                output.push_str(&format!(
                    "  {} [{}] {}: {}\n",
                    "x".red(),
                    outcome.persona_index(),
                    outcome.persona(),
                    outcome.failure_reason().unwrap_or("unknown")
                ));
            }
        }

        output.push_str(&Self::section_header("Totals"));
        output.push_str(&format!(
            "  tabs:   {}\n  spaces: {}\n  answered: {}/{}\n",
            result.metrics.sum_tabs(),
            result.metrics.sum_spaces(),
            result.metrics.branches(),
            result.outcomes.len()
        ));

        output.push_str(&format!(
            "\n{} {}\n",
            "Decision:".bold(),
            Self::colored_decision(result.decision)
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &ConsensusResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn outcome_row(outcome: &BranchOutcome) -> String {
        let label = Self::truncate(outcome.persona().as_str(), 32);
        match outcome {
            BranchOutcome::Completed(branch) => format!(
                "{:>3}  {:<32} {:>5} {:>6}\n",
                branch.persona_index, label, branch.tabs_count, branch.spaces_count
            ),
            BranchOutcome::Failed { persona_index, .. } => format!(
                "{:>3}  {:<32} {:>12}\n",
                persona_index,
                label,
                "failed".red()
            ),
        }
    }

    fn colored_decision(decision: Decision) -> String {
        match decision {
            Decision::Tabs => decision.as_str().yellow().bold().to_string(),
            Decision::Spaces => decision.as_str().green().bold().to_string(),
        }
    }

    fn truncate(text: &str, max: usize) -> String {
        if text.chars().count() <= max {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max - 3).collect();
            format!("{}...", kept)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(WIDTH);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(WIDTH).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_decision(&self, result: &ConsensusResult) -> String {
        Self::format_decision(result)
    }

    fn format_full(&self, result: &ConsensusResult) -> String {
        Self::format_full(result)
    }

    fn format_json(&self, result: &ConsensusResult) -> String {
        Self::format_json(result)
    }
}
