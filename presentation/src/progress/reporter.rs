//! Progress reporting for consensus runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use simulacra_application::ProgressNotifier;
use simulacra_domain::{CollectedMetrics, Decision, Persona};
use std::sync::Mutex;

/// Reports branch progress with an indicatif bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn fan_out_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn status_mark(success: bool) -> String {
        if success {
            "v".green().to_string()
        } else {
            "x".red().to_string()
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_fan_out_start(&self, total_branches: usize) {
        let pb = ProgressBar::new(total_branches as u64);
        pb.set_style(Self::fan_out_style());
        pb.set_prefix("Asking personas");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_branch_complete(&self, _persona_index: usize, persona: &Persona, success: bool) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!("{} {}", Self::status_mark(success), persona));
            pb.inc(1);
        }
    }

    fn on_fan_out_complete(&self, completed: usize, failed: usize) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            let summary = if failed == 0 {
                format!("{} answered", completed).green().to_string()
            } else {
                format!("{} answered, {} failed", completed, failed)
                    .yellow()
                    .to_string()
            };
            pb.finish_with_message(summary);
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr so stdout stays clean for the decision.
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_fan_out_start(&self, total_branches: usize) {
        eprintln!(
            "{} {} ({} personas)",
            "->".cyan(),
            "Asking personas".bold(),
            total_branches
        );
    }

    fn on_branch_complete(&self, persona_index: usize, persona: &Persona, success: bool) {
        if success {
            eprintln!("  {} [{}] {}", "v".green(), persona_index, persona);
        } else {
            eprintln!("  {} [{}] {} (failed)", "x".red(), persona_index, persona);
        }
    }

    fn on_fan_out_complete(&self, completed: usize, failed: usize) {
        eprintln!("{} {} completed, {} failed", "->".cyan(), completed, failed);
    }

    fn on_decision(&self, metrics: &CollectedMetrics, decision: Decision) {
        eprintln!(
            "{} tabs {} vs spaces {}: {}",
            "->".cyan(),
            metrics.sum_tabs(),
            metrics.sum_spaces(),
            decision.as_str().bold()
        );
    }
}
