//! Fan-out runner
//!
//! Spawns one branch per roster entry and waits for all of them.
//!
//! Each branch runs, in order:
//!
//! 1. [`GenerationWorker::generate`] for its rendered prompt
//! 2. two [`WordOccurrenceScorer::count_occurrences`] calls (`tabs`, `spaces`)
//!    against the same artifact, concurrently
//!
//! Branches share nothing mutable. The fan-in barrier resolves every spawned
//! task, so the runner always returns exactly one [`BranchOutcome`] per
//! roster entry. Branch tasks live in a [`JoinSet`]; dropping the run aborts
//! every branch still in flight.

use crate::config::ExecutionParams;
use crate::ports::artifact_store::ArtifactStore;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::text_generator::TextGenerator;
use crate::use_cases::count_occurrences::{ArtifactReadFailure, WordOccurrenceScorer};
use crate::use_cases::generate_response::{GenerationFailure, GenerationWorker};
use simulacra_domain::{
    ArtifactHandle, BranchOutcome, BranchResult, Decision, Persona, PromptTemplate, Question,
    Roster, SamplingConfig,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a single branch did not complete
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BranchError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationFailure),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ArtifactReadFailure),

    #[error("cancelled")]
    Cancelled,
}

/// Runs the per-persona sub-graph for a whole roster
pub struct FanOutRunner<G: ?Sized, S: ?Sized> {
    worker: GenerationWorker<G, S>,
    scorer: WordOccurrenceScorer<S>,
    params: ExecutionParams,
}

impl<G, S> FanOutRunner<G, S>
where
    G: TextGenerator + ?Sized + 'static,
    S: ArtifactStore + ?Sized + 'static,
{
    pub fn new(generator: Arc<G>, store: Arc<S>, params: ExecutionParams) -> Self {
        let worker = GenerationWorker::new(generator, Arc::clone(&store))
            .with_timeout(params.generation_timeout)
            .with_empty_content_allowed(params.allow_empty_responses);
        Self {
            worker,
            scorer: WordOccurrenceScorer::new(store),
            params,
        }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Run every branch with default (no-op) progress
    pub async fn run_all(
        &self,
        roster: &Roster,
        question: &Question,
        template: &PromptTemplate,
        config: Arc<SamplingConfig>,
    ) -> Vec<BranchOutcome> {
        self.run_all_with_progress(roster, question, template, config, &NoProgress)
            .await
    }

    /// Run every branch, reporting each completion.
    ///
    /// Outcomes are returned in roster order regardless of completion order.
    pub async fn run_all_with_progress(
        &self,
        roster: &Roster,
        question: &Question,
        template: &PromptTemplate,
        config: Arc<SamplingConfig>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<BranchOutcome> {
        let total = roster.len();
        info!(
            branches = total,
            policy = %self.params.failure_policy,
            "Fanning out question"
        );
        progress.on_fan_out_start(total);

        let cancel = CancellationToken::new();
        let abort_on_failure = self.params.failure_policy.aborts_on_failure();

        let mut join_set = JoinSet::new();
        let mut branches = HashMap::with_capacity(total);
        for (index, persona) in roster.iter().enumerate() {
            let branch = Branch {
                index,
                persona: persona.clone(),
                prompt: template.render(persona, question),
                worker: self.worker.clone(),
                scorer: self.scorer.clone(),
                config: Arc::clone(&config),
                attempts: self.params.generation_attempts.max(1),
            };
            let cancel = cancel.clone();

            let handle = join_set.spawn(async move {
                let result = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(BranchError::Cancelled),
                    result = branch.run() => result,
                };
                if result.is_err() && abort_on_failure {
                    cancel.cancel();
                }
                result
            });
            branches.insert(handle.id(), (index, persona.clone()));
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = join_set.join_next_with_id().await {
            let id = match &joined {
                Ok((id, _)) => *id,
                Err(e) => e.id(),
            };
            let Some((index, persona)) = branches.remove(&id) else {
                warn!("Joined unknown branch task {}", id);
                continue;
            };

            let outcome = match joined {
                Ok((_, Ok(result))) => {
                    debug!(
                        index,
                        persona = %persona,
                        tabs = result.tabs_count,
                        spaces = result.spaces_count,
                        "Branch completed"
                    );
                    BranchOutcome::Completed(result)
                }
                Ok((_, Err(BranchError::Cancelled))) => {
                    debug!(index, persona = %persona, "Branch cancelled");
                    BranchOutcome::cancelled(index, persona)
                }
                Ok((_, Err(e))) => {
                    warn!("Branch {} ({}) failed: {}", index, persona, e);
                    BranchOutcome::failed(index, persona, e.to_string())
                }
                Err(e) => {
                    warn!("Branch {} ({}) task error: {}", index, persona, e);
                    if abort_on_failure {
                        cancel.cancel();
                    }
                    BranchOutcome::failed(index, persona, format!("branch task aborted: {}", e))
                }
            };
            progress.on_branch_complete(index, outcome.persona(), outcome.is_completed());
            outcomes.push(outcome);
        }

        outcomes.sort_by_key(|o| o.persona_index());

        let completed = outcomes.iter().filter(|o| o.is_completed()).count();
        let failed = outcomes.len() - completed;
        info!(completed, failed, "All branches resolved");
        progress.on_fan_out_complete(completed, failed);

        outcomes
    }
}

/// Everything one spawned branch owns
struct Branch<G: ?Sized, S: ?Sized> {
    index: usize,
    persona: Persona,
    prompt: String,
    worker: GenerationWorker<G, S>,
    scorer: WordOccurrenceScorer<S>,
    config: Arc<SamplingConfig>,
    attempts: u32,
}

impl<G, S> Branch<G, S>
where
    G: TextGenerator + ?Sized,
    S: ArtifactStore + ?Sized,
{
    async fn run(self) -> Result<BranchResult, BranchError> {
        let artifact = self.generate().await?;

        let (tabs_count, spaces_count) = tokio::try_join!(
            self.scorer
                .count_occurrences(&artifact, Decision::Tabs.word()),
            self.scorer
                .count_occurrences(&artifact, Decision::Spaces.word()),
        )?;

        Ok(BranchResult::new(
            self.index,
            self.persona,
            artifact,
            tabs_count,
            spaces_count,
        ))
    }

    async fn generate(&self) -> Result<ArtifactHandle, GenerationFailure> {
        let mut attempt = 1;
        loop {
            match self.worker.generate(&self.prompt, &self.config).await {
                Ok(handle) => return Ok(handle),
                Err(e) if e.is_retryable() && attempt < self.attempts => {
                    warn!(
                        "Branch {} ({}) attempt {}/{} failed: {}, retrying",
                        self.index, self.persona, attempt, self.attempts, e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        MemoryStore, Script, ScriptedGenerator, TrackingProgress, test_template,
    };
    use simulacra_domain::FailurePolicy;
    use std::time::Duration;

    fn question() -> Question {
        Question::new("Tabs or spaces?").unwrap()
    }

    fn runner(
        generator: ScriptedGenerator,
        params: ExecutionParams,
    ) -> (
        FanOutRunner<ScriptedGenerator, MemoryStore>,
        Arc<ScriptedGenerator>,
        Arc<MemoryStore>,
    ) {
        let generator = Arc::new(generator);
        let store = Arc::new(MemoryStore::new());
        let runner = FanOutRunner::new(Arc::clone(&generator), Arc::clone(&store), params);
        (runner, generator, store)
    }

    async fn run(
        runner: &FanOutRunner<ScriptedGenerator, MemoryStore>,
        roster: &Roster,
    ) -> Vec<BranchOutcome> {
        runner
            .run_all(
                roster,
                &question(),
                &test_template(),
                Arc::new(SamplingConfig::default()),
            )
            .await
    }

    #[tokio::test]
    async fn test_one_outcome_per_persona() {
        for size in [1usize, 2, 7, 33] {
            let labels: Vec<String> = (0..size).map(|i| format!("p{}", i)).collect();
            let roster = Roster::new(labels).unwrap();
            let (runner, generator, store) = runner(
                ScriptedGenerator::new().with_default_reply("tabs"),
                ExecutionParams::default(),
            );

            let outcomes = run(&runner, &roster).await;

            assert_eq!(outcomes.len(), size);
            assert_eq!(generator.call_count(), size);
            assert_eq!(store.write_count(), size);
            for (i, outcome) in outcomes.iter().enumerate() {
                assert_eq!(outcome.persona_index(), i);
            }
        }
    }

    #[tokio::test]
    async fn test_duplicate_personas_run_independently() {
        let roster = Roster::new(["devops", "devops"]).unwrap();
        let (runner, generator, store) = runner(
            ScriptedGenerator::new().reply("devops", "spaces"),
            ExecutionParams::default(),
        );

        let outcomes = run(&runner, &roster).await;

        assert_eq!(generator.calls_for("devops"), 2);
        assert_eq!(store.write_count(), 2);
        let artifacts: Vec<_> = outcomes
            .iter()
            .map(|o| o.as_completed().unwrap().artifact.clone())
            .collect();
        assert_ne!(artifacts[0], artifacts[1]);
    }

    #[tokio::test]
    async fn test_each_branch_scores_its_own_answer() {
        let roster = Roster::new(["a", "b"]).unwrap();
        let (runner, _, _) = runner(
            ScriptedGenerator::new()
                .reply("a", "tabs tabs spaces")
                .reply("b", "spaces spaces"),
            ExecutionParams::default(),
        );

        let outcomes = run(&runner, &roster).await;

        let a = outcomes[0].as_completed().unwrap();
        assert_eq!((a.tabs_count, a.spaces_count), (2, 1));
        let b = outcomes[1].as_completed().unwrap();
        assert_eq!((b.tabs_count, b.spaces_count), (0, 2));
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let roster = Roster::new(["a", "broken", "c"]).unwrap();
        let (runner, _, store) = runner(
            ScriptedGenerator::new()
                .reply("a", "tabs tabs")
                .fail("broken")
                .reply("c", "spaces"),
            ExecutionParams::default(),
        );

        let outcomes = run(&runner, &roster).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_completed().unwrap().tabs_count, 2);
        assert!(!outcomes[1].is_completed());
        assert!(
            outcomes[1]
                .failure_reason()
                .unwrap()
                .starts_with("generation failed")
        );
        assert_eq!(outcomes[2].as_completed().unwrap().spaces_count, 1);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_panicking_branch_is_recorded_as_failed() {
        let roster = Roster::new(["a", "boom"]).unwrap();
        let (runner, _, _) = runner(
            ScriptedGenerator::new()
                .reply("a", "tabs")
                .script("boom", Script::Panic),
            ExecutionParams::default(),
        );

        let outcomes = run(&runner, &roster).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_completed());
        assert!(
            outcomes[1]
                .failure_reason()
                .unwrap()
                .starts_with("branch task aborted")
        );
    }

    #[tokio::test]
    async fn test_timeout_fails_only_the_slow_branch() {
        let roster = Roster::new(["fast", "slow"]).unwrap();
        let params =
            ExecutionParams::default().with_generation_timeout(Some(Duration::from_millis(50)));
        let (runner, _, _) = runner(
            ScriptedGenerator::new().reply("fast", "tabs").script(
                "slow",
                Script::Slow(Duration::from_secs(10), "tabs".to_string()),
            ),
            params,
        );

        let outcomes = run(&runner, &roster).await;

        assert!(outcomes[0].is_completed());
        assert!(outcomes[1].failure_reason().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let roster = Roster::new(["flaky"]).unwrap();
        let (runner, generator, store) = runner(
            ScriptedGenerator::new().script(
                "flaky",
                Script::Flaky {
                    failures: 2,
                    text: "tabs".to_string(),
                },
            ),
            ExecutionParams::default().with_generation_attempts(3),
        );

        let outcomes = run(&runner, &roster).await;

        assert!(outcomes[0].is_completed());
        assert_eq!(generator.calls_for("flaky"), 3);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let roster = Roster::new(["flaky"]).unwrap();
        let (runner, generator, _) = runner(
            ScriptedGenerator::new().script(
                "flaky",
                Script::Flaky {
                    failures: 1,
                    text: "tabs".to_string(),
                },
            ),
            ExecutionParams::default(),
        );

        let outcomes = run(&runner, &roster).await;

        assert!(!outcomes[0].is_completed());
        assert_eq!(generator.calls_for("flaky"), 1);
    }

    #[tokio::test]
    async fn test_all_or_nothing_cancels_siblings() {
        let roster = Roster::new(["broken", "slow"]).unwrap();
        let params = ExecutionParams::default()
            .with_failure_policy(FailurePolicy::AllOrNothing)
            .with_generation_timeout(None);
        let (runner, _, store) = runner(
            ScriptedGenerator::new().fail("broken").script(
                "slow",
                Script::Slow(Duration::from_secs(30), "tabs".to_string()),
            ),
            params,
        );

        let outcomes = tokio::time::timeout(Duration::from_secs(5), run(&runner, &roster))
            .await
            .expect("cancellation should stop the slow branch");

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].failure_reason().unwrap().starts_with("generation failed"));
        assert!(!outcomes[0].is_cancelled());
        assert!(outcomes[1].is_cancelled());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_dropping_the_run_stops_every_branch() {
        let roster = Roster::new(["a", "b", "c"]).unwrap();
        let slow = || Script::Slow(Duration::from_millis(200), "tabs".to_string());
        let (runner, generator, store) = runner(
            ScriptedGenerator::new()
                .script("a", slow())
                .script("b", slow())
                .script("c", slow()),
            ExecutionParams::default().with_generation_timeout(None),
        );

        let cut_short = tokio::time::timeout(Duration::from_millis(20), run(&runner, &roster)).await;
        assert!(cut_short.is_err());
        drop(runner);

        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(generator.call_count(), 3);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_progress_callbacks() {
        let roster = Roster::new(["a", "b", "c"]).unwrap();
        let (runner, _, _) = runner(
            ScriptedGenerator::new()
                .with_default_reply("tabs")
                .fail("b"),
            ExecutionParams::default(),
        );
        let progress = TrackingProgress::default();

        runner
            .run_all_with_progress(
                &roster,
                &question(),
                &test_template(),
                Arc::new(SamplingConfig::default()),
                &progress,
            )
            .await;

        assert_eq!(*progress.started_with.lock().unwrap(), Some(3));
        assert_eq!(*progress.finished.lock().unwrap(), Some((2, 1)));

        let mut branches = progress.branches.lock().unwrap().clone();
        branches.sort();
        assert_eq!(
            branches,
            vec![
                (0, "a".to_string(), true),
                (1, "b".to_string(), false),
                (2, "c".to_string(), true),
            ]
        );
    }
}
