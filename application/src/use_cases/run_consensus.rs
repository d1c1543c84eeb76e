//! Run Consensus use case
//!
//! Orchestrates the full graph: fan out to every persona, collect the scores,
//! decide.

use crate::config::ExecutionParams;
use crate::ports::artifact_store::ArtifactStore;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::text_generator::TextGenerator;
use crate::use_cases::fan_out::FanOutRunner;
use simulacra_domain::{
    BranchOutcome, CollectReducer, ConfigurationError, ConsensusResult, FailurePolicy, Persona,
    PromptTemplate, Question, Roster, SamplingConfig, SamplingConfigBuilder,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a consensus run
#[derive(Error, Debug)]
pub enum RunConsensusError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Branch {persona_index} ({persona}) failed: {reason}")]
    BranchFailed {
        persona_index: usize,
        persona: Persona,
        reason: String,
    },
}

/// Input for the RunConsensus use case
///
/// Every field is an already-validated domain value, so holding one of these
/// means the graph is well-formed.
#[derive(Debug, Clone)]
pub struct RunConsensusInput {
    pub question: Question,
    pub roster: Roster,
    pub template: PromptTemplate,
    pub sampling: SamplingConfig,
}

impl RunConsensusInput {
    /// Build an input with the built-in roster, template and sampling
    pub fn new(question: Question) -> Self {
        Self {
            question,
            roster: Roster::default(),
            template: PromptTemplate::default(),
            sampling: SamplingConfig::default(),
        }
    }

    /// Validate raw settings into an input.
    ///
    /// This is the graph-construction step; nothing is generated here.
    pub fn from_parts(
        question: &str,
        personas: Vec<String>,
        template: &str,
        sampling: SamplingConfigBuilder,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            question: Question::new(question)?,
            roster: Roster::new(personas)?,
            template: PromptTemplate::parse(template)?,
            sampling: sampling.build()?,
        })
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }
}

/// Use case for running the persona consensus graph
pub struct RunConsensusUseCase<G: ?Sized, S: ?Sized> {
    runner: FanOutRunner<G, S>,
}

impl<G, S> RunConsensusUseCase<G, S>
where
    G: TextGenerator + ?Sized + 'static,
    S: ArtifactStore + ?Sized + 'static,
{
    pub fn new(generator: Arc<G>, store: Arc<S>, params: ExecutionParams) -> Self {
        Self {
            runner: FanOutRunner::new(generator, store, params),
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConsensusInput,
    ) -> Result<ConsensusResult, RunConsensusError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConsensusResult, RunConsensusError> {
        let policy = self.runner.params().failure_policy;
        info!(
            "Starting consensus with {} personas ({})",
            input.roster.len(),
            policy
        );

        let sampling = Arc::new(input.sampling);
        let outcomes = self
            .runner
            .run_all_with_progress(
                &input.roster,
                &input.question,
                &input.template,
                sampling,
                progress,
            )
            .await;

        if policy == FailurePolicy::AllOrNothing
            && let Some(err) = Self::first_failure(&outcomes)
        {
            warn!("Aborting run: {}", err);
            return Err(err);
        }

        let (metrics, decision) = CollectReducer::collect_and_decide(&outcomes);
        info!(
            sum_tabs = metrics.sum_tabs(),
            sum_spaces = metrics.sum_spaces(),
            branches = metrics.branches(),
            "Decided: {}",
            decision
        );
        progress.on_decision(&metrics, decision);

        Ok(ConsensusResult::new(
            input.question.into_content(),
            input.roster.labels(),
            outcomes,
            metrics,
            decision,
        ))
    }

    /// The lowest-index branch that failed for its own reason.
    ///
    /// Branches cancelled because of another failure are only reported when
    /// nothing else failed.
    fn first_failure(outcomes: &[BranchOutcome]) -> Option<RunConsensusError> {
        let failed = || {
            outcomes.iter().filter_map(|o| match o {
                BranchOutcome::Failed {
                    persona_index,
                    persona,
                    reason,
                    cancelled,
                } => Some((*persona_index, persona, reason, *cancelled)),
                BranchOutcome::Completed(_) => None,
            })
        };

        failed()
            .find(|(_, _, _, cancelled)| !cancelled)
            .or_else(|| failed().next())
            .map(|(persona_index, persona, reason, _)| RunConsensusError::BranchFailed {
                persona_index,
                persona: persona.clone(),
                reason: reason.clone(),
            })
    }
}
