//! CLI entrypoint for Simulacra Consensus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use simulacra_application::{
    ArtifactStore, ExecutionParams, RunConsensusInput, RunConsensusUseCase,
};
use simulacra_domain::{FailurePolicy, Question};
use simulacra_infrastructure::{
    ConfigLoader, FileArtifactStore, FileConfig, InMemoryArtifactStore, VertexAiGenerator,
};
use simulacra_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Simulacra Consensus");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("{}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let (input, params) = prepare_run(&config, cli.question.as_deref())?;

    // === Dependency Injection ===
    let project_id = config
        .vertex
        .project_id
        .clone()
        .context("Google Cloud project is required (--project or GOOGLE_CLOUD_PROJECT)")?;
    let access_token = config.vertex.access_token().with_context(|| {
        format!(
            "Vertex AI access token not found in ${}",
            config.vertex.access_token_env
        )
    })?;

    let mut generator = VertexAiGenerator::new(project_id, access_token)?;
    if let Some(endpoint) = &config.vertex.endpoint {
        generator = generator.with_endpoint(endpoint.clone());
    }

    let store: Arc<dyn ArtifactStore> = match &config.artifacts.dir {
        Some(dir) => {
            let store = FileArtifactStore::for_run(dir).await?;
            info!("Keeping answers in {}", store.root().display());
            Arc::new(store)
        }
        None => Arc::new(InMemoryArtifactStore::new()),
    };

    info!(
        personas = input.roster.len(),
        policy = %params.failure_policy,
        "Running consensus"
    );

    let use_case = RunConsensusUseCase::new(Arc::new(generator), store, params);

    // Execute with or without progress reporting
    let result = if cli.quiet {
        use_case.execute(input).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    } else {
        use_case.execute_with_progress(input, &SimpleProgress).await?
    };

    let failed = result.failed_outcomes().count();
    if failed > 0 {
        warn!("{} of {} personas did not answer", failed, result.outcomes.len());
    }

    // Output results
    let output = match cli.output {
        OutputFormat::Decision => ConsoleFormatter::format_decision(&result),
        OutputFormat::Full => ConsoleFormatter::format_full(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output.trim_end());

    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr (stdout carries the result) or, with `--log-file`,
/// through a non-blocking file writer.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Validate the merged configuration and build the run input.
///
/// Runs before any generator or store exists, so a rejected configuration
/// never reaches the model.
fn prepare_run(
    config: &FileConfig,
    question: Option<&str>,
) -> Result<(RunConsensusInput, ExecutionParams)> {
    let issues = config.validate();
    if !issues.is_empty() {
        let details = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{}", details);
    }

    let question = match question {
        Some(q) => Question::new(q)?,
        None => bail!("Question is required."),
    };

    let input = RunConsensusInput::new(question)
        .with_roster(config.roster.to_roster()?)
        .with_template(config.prompt.to_template()?)
        .with_sampling(config.sampling.to_sampling_config()?);
    let params = config.execution.to_execution_params()?;

    Ok((input, params))
}

/// Command-line flags take precedence over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(project) = &cli.project {
        config.vertex.project_id = Some(project.clone());
    }
    if !cli.persona.is_empty() {
        config.roster.personas = Some(cli.persona.clone());
    }
    if let Some(policy) = cli.policy {
        config.execution.failure_policy = FailurePolicy::from(policy).as_str().to_string();
    }
    if let Some(timeout) = cli.timeout {
        config.execution.timeout_secs = timeout;
    }
    if let Some(attempts) = cli.attempts {
        config.execution.attempts = attempts;
    }
    if let Some(dir) = &cli.artifact_dir {
        config.artifacts.dir = Some(dir.clone());
    }
}
