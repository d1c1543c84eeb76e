//! Test doubles shared by the use case tests.
//!
//! Prompts are rendered with [`TEST_TEMPLATE`] so the generator can tell
//! which persona it is answering for.

use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::progress::ProgressNotifier;
use crate::ports::text_generator::{GeneratorError, TextGenerator};
use async_trait::async_trait;
use simulacra_domain::{
    ArtifactHandle, CollectedMetrics, Decision, Persona, PromptTemplate, SamplingConfig,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) const TEST_TEMPLATE: &str = "{persona}|{question}";

pub(crate) fn test_template() -> PromptTemplate {
    PromptTemplate::parse(TEST_TEMPLATE).unwrap()
}

#[derive(Debug, Clone)]
pub(crate) enum Script {
    Reply(String),
    Fail(GeneratorError),
    Slow(Duration, String),
    Panic,
    /// Fail `failures` times, then reply
    Flaky { failures: usize, text: String },
}

/// Generator that answers per persona from a script
pub(crate) struct ScriptedGenerator {
    scripts: HashMap<String, Script>,
    default_reply: String,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub(crate) fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            default_reply: String::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_default_reply(mut self, text: &str) -> Self {
        self.default_reply = text.to_string();
        self
    }

    pub(crate) fn script(mut self, persona: &str, script: Script) -> Self {
        self.scripts.insert(persona.to_string(), script);
        self
    }

    pub(crate) fn reply(self, persona: &str, text: &str) -> Self {
        self.script(persona, Script::Reply(text.to_string()))
    }

    pub(crate) fn fail(self, persona: &str) -> Self {
        self.script(
            persona,
            Script::Fail(GeneratorError::RequestFailed("scripted failure".to_string())),
        )
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_for(&self, persona: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == persona)
            .count()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _config: &SamplingConfig,
    ) -> Result<String, GeneratorError> {
        let persona = prompt.split('|').next().unwrap_or_default().to_string();
        let previous_calls = {
            let mut calls = self.calls.lock().unwrap();
            let previous = calls.iter().filter(|p| **p == persona).count();
            calls.push(persona.clone());
            previous
        };

        match self.scripts.get(&persona).cloned() {
            None => Ok(self.default_reply.clone()),
            Some(Script::Reply(text)) => Ok(text),
            Some(Script::Fail(e)) => Err(e),
            Some(Script::Slow(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(Script::Panic) => panic!("scripted panic for {}", persona),
            Some(Script::Flaky { failures, text }) => {
                if previous_calls < failures {
                    Err(GeneratorError::ConnectionError("flaky".to_string()))
                } else {
                    Ok(text)
                }
            }
        }
    }
}

/// In-memory store that counts writes
#[derive(Default)]
pub(crate) struct MemoryStore {
    artifacts: Mutex<HashMap<String, Vec<u8>>>,
    next_id: AtomicUsize,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn write_count(&self) -> usize {
        self.artifacts.lock().unwrap().len()
    }

    pub(crate) fn insert(&self, id: &str, bytes: &[u8]) -> ArtifactHandle {
        self.artifacts
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes.to_vec());
        ArtifactHandle::new(id)
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn write(&self, bytes: Vec<u8>) -> Result<ArtifactHandle, StoreError> {
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.artifacts.lock().unwrap().insert(id.clone(), bytes);
        Ok(ArtifactHandle::new(id))
    }

    async fn read(&self, handle: &ArtifactHandle) -> Result<Vec<u8>, StoreError> {
        self.artifacts
            .lock()
            .unwrap()
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(handle.clone()))
    }
}

/// Records every progress callback
#[derive(Default)]
pub(crate) struct TrackingProgress {
    pub(crate) started_with: Mutex<Option<usize>>,
    pub(crate) branches: Mutex<Vec<(usize, String, bool)>>,
    pub(crate) finished: Mutex<Option<(usize, usize)>>,
    pub(crate) decision: Mutex<Option<Decision>>,
}

impl ProgressNotifier for TrackingProgress {
    fn on_fan_out_start(&self, total_branches: usize) {
        *self.started_with.lock().unwrap() = Some(total_branches);
    }

    fn on_branch_complete(&self, persona_index: usize, persona: &Persona, success: bool) {
        self.branches
            .lock()
            .unwrap()
            .push((persona_index, persona.to_string(), success));
    }

    fn on_fan_out_complete(&self, completed: usize, failed: usize) {
        *self.finished.lock().unwrap() = Some((completed, failed));
    }

    fn on_decision(&self, _metrics: &CollectedMetrics, decision: Decision) {
        *self.decision.lock().unwrap() = Some(decision);
    }
}
