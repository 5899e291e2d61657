// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use seqflow::{ProgressTracker, SequentialFlow, Step, StepDef, StepError};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common State ---

/// Accumulated artifacts: the ids of every step that produced something, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artifacts {
  pub produced: Vec<String>,
}

impl Artifacts {
  pub fn seeded(items: &[&str]) -> Self {
    Self {
      produced: items.iter().map(|s| s.to_string()).collect(),
    }
  }

  pub fn has(&self, id: &str) -> bool {
    self.produced.iter().any(|p| p == id)
  }

  /// New snapshot with `id` appended. `self` is left untouched.
  pub fn with(&self, id: &str) -> Self {
    let mut produced = self.produced.clone();
    produced.push(id.to_string());
    Self { produced }
  }
}

// --- Common Steps ---

#[derive(Clone, Copy, Debug)]
pub enum Behaviour {
  Produce,
  /// Fails with a missing input unless the named artifact is already present.
  Requires(&'static str),
  /// Fails as if the wrapped tool exited with the given code.
  ToolFails(i32),
  /// Fails with an unclassified error.
  Errors(&'static str),
}

pub struct TestStep {
  id: &'static str,
  name: &'static str,
  behaviour: Behaviour,
}

#[async_trait]
impl Step<Artifacts> for TestStep {
  fn id(&self) -> &str {
    self.id
  }

  fn name(&self) -> &str {
    self.name
  }

  async fn run(&self, state: &Artifacts) -> Result<Artifacts, StepError> {
    RUN_LOG.lock().push(self.id.to_string());
    tracing::debug!(target: "test_steps", step = self.id, "running with {:?}", state.produced);
    match self.behaviour {
      Behaviour::Produce => Ok(state.with(self.id)),
      Behaviour::Requires(needed) => {
        if state.has(needed) {
          Ok(state.with(self.id))
        } else {
          Err(StepError::missing_input(format!(
            "{}: required input '{}' was never produced",
            self.id, needed
          )))
        }
      }
      Behaviour::ToolFails(code) => Err(StepError::tool_failure(format!("{} --run", self.id.to_lowercase()), Some(code))),
      Behaviour::Errors(msg) => Err(anyhow::anyhow!(msg).into()),
    }
  }
}

pub fn step_def(id: &'static str, name: &'static str, behaviour: Behaviour) -> StepDef<Artifacts> {
  StepDef::new(id, name, move || {
    INSTANCE_COUNTER.fetch_add(1, Ordering::SeqCst);
    Box::new(TestStep { id, name, behaviour }) as Box<dyn Step<Artifacts>>
  })
}

pub fn producer(id: &'static str) -> StepDef<Artifacts> {
  step_def(id, id, Behaviour::Produce)
}

/// Synthesis -> Placement -> Routing, each producing an artifact named after itself.
pub fn physical_flow() -> SequentialFlow<Artifacts> {
  SequentialFlow::new(
    "Physical",
    vec![producer("Synthesis"), producer("Placement"), producer("Routing")],
  )
}

/// Same shape as `physical_flow`, but each stage requires the previous one's artifact.
pub fn dependent_flow() -> SequentialFlow<Artifacts> {
  SequentialFlow::new(
    "Dependent",
    vec![
      step_def("Synthesis", "Yosys Synthesis", Behaviour::Produce),
      step_def("Placement", "Global Placement", Behaviour::Requires("Synthesis")),
      step_def("Routing", "Detailed Routing", Behaviour::Requires("Placement")),
    ],
  )
}

// --- Recording progress tracker ---

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
  MaxStageCount(usize),
  Start(String),
  End { advance: bool },
}

#[derive(Debug, Default)]
pub struct RecordingProgress {
  events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
  pub fn events(&self) -> Vec<ProgressEvent> {
    self.events.lock().clone()
  }
}

impl ProgressTracker for RecordingProgress {
  fn set_max_stage_count(&self, count: usize) {
    self.events.lock().push(ProgressEvent::MaxStageCount(count));
  }

  fn start_stage(&self, name: &str) {
    self.events.lock().push(ProgressEvent::Start(name.to_string()));
  }

  fn end_stage(&self, advance_ordinal: bool) {
    self.events.lock().push(ProgressEvent::End { advance: advance_ordinal });
  }
}

pub fn recording() -> Arc<RecordingProgress> {
  Arc::new(RecordingProgress::default())
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Shared counters; tests reading them must be #[serial] ---
pub static INSTANCE_COUNTER: Lazy<AtomicUsize> = Lazy::new(|| AtomicUsize::new(0));
pub static RUN_LOG: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn reset_counters() {
  INSTANCE_COUNTER.store(0, Ordering::SeqCst);
  RUN_LOG.lock().clear();
}

pub fn instances_created() -> usize {
  INSTANCE_COUNTER.load(Ordering::SeqCst)
}

pub fn run_log() -> Vec<String> {
  RUN_LOG.lock().clone()
}
