// seqflow/src/registry.rs

//! Defines `StepRegistry<S>`, an id-keyed lookup of step definitions used to
//! assemble flows from a list of step ids at runtime.

use crate::core::step::StepDef;
use crate::error::{FlowError, FlowResult};
use crate::pipeline::definition::SequentialFlow;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{event, instrument, Level};

/// Lookup from step id to step definition.
///
/// Populate it at start-up with one `register` call per step type, then share
/// it (e.g. behind an `Arc`) between any number of flow builds. Lookups only
/// take a read lock.
pub struct StepRegistry<S: Send + Sync + 'static> {
  steps: RwLock<HashMap<String, StepDef<S>>>,
}

impl<S: Send + Sync + 'static> StepRegistry<S> {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self {
      steps: RwLock::new(HashMap::new()),
    }
  }

  /// Registers a step definition under its id. Ids must be unique.
  pub fn register(&self, step: StepDef<S>) -> FlowResult<()> {
    let mut steps = self.steps.write();
    if steps.contains_key(step.id()) {
      event!(Level::ERROR, step_id = step.id(), "Step id already registered.");
      return Err(FlowError::DuplicateStep {
        step_id: step.id().to_string(),
      });
    }
    event!(Level::DEBUG, step_id = step.id(), step_name = step.name(), "Registering step.");
    steps.insert(step.id().to_string(), step);
    Ok(())
  }

  pub fn lookup(&self, id: &str) -> Option<StepDef<S>> {
    self.steps.read().get(id).cloned()
  }

  pub fn contains(&self, id: &str) -> bool {
    self.steps.read().contains_key(id)
  }

  /// Registered ids, sorted.
  pub fn ids(&self) -> Vec<String> {
    let mut ids: Vec<String> = self.steps.read().keys().cloned().collect();
    ids.sort();
    ids
  }

  pub fn len(&self) -> usize {
    self.steps.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.read().is_empty()
  }

  /// Assembles a flow running the given steps in order.
  ///
  /// Fails on the first id with no registered definition; no partial flow is built.
  #[instrument(name = "StepRegistry::build_flow", skip_all, fields(num_steps = tracing::field::Empty), err(Display))]
  pub fn build_flow<I, T>(&self, step_ids: I) -> FlowResult<SequentialFlow<S>>
  where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
  {
    let registered = self.steps.read();
    let mut step_list = Vec::new();
    for id in step_ids {
      let id = id.as_ref();
      match registered.get(id) {
        Some(step) => step_list.push(step.clone()),
        None => {
          event!(Level::ERROR, step_id = id, "No step registered with this id.");
          return Err(FlowError::UnknownStep { step_id: id.to_string() });
        }
      }
    }
    tracing::Span::current().record("num_steps", step_list.len());
    Ok(SequentialFlow::custom(step_list))
  }
}

impl<S: Send + Sync + 'static> Default for StepRegistry<S> {
  fn default() -> Self {
    Self::new()
  }
}
