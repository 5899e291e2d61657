// seqflow/src/pipeline/definition.rs

//! Contains the `SequentialFlow<S>` struct definition and its construction.

use crate::core::control::RunWindow;
use crate::core::step::StepDef;
use crate::error::{FlowError, FlowResult};

/// Display name given to flows assembled from a list of step ids.
pub const CUSTOM_FLOW_NAME: &str = "Custom Sequential Flow";

/// An ordered list of step definitions run one after another, with nothing in parallel.
///
/// `S` is the state type threaded from step to step. A flow is plain data:
/// it holds no per-run state, so one flow can back any number of runs.
pub struct SequentialFlow<S: Send + Sync + 'static> {
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<S>>,
}

impl<S: Send + Sync + 'static> SequentialFlow<S> {
  /// Creates a flow from a fixed step list.
  pub fn new(name: impl Into<String>, steps: Vec<StepDef<S>>) -> Self {
    Self {
      name: name.into(),
      steps,
    }
  }

  /// Flow built at runtime rather than declared up front.
  pub(crate) fn custom(steps: Vec<StepDef<S>>) -> Self {
    Self::new(CUSTOM_FLOW_NAME, steps)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn steps(&self) -> &[StepDef<S>] {
    &self.steps
  }

  pub fn step_ids(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.id()).collect()
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Strict check that both window boundaries name a step in this flow.
  ///
  /// `run` does not call this; an unmatched `from` there silently runs nothing.
  pub fn validate_window(&self, window: &RunWindow) -> FlowResult<()> {
    for id in [window.from.as_deref(), window.to.as_deref()].into_iter().flatten() {
      if !self.steps.iter().any(|s| s.id() == id) {
        return Err(FlowError::WindowStepNotFound {
          flow: self.name.clone(),
          step_id: id.to_string(),
        });
      }
    }
    Ok(())
  }
}

impl<S: Send + Sync + 'static> Clone for SequentialFlow<S> {
  fn clone(&self) -> Self {
    Self {
      name: self.name.clone(),
      steps: self.steps.clone(),
    }
  }
}

impl<S: Send + Sync + 'static> std::fmt::Debug for SequentialFlow<S> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SequentialFlow")
      .field("name", &self.name)
      .field("steps", &self.steps)
      .finish()
  }
}
