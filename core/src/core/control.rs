// seqflow/src/core/control.rs

//! Defines the execution window controlling which steps run, and the outcome of a flow run.

use crate::core::step::Step;

/// Inclusive `[from, to]` range of step ids eligible to run.
///
/// An unset `from` enables execution from the first step; an unset `to`
/// keeps it enabled through the last one. Ids are not checked against the
/// flow: a `from` that never matches means nothing runs. Use
/// `SequentialFlow::validate_window` for a strict check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunWindow {
  pub from: Option<String>,
  pub to: Option<String>,
}

impl RunWindow {
  /// Window covering the whole flow.
  pub fn full() -> Self {
    Self::default()
  }

  pub fn from_step(mut self, id: impl Into<String>) -> Self {
    self.from = Some(id.into());
    self
  }

  pub fn to_step(mut self, id: impl Into<String>) -> Self {
    self.to = Some(id.into());
    self
  }

  pub(crate) fn starts_at(&self, id: &str) -> bool {
    self.from.as_deref() == Some(id)
  }

  pub(crate) fn ends_at(&self, id: &str) -> bool {
    self.to.as_deref() == Some(id)
  }
}

/// Full trace of a completed run.
///
/// `states()[0]` is the caller's initial state and `states().len() == executed().len() + 1`.
pub struct FlowRun<S: Send + Sync + 'static> {
  states: Vec<S>,
  executed: Vec<Box<dyn Step<S>>>,
  // Definition ids of `executed`, in the same order.
  executed_ids: Vec<String>,
}

impl<S: Send + Sync + 'static> FlowRun<S> {
  pub(crate) fn new(initial_state: S) -> Self {
    Self {
      states: vec![initial_state],
      executed: Vec::new(),
      executed_ids: Vec::new(),
    }
  }

  pub(crate) fn push(&mut self, id: &str, step: Box<dyn Step<S>>, state: S) {
    self.executed_ids.push(id.to_string());
    self.executed.push(step);
    self.states.push(state);
  }

  pub fn states(&self) -> &[S] {
    &self.states
  }

  pub fn executed(&self) -> &[Box<dyn Step<S>>] {
    &self.executed
  }

  /// The most recent state; the initial one if nothing executed.
  pub fn final_state(&self) -> &S {
    self
      .states
      .last()
      .expect("a run trace always holds the initial state")
  }

  /// Definition ids of the executed steps, in run order.
  pub fn executed_ids(&self) -> Vec<&str> {
    self.executed_ids.iter().map(String::as_str).collect()
  }

  pub fn into_parts(self) -> (Vec<S>, Vec<Box<dyn Step<S>>>) {
    (self.states, self.executed)
  }
}

impl<S: Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for FlowRun<S> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FlowRun")
      .field("states", &self.states)
      .field("executed", &self.executed_ids)
      .finish()
  }
}
