// seqflow/src/core/step.rs

//! Defines the `Step<S>` trait and the `StepDef<S>` used to build flows.

use crate::error::StepError;
use async_trait::async_trait;
use std::sync::Arc;

/// A single unit of flow work.
///
/// A step reads the accumulated state it is handed and returns a *new* state
/// carrying its own contribution. It never mutates the input.
#[async_trait]
pub trait Step<S>: Send + Sync
where
  S: Send + Sync + 'static,
{
  /// Identifier this instance reports. Execution windows and registry lookup
  /// use the owning `StepDef`'s id, which `StepDef::of` takes from here.
  fn id(&self) -> &str;

  /// Human-readable name, used for progress display only.
  fn name(&self) -> &str {
    self.id()
  }

  /// Runs the step against `state`.
  ///
  /// Return `StepError::MissingInput` when a required upstream artifact is absent
  /// and `StepError::ToolInvocation` when the wrapped external tool fails.
  async fn run(&self, state: &S) -> Result<S, StepError>;
}

/// Builds a fresh step instance. Called once per definition per run.
pub type StepFactory<S> = Arc<dyn Fn() -> Box<dyn Step<S>> + Send + Sync + 'static>;

/// Identity plus constructor for a step.
///
/// The definition's id is the stable one: windows, registry keys and flow
/// errors all refer to it, whatever the built instance reports.
pub struct StepDef<S: Send + Sync + 'static> {
  id: String,
  name: String,
  factory: StepFactory<S>,
}

impl<S: Send + Sync + 'static> StepDef<S> {
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    factory: impl Fn() -> Box<dyn Step<S>> + Send + Sync + 'static,
  ) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      factory: Arc::new(factory),
    }
  }

  /// Definition for a step type that can be default-constructed.
  /// The id and name are read from a default-constructed instance.
  pub fn of<T>() -> Self
  where
    T: Step<S> + Default + 'static,
  {
    let sample = T::default();
    Self {
      id: sample.id().to_string(),
      name: sample.name().to_string(),
      factory: Arc::new(|| Box::new(T::default()) as Box<dyn Step<S>>),
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn instantiate(&self) -> Box<dyn Step<S>> {
    (self.factory)()
  }
}

impl<S: Send + Sync + 'static> Clone for StepDef<S> {
  fn clone(&self) -> Self {
    Self {
      id: self.id.clone(),
      name: self.name.clone(),
      factory: Arc::clone(&self.factory),
    }
  }
}

// The factory closure has no Debug impl.
impl<S: Send + Sync + 'static> std::fmt::Debug for StepDef<S> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("id", &self.id)
      .field("name", &self.name)
      .finish()
  }
}
