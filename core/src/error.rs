// seqflow/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failure reported by a single step's `run`.
#[derive(Debug, Error)]
pub enum StepError {
  /// The step needs an artifact that is not present in the state it was handed,
  /// usually because the producing step was outside the execution window.
  #[error("{0}")]
  MissingInput(String),

  /// The external tool wrapped by the step exited unsuccessfully.
  #[error("{}", tool_failure_message(command, *exit_code))]
  ToolInvocation { command: String, exit_code: Option<i32> },

  /// Anything else a step wants to surface.
  #[error(transparent)]
  Other(#[from] AnyhowError),
}

fn tool_failure_message(command: &str, exit_code: Option<i32>) -> String {
  match exit_code {
    Some(code) => format!("Command '{}' returned non-zero exit status {}.", command, code),
    None => format!("Command '{}' was terminated before exiting.", command),
  }
}

impl StepError {
  pub fn missing_input(message: impl Into<String>) -> Self {
    StepError::MissingInput(message.into())
  }

  /// `exit_code` is `None` when the process was killed by a signal.
  pub fn tool_failure(command: impl Into<String>, exit_code: Option<i32>) -> Self {
    StepError::ToolInvocation {
      command: command.into(),
      exit_code,
    }
  }
}

/// Errors surfaced at the flow boundary.
#[derive(Debug, Error)]
pub enum FlowError {
  /// A step could not find a required prior artifact. User-fixable.
  #[error("{message}")]
  Input { step_id: String, message: String },

  /// A step's external tool invocation failed. Fatal for the run.
  #[error("{message}")]
  Execution { step_id: String, message: String },

  /// A step failed with an error outside the input/tool classification.
  #[error("Step '{step_id}' failed: {source}")]
  Step {
    step_id: String,
    #[source]
    source: AnyhowError,
  },

  #[error("No step found with id '{step_id}'")]
  UnknownStep { step_id: String },

  #[error("A step with id '{step_id}' is already registered")]
  DuplicateStep { step_id: String },

  #[error("Step '{step_id}' is not part of flow '{flow}'")]
  WindowStepNotFound { flow: String, step_id: String },
}

/// Coarse classification of a [`FlowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowErrorKind {
  /// Recoverable: fix the inputs or the execution window and run again.
  Input,
  /// Fatal: a step or its underlying tool failed while running.
  Execution,
  /// The flow could not be assembled; nothing ran.
  Configuration,
}

impl FlowError {
  /// Translates a step failure into the flow-level taxonomy.
  pub(crate) fn from_step(step_id: &str, err: StepError) -> Self {
    match err {
      StepError::MissingInput(message) => FlowError::Input {
        step_id: step_id.to_string(),
        message,
      },
      tool @ StepError::ToolInvocation { .. } => FlowError::Execution {
        step_id: step_id.to_string(),
        message: tool.to_string(),
      },
      StepError::Other(source) => FlowError::Step {
        step_id: step_id.to_string(),
        source,
      },
    }
  }

  pub fn kind(&self) -> FlowErrorKind {
    match self {
      FlowError::Input { .. } => FlowErrorKind::Input,
      FlowError::Execution { .. } | FlowError::Step { .. } => FlowErrorKind::Execution,
      FlowError::UnknownStep { .. } | FlowError::DuplicateStep { .. } | FlowError::WindowStepNotFound { .. } => {
        FlowErrorKind::Configuration
      }
    }
  }

  pub fn is_recoverable(&self) -> bool {
    self.kind() != FlowErrorKind::Execution
  }

  /// Id of the step that raised the error, if it came from a running step.
  pub fn step_id(&self) -> Option<&str> {
    match self {
      FlowError::Input { step_id, .. } | FlowError::Execution { step_id, .. } | FlowError::Step { step_id, .. } => {
        Some(step_id)
      }
      _ => None,
    }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;
