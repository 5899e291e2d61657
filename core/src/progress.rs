// seqflow/src/progress.rs

//! Stage-level progress reporting for flow runs.
//!
//! The executor drives a [`ProgressTracker`] through one `start_stage` /
//! `end_stage` pair per step definition. Skipped steps close their stage
//! without advancing the ordinal, so observers see every step name pass by
//! while the counter only reflects work actually done.

use parking_lot::Mutex;
use tracing::{event, Level};

/// Observer of stage transitions. Purely observational: the executor never
/// reads anything back from it.
pub trait ProgressTracker: Send + Sync {
  /// Called once per run, before the first stage.
  fn set_max_stage_count(&self, count: usize);

  fn start_stage(&self, name: &str);

  /// Closes the open stage. `advance_ordinal` is false for skipped stages.
  fn end_stage(&self, advance_ordinal: bool);
}

/// Point-in-time view of a [`StageProgress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
  /// Ordinal the next executed stage will carry. Starts at 1.
  pub ordinal: usize,
  pub max_stage_count: usize,
  pub current_stage: Option<String>,
}

impl Default for ProgressState {
  fn default() -> Self {
    Self {
      ordinal: 1,
      max_stage_count: 0,
      current_stage: None,
    }
  }
}

impl ProgressState {
  /// Number of stages that have completed and counted toward progress.
  pub fn completed(&self) -> usize {
    self.ordinal.saturating_sub(1)
  }
}

/// Default tracker: keeps a [`ProgressState`] and logs each transition.
///
/// Safe to share; a UI can poll [`StageProgress::snapshot`] from another
/// thread while a flow runs.
#[derive(Debug, Default)]
pub struct StageProgress {
  state: Mutex<ProgressState>,
}

impl StageProgress {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn snapshot(&self) -> ProgressState {
    self.state.lock().clone()
  }
}

impl ProgressTracker for StageProgress {
  fn set_max_stage_count(&self, count: usize) {
    let mut state = self.state.lock();
    *state = ProgressState {
      max_stage_count: count,
      ..ProgressState::default()
    };
  }

  fn start_stage(&self, name: &str) {
    let mut state = self.state.lock();
    state.current_stage = Some(name.to_string());
    event!(
      Level::INFO,
      ordinal = state.ordinal,
      max = state.max_stage_count,
      "Stage {} - {}",
      state.ordinal,
      name
    );
  }

  fn end_stage(&self, advance_ordinal: bool) {
    let mut state = self.state.lock();
    let closed = state.current_stage.take();
    if advance_ordinal {
      state.ordinal += 1;
      event!(Level::DEBUG, stage = ?closed, completed = state.completed(), "Stage closed.");
    } else {
      event!(Level::DEBUG, stage = ?closed, "Stage closed without advancing.");
    }
  }
}
