// seqflow/src/pipeline/execution.rs

//! Contains the `SequentialFlow::run()` method, which drives the flow's steps one
//! at a time inside the execution window and threads state between them.

use crate::core::control::{FlowRun, RunWindow};
use crate::error::{FlowError, FlowResult};
use crate::pipeline::definition::SequentialFlow;
use crate::progress::{ProgressTracker, StageProgress};
use tracing::{event, instrument, span, Instrument, Level};

impl<S> SequentialFlow<S>
where
  S: Send + Sync + 'static,
{
  /// Runs the flow starting from `initial_state`, reporting progress to a
  /// fresh `StageProgress` that only logs.
  ///
  /// See [`SequentialFlow::run_with_progress`].
  pub async fn run(&self, initial_state: S, window: &RunWindow) -> FlowResult<FlowRun<S>> {
    self.run_with_progress(initial_state, window, &StageProgress::new()).await
  }

  /// Runs the flow starting from `initial_state`.
  ///
  /// Every step definition is instantiated, but only steps inside `window` are
  /// run. Window boundaries match the definition ids and are both inclusive.
  /// Each executed step receives the most recent state and its result is
  /// appended to the trace.
  ///
  /// `progress` belongs to this run alone; concurrent runs of the same flow
  /// each need their own tracker.
  ///
  /// A step reporting a missing input aborts the run with `FlowError::Input`;
  /// a failed tool invocation aborts it with `FlowError::Execution`.
  #[instrument(
        name = "SequentialFlow::run",
        skip_all,
        fields(
            flow = %self.name,
            num_steps = self.steps.len(),
            from = ?window.from,
            to = ?window.to,
        ),
        err(Display)
    )]
  pub async fn run_with_progress(
    &self,
    initial_state: S,
    window: &RunWindow,
    progress: &dyn ProgressTracker,
  ) -> FlowResult<FlowRun<S>> {
    progress.set_max_stage_count(self.steps.len());

    let mut run = FlowRun::new(initial_state);

    event!(Level::INFO, "Starting…");

    let mut executing = window.from.is_none();

    for step_def in &self.steps {
      let step = step_def.instantiate();
      let step_id = step_def.id();
      if window.starts_at(step_id) {
        executing = true;
      }

      progress.start_stage(step_def.name());
      if !executing {
        event!(Level::INFO, step_id, "Skipping step '{}'…", step_def.name());
        progress.end_stage(false);
        continue;
      }

      let step_span = span!(
        Level::INFO,
        "flow_step",
        step_id,
        step_name = step_def.name(),
        state_index = run.states().len() - 1
      );
      let outcome = step.run(run.final_state()).instrument(step_span).await;

      let new_state = match outcome {
        Ok(new_state) => new_state,
        Err(step_err) => {
          let err = FlowError::from_step(step_id, step_err);
          event!(Level::ERROR, step_id, kind = ?err.kind(), error = %err, "Step failed, aborting flow.");
          return Err(err);
        }
      };

      run.push(step_id, step, new_state);
      progress.end_stage(true);

      if window.ends_at(step_id) {
        executing = false;
      }
    }

    event!(Level::INFO, executed = run.executed().len(), "Flow complete.");
    Ok(run)
  }
}
