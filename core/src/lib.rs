// src/lib.rs

//! seqflow: a strictly sequential step executor for tool-chain automation flows.
//!
//! A flow is an ordered list of named steps. Running it threads an immutable
//! state from step to step:
//!  - Steps run one at a time, in order, never in parallel.
//!  - An optional inclusive `[from, to]` window limits which steps actually run.
//!  - Failures are classified into recoverable input errors and fatal execution errors.
//!  - Progress is reported per stage through a pluggable tracker.
//!  - Flows can be declared statically or assembled from step ids via a registry.

pub mod core;
pub mod pipeline;
pub mod progress;
pub mod registry;
pub mod error;

// --- Re-exports for the Public API ---

pub use crate::core::control::{FlowRun, RunWindow};
pub use crate::core::step::{Step, StepDef, StepFactory};

pub use crate::pipeline::definition::{SequentialFlow, CUSTOM_FLOW_NAME};

pub use crate::progress::{ProgressState, ProgressTracker, StageProgress};

pub use crate::error::{FlowError, FlowErrorKind, FlowResult, StepError};

pub use crate::registry::StepRegistry;

/*
    Typical use:
    1. Pick a state type `S` (immutable snapshot of accumulated artifacts).
    2. Implement `Step<S>` for each unit of work; `run` returns a new `S`.
    3. Either declare `SequentialFlow::new("My Flow", vec![StepDef::of::<A>(), ...])`,
       or register definitions in a `StepRegistry<S>` and call `build_flow(["a", "b"])`.
    4. `flow.run(initial, &RunWindow::full().from_step("b")).await` returns every
       state produced plus the executed step instances.
    5. To observe progress, pass a tracker per run:
       `flow.run_with_progress(initial, &window, &StageProgress::new()).await`.
    See `core/examples/` for runnable versions.
*/
