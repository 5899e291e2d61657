pub mod control;
pub mod step;

// Re-export key types for easier access from other modules (and lib.rs)
pub use control::{FlowRun, RunWindow};
pub use step::{Step, StepDef, StepFactory};
