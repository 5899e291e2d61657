// seqflow/src/pipeline/mod.rs

//! Defines the `SequentialFlow<S>` struct, its construction, and execution logic.

pub mod definition;
pub mod execution;

// Re-export the main flow struct
pub use definition::SequentialFlow;
