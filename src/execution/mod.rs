//! Execution module.
//!
//! Runs the per-pixel pass over whole buffers and drives edit sessions.

pub mod engine;
pub mod session;
pub mod stats;

pub use engine::{compose_pixel, Composition, ExecutionOptions, PipelineOutput, PipelineRunner};
pub use session::{EditSession, InputOverlay, Rendered};
pub use stats::AggregateStats;
