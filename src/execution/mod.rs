//! Execution Module
//!
//! Provides the stateful driver for a step chain: the run loop, the
//! shared context, and the checkpoint/resume protocol.
//!
//! # Architecture
//!
//! - [`machine`]: the Machine driving the run loop and cursor
//! - [`context`]: the shared key/value store step actions mutate
//! - [`checkpoint`]: the serializable (step id, values) snapshot
//! - [`error`]: machine error types

pub mod checkpoint;
pub mod context;
pub mod error;
pub mod machine;

pub use checkpoint::Checkpoint;
pub use context::Context;
pub use error::MachineError;
pub use machine::{Machine, StepChangeFn, StepErrorFn};
