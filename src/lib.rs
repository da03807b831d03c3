//! Stepchain - Linear Step Machine
//!
//! An embeddable engine for running an ordered sequence of named steps
//! that share a mutable context, with checkpoint/resume support. Hosts
//! supply the step actions; the machine drives them in order, short-
//! circuits on the first error, and exposes its state so the host can
//! persist a checkpoint and later resume from an arbitrary step.
//!
//! # Architecture
//!
//! The library is organized into two modules:
//!
//! - [`chain`]: the Step record pairing an id with a unit of work
//! - [`execution`]: the Machine, shared context, checkpoints and errors
//!
//! # Example
//!
//! ```rust
//! use stepchain::{Machine, Step};
//!
//! fn main() -> Result<(), stepchain::MachineError> {
//!     let mut machine = Machine::new(
//!         "provision",
//!         vec![
//!             Step::new("allocate", |ctx| {
//!                 ctx.set("region", "eu-west-1");
//!                 Ok(())
//!             }),
//!             Step::new("verify", |ctx| {
//!                 let allocated = ctx.is_set("region");
//!                 ctx.set("verified", allocated);
//!                 Ok(())
//!             }),
//!         ],
//!     );
//!
//!     // Observe progress without affecting it.
//!     machine.on_step_change(|step, next| {
//!         println!("{} -> {:?}", step.id(), next.map(|n| n.id()));
//!     });
//!
//!     let last = machine.run()?;
//!     assert_eq!(last.map(|s| s.id()), Some("verify"));
//!     Ok(())
//! }
//! ```
//!
//! # Checkpoint & resume
//!
//! Resume is jump-based: [`Machine::set_step`] moves the cursor and
//! [`Machine::set_values`] primes the context, then `run` continues from
//! there. Skipped steps never re-execute, so the supplied values must
//! contain everything those steps would have produced - typically the
//! `values()` snapshot the host captured alongside the failing step's id
//! after a previous run.

pub mod chain;
pub mod execution;

// Re-export commonly used types
pub use chain::step::{Step, StepAction, StepError};
pub use execution::checkpoint::Checkpoint;
pub use execution::context::Context;
pub use execution::error::MachineError;
pub use execution::machine::Machine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
