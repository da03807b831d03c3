//! Step Chain Module
//!
//! Provides the building block of a machine: the [`Step`] record pairing
//! an identifier with a unit of work.
//!
//! # Structure
//!
//! - [`step`]: the Step record and its action/error types

pub mod step;

pub use step::{Step, StepAction, StepError};
