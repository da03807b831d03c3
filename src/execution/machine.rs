//! Step Machine
//!
//! The machine owns the ordered chain of steps, the shared context, the
//! resume cursor and the observability hook slots, and drives the run
//! loop. Execution is fully synchronous: [`Machine::run`] walks the chain
//! from the cursor, invoking each step's action against the context, and
//! halts on the first error or at the end of the chain.
//!
//! Checkpoint/resume is jump-based: [`Machine::set_step`] moves the cursor
//! and [`Machine::set_values`] primes the context; skipped steps are never
//! re-executed, so the supplied values must already contain everything
//! those steps would have produced.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use log::{debug, error, info};
use serde_json::Value;

use crate::chain::step::Step;

use super::checkpoint::Checkpoint;
use super::context::Context;
use super::error::MachineError;

/// Callback fired once per successful step transition.
///
/// Receives the completed step and its successor; the successor is `None`
/// on the terminal transition.
pub type StepChangeFn = Box<dyn FnMut(&Step, Option<&Step>)>;

/// Callback fired when a step's action returns an error.
///
/// Receives the failing step and the error it returned.
pub type StepErrorFn = Box<dyn FnMut(&Step, &(dyn Error + Send + Sync))>;

/// The stateful driver for a chain of steps.
///
/// # Example
///
/// ```
/// use stepchain::{Machine, Step};
///
/// # fn main() -> Result<(), stepchain::MachineError> {
/// let mut machine = Machine::new(
///     "setup",
///     vec![
///         Step::new("fetch", |ctx| {
///             ctx.set("payload", "hello");
///             Ok(())
///         }),
///         Step::new("store", |ctx| {
///             let present = ctx.is_set("payload");
///             ctx.set("stored", present);
///             Ok(())
///         }),
///     ],
/// );
///
/// let last = machine.run()?;
/// assert_eq!(last.map(|s| s.id()), Some("store"));
/// # Ok(())
/// # }
/// ```
pub struct Machine {
    name: String,
    steps: Vec<Step>,
    cursor: usize,
    context: Context,
    on_step_change: Option<StepChangeFn>,
    on_step_error: Option<StepErrorFn>,
}

impl Machine {
    /// Creates a machine that chains `steps` in the given order.
    ///
    /// Zero steps is legal and yields a machine whose runs complete
    /// immediately.
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
            cursor: 0,
            context: Context::new(),
            on_step_change: None,
            on_step_error: None,
        }
    }

    /// Returns the machine's diagnostic label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of steps in the chain.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the chain has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Looks up a step by id.
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id() == id)
    }

    /// The step the next run will begin at, if any.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    /// Registers the step-change hook, replacing any previous one.
    ///
    /// Fired once per successful transition, including the terminal
    /// `(last_step, None)` transition. The hook is an observer only; it
    /// cannot alter the run.
    pub fn on_step_change(&mut self, hook: impl FnMut(&Step, Option<&Step>) + 'static) {
        self.on_step_change = Some(Box::new(hook));
    }

    /// Registers the step-error hook, replacing any previous one.
    ///
    /// Fired exactly once, only when a step's action returns an error,
    /// strictly before `run` returns.
    pub fn on_step_error(&mut self, hook: impl FnMut(&Step, &(dyn Error + Send + Sync)) + 'static) {
        self.on_step_error = Some(Box::new(hook));
    }

    /// Reads a context value; absent keys yield `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Writes or overwrites a context value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.context.set(key, value);
    }

    /// True iff `key` has ever been written, regardless of its value.
    pub fn is_set(&self, key: &str) -> bool {
        self.context.is_set(key)
    }

    /// Read view of the full context.
    pub fn values(&self) -> &HashMap<String, Value> {
        self.context.values()
    }

    /// Replaces the context wholesale; an empty map is a no-op.
    pub fn set_values(&mut self, values: HashMap<String, Value>) {
        self.context.set_values(values);
    }

    /// Moves the resume cursor to the step with the given id.
    ///
    /// The scan always starts from the original head of the chain, not the
    /// current cursor, so jumping backwards is as valid as jumping
    /// forwards. An unknown id returns [`MachineError::StepNotFound`] and
    /// leaves the cursor unchanged.
    pub fn set_step(&mut self, id: &str) -> Result<(), MachineError> {
        match self.steps.iter().position(|s| s.id() == id) {
            Some(idx) => {
                debug!("Machine '{}': cursor moved to step '{}'", self.name, id);
                self.cursor = idx;
                Ok(())
            }
            None => Err(MachineError::StepNotFound(id.to_string())),
        }
    }

    /// Primes the machine from a checkpoint: moves the cursor to `id`,
    /// then replaces the context with `values`.
    ///
    /// Does **not** run the machine; call [`Machine::run`] separately once
    /// the primed state has been inspected. An empty `values` map leaves
    /// the current context intact, and an unknown id fails without
    /// touching cursor or context.
    ///
    /// Resume is jump-based: steps before the cursor never re-execute, so
    /// `values` must carry everything they would have produced.
    pub fn resume(&mut self, id: &str, values: HashMap<String, Value>) -> Result<(), MachineError> {
        self.set_step(id)?;
        self.set_values(values);
        info!("Machine '{}' primed to resume at step '{}'", self.name, id);
        Ok(())
    }

    /// Captures a checkpoint pairing `step_id` with a snapshot of the
    /// current context values.
    ///
    /// The id is supplied by the host (typically the failing step's id
    /// from a previous run's error); it is not validated here, only when
    /// the checkpoint is restored.
    pub fn checkpoint(&self, step_id: impl Into<String>) -> Checkpoint {
        Checkpoint::new(step_id, self.context.values().clone())
    }

    /// Primes the machine from a previously captured checkpoint.
    ///
    /// Equivalent to `resume(&checkpoint.step_id, checkpoint.values)`.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<(), MachineError> {
        self.resume(&checkpoint.step_id, checkpoint.values)
    }

    /// Runs the chain from the cursor until it completes or a step fails.
    ///
    /// Returns the last executed step on success, or `None` when the chain
    /// is empty. On failure, returns [`MachineError::StepFailed`] carrying
    /// the failing step's id and the action's error verbatim; no further
    /// steps execute.
    ///
    /// The stored cursor is not advanced: calling `run` again re-runs from
    /// the same entry point.
    pub fn run(&mut self) -> Result<Option<&Step>, MachineError> {
        if self.cursor >= self.steps.len() {
            debug!("Machine '{}' has no entry step - nothing to run", self.name);
            return Ok(None);
        }

        info!(
            "Machine '{}' starting at step '{}'",
            self.name,
            self.steps[self.cursor].id()
        );

        let mut idx = self.cursor;
        loop {
            debug!("Starting step: {}", self.steps[idx].id());

            if let Err(e) = self.steps[idx].run(&mut self.context) {
                let step = &self.steps[idx];
                error!("Step '{}' failed: {}", step.id(), e);

                if let Some(hook) = self.on_step_error.as_mut() {
                    hook(step, e.as_ref());
                }

                return Err(MachineError::StepFailed {
                    step_id: step.id().to_string(),
                    error: e,
                });
            }

            debug!("Step '{}' completed successfully", self.steps[idx].id());

            let next = self.steps.get(idx + 1);
            let step = &self.steps[idx];
            if let Some(hook) = self.on_step_change.as_mut() {
                hook(step, next);
            }

            if next.is_none() {
                info!("Machine '{}' completed at step '{}'", self.name, step.id());
                break;
            }

            idx += 1;
        }

        Ok(self.steps.get(idx))
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("steps", &self.steps)
            .field("cursor", &self.cursor)
            .field("context", &self.context)
            .finish()
    }
}
