//! Chain Step
//!
//! A step is the unit of work in a machine: an identifier plus a stored
//! action invoked against the shared execution context. Steps are handed
//! to [`Machine::new`](crate::Machine::new) in order; the machine owns the
//! resulting chain and the successor of a step is simply the next one in
//! the sequence.

use std::error::Error;
use std::fmt;

use crate::execution::context::Context;

/// Error type returned by step actions.
///
/// The machine propagates it verbatim: no wrapping, no classification.
pub type StepError = Box<dyn Error + Send + Sync>;

/// The unit of work stored in a step.
///
/// Actions receive the machine's shared [`Context`] and report failure by
/// returning an error, which halts the run.
pub type StepAction = Box<dyn FnMut(&mut Context) -> Result<(), StepError>>;

/// A named unit of work in a chain.
///
/// Step ids are intended to be unique within a chain so that
/// [`Machine::set_step`](crate::Machine::set_step) can locate them;
/// uniqueness is the caller's responsibility and is not enforced.
///
/// # Example
///
/// ```
/// use stepchain::Step;
///
/// let step = Step::new("fetch", |ctx| {
///     ctx.set("payload", "hello");
///     Ok(())
/// });
/// assert_eq!(step.id(), "fetch");
/// ```
pub struct Step {
    id: String,
    action: StepAction,
}

impl Step {
    /// Creates a new step with the given identifier and action.
    pub fn new(
        id: impl Into<String>,
        action: impl FnMut(&mut Context) -> Result<(), StepError> + 'static,
    ) -> Self {
        Self {
            id: id.into().trim().to_string(),
            action: Box::new(action),
        }
    }

    /// Returns the step identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Invokes the action against the shared context.
    ///
    /// The action's error is returned verbatim.
    pub fn run(&mut self, ctx: &mut Context) -> Result<(), StepError> {
        (self.action)(ctx)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_id() {
        let step = Step::new("align", |_| Ok(()));
        assert_eq!(step.id(), "align");
    }

    #[test]
    fn test_step_id_trimmed() {
        let step = Step::new("  align  ", |_| Ok(()));
        assert_eq!(step.id(), "align");
    }

    #[test]
    fn test_step_run_invokes_action() {
        let mut step = Step::new("write", |ctx| {
            ctx.set("ran", true);
            Ok(())
        });

        let mut ctx = Context::new();
        assert!(step.run(&mut ctx).is_ok());
        assert_eq!(ctx.get("ran"), Some(&serde_json::Value::Bool(true)));
    }

    #[test]
    fn test_step_run_propagates_error_verbatim() {
        #[derive(Debug)]
        struct BoomError;

        impl fmt::Display for BoomError {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "boom")
            }
        }

        impl Error for BoomError {}

        let mut step = Step::new("explode", |_| Err(Box::new(BoomError) as StepError));

        let mut ctx = Context::new();
        let err = step.run(&mut ctx).unwrap_err();
        assert!(err.downcast_ref::<BoomError>().is_some());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_step_action_can_mutate_captured_state() {
        let mut calls = 0;
        let mut step = Step::new("count", move |ctx| {
            calls += 1;
            ctx.set("calls", calls);
            Ok(())
        });

        let mut ctx = Context::new();
        step.run(&mut ctx).unwrap();
        step.run(&mut ctx).unwrap();
        assert_eq!(ctx.get("calls"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_step_debug_shows_id() {
        let step = Step::new("debugged", |_| Ok(()));
        let rendered = format!("{:?}", step);
        assert!(rendered.contains("debugged"));
    }
}
