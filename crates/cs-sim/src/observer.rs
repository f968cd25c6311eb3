//! Controller observer trait for progress reporting and data collection.

use cs_core::{Step, UserId};
use cs_handover::ConnectionEvent;

use crate::{MetricsSeries, StepResult};

/// Callbacks invoked by [`Controller::run`][crate::Controller::run] at key
/// points in the step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl StepObserver for ProgressPrinter {
///     fn on_step_end(&mut self, result: &StepResult) {
///         if result.step.0 % self.interval == 0 {
///             println!("{}: {} dropped", result.step, result.dropped);
///         }
///     }
/// }
/// ```
pub trait StepObserver {
    /// Called at the very start of each step, before any user is evaluated.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called for every connection event, in user order within a step.
    fn on_event(&mut self, _step: Step, _user: UserId, _event: &ConnectionEvent) {}

    /// Called once the step's result has been recorded.
    fn on_step_end(&mut self, _result: &StepResult) {}

    /// Called once after the final step completes.  Not called when the run
    /// fails.
    fn on_run_end(&mut self, _metrics: &MetricsSeries) {}
}

/// A [`StepObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
