//! The `Controller` struct and its step loop.

use cs_core::{HandoverConfig, Step, StepClock, UserId};
use cs_handover::{CapacityLedger, ConnectionEvent, ConnectionState, evaluate_user};
use cs_signal::SignalSource;
use tracing::{debug, info, trace};

use crate::{ControllerBuilder, MetricsAggregator, MetricsSeries, SimResult, StepObserver, StepResult};

/// The handover & admission controller.
///
/// `Controller<S>` owns every user's connection state and drives the step
/// loop over a [`SignalSource`]:
///
/// 1. **Snapshot**: fetch and check the step's RSSI matrix.
/// 2. **Ledger**: create a [`CapacityLedger`] with every tower at zero.
/// 3. **Users** (sequential, ascending `UserId`): run
///    [`evaluate_user`] against the ledger, collect events.
/// 4. **Record**: append the [`StepResult`]; notify observers.
///
/// Create via [`ControllerBuilder`] or [`Controller::builder`].
pub struct Controller<S: SignalSource> {
    /// Step counter and step-to-seconds mapping.
    pub(crate) clock: StepClock,

    /// The RSSI provider.  Validated in full by the builder.
    pub(crate) source: S,

    /// Run configuration, immutable for the run.
    pub(crate) config: HandoverConfig,

    /// Resolved per-tower capacity, indexed by `TowerId`.
    pub(crate) capacity: Vec<u32>,

    /// Per-user connection state, indexed by `UserId`.
    pub(crate) states: Vec<ConnectionState>,

    pub(crate) metrics: MetricsAggregator,
}

impl<S: SignalSource> Controller<S> {
    /// Shorthand for [`ControllerBuilder::new`].
    pub fn builder(source: S, config: HandoverConfig) -> ControllerBuilder<S> {
        ControllerBuilder::new(source, config)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &HandoverConfig {
        &self.config
    }

    /// Per-tower capacity after resolving `Unlimited` / `Uniform`.
    #[inline]
    pub fn capacity(&self) -> &[u32] {
        &self.capacity
    }

    /// Every user's state after the last completed step.
    #[inline]
    pub fn connections(&self) -> &[ConnectionState] {
        &self.states
    }

    /// The next step to run.
    #[inline]
    pub fn current_step(&self) -> Step {
        self.clock.current_step
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.clock.current_step.index() >= self.source.step_count()
    }

    /// Results recorded so far.  Use the value returned by
    /// [`run`][Self::run] for the finished series.
    #[inline]
    pub fn metrics(&self) -> &MetricsSeries {
        self.metrics.series()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run every remaining step and return the complete metrics series.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// On error the run stops and nothing is returned but the error.
    pub fn run<O: StepObserver>(&mut self, observer: &mut O) -> SimResult<MetricsSeries> {
        info!(
            from  = %self.clock.current_step,
            steps = self.source.step_count(),
            "run started"
        );
        while self.step_once(observer)?.is_some() {}

        let series = self.metrics.series().clone();
        observer.on_run_end(&series);
        info!(
            steps      = series.len(),
            handovers  = series.total_handovers(),
            ping_pongs = series.ping_pongs(),
            mean_dropped = series.mean_dropped(),
            "run finished"
        );
        Ok(series)
    }

    /// Run a single step.  Returns `Ok(None)` once the source is exhausted.
    ///
    /// Useful for tests and incremental stepping.
    pub fn step_once<O: StepObserver>(&mut self, observer: &mut O) -> SimResult<Option<StepResult>> {
        if self.is_finished() {
            return Ok(None);
        }
        let step = self.clock.current_step;
        observer.on_step_start(step);

        let result = self.process_step(step, observer)?;
        observer.on_step_end(&result);
        self.metrics.push(result.clone());
        self.clock.advance();
        Ok(Some(result))
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step<O: StepObserver>(&mut self, step: Step, observer: &mut O) -> SimResult<StepResult> {
        let snapshot = self.source.snapshot(step)?;
        snapshot.validate(self.states.len(), self.capacity.len())?;

        let mut ledger = CapacityLedger::new(&self.capacity);
        let mut handovers = 0u32;
        let mut dropped = 0u32;

        // Ascending UserId: the ledger makes user u depend on users 0..u.
        for (i, state) in self.states.iter_mut().enumerate() {
            let user = UserId(i as u32);
            let (next, contribution) = evaluate_user(*state, snapshot.row(user), &mut ledger, &self.config);
            *state = next;

            if contribution.handover {
                handovers += 1;
            }
            if contribution.dropped() {
                dropped += 1;
            }
            if let Some(event) = contribution.event {
                match event {
                    ConnectionEvent::HandoverDeferred { from, target } => {
                        debug!(%step, %user, %from, %target, "handover deferred: target full");
                    }
                    ConnectionEvent::AdmissionRefused { tower } | ConnectionEvent::SlotLost { tower } => {
                        debug!(%step, %user, %tower, kind = event.kind(), "capacity rejection");
                    }
                    _ => trace!(%step, %user, kind = event.kind(), "connection event"),
                }
                self.metrics.record_event(step, user, &event);
                observer.on_event(step, user, &event);
            }
        }

        let result = StepResult {
            step,
            time_secs: self.clock.secs_at(step),
            handovers,
            dropped,
            load: ledger.into_loads(),
        };
        debug!(%step, handovers, dropped, load = ?result.load, "step complete");
        Ok(result)
    }
}
