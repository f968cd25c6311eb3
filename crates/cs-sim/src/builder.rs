//! Fluent builder for constructing a [`Controller`].

use cs_core::{HandoverConfig, StepClock};
use cs_handover::ConnectionState;
use cs_signal::SignalSource;
use tracing::info;

use crate::metrics::DEFAULT_PING_PONG_WINDOW;
use crate::{Controller, MetricsAggregator, SimError, SimResult};

/// Fluent builder for [`Controller<S>`].
///
/// # Required inputs
///
/// - `S: SignalSource` — the RSSI series (e.g. a [`cs_signal::RssiSeries`]
///   or a reference to one)
/// - [`HandoverConfig`] — margin, time-to-trigger, floor, capacity
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default |
/// |----------------------------|---------|
/// | `.ping_pong_window(n)`     | 5 steps |
/// | `.step_duration_secs(d)`   | 1.0     |
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = ControllerBuilder::new(&rssi, HandoverConfig::default())
///     .ping_pong_window(10)
///     .build()?;
/// let metrics = controller.run(&mut NoopObserver)?;
/// ```
pub struct ControllerBuilder<S: SignalSource> {
    source:             S,
    config:             HandoverConfig,
    ping_pong_window:   u64,
    step_duration_secs: f64,
}

impl<S: SignalSource> ControllerBuilder<S> {
    /// Create a builder with all required inputs.
    pub fn new(source: S, config: HandoverConfig) -> Self {
        Self {
            source,
            config,
            ping_pong_window:   DEFAULT_PING_PONG_WINDOW,
            step_duration_secs: 1.0,
        }
    }

    /// A handover that reverses the same user's previous handover within
    /// this many steps counts as a ping-pong.
    pub fn ping_pong_window(mut self, steps: u64) -> Self {
        self.ping_pong_window = steps;
        self
    }

    /// Simulated seconds per step; only affects reported times.
    pub fn step_duration_secs(mut self, secs: f64) -> Self {
        self.step_duration_secs = secs;
        self
    }

    /// Validate the configuration and every snapshot of the source, and
    /// return a ready-to-run [`Controller`] with every user unserved.
    pub fn build(self) -> SimResult<Controller<S>> {
        // ── Configuration ─────────────────────────────────────────────────
        if !(self.step_duration_secs.is_finite() && self.step_duration_secs > 0.0) {
            return Err(SimError::InvalidParam {
                name:   "step_duration_secs",
                reason: format!("must be positive, got {}", self.step_duration_secs),
            });
        }
        let capacity = self.config.resolve_capacities(self.source.tower_count())?;

        // ── Input ─────────────────────────────────────────────────────────
        //
        // Checked in full up front so a bad sample fails the run before any
        // step executes.
        self.source.validate()?;

        let users  = self.source.user_count();
        let towers = self.source.tower_count();
        info!(
            steps  = self.source.step_count(),
            users,
            towers,
            margin_db = self.config.hysteresis_margin_db,
            ttt = self.config.time_to_trigger_steps,
            floor_dbm = self.config.min_sensitivity_dbm,
            "controller ready"
        );

        Ok(Controller {
            clock:   StepClock::new(self.step_duration_secs),
            states:  vec![ConnectionState::Unserved; users],
            metrics: MetricsAggregator::new(users, towers, self.ping_pong_window),
            source:  self.source,
            config:  self.config,
            capacity,
        })
    }
}
