//! Step results and the run-level metrics series.

use cs_core::{Step, TowerId, UserId};
use cs_handover::ConnectionEvent;

/// Default ping-pong window, in steps.
pub const DEFAULT_PING_PONG_WINDOW: u64 = 5;

// ── StepResult ────────────────────────────────────────────────────────────────

/// Totals for one step.  Immutable once recorded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    pub step:      Step,
    /// Simulated seconds at the start of the step.
    pub time_secs: f64,
    /// Completed handovers between two distinct towers.
    pub handovers: u32,
    /// Users unserved at the end of the step.
    pub dropped:   u32,
    /// Connected users per tower at the end of the step, indexed by `TowerId`.
    pub load:      Vec<u32>,
}

impl StepResult {
    /// Users connected to any tower at the end of the step.
    pub fn served(&self) -> u32 {
        self.load.iter().sum()
    }
}

// ── MetricsSeries ─────────────────────────────────────────────────────────────

/// The ordered, append-only record of a run: one [`StepResult`] per step plus
/// the ping-pong count.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSeries {
    tower_count: usize,
    steps:       Vec<StepResult>,
    ping_pongs:  u64,
}

impl MetricsSeries {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn tower_count(&self) -> usize {
        self.tower_count
    }

    /// Every step result, in step order.
    #[inline]
    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    pub fn get(&self, step: Step) -> Option<&StepResult> {
        self.steps.get(step.index())
    }

    /// Handovers over the whole run.
    pub fn total_handovers(&self) -> u64 {
        self.steps.iter().map(|s| s.handovers as u64).sum()
    }

    pub fn handovers_per_step(&self) -> Vec<u32> {
        self.steps.iter().map(|s| s.handovers).collect()
    }

    pub fn dropped_per_step(&self) -> Vec<u32> {
        self.steps.iter().map(|s| s.dropped).collect()
    }

    /// `[step][tower]` connected-user counts.
    pub fn load_per_step(&self) -> Vec<Vec<u32>> {
        self.steps.iter().map(|s| s.load.clone()).collect()
    }

    /// One tower's load over time.  Empty for an unknown tower.
    pub fn tower_load_series(&self, tower: TowerId) -> Vec<u32> {
        self.steps
            .iter()
            .filter_map(|s| s.load.get(tower.index()).copied())
            .collect()
    }

    /// Mean dropped users per step; 0.0 for an empty run.
    pub fn mean_dropped(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.steps.iter().map(|s| s.dropped as f64).sum::<f64>() / self.steps.len() as f64
    }

    /// Highest load each tower reached during the run.
    pub fn peak_loads(&self) -> Vec<u32> {
        let mut peak = vec![0; self.tower_count];
        for s in &self.steps {
            for (p, &l) in peak.iter_mut().zip(&s.load) {
                *p = (*p).max(l);
            }
        }
        peak
    }

    pub fn peak_load(&self, tower: TowerId) -> u32 {
        self.tower_load_series(tower).into_iter().max().unwrap_or(0)
    }

    /// Handovers that undid the same user's previous handover within the
    /// ping-pong window.
    #[inline]
    pub fn ping_pongs(&self) -> u64 {
        self.ping_pongs
    }
}

// ── MetricsAggregator ─────────────────────────────────────────────────────────

/// The last handover a user made: `(from, to, step)`.
type LastHandover = Option<(TowerId, TowerId, Step)>;

/// Accumulates step results and connection events into a [`MetricsSeries`].
///
/// Purely additive; it never influences decisions.
#[derive(Debug)]
pub struct MetricsAggregator {
    series: MetricsSeries,
    window: u64,
    last:   Vec<LastHandover>,
}

impl MetricsAggregator {
    /// An empty aggregator for `user_count` users and `tower_count` towers.
    /// A handover back within `ping_pong_window` steps counts as ping-pong.
    pub fn new(user_count: usize, tower_count: usize, ping_pong_window: u64) -> Self {
        Self {
            series: MetricsSeries { tower_count, ..MetricsSeries::default() },
            window: ping_pong_window,
            last:   vec![None; user_count],
        }
    }

    /// Feed one connection event.
    pub fn record_event(&mut self, step: Step, user: UserId, event: &ConnectionEvent) {
        let Some((from, to)) = event.handover() else {
            return;
        };
        let Some(last) = self.last.get_mut(user.index()) else {
            return;
        };
        if let Some((prev_from, prev_to, at)) = *last {
            if prev_from == to && prev_to == from && step.since(at) <= self.window {
                self.series.ping_pongs += 1;
            }
        }
        *last = Some((from, to, step));
    }

    /// Append one step's totals.
    pub fn push(&mut self, result: StepResult) {
        debug_assert_eq!(result.load.len(), self.series.tower_count);
        debug_assert_eq!(result.step.index(), self.series.steps.len());
        self.series.steps.push(result);
    }

    /// The series so far.
    #[inline]
    pub fn series(&self) -> &MetricsSeries {
        &self.series
    }

    pub fn finish(self) -> MetricsSeries {
        self.series
    }
}
