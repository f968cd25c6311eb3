//! `RssiSeries` — the fully materialised `[step][user][tower]` tensor.

use cs_core::{Step, TowerId, UserId};

use crate::{SignalError, SignalResult, SignalSnapshot, SignalSource};

/// Dense RSSI tensor, step-major then user then tower:
/// `values[(step * users + user) * towers + tower]`, in dBm.
///
/// Produced by [`compute_rssi`][crate::compute_rssi] or
/// [`load_rssi_csv`][crate::load_rssi_csv]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RssiSeries {
    step_count:  usize,
    user_count:  usize,
    tower_count: usize,
    values:      Vec<f64>,
}

impl RssiSeries {
    /// Wrap a flat buffer, checking its length against the shape.
    pub fn new(
        step_count:  usize,
        user_count:  usize,
        tower_count: usize,
        values:      Vec<f64>,
    ) -> SignalResult<Self> {
        let expected = step_count * user_count * tower_count;
        if values.len() != expected {
            return Err(SignalError::LengthMismatch {
                steps:  step_count,
                users:  user_count,
                towers: tower_count,
                expected,
                got:    values.len(),
            });
        }
        Ok(Self { step_count, user_count, tower_count, values })
    }

    /// Build from nested `[step][user][tower]` vectors, rejecting ragged
    /// input.  The shape is taken from the first step and its first user.
    pub fn from_nested(nested: Vec<Vec<Vec<f64>>>) -> SignalResult<Self> {
        let step_count  = nested.len();
        let user_count  = nested.first().map_or(0, Vec::len);
        let tower_count = nested
            .first()
            .and_then(|users| users.first())
            .map_or(0, Vec::len);

        let mut values = Vec::with_capacity(step_count * user_count * tower_count);
        for (t, users) in nested.into_iter().enumerate() {
            let step = Step(t as u64);
            if users.len() != user_count {
                return Err(SignalError::ShapeMismatch {
                    step,
                    what:     "user",
                    expected: user_count,
                    got:      users.len(),
                });
            }
            for (u, row) in users.into_iter().enumerate() {
                if row.len() != tower_count {
                    return Err(SignalError::RaggedRow {
                        step,
                        user:     UserId(u as u32),
                        expected: tower_count,
                        got:      row.len(),
                    });
                }
                values.extend(row);
            }
        }
        Self::new(step_count, user_count, tower_count, values)
    }

    /// Build by evaluating `f` for every cell.  Handy for synthetic fixtures.
    pub fn from_fn<F>(step_count: usize, user_count: usize, tower_count: usize, mut f: F) -> Self
    where
        F: FnMut(Step, UserId, TowerId) -> f64,
    {
        let mut values = Vec::with_capacity(step_count * user_count * tower_count);
        for t in 0..step_count {
            for u in 0..user_count {
                for k in 0..tower_count {
                    values.push(f(Step(t as u64), UserId(u as u32), TowerId(k as u32)));
                }
            }
        }
        Self { step_count, user_count, tower_count, values }
    }

    #[inline]
    fn offset(&self, step: Step, user: UserId, tower: TowerId) -> Option<usize> {
        if step.index() >= self.step_count
            || user.index() >= self.user_count
            || tower.index() >= self.tower_count
        {
            return None;
        }
        Some((step.index() * self.user_count + user.index()) * self.tower_count + tower.index())
    }

    /// One sample, or `None` if any index is out of range.
    pub fn get(&self, step: Step, user: UserId, tower: TowerId) -> Option<f64> {
        self.offset(step, user, tower).map(|i| self.values[i])
    }

    /// The raw tensor buffer.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mean RSSI over the whole tensor, or `None` if it is empty.
    pub fn mean_dbm(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

impl SignalSource for RssiSeries {
    fn step_count(&self) -> usize {
        self.step_count
    }

    fn user_count(&self) -> usize {
        self.user_count
    }

    fn tower_count(&self) -> usize {
        self.tower_count
    }

    fn snapshot(&self, step: Step) -> SignalResult<SignalSnapshot<'_>> {
        if step.index() >= self.step_count {
            return Err(SignalError::StepOutOfRange { step, steps: self.step_count });
        }
        let len   = self.user_count * self.tower_count;
        let start = step.index() * len;
        SignalSnapshot::new(step, self.user_count, self.tower_count, &self.values[start..start + len])
    }
}
