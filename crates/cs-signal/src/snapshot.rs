//! One step of signal data, and the trait that produces them.

use std::borrow::Cow;

use cs_core::{Step, TowerId, UserId};

use crate::{SignalError, SignalResult};

/// RSSI for every (user, tower) pair at one step, user-major:
/// `values[user * tower_count + tower]`.
///
/// A snapshot either borrows from a materialised series or owns values a
/// source computed on demand.
#[derive(Debug, Clone)]
pub struct SignalSnapshot<'a> {
    step:        Step,
    user_count:  usize,
    tower_count: usize,
    values:      Cow<'a, [f64]>,
}

impl<'a> SignalSnapshot<'a> {
    /// Wrap `values`, checking that the buffer length matches the shape.
    pub fn new(
        step:        Step,
        user_count:  usize,
        tower_count: usize,
        values:      impl Into<Cow<'a, [f64]>>,
    ) -> SignalResult<Self> {
        let values = values.into();
        let expected = user_count * tower_count;
        if values.len() != expected {
            return Err(SignalError::LengthMismatch {
                steps: 1,
                users: user_count,
                towers: tower_count,
                expected,
                got: values.len(),
            });
        }
        Ok(Self { step, user_count, tower_count, values })
    }

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    #[inline]
    pub fn user_count(&self) -> usize {
        self.user_count
    }

    #[inline]
    pub fn tower_count(&self) -> usize {
        self.tower_count
    }

    /// The RSSI row of `user`, indexed by `TowerId`.
    ///
    /// # Panics
    /// Panics if `user` is outside the snapshot.
    #[inline]
    pub fn row(&self, user: UserId) -> &[f64] {
        let start = user.index() * self.tower_count;
        &self.values[start..start + self.tower_count]
    }

    #[inline]
    pub fn rssi(&self, user: UserId, tower: TowerId) -> Option<f64> {
        if user.index() >= self.user_count || tower.index() >= self.tower_count {
            return None;
        }
        Some(self.values[user.index() * self.tower_count + tower.index()])
    }

    /// Check the shape against what the controller expects and reject
    /// non-finite samples, naming the first offender.
    pub fn validate(&self, expected_users: usize, expected_towers: usize) -> SignalResult<()> {
        if self.user_count != expected_users {
            return Err(SignalError::ShapeMismatch {
                step:     self.step,
                what:     "user",
                expected: expected_users,
                got:      self.user_count,
            });
        }
        if self.tower_count != expected_towers {
            return Err(SignalError::ShapeMismatch {
                step:     self.step,
                what:     "tower",
                expected: expected_towers,
                got:      self.tower_count,
            });
        }
        if let Some(i) = self.values.iter().position(|v| !v.is_finite()) {
            let towers = self.tower_count.max(1);
            return Err(SignalError::NonFinite {
                step:  self.step,
                user:  UserId((i / towers) as u32),
                tower: TowerId((i % towers) as u32),
                value: self.values[i],
            });
        }
        Ok(())
    }
}

// ── SignalSource ──────────────────────────────────────────────────────────────

/// Anything that can hand the controller one [`SignalSnapshot`] per step.
///
/// The controller calls [`validate`][Self::validate] once before the first
/// step, then [`snapshot`][Self::snapshot] once per step in order.
/// Implementations must be deterministic: asking twice for the same step
/// must yield the same values.
pub trait SignalSource {
    /// Number of steps in the series.
    fn step_count(&self) -> usize;

    fn user_count(&self) -> usize;

    fn tower_count(&self) -> usize;

    /// The snapshot for `step`.
    fn snapshot(&self, step: Step) -> SignalResult<SignalSnapshot<'_>>;

    /// Check every snapshot's shape and values.  Fails on the first problem.
    fn validate(&self) -> SignalResult<()> {
        let (users, towers) = (self.user_count(), self.tower_count());
        for t in 0..self.step_count() {
            self.snapshot(Step(t as u64))?.validate(users, towers)?;
        }
        Ok(())
    }
}

impl<S: SignalSource + ?Sized> SignalSource for &S {
    fn step_count(&self) -> usize {
        (**self).step_count()
    }

    fn user_count(&self) -> usize {
        (**self).user_count()
    }

    fn tower_count(&self) -> usize {
        (**self).tower_count()
    }

    fn snapshot(&self, step: Step) -> SignalResult<SignalSnapshot<'_>> {
        (**self).snapshot(step)
    }

    fn validate(&self) -> SignalResult<()> {
        (**self).validate()
    }
}
