//! Clock-driven linear interpolation between two value sets.
//!
//! The animation itself is pure: it is sampled with an elapsed duration and
//! never owns a timer. The embedding shell decides the frame cadence and the
//! widget applies each sample to its working copy.

use crate::wheel::{ValidationError, Wheel};
use std::time::Duration;

/// Default animation length, matching a one-second sweep of the wheel.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ValueAnimation {
    from: Vec<u8>,
    to: Vec<u8>,
    duration: Duration,
}

impl ValueAnimation {
    /// Prepares an animation from `from`'s values to `to`'s values. The two
    /// wheels must have the same item count.
    pub fn new(from: &Wheel, to: &Wheel, duration: Duration) -> Result<Self, ValidationError> {
        if from.len() != to.len() {
            return Err(ValidationError::ItemCountMismatch {
                expected: from.len(),
                actual: to.len(),
            });
        }
        Ok(Self {
            from: from.items().iter().map(|i| i.value()).collect(),
            to: to.items().iter().map(|i| i.value()).collect(),
            duration,
        })
    }

    /// True when the start and target values are identical, meaning the
    /// animation has nothing to show.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Samples every item at the same elapsed-time fraction (lockstep, not
    /// staggered). Returns the integer values to display and whether the
    /// animation has run its full duration.
    pub fn values_at(&self, elapsed: Duration) -> (Vec<u8>, bool) {
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        let values = self
            .from
            .iter()
            .zip(&self.to)
            .map(|(&from, &to)| {
                let interpolated =
                    f64::from(from) + (f64::from(to) - f64::from(from)) * fraction;
                interpolated.round() as u8
            })
            .collect();

        (values, fraction >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{Wheel, WheelItem};
    use palette::Srgba;

    fn wheel(values: &[u8]) -> Wheel {
        let items = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                WheelItem::with_value(format!("item {i}"), Srgba::new(0.1, 0.2, 0.3, 1.0), v)
                    .unwrap()
            })
            .collect();
        Wheel::new(Wheel::UNSAVED, "anim", items).unwrap()
    }

    #[test]
    fn mismatched_item_counts_are_rejected() {
        let err = ValueAnimation::new(&wheel(&[5, 5]), &wheel(&[5, 5, 5]), DEFAULT_DURATION)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::ItemCountMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn identical_values_are_a_noop() {
        let anim =
            ValueAnimation::new(&wheel(&[3, 7]), &wheel(&[3, 7]), DEFAULT_DURATION).unwrap();
        assert!(anim.is_noop());
        let (values, finished) = anim.values_at(Duration::ZERO);
        assert_eq!(values, vec![3, 7]);
        assert!(!finished);
    }

    #[test]
    fn items_interpolate_in_lockstep_and_land_exactly() {
        let anim = ValueAnimation::new(
            &wheel(&[10, 10, 10, 10]),
            &wheel(&[1, 5, 10, 3]),
            DEFAULT_DURATION,
        )
        .unwrap();

        let (start, finished) = anim.values_at(Duration::ZERO);
        assert_eq!(start, vec![10, 10, 10, 10]);
        assert!(!finished);

        let (mid, finished) = anim.values_at(DEFAULT_DURATION / 2);
        assert!(!finished);
        assert_eq!(mid, vec![6, 8, 10, 7]);

        let (end, finished) = anim.values_at(DEFAULT_DURATION);
        assert!(finished);
        assert_eq!(end, vec![1, 5, 10, 3]);

        // past the duration the values stay pinned at the target
        let (late, finished) = anim.values_at(DEFAULT_DURATION * 3);
        assert!(finished);
        assert_eq!(late, vec![1, 5, 10, 3]);
    }

    #[test]
    fn zero_duration_finishes_on_the_first_sample() {
        let anim =
            ValueAnimation::new(&wheel(&[2, 9]), &wheel(&[9, 2]), Duration::ZERO).unwrap();
        let (values, finished) = anim.values_at(Duration::ZERO);
        assert!(finished);
        assert_eq!(values, vec![9, 2]);
    }
}
