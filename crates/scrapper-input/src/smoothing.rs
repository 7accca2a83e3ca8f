//! Smoothed analog axis.
//!
//! Keyboard axes jump between -1, 0 and 1. [`SmoothedAxis`] eases toward the
//! raw target instead, so climbing speeds ramp up and down over a few ticks.

/// An axis value that moves toward its raw target at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedAxis {
    value: f32,
    /// Units per second toward a non-zero target.
    pub sensitivity: f32,
    /// Units per second back toward zero when the target is zero.
    pub gravity: f32,
    /// Reset to zero when the target points the other way.
    pub snap: bool,
}

impl SmoothedAxis {
    /// A resting axis with the given rates.
    #[must_use]
    pub fn new(sensitivity: f32, gravity: f32, snap: bool) -> Self {
        Self {
            value: 0.0,
            sensitivity,
            gravity,
            snap,
        }
    }

    /// The current smoothed value in `[-1.0, 1.0]`.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance by `dt` seconds toward `target` and return the new value.
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        let target = target.clamp(-1.0, 1.0);

        if self.snap && target != 0.0 && self.value != 0.0 && target.signum() != self.value.signum()
        {
            self.value = 0.0;
        }

        let rate = if target == 0.0 {
            self.gravity
        } else {
            self.sensitivity
        };
        let step = rate * dt;
        let delta = target - self.value;
        self.value = if delta.abs() <= step {
            target
        } else {
            self.value + step.copysign(delta)
        };
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramps_toward_target() {
        let mut axis = SmoothedAxis::new(4.0, 4.0, true);
        assert!((axis.update(1.0, 0.125) - 0.5).abs() < 1e-6);
        assert!((axis.update(1.0, 0.125) - 1.0).abs() < 1e-6);
        // Does not overshoot.
        assert!((axis.update(1.0, 0.125) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_falls_back_with_gravity() {
        let mut axis = SmoothedAxis::new(100.0, 2.0, true);
        axis.update(1.0, 1.0);
        assert!((axis.update(0.0, 0.25) - 0.5).abs() < 1e-6);
        assert!(axis.update(0.0, 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_snap_on_reversal() {
        let mut axis = SmoothedAxis::new(2.0, 2.0, true);
        axis.update(1.0, 0.5);
        let v = axis.update(-1.0, 0.25);
        assert!((v + 0.5).abs() < 1e-6, "snapped to zero then moved, got {v}");
    }

    #[test]
    fn test_no_snap_passes_through_zero() {
        let mut axis = SmoothedAxis::new(2.0, 2.0, false);
        axis.update(1.0, 0.5);
        let v = axis.update(-1.0, 0.25);
        assert!((v - 0.5).abs() < 1e-6, "got {v}");
    }
}
