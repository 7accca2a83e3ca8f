//! Fixed-timestep loop implementing the "Fix Your Timestep" pattern.
//!
//! Frame time goes into an accumulator that is drained in whole simulation
//! steps, so the player always sees the same `dt` regardless of how fast
//! frames arrive.

use std::time::Instant;
use tracing::warn;

/// Maximum frame time clamp to prevent spiral of death.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep loop state.
pub struct FixedStepLoop {
    fixed_dt: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FixedStepLoop {
    /// Creates a loop stepping `fixed_dt` seconds per update.
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Feeds one frame of `frame_time` seconds and runs as many fixed steps
    /// as fit. `update_fn(fixed_dt, update_index)` is called zero or more
    /// times. Returns the number of steps run.
    pub fn advance(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, u64)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt, self.update_count);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
            steps += 1;
        }

        self.frame_count += 1;
        steps
    }

    /// Interpolation alpha of the leftover accumulator, in `[0.0, 1.0)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Returns the total number of frames fed.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation update steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Returns the total simulation time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

/// Measures wall-clock time between frames.
pub struct FrameClock {
    previous_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
        }
    }

    /// Seconds since the previous call (or since creation).
    pub fn frame_time(&mut self) -> f64 {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        frame_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_accumulator_single_step() {
        let mut loop_ = FixedStepLoop::new(DT);
        let mut updates = 0u32;
        let steps = loop_.advance(DT, |_, _| updates += 1);
        assert_eq!(updates, 1);
        assert_eq!(steps, 1);
        assert!(loop_.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut loop_ = FixedStepLoop::new(DT);
        let mut indices = Vec::new();
        loop_.advance(3.0 * DT + 1e-9, |dt, index| {
            assert_eq!(dt, DT);
            indices.push(index);
        });
        assert_eq!(indices, vec![0, 1, 2]);
        assert!((loop_.total_sim_time() - 3.0 * DT).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_partial() {
        let mut loop_ = FixedStepLoop::new(DT);
        let steps = loop_.advance(0.5 * DT, |_, _| {});
        assert_eq!(steps, 0);
        assert!((loop_.alpha() - 0.5).abs() < 1e-10);
        assert_eq!(loop_.frame_count(), 1);

        let steps = loop_.advance(0.5 * DT, |_, _| {});
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = FixedStepLoop::new(DT);
        let mut updates = 0u32;
        loop_.advance(1.0, |_, _| updates += 1);
        let max_updates = (MAX_FRAME_TIME / DT).ceil() as u32;
        assert!(
            updates <= max_updates,
            "Expected at most {max_updates} updates, got {updates}"
        );
        assert!(updates > 0);
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut loop_ = FixedStepLoop::new(DT);
        assert_eq!(loop_.advance(-1.0, |_, _| {}), 0);
        assert_eq!(loop_.alpha(), 0.0);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];

        let mut loop_a = FixedStepLoop::new(DT);
        let mut loop_b = FixedStepLoop::new(DT);

        for &ft in &frame_times {
            loop_a.advance(ft, |_, _| {});
            loop_b.advance(ft, |_, _| {});
            assert!((loop_a.alpha() - loop_b.alpha()).abs() < 1e-15);
        }

        assert_eq!(loop_a.update_count(), loop_b.update_count());
        let expected = loop_a.update_count() as f64 * DT;
        assert!((loop_a.total_sim_time() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_frame_clock_non_negative() {
        let mut clock = FrameClock::new();
        assert!(clock.frame_time() >= 0.0);
    }
}
