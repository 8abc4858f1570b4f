/// Fixed timestep accumulator for hosts that receive variable frame times.
/// The simulation itself only knows ticks; this turns wall time into tick counts.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    /// Upper bound on ticks per host frame (spiral-of-death guard).
    max_steps: u32,
    total_steps: u64,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, Self::DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
            total_steps: 0,
        }
    }

    /// Add frame time and return how many ticks to run now.
    /// Non-finite or negative frame times (tab resume, clock skew) count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.total_steps += steps as u64;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Forget buffered time, e.g. after a level reload.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
        assert_eq!(ts.total_steps(), 1);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut ts = FixedTimestep::with_max_steps(1.0 / 60.0, 4);
        assert_eq!(ts.accumulate(1.0), 4);
    }

    #[test]
    fn negative_and_nan_frames_are_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert!(ts.alpha() >= 0.0 && ts.alpha() <= 1.0);
    }

    #[test]
    fn reset_drops_buffered_time() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.012);
        ts.reset();
        assert_eq!(ts.accumulate(0.008), 0);
    }
}
