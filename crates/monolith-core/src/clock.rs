use instant::Instant;

/// Monotonic elapsed-time source driving every periodic motion in the scene.
pub trait Clock {
    /// Seconds since the clock was created. Never decreases.
    fn tick(&mut self) -> f32;

    /// Last value returned by `tick`, without advancing.
    fn elapsed(&self) -> f32;
}

/// Wall-clock time since construction.
#[derive(Debug)]
pub struct SceneClock {
    start: Instant,
    elapsed: f32,
}

impl SceneClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: 0.0,
        }
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SceneClock {
    fn tick(&mut self) -> f32 {
        let now = self.start.elapsed().as_secs_f32();
        // Instant is monotonic, but f32 rounding of a larger duration must not step back either.
        self.elapsed = self.elapsed.max(now);
        self.elapsed
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Advances by a fixed step per tick. Used for headless runs and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepClock {
    step: f32,
    elapsed: f32,
}

impl FixedStepClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(0.0),
            elapsed: 0.0,
        }
    }

    /// 60 Hz, the refresh rate the per-frame constants were tuned against.
    pub fn sixty_hz() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl Clock for FixedStepClock {
    fn tick(&mut self) -> f32 {
        self.elapsed += self.step;
        self.elapsed
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn scene_clock_measures_elapsed() {
        let mut clock = SceneClock::new();
        thread::sleep(Duration::from_millis(10));
        let t = clock.tick();
        assert!(t >= 0.009);
        assert_eq!(clock.elapsed(), t);
    }

    #[test]
    fn scene_clock_is_monotonic() {
        let mut clock = SceneClock::new();
        let mut prev = clock.tick();
        for _ in 0..100 {
            let t = clock.tick();
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn fixed_step_accumulates() {
        let mut clock = FixedStepClock::new(0.5);
        assert_eq!(clock.elapsed(), 0.0);
        clock.tick();
        assert_eq!(clock.tick(), 1.0);
    }

    #[test]
    fn fixed_step_clamps_negative_step() {
        let mut clock = FixedStepClock::new(-1.0);
        assert_eq!(clock.tick(), 0.0);
    }
}
