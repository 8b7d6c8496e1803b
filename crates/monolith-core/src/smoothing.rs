use crate::config::ConfigError;
use crate::input::PointerState;

/// First-order exponential low-pass: `current += (target - current) * alpha`.
///
/// Alpha is applied per rendered frame, not per second, so the lag scales with
/// the display refresh rate.
#[derive(Clone, Copy, Debug)]
pub struct SmoothingFilter {
    alpha: f32,
}

impl SmoothingFilter {
    pub fn new(alpha: f32) -> Result<Self, ConfigError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(ConfigError::InvalidSmoothing(alpha));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn step(&self, state: &mut PointerState) {
        state.current += (state.target - state.current) * self.alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn rejects_out_of_range_alpha() {
        assert!(SmoothingFilter::new(0.0).is_err());
        assert!(SmoothingFilter::new(-0.1).is_err());
        assert!(SmoothingFilter::new(1.01).is_err());
        assert!(SmoothingFilter::new(f32::NAN).is_err());
        assert!(SmoothingFilter::new(1.0).is_ok());
    }

    #[test]
    fn alpha_one_snaps_to_target() {
        let f = SmoothingFilter::new(1.0).unwrap();
        let mut s = PointerState {
            target: Vec2::new(-0.4, 2.5),
            current: Vec2::ZERO,
        };
        f.step(&mut s);
        assert_eq!(s.current, s.target);
    }
}
