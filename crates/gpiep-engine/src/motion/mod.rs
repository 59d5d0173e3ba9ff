//! Time-driven rotation of the cube.

use crate::math::Mat4;

/// Radians per second of elapsed time.
pub const ROTATION_SPEED: f32 = 0.5;

/// Constant-speed rotation about the Y axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    pub speed: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            speed: ROTATION_SPEED,
        }
    }
}

impl Spin {
    #[inline]
    pub fn angle_at(&self, elapsed: f32) -> f32 {
        elapsed * self.speed
    }

    #[inline]
    pub fn transform_at(&self, elapsed: f32) -> Mat4 {
        Mat4::rotation_y(self.angle_at(elapsed))
    }
}

/// A spin that can be frozen in place.
///
/// While paused the last matrix is kept and nothing needs uploading.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinState {
    pub spin: Spin,
    pub paused: bool,
    current: Mat4,
}

impl SpinState {
    pub fn new(spin: Spin, paused: bool) -> Self {
        Self {
            spin,
            paused,
            current: Mat4::IDENTITY,
        }
    }

    /// Matrix last produced (identity before the first unpaused frame).
    #[inline]
    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Returns the new transform if it must be uploaded this frame.
    pub fn advance(&mut self, elapsed: f32) -> Option<Mat4> {
        if self.paused {
            return None;
        }
        self.current = self.spin.transform_at(elapsed);
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_is_linear_in_time() {
        let spin = Spin::default();
        for i in 0..100 {
            let t = i as f32 * 0.37;
            assert_eq!(spin.angle_at(t), t * 0.5);
        }
    }

    #[test]
    fn transforms_are_rotations() {
        let spin = Spin::default();
        for i in 0..50 {
            assert!(spin.transform_at(i as f32 * 1.3).is_rotation(1e-5));
        }
    }

    #[test]
    fn running_state_uploads_each_frame() {
        let mut state = SpinState::new(Spin::default(), false);
        let m = state.advance(2.0).expect("running spin uploads");
        assert_eq!(m, Mat4::rotation_y(1.0));
        assert_eq!(state.current(), m);
    }

    #[test]
    fn paused_state_keeps_matrix() {
        let mut state = SpinState::new(Spin::default(), false);
        state.advance(1.0);
        let before = state.current();

        state.paused = true;
        assert_eq!(state.advance(5.0), None);
        assert_eq!(state.advance(9.0), None);
        assert_eq!(state.current(), before);
    }

    #[test]
    fn starts_at_identity_when_paused() {
        let mut state = SpinState::new(Spin::default(), true);
        assert_eq!(state.advance(3.0), None);
        assert_eq!(state.current(), Mat4::IDENTITY);
    }

    #[test]
    fn resuming_jumps_to_wall_clock_angle() {
        let mut state = SpinState::new(Spin::default(), true);
        state.advance(4.0);
        state.paused = false;
        assert_eq!(state.advance(4.0), Some(Mat4::rotation_y(2.0)));
    }
}
