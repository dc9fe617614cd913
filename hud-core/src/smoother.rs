use hud_shared::{DisplaySignals, TargetSignals};

/// Linear interpolation from `from` toward `to` by `t`
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// First-order exponential smoothing of display values toward targets.
///
/// Each tick closes a fixed fraction of the remaining gap, so after `n` ticks
/// with a constant target the error is `(1 - alpha)^n` of where it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSmoother {
    pub rotation_alpha: f32,
    pub zoom_alpha: f32,
}

impl Default for SignalSmoother {
    fn default() -> Self {
        Self {
            rotation_alpha: 0.12,
            zoom_alpha: 0.14,
        }
    }
}

impl SignalSmoother {
    pub fn new(rotation_alpha: f32, zoom_alpha: f32) -> Self {
        Self {
            rotation_alpha,
            zoom_alpha,
        }
    }

    /// Advance `display` one render tick. Never touches `target`.
    pub fn tick(&self, display: &mut DisplaySignals, target: &TargetSignals) {
        display.rot_x = lerp(display.rot_x, target.rot_x, self.rotation_alpha);
        display.rot_y = lerp(display.rot_y, target.rot_y, self.rotation_alpha);
        display.zoom = lerp(display.zoom, target.zoom, self.zoom_alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(2.0, 2.0, 0.12), 2.0);
    }

    #[test]
    fn test_single_tick() {
        let smoother = SignalSmoother::default();
        let mut display = DisplaySignals {
            rot_x: 0.0,
            rot_y: 1.0,
            zoom: 3.0,
        };
        let target = TargetSignals {
            rot_x: 1.0,
            rot_y: 0.0,
            zoom: 4.0,
        };
        smoother.tick(&mut display, &target);
        assert!((display.rot_x - 0.12).abs() < 1e-6);
        assert!((display.rot_y - 0.88).abs() < 1e-6);
        assert!((display.zoom - 3.14).abs() < 1e-6);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let smoother = SignalSmoother::default();
        let mut display = DisplaySignals {
            rot_x: 0.0,
            rot_y: 0.0,
            zoom: 1.8,
        };
        let target = TargetSignals {
            rot_x: 1.0,
            rot_y: -2.0,
            zoom: 6.5,
        };
        for _ in 0..200 {
            smoother.tick(&mut display, &target);
            assert!(display.rot_x <= target.rot_x);
            assert!(display.rot_y >= target.rot_y);
            assert!(display.zoom <= target.zoom);
        }
        assert!((display.rot_x - 1.0).abs() < 1e-4);
        assert!((display.zoom - 6.5).abs() < 1e-4);
    }
}
