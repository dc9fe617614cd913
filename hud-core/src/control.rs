//! Pause/resume state machine and incremental rotation/zoom mapping.

use hud_shared::{ControlConfig, LandmarkPoint, TargetSignals};

use crate::classifier::RoleAssignment;
use crate::gestures::{is_fist, pinch_distance};

/// Pause flag plus the time of the last fist toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub paused: bool,
    /// `None` until the first toggle fires
    pub last_toggle_ms: Option<u64>,
}

/// Previous-frame reference values used to compute deltas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackingAnchors {
    /// Right index tip position
    pub right_pos: Option<LandmarkPoint>,
    /// Left thumb-index distance
    pub left_pinch: Option<f32>,
}

impl TrackingAnchors {
    pub fn clear(&mut self) {
        self.right_pos = None;
        self.left_pinch = None;
    }

    pub fn is_clear(&self) -> bool {
        self.right_pos.is_none() && self.left_pinch.is_none()
    }
}

/// Applies one frame of role assignments to the target signals
#[derive(Debug, Clone)]
pub struct ControlStateMachine {
    config: ControlConfig,
    state: ControlState,
    anchors: TrackingAnchors,
    right_detected: bool,
    left_detected: bool,
}

impl ControlStateMachine {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            state: ControlState::default(),
            anchors: TrackingAnchors::default(),
            right_detected: false,
            left_detected: false,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn anchors(&self) -> TrackingAnchors {
        self.anchors
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn right_detected(&self) -> bool {
        self.right_detected
    }

    pub fn left_detected(&self) -> bool {
        self.left_detected
    }

    /// Process one frame. Returns true if the pause flag flipped.
    pub fn update(
        &mut self,
        roles: &RoleAssignment<'_>,
        now_ms: u64,
        targets: &mut TargetSignals,
    ) -> bool {
        self.right_detected = roles.right.is_some();
        self.left_detected = roles.left.is_some();

        if roles.is_empty() {
            if !self.anchors.is_clear() {
                log::debug!("No hands in frame, clearing anchors");
            }
            self.anchors.clear();
            return false;
        }

        let toggled = self.check_fist_toggle(roles, now_ms);

        if self.state.paused {
            return toggled;
        }

        self.update_rotation(roles, targets);
        self.update_zoom(roles, targets);

        toggled
    }

    fn check_fist_toggle(&mut self, roles: &RoleAssignment<'_>, now_ms: u64) -> bool {
        let Some(right) = roles.right else {
            return false;
        };
        if !is_fist(right, self.config.fist_threshold, self.config.fist_min_fingers) {
            return false;
        }

        let cooled_down = match self.state.last_toggle_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.config.toggle_cooldown_ms,
        };
        if !cooled_down {
            return false;
        }

        self.state.paused = !self.state.paused;
        self.state.last_toggle_ms = Some(now_ms);
        self.anchors.clear();
        log::debug!(
            "Fist toggle at {}ms: {}",
            now_ms,
            if self.state.paused { "paused" } else { "resumed" }
        );
        true
    }

    fn update_rotation(&mut self, roles: &RoleAssignment<'_>, targets: &mut TargetSignals) {
        let Some(right) = roles.right else {
            self.anchors.right_pos = None;
            return;
        };

        let tip = right.index_tip();
        if let Some(prev) = self.anchors.right_pos {
            let dx = tip.x - prev.x;
            let dy = tip.y - prev.y;
            targets.rot_y += dx * self.config.rotate_gain_y;
            targets.rot_x += dy * self.config.rotate_gain_x;
            targets.rot_x = targets
                .rot_x
                .clamp(-self.config.rot_x_limit, self.config.rot_x_limit);
        }
        self.anchors.right_pos = Some(tip);
    }

    fn update_zoom(&mut self, roles: &RoleAssignment<'_>, targets: &mut TargetSignals) {
        match roles.left {
            Some(left) => {
                let pinch = pinch_distance(left);
                if let Some(prev) = self.anchors.left_pinch {
                    // Opening the pinch moves the camera out
                    targets.zoom += (pinch - prev) * self.config.zoom_gain;
                }
                self.anchors.left_pinch = Some(pinch);
            }
            None => self.anchors.left_pinch = None,
        }
        targets.zoom = targets.zoom.clamp(self.config.zoom_min, self.config.zoom_max);
    }
}
