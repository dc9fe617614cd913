#![cfg_attr(not(feature = "std"), no_std)]

//! Gesture classification and control-signal smoothing.
//!
//! Two entry points drive the engine at independent rates:
//! [`GestureEngine::process_frame`] on every detector result and
//! [`GestureEngine::tick`] on every render frame. They share only the target
//! signals, last write wins.

extern crate alloc;

pub mod classifier;
pub mod control;
pub mod error;
pub mod gestures;
pub mod smoother;

use alloc::vec::Vec;
use hud_shared::{ControlConfig, ControlSignals, DetectionFrame, DisplaySignals, TargetSignals};

pub use classifier::{assign_roles, classifier_x, validate_frame, Role, RoleAssignment};
pub use control::{ControlState, ControlStateMachine, TrackingAnchors};
pub use error::GestureError;
pub use gestures::{curled_fingers, is_fist, pinch_distance};
pub use smoother::{lerp, SignalSmoother};

/// What a single detector frame did to the engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub pause_toggled: bool,
    /// One entry per hand dropped for a bad landmark count
    pub rejected: Vec<GestureError>,
}

/// Owns the target, display and control state for one control surface
#[derive(Debug, Clone)]
pub struct GestureEngine {
    config: ControlConfig,
    control: ControlStateMachine,
    smoother: SignalSmoother,
    targets: TargetSignals,
    display: DisplaySignals,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::build(ControlConfig::default())
    }

    pub fn with_config(config: ControlConfig) -> Result<Self, GestureError> {
        validate_config(&config)?;
        Ok(Self::build(config))
    }

    fn build(config: ControlConfig) -> Self {
        Self {
            config,
            control: ControlStateMachine::new(config),
            smoother: SignalSmoother::new(config.rotation_smoothing, config.zoom_smoothing),
            targets: TargetSignals {
                rot_x: 0.0,
                rot_y: 0.0,
                zoom: config.initial_zoom,
            },
            display: DisplaySignals {
                rot_x: 0.0,
                rot_y: 0.0,
                zoom: config.initial_zoom,
            },
        }
    }

    /// Feed one detector result. `width` is the overlay width in pixels and
    /// only affects role ordering scale. Never fails: malformed hands are
    /// dropped and reported in the outcome.
    pub fn process_frame(
        &mut self,
        frame: &DetectionFrame,
        width: f32,
        now_ms: u64,
    ) -> FrameOutcome {
        let (hands, rejected) = validate_frame(frame);
        let roles = assign_roles(&hands, width);
        let pause_toggled = self.control.update(&roles, now_ms, &mut self.targets);

        FrameOutcome {
            pause_toggled,
            rejected,
        }
    }

    /// Advance display signals one render tick toward the current targets
    pub fn tick(&mut self) -> DisplaySignals {
        self.smoother.tick(&mut self.display, &self.targets);
        self.display
    }

    pub fn signals(&self) -> ControlSignals {
        ControlSignals {
            rot_x: self.display.rot_x,
            rot_y: self.display.rot_y,
            zoom: self.display.zoom,
            paused: self.control.is_paused(),
            right_detected: self.control.right_detected(),
            left_detected: self.control.left_detected(),
        }
    }

    pub fn targets(&self) -> TargetSignals {
        self.targets
    }

    pub fn display(&self) -> DisplaySignals {
        self.display
    }

    pub fn is_paused(&self) -> bool {
        self.control.is_paused()
    }

    pub fn control(&self) -> &ControlStateMachine {
        &self.control
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_config(config: &ControlConfig) -> Result<(), GestureError> {
    let in_unit = |alpha: f32| alpha > 0.0 && alpha <= 1.0;
    if !in_unit(config.rotation_smoothing) || !in_unit(config.zoom_smoothing) {
        return Err(GestureError::InvalidConfig("smoothing factors must be in (0, 1]"));
    }
    if !(config.zoom_min <= config.initial_zoom && config.initial_zoom <= config.zoom_max) {
        return Err(GestureError::InvalidConfig(
            "initial_zoom must lie within [zoom_min, zoom_max]",
        ));
    }
    if !(config.rot_x_limit >= 0.0) {
        return Err(GestureError::InvalidConfig("rot_x_limit must be non-negative"));
    }
    if config.fist_min_fingers > 5 {
        return Err(GestureError::InvalidConfig("fist_min_fingers cannot exceed 5"));
    }
    Ok(())
}
