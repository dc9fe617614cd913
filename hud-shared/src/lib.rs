#![cfg_attr(not(feature = "std"), no_std)]

//! Data model shared by the gesture engine, the native client and the
//! browser bridge.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A landmark in normalized image space, origin top-left, both axes in [0, 1]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another landmark
    pub fn distance_to(&self, other: &LandmarkPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }

    pub fn midpoint(&self, other: &LandmarkPoint) -> LandmarkPoint {
        LandmarkPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Number of landmarks the detector reports per hand.
pub const LANDMARK_COUNT: usize = 21;

/// One validated hand: exactly 21 landmarks in detector order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandLandmarks {
    points: [LandmarkPoint; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;

    /// Thumb, index, middle, ring and pinky tips.
    pub const FINGERTIPS: [usize; 5] = [
        Self::THUMB_TIP,
        Self::INDEX_TIP,
        Self::MIDDLE_TIP,
        Self::RING_TIP,
        Self::PINKY_TIP,
    ];

    pub fn new(points: [LandmarkPoint; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Returns `None` unless `points` holds exactly 21 landmarks.
    pub fn from_points(points: &[LandmarkPoint]) -> Option<Self> {
        let points: [LandmarkPoint; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    pub fn point(&self, index: usize) -> LandmarkPoint {
        self.points[index]
    }

    pub fn points(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.points
    }

    pub fn wrist(&self) -> LandmarkPoint {
        self.points[Self::WRIST]
    }

    pub fn index_tip(&self) -> LandmarkPoint {
        self.points[Self::INDEX_TIP]
    }

    /// Midpoint of the wrist and the middle finger MCP joint
    pub fn palm_center(&self) -> LandmarkPoint {
        self.points[Self::WRIST].midpoint(&self.points[Self::MIDDLE_MCP])
    }

    /// Calculate pinch distance (distance between thumb and index finger tips)
    pub fn pinch_distance(&self) -> f32 {
        self.points[Self::THUMB_TIP].distance_to(&self.points[Self::INDEX_TIP])
    }
}

/// Raw output of one detector inference. Hands are not validated yet and may
/// carry any number of landmarks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetectionFrame {
    #[serde(default)]
    pub hands: Vec<Vec<LandmarkPoint>>,
}

impl DetectionFrame {
    pub fn new(hands: Vec<Vec<LandmarkPoint>>) -> Self {
        Self { hands }
    }

    pub fn empty() -> Self {
        Self { hands: Vec::new() }
    }

    pub fn from_hands(hands: &[HandLandmarks]) -> Self {
        Self {
            hands: hands.iter().map(|h| h.points().to_vec()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    #[cfg(feature = "std")]
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

/// Desired control values computed from gesture deltas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetSignals {
    pub rot_x: f32,
    pub rot_y: f32,
    pub zoom: f32,
}

/// Smoothed values handed to the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DisplaySignals {
    pub rot_x: f32,
    pub rot_y: f32,
    pub zoom: f32,
}

/// Snapshot read by renderers and status displays once per render tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ControlSignals {
    pub rot_x: f32,
    pub rot_y: f32,
    pub zoom: f32,
    pub paused: bool,
    pub right_detected: bool,
    pub left_detected: bool,
}

impl ControlSignals {
    pub fn mode_label(&self) -> &'static str {
        if self.paused {
            "PAUSED"
        } else {
            "ACTIVE"
        }
    }

    /// Status lines shown next to the scene.
    pub fn info_lines(&self) -> [String; 4] {
        let right = if self.right_detected {
            "Rotate"
        } else {
            "not detected"
        };
        let left = if self.left_detected {
            "Zoom"
        } else {
            "not detected"
        };
        [
            format!("Right hand: {}", right),
            format!("Left hand: {}", left),
            format!("Zoom: {:.2}", self.zoom),
            String::from("Gesture: Right = rotate | Left pinch = zoom | Right fist = pause"),
        ]
    }

    /// True when every field matches `other`, floats within `epsilon`.
    pub fn approx_eq(&self, other: &ControlSignals, epsilon: f32) -> bool {
        self.paused == other.paused
            && self.right_detected == other.right_detected
            && self.left_detected == other.left_detected
            && libm::fabsf(self.rot_x - other.rot_x) <= epsilon
            && libm::fabsf(self.rot_y - other.rot_y) <= epsilon
            && libm::fabsf(self.zoom - other.zoom) <= epsilon
    }
}

/// Tuning parameters for gesture mapping and smoothing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlConfig {
    /// Yaw gain per unit of horizontal index-tip travel
    pub rotate_gain_y: f32,
    /// Pitch gain per unit of vertical index-tip travel
    pub rotate_gain_x: f32,
    /// Pitch is clamped to [-rot_x_limit, rot_x_limit]
    pub rot_x_limit: f32,
    pub zoom_gain: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub initial_zoom: f32,
    /// Fingertip-to-palm distance below which a finger counts as curled
    pub fist_threshold: f32,
    pub fist_min_fingers: usize,
    pub toggle_cooldown_ms: u64,
    pub rotation_smoothing: f32,
    pub zoom_smoothing: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotate_gain_y: 4.8,
            rotate_gain_x: 4.2,
            rot_x_limit: 1.45,
            zoom_gain: 8.5,
            zoom_min: 1.8,
            zoom_max: 6.5,
            initial_zoom: 3.2,
            fist_threshold: 0.18,
            fist_min_fingers: 4,
            toggle_cooldown_ms: 900,
            rotation_smoothing: 0.12,
            zoom_smoothing: 0.14,
        }
    }
}

impl ControlConfig {
    #[cfg(feature = "std")]
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn open_hand() -> HandLandmarks {
        let mut points = [LandmarkPoint::new(0.5, 0.5); LANDMARK_COUNT];
        points[HandLandmarks::THUMB_TIP] = LandmarkPoint::new(0.3, 0.4);
        points[HandLandmarks::INDEX_TIP] = LandmarkPoint::new(0.6, 0.8);
        HandLandmarks::new(points)
    }

    #[test]
    fn test_landmark_distance() {
        let p1 = LandmarkPoint::new(0.0, 0.0);
        let p2 = LandmarkPoint::new(0.3, 0.4);
        assert!((p1.distance_to(&p2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_distance() {
        assert!((open_hand().pinch_distance() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_palm_center_is_wrist_mcp_midpoint() {
        let mut points = [LandmarkPoint::default(); LANDMARK_COUNT];
        points[HandLandmarks::WRIST] = LandmarkPoint::new(0.2, 0.9);
        points[HandLandmarks::MIDDLE_MCP] = LandmarkPoint::new(0.4, 0.5);
        let palm = HandLandmarks::new(points).palm_center();
        assert!((palm.x - 0.3).abs() < 1e-6);
        assert!((palm.y - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_from_points_requires_21() {
        let short = vec![LandmarkPoint::default(); 20];
        let long = vec![LandmarkPoint::default(); 22];
        let exact = vec![LandmarkPoint::default(); 21];
        assert!(HandLandmarks::from_points(&short).is_none());
        assert!(HandLandmarks::from_points(&long).is_none());
        assert!(HandLandmarks::from_points(&exact).is_some());
    }

    #[test]
    fn test_info_lines() {
        let signals = ControlSignals {
            rot_x: 0.0,
            rot_y: 0.0,
            zoom: 3.2,
            paused: true,
            right_detected: true,
            left_detected: false,
        };
        assert_eq!(signals.mode_label(), "PAUSED");
        let lines = signals.info_lines();
        assert_eq!(lines[0], "Right hand: Rotate");
        assert_eq!(lines[1], "Left hand: not detected");
        assert_eq!(lines[2], "Zoom: 3.20");
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_frame_from_json() {
        let frame =
            DetectionFrame::from_json(r#"{"hands":[[{"x":0.1,"y":0.2}],[]]}"#).unwrap();
        assert_eq!(frame.hands.len(), 2);
        assert_eq!(frame.hands[0][0], LandmarkPoint::new(0.1, 0.2));

        let empty = DetectionFrame::from_json("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = ControlConfig::from_json(r#"{"zoom_gain": 4.0}"#).unwrap();
        assert_eq!(config.zoom_gain, 4.0);
        assert_eq!(config.toggle_cooldown_ms, 900);
        assert_eq!(config.initial_zoom, 3.2);
    }
}
