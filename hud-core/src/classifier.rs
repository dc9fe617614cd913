//! Positional left/right role assignment.
//!
//! Roles are re-derived from scratch every frame. There is no hand identity
//! across frames, so two hands crossing the horizontal midpoint swap roles in
//! the frame where they cross.

use alloc::vec::Vec;
use hud_shared::{DetectionFrame, HandLandmarks};

use crate::error::GestureError;

/// Which control function a hand drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Pinch zoom
    Left,
    /// Rotation and pause toggle
    Right,
}

/// Hands assigned to roles for the current frame only
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoleAssignment<'a> {
    pub left: Option<&'a HandLandmarks>,
    pub right: Option<&'a HandLandmarks>,
}

impl<'a> RoleAssignment<'a> {
    pub fn get(&self, role: Role) -> Option<&'a HandLandmarks> {
        match role {
            Role::Left => self.left,
            Role::Right => self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Horizontal position used for ordering: mean of wrist and middle MCP x,
/// scaled by the overlay width.
pub fn classifier_x(hand: &HandLandmarks, width: f32) -> f32 {
    let wrist = hand.point(HandLandmarks::WRIST);
    let mcp = hand.point(HandLandmarks::MIDDLE_MCP);
    (wrist.x + mcp.x) / 2.0 * width
}

/// Assign hands to roles by horizontal order.
///
/// One hand is always Right. With two or more, the leftmost is Left and the
/// rightmost is Right; the rest are ignored for this frame.
pub fn assign_roles(hands: &[HandLandmarks], width: f32) -> RoleAssignment<'_> {
    let mut ranked: Vec<(f32, &HandLandmarks)> = hands
        .iter()
        .map(|hand| (classifier_x(hand, width), hand))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    match ranked.as_slice() {
        [] => RoleAssignment::default(),
        [(_, only)] => RoleAssignment {
            left: None,
            right: Some(*only),
        },
        [(_, first), .., (_, last)] => RoleAssignment {
            left: Some(*first),
            right: Some(*last),
        },
    }
}

/// Split a raw frame into well-formed hands and one error per rejected entry
pub fn validate_frame(frame: &DetectionFrame) -> (Vec<HandLandmarks>, Vec<GestureError>) {
    let mut hands = Vec::with_capacity(frame.hands.len());
    let mut rejected = Vec::new();

    for (idx, points) in frame.hands.iter().enumerate() {
        match HandLandmarks::from_points(points) {
            Some(hand) => hands.push(hand),
            None => {
                log::warn!(
                    "Dropping hand {}: {} landmarks instead of 21",
                    idx,
                    points.len()
                );
                rejected.push(GestureError::MalformedFrame {
                    hand: idx,
                    landmarks: points.len(),
                });
            }
        }
    }

    (hands, rejected)
}
