use hud_shared::HandLandmarks;

/// Distance between thumb tip and index tip, in normalized units.
pub fn pinch_distance(hand: &HandLandmarks) -> f32 {
    hand.pinch_distance()
}

/// Number of fingertips closer than `threshold` to the palm center
pub fn curled_fingers(hand: &HandLandmarks, threshold: f32) -> usize {
    let palm = hand.palm_center();
    HandLandmarks::FINGERTIPS
        .iter()
        .filter(|&&tip| hand.point(tip).distance_to(&palm) < threshold)
        .count()
}

/// Geometric fist test: at least `min_fingers` fingertips near the palm.
///
/// One extended finger is tolerated with the default of 4 so detector jitter
/// on a single tip does not break a held fist.
pub fn is_fist(hand: &HandLandmarks, threshold: f32, min_fingers: usize) -> bool {
    curled_fingers(hand, threshold) >= min_fingers
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_shared::{LandmarkPoint, LANDMARK_COUNT};

    const THRESHOLD: f32 = 0.18;

    /// Wrist at (0.5, 0.7), middle MCP at (0.5, 0.5): palm center (0.5, 0.6).
    fn hand_with_tip_offsets(offsets: [f32; 5]) -> HandLandmarks {
        let mut points = [LandmarkPoint::new(0.5, 0.6); LANDMARK_COUNT];
        points[HandLandmarks::WRIST] = LandmarkPoint::new(0.5, 0.7);
        points[HandLandmarks::MIDDLE_MCP] = LandmarkPoint::new(0.5, 0.5);
        for (tip, offset) in HandLandmarks::FINGERTIPS.iter().zip(offsets) {
            points[*tip] = LandmarkPoint::new(0.5 + offset, 0.6);
        }
        HandLandmarks::new(points)
    }

    #[test]
    fn test_all_tips_at_palm_is_fist() {
        let hand = hand_with_tip_offsets([0.0; 5]);
        assert_eq!(curled_fingers(&hand, THRESHOLD), 5);
        assert!(is_fist(&hand, THRESHOLD, 4));
    }

    #[test]
    fn test_one_extended_finger_still_fist() {
        let hand = hand_with_tip_offsets([0.3, 0.05, 0.05, 0.05, 0.05]);
        assert!(is_fist(&hand, THRESHOLD, 4));
    }

    #[test]
    fn test_two_curled_is_not_fist() {
        let hand = hand_with_tip_offsets([0.1, 0.1, 0.25, 0.3, 0.35]);
        assert_eq!(curled_fingers(&hand, THRESHOLD), 2);
        assert!(!is_fist(&hand, THRESHOLD, 4));
    }

    #[test]
    fn test_pinch_distance_thumb_to_index() {
        let hand = hand_with_tip_offsets([-0.1, 0.2, 0.0, 0.0, 0.0]);
        assert!((pinch_distance(&hand) - 0.3).abs() < 1e-6);
    }
}
