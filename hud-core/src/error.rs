use alloc::string::String;

/// Failures surfaced by the gesture pipeline and its collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    /// A detected hand did not carry exactly 21 landmarks. The hand is
    /// treated as absent for the frame it arrived in.
    #[error("Malformed frame: hand {hand} has {landmarks} landmarks, expected 21")]
    MalformedFrame { hand: usize, landmarks: usize },

    /// The landmark detector failed to start or stopped delivering frames.
    #[error("Detector unavailable: {0}")]
    DetectorUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
