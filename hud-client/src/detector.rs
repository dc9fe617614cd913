use std::f32::consts::TAU;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hud_core::GestureError;
use hud_shared::{DetectionFrame, HandLandmarks, LandmarkPoint, LANDMARK_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of landmark frames. Implementations wrap a real detector, a
/// recording, or a generator.
pub trait LandmarkDetector {
    /// Next completed inference. `Ok(None)` means the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<DetectionFrame>, GestureError>;
}

/// Replays frames recorded as JSON lines, one `DetectionFrame` per line
pub struct ReplayDetector<R> {
    reader: R,
    line_no: usize,
}

impl ReplayDetector<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GestureError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            GestureError::DetectorUnavailable(format!(
                "cannot open replay {}: {}",
                path.display(),
                e
            ))
        })?;
        log::info!("Replaying landmark frames from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplayDetector<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { reader, line_no: 0 }
    }
}

impl<R: BufRead> LandmarkDetector for ReplayDetector<R> {
    fn next_frame(&mut self) -> Result<Option<DetectionFrame>, GestureError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| GestureError::DetectorUnavailable(format!("replay read failed: {}", e)))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return match DetectionFrame::from_json(trimmed) {
                Ok(frame) => Ok(Some(frame)),
                Err(e) => {
                    log::warn!("Replay line {} is not a frame ({}), using empty frame", self.line_no, e);
                    Ok(Some(DetectionFrame::empty()))
                }
            };
        }
    }
}

/// Generates a right hand sweeping side to side and a left hand opening and
/// closing a pinch, with small per-landmark jitter.
pub struct SyntheticDetector {
    rng: StdRng,
    frame: u64,
    max_frames: Option<u64>,
    fist_period: Option<u64>,
    jitter: f32,
}

impl SyntheticDetector {
    /// Frames per full sweep/pinch cycle
    const CYCLE: f32 = 90.0;
    /// Consecutive frames a fist is held when `fist_period` is set
    const FIST_FRAMES: u64 = 3;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            frame: 0,
            max_frames: None,
            fist_period: None,
            jitter: 0.003,
        }
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Close the right hand into a fist for a few frames every `period` frames
    pub fn with_fist_period(mut self, period: u64) -> Self {
        self.fist_period = Some(period.max(Self::FIST_FRAMES + 1));
        self
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }

    fn jittered(&mut self, x: f32, y: f32) -> LandmarkPoint {
        if self.jitter == 0.0 {
            return LandmarkPoint::new(x, y);
        }
        let jx = self.rng.gen_range(-self.jitter..=self.jitter);
        let jy = self.rng.gen_range(-self.jitter..=self.jitter);
        LandmarkPoint::new((x + jx).clamp(0.0, 1.0), (y + jy).clamp(0.0, 1.0))
    }

    fn build_hand(&mut self, cx: f32, thumb: (f32, f32), index: (f32, f32), fist: bool) -> HandLandmarks {
        let wrist = (cx, 0.85);
        let mcp = (cx, 0.65);
        let palm = (cx, 0.75);

        let mut points = [LandmarkPoint::default(); LANDMARK_COUNT];
        for (i, point) in points.iter_mut().enumerate() {
            // Joints between the palm and the fingertips
            let t = (i % 4) as f32 / 4.0;
            *point = LandmarkPoint::new(cx, 0.65 - 0.2 * t);
        }
        points[HandLandmarks::WRIST] = LandmarkPoint::new(wrist.0, wrist.1);
        points[HandLandmarks::MIDDLE_MCP] = LandmarkPoint::new(mcp.0, mcp.1);

        let tips = if fist {
            [palm; 5]
        } else {
            [thumb, index, (cx, 0.35), (cx + 0.03, 0.37), (cx + 0.06, 0.42)]
        };
        for (tip, (x, y)) in HandLandmarks::FINGERTIPS.iter().zip(tips) {
            points[*tip] = LandmarkPoint::new(x, y);
        }

        for point in points.iter_mut() {
            *point = self.jittered(point.x, point.y);
        }
        HandLandmarks::new(points)
    }
}

impl LandmarkDetector for SyntheticDetector {
    fn next_frame(&mut self) -> Result<Option<DetectionFrame>, GestureError> {
        if self.max_frames.is_some_and(|max| self.frame >= max) {
            return Ok(None);
        }

        let phase = (self.frame as f32 / Self::CYCLE) * TAU;
        let fist = self
            .fist_period
            .is_some_and(|period| self.frame % period >= period - Self::FIST_FRAMES);

        let right_cx = 0.7;
        let index = (right_cx + 0.15 * phase.sin(), 0.4 + 0.05 * phase.cos());
        let right = self.build_hand(right_cx, (right_cx - 0.08, 0.5), index, fist);

        let left_cx = 0.25;
        let gap = 0.09 + 0.06 * phase.sin();
        let left = self.build_hand(
            left_cx,
            (left_cx - gap / 2.0, 0.4),
            (left_cx + gap / 2.0, 0.4),
            false,
        );

        self.frame += 1;
        Ok(Some(DetectionFrame::from_hands(&[left, right])))
    }
}
