//! Browser bridge: MediaPipe Hands results in, smoothed control signals out.
//!
//! JavaScript calls `on_results` from the detector callback and `tick` from
//! `requestAnimationFrame`, then reads the getters to drive the scene.

pub mod results;

use hud_core::GestureEngine;
use hud_shared::ControlSignals;
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format_args!($($t)*).to_string().into()))
}

#[wasm_bindgen]
pub struct GestureHud {
    engine: GestureEngine,
    signals: ControlSignals,
}

#[wasm_bindgen]
impl GestureHud {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GestureHud {
        console_log!("Initializing gesture HUD");
        let engine = GestureEngine::new();
        let signals = engine.signals();
        GestureHud { engine, signals }
    }

    /// Feed one detector callback. Returns true if the pause state flipped.
    pub fn on_results(
        &mut self,
        results: &JsValue,
        overlay_width: f64,
        now_ms: f64,
    ) -> Result<bool, JsValue> {
        let frame = results::frame_from_results(results)?;
        let outcome = self
            .engine
            .process_frame(&frame, overlay_width as f32, now_ms.max(0.0) as u64);

        for rejected in &outcome.rejected {
            console_log!("Ignoring hand: {}", rejected);
        }
        if outcome.pause_toggled {
            console_log!(
                "Control {}",
                if self.engine.is_paused() { "paused" } else { "resumed" }
            );
        }

        self.signals = self.engine.signals();
        Ok(outcome.pause_toggled)
    }

    /// Advance smoothing by one render frame
    pub fn tick(&mut self) {
        self.engine.tick();
        self.signals = self.engine.signals();
    }

    pub fn rot_x(&self) -> f64 {
        self.signals.rot_x as f64
    }

    pub fn rot_y(&self) -> f64 {
        self.signals.rot_y as f64
    }

    pub fn zoom(&self) -> f64 {
        self.signals.zoom as f64
    }

    pub fn paused(&self) -> bool {
        self.signals.paused
    }

    pub fn right_detected(&self) -> bool {
        self.signals.right_detected
    }

    pub fn left_detected(&self) -> bool {
        self.signals.left_detected
    }

    pub fn status_text(&self) -> String {
        self.signals.mode_label().to_string()
    }

    pub fn info_text(&self) -> String {
        self.signals.info_lines().join("\n")
    }
}

impl Default for GestureHud {
    fn default() -> Self {
        Self::new()
    }
}
