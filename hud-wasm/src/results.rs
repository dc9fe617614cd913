use hud_shared::{DetectionFrame, LandmarkPoint};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Convert a MediaPipe Hands `results` object into a detection frame.
///
/// Only `results.multiHandLandmarks` is read; a missing or null array is an
/// empty frame. Each landmark must expose numeric `x` and `y`.
pub fn frame_from_results(results: &JsValue) -> Result<DetectionFrame, JsValue> {
    if results.is_null() || results.is_undefined() {
        return Ok(DetectionFrame::empty());
    }

    let hands = js_sys::Reflect::get(results, &"multiHandLandmarks".into())?;
    if hands.is_null() || hands.is_undefined() {
        return Ok(DetectionFrame::empty());
    }
    let hands = hands
        .dyn_into::<js_sys::Array>()
        .map_err(|_| JsValue::from_str("multiHandLandmarks is not an array"))?;

    let mut frame = DetectionFrame::empty();
    for hand in hands.iter() {
        let hand = hand
            .dyn_into::<js_sys::Array>()
            .map_err(|_| JsValue::from_str("Hand landmarks are not an array"))?;

        let mut points = Vec::with_capacity(hand.length() as usize);
        for landmark in hand.iter() {
            let x = js_sys::Reflect::get(&landmark, &"x".into())?
                .as_f64()
                .ok_or_else(|| JsValue::from_str("Invalid landmark x"))? as f32;
            let y = js_sys::Reflect::get(&landmark, &"y".into())?
                .as_f64()
                .ok_or_else(|| JsValue::from_str("Invalid landmark y"))? as f32;
            points.push(LandmarkPoint::new(x, y));
        }
        frame.hands.push(points);
    }

    Ok(frame)
}
