#![cfg(target_arch = "wasm32")]

use hud_wasm::results::frame_from_results;
use hud_wasm::GestureHud;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn landmark(x: f64, y: f64) -> JsValue {
    let point = js_sys::Object::new();
    js_sys::Reflect::set(&point, &"x".into(), &x.into()).unwrap();
    js_sys::Reflect::set(&point, &"y".into(), &y.into()).unwrap();
    js_sys::Reflect::set(&point, &"z".into(), &0.0.into()).unwrap();
    point.into()
}

/// Open hand centred at `cx` with the index tip at (`tip_x`, `tip_y`)
fn open_hand(cx: f64, tip_x: f64, tip_y: f64) -> js_sys::Array {
    let hand = js_sys::Array::new();
    for index in 0..21 {
        let point = match index {
            0 => landmark(cx, 0.9),
            8 => landmark(tip_x, tip_y),
            9 => landmark(cx, 0.7),
            _ => landmark(cx, 0.2),
        };
        hand.push(&point);
    }
    hand
}

fn fist(cx: f64) -> js_sys::Array {
    let hand = js_sys::Array::new();
    for _ in 0..21 {
        hand.push(&landmark(cx, 0.5));
    }
    hand
}

fn results_with(hands: &[js_sys::Array]) -> JsValue {
    let list = js_sys::Array::new();
    for hand in hands {
        list.push(hand);
    }
    let results = js_sys::Object::new();
    js_sys::Reflect::set(&results, &"multiHandLandmarks".into(), &list).unwrap();
    results.into()
}

#[wasm_bindgen_test]
fn test_missing_landmarks_is_empty_frame() {
    let frame = frame_from_results(&js_sys::Object::new().into()).unwrap();
    assert!(frame.is_empty());

    let frame = frame_from_results(&JsValue::NULL).unwrap();
    assert!(frame.is_empty());
}

#[wasm_bindgen_test]
fn test_results_are_converted() {
    let results = results_with(&[open_hand(0.3, 0.4, 0.5), fist(0.8)]);
    let frame = frame_from_results(&results).unwrap();

    assert_eq!(frame.hands.len(), 2);
    assert_eq!(frame.hands[0].len(), 21);
    assert!((frame.hands[0][8].x - 0.4).abs() < 1e-6);
    assert!((frame.hands[1][0].y - 0.5).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn test_non_numeric_landmark_is_error() {
    let hand = js_sys::Array::new();
    let point = js_sys::Object::new();
    js_sys::Reflect::set(&point, &"x".into(), &"left".into()).unwrap();
    js_sys::Reflect::set(&point, &"y".into(), &0.5.into()).unwrap();
    hand.push(&point);

    assert!(frame_from_results(&results_with(&[hand])).is_err());
}

#[wasm_bindgen_test]
fn test_initial_readout() {
    let hud = GestureHud::new();

    assert_eq!(hud.rot_x(), 0.0);
    assert_eq!(hud.rot_y(), 0.0);
    assert!((hud.zoom() - 3.2).abs() < 1e-6);
    assert!(!hud.paused());
    assert_eq!(hud.status_text(), "ACTIVE");
    assert!(hud.info_text().contains("Right hand: not detected"));
}

#[wasm_bindgen_test]
fn test_rotation_flows_to_getters() {
    let mut hud = GestureHud::new();

    hud.on_results(&results_with(&[open_hand(0.5, 0.5, 0.5)]), 1280.0, 0.0)
        .unwrap();
    hud.on_results(&results_with(&[open_hand(0.5, 0.6, 0.5)]), 1280.0, 33.0)
        .unwrap();
    assert!(hud.right_detected());
    assert!(!hud.left_detected());

    for _ in 0..300 {
        hud.tick();
    }
    assert!((hud.rot_y() - 0.48).abs() < 1e-4);
    assert!(hud.info_text().contains("Right hand: Rotate"));
}

#[wasm_bindgen_test]
fn test_fist_pauses() {
    let mut hud = GestureHud::new();

    let toggled = hud
        .on_results(&results_with(&[fist(0.5)]), 1280.0, 1000.0)
        .unwrap();
    assert!(toggled);
    assert!(hud.paused());
    assert_eq!(hud.status_text(), "PAUSED");

    let toggled = hud
        .on_results(&results_with(&[fist(0.5)]), 1280.0, 1300.0)
        .unwrap();
    assert!(!toggled);
    assert!(hud.paused());
}
