//! JavaScript interop for the scroll-linked tween engine (GSAP + ScrollTrigger).
//! Provides Rust bindings to the helper functions defined in motion_helpers.js.

use crate::config::{REVEAL_STAGGER_SEC, TILT_PERSPECTIVE_PX};
use crate::effects::Tilt;
use crate::MotionError;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen(module = "/motion_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = engineAvailable)]
    fn engine_available() -> bool;

    #[wasm_bindgen(js_name = configureScrollTriggers, catch)]
    fn configure_scroll_triggers() -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = updateScrollTriggers)]
    fn update_scroll_triggers();

    #[wasm_bindgen(js_name = registerReveal, catch)]
    fn register_reveal_js(
        element: &Element,
        options: JsValue,
        on_progress: &js_sys::Function,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = registerParallax, catch)]
    fn register_parallax_js(target: &str, trigger: &str, shift_px: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = playHeroEntrance, catch)]
    fn play_hero_entrance_js() -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = onceInView, catch)]
    fn once_in_view_js(trigger: &str, start: &str, on_enter: &js_sys::Function)
        -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = tweenTilt)]
    fn tween_tilt_js(
        element: &Element,
        rotate_x: f64,
        rotate_y: f64,
        duration: f64,
        ease: &str,
        perspective: f64,
    );

    #[wasm_bindgen(js_name = setGlobalTimeScale)]
    fn set_global_time_scale_js(scale: f64);
}

/// Trigger window and tween shape for a `.reveal-element`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealOptions {
    pub start: &'static str,
    pub end: &'static str,
    pub duration: f64,
    pub ease: &'static str,
    pub delay: f64,
}

impl RevealOptions {
    /// Options for the `index`-th reveal element; later elements start later.
    pub fn staggered(index: usize) -> Self {
        Self {
            start: "top 85%",
            end: "top 20%",
            duration: 1.2,
            ease: "power3.out",
            delay: index as f64 * REVEAL_STAGGER_SEC,
        }
    }
}

fn ensure_loaded() -> Result<(), MotionError> {
    if engine_available() {
        Ok(())
    } else {
        Err(MotionError::Js("tween engine is not loaded".to_string()))
    }
}

/// Register the ScrollTrigger plugin and its refresh events.
pub fn configure() -> Result<(), MotionError> {
    ensure_loaded()?;
    configure_scroll_triggers().map_err(MotionError::from)
}

/// Let scroll-linked animations re-read the scroll position.
pub fn sync() {
    if engine_available() {
        update_scroll_triggers();
    }
}

pub fn register_reveal(
    element: &Element,
    options: &RevealOptions,
    on_progress: &js_sys::Function,
) -> Result<(), MotionError> {
    ensure_loaded()?;
    let options =
        serde_wasm_bindgen::to_value(options).map_err(|e| MotionError::Js(e.to_string()))?;
    register_reveal_js(element, options, on_progress).map_err(MotionError::from)
}

pub fn register_parallax(target: &str, trigger: &str, shift_px: f64) -> Result<(), MotionError> {
    ensure_loaded()?;
    register_parallax_js(target, trigger, shift_px).map_err(MotionError::from)
}

pub fn play_hero_entrance() -> Result<(), MotionError> {
    ensure_loaded()?;
    play_hero_entrance_js().map_err(MotionError::from)
}

/// Call `on_enter` the first time `trigger` crosses `start`.
pub fn once_in_view(
    trigger: &str,
    start: &str,
    on_enter: &js_sys::Function,
) -> Result<(), MotionError> {
    ensure_loaded()?;
    once_in_view_js(trigger, start, on_enter).map_err(MotionError::from)
}

/// Tween a card toward `tilt` (pointer moving over it).
pub fn tilt_card(element: &Element, tilt: Tilt) {
    if engine_available() {
        tween_tilt_js(
            element,
            tilt.rotate_x,
            tilt.rotate_y,
            0.3,
            "power2.out",
            TILT_PERSPECTIVE_PX,
        );
    }
}

/// Tween a card back to flat (pointer left).
pub fn release_card(element: &Element) {
    if engine_available() {
        tween_tilt_js(element, 0.0, 0.0, 0.5, "power3.out", TILT_PERSPECTIVE_PX);
    }
}

/// Scale the engine's global timeline. Used for reduced motion.
pub fn set_time_scale(scale: f64) {
    if engine_available() {
        set_global_time_scale_js(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_delay_staggers_by_index() {
        assert_eq!(RevealOptions::staggered(0).delay, 0.0);
        assert!((RevealOptions::staggered(4).delay - 0.2).abs() < 1e-12);
        assert_eq!(RevealOptions::staggered(1).start, "top 85%");
    }

    #[test]
    fn reveal_options_serialize_camel_case() {
        let json = serde_json::to_value(RevealOptions::staggered(2)).unwrap();
        assert_eq!(json["end"], "top 20%");
        assert_eq!(json["ease"], "power3.out");
        assert!(json.get("delay").is_some());
    }
}
