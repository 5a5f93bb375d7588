//! Presentation behaviour for the Yufeng university and library sites.
//!
//! Two state machines carry the page: an inertial scroller that eases a
//! rendered offset toward a wheel-driven target, and a looping image carousel
//! that hides its wrap-around behind clone slides. Both are plain Rust types
//! driven synchronously; [`page`] and [`hooks`] attach them to the browser.

use std::fmt;
use wasm_bindgen::{JsCast, JsValue};

pub mod carousel;
pub mod components;
pub mod config;
pub mod effects;
pub mod engine;
pub mod frame;
pub mod hooks;
pub mod logging;
pub mod page;
pub mod scroll;
pub mod utils;

pub use carousel::{CarouselSettings, Direction, LoopingCarousel};
pub use config::{PageConfig, Slide};
pub use frame::FrameDriver;
pub use scroll::InertialScroller;

// Failures are reported and the affected feature is skipped; nothing here is fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    InvalidConfig(String),
    OutOfRange { field: &'static str, value: f64 },
    MissingElement(String),
    /// An exception raised on the JavaScript side.
    Js(String),
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidConfig(reason) => write!(f, "Invalid motion config: {}", reason),
            MotionError::OutOfRange { field, value } => {
                write!(f, "Config value {} = {} is out of range", field, value)
            }
            MotionError::MissingElement(what) => write!(f, "Missing element: {}", what),
            MotionError::Js(message) => write!(f, "JavaScript error: {}", message),
        }
    }
}

impl std::error::Error for MotionError {}

impl From<JsValue> for MotionError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        MotionError::Js(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_readably() {
        assert_eq!(
            MotionError::OutOfRange { field: "damping", value: 1.5 }.to_string(),
            "Config value damping = 1.5 is out of range"
        );
        assert_eq!(
            MotionError::MissingElement(".lib-nav".into()).to_string(),
            "Missing element: .lib-nav"
        );
    }
}
