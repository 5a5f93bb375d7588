//! Page-level motion configuration.
//!
//! Every tunable has a compile-time default below. A page may override any of
//! them, and supply the carousel slides, through a JSON block:
//!
//! ```html
//! <script type="application/json" id="motion-config">
//!   { "damping": 0.1, "slides": [{ "src": "campus.jpg", "alt": "Campus" }] }
//! </script>
//! ```

use crate::carousel::CarouselSettings;
use crate::MotionError;
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};

// Inertial scroll
pub const DEFAULT_DAMPING: f64 = 0.075;
pub const STOP_EPSILON: f64 = 0.1;
/// Offsets render rounded to hundredths; a tighter stop distance is meaningless.
pub const MIN_STOP_EPSILON: f64 = 0.01;
pub const NAV_OFFSET_PX: f64 = 80.0;

// Carousel
pub const AUTOPLAY_PERIOD_MS: u32 = 5_000;
pub const TRANSITION_MS: u32 = 500;
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

// Reduced motion
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const REDUCED_MOTION_DAMPING: f64 = 1.0;
pub const REDUCED_MOTION_TIME_SCALE: f64 = 10.0;

// Page effects
pub const MOUSE_EASE: f64 = 0.1;
pub const NAV_HIDE_AFTER_PX: f64 = 100.0;
pub const TILT_MAX_DEG: f64 = 5.0;
pub const TILT_PERSPECTIVE_PX: f64 = 1_000.0;
pub const REVEAL_SHIFT_PX: f64 = 60.0;
pub const REVEAL_STAGGER_SEC: f64 = 0.05;
pub const COUNTER_DURATION_MS: f64 = 2_000.0;
pub const HERO_PARALLAX_PX: f64 = 150.0;

// DOM hooks
pub const CONFIG_ELEMENT_ID: &str = "motion-config";
pub const CAROUSEL_HOST_ID: &str = "campus-carousel";

/// A single logical carousel slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// All recognised options, with defaults filled in for anything omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub damping: f64,
    pub stop_epsilon: f64,
    pub nav_offset_px: f64,
    pub autoplay_period_ms: u32,
    pub transition_ms: u32,
    pub swipe_threshold_px: f64,
    pub reduced_motion_damping: f64,
    /// Global time scale handed to the tween engine under reduced motion.
    /// Values above 1 fast-forward animations instead of removing them.
    pub reduced_motion_time_scale: f64,
    pub mouse_ease: f64,
    pub nav_hide_after_px: f64,
    pub tilt_max_deg: f64,
    pub counter_duration_ms: f64,
    pub log_level: String,
    pub slides: Vec<Slide>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            stop_epsilon: STOP_EPSILON,
            nav_offset_px: NAV_OFFSET_PX,
            autoplay_period_ms: AUTOPLAY_PERIOD_MS,
            transition_ms: TRANSITION_MS,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            reduced_motion_damping: REDUCED_MOTION_DAMPING,
            reduced_motion_time_scale: REDUCED_MOTION_TIME_SCALE,
            mouse_ease: MOUSE_EASE,
            nav_hide_after_px: NAV_HIDE_AFTER_PX,
            tilt_max_deg: TILT_MAX_DEG,
            counter_duration_ms: COUNTER_DURATION_MS,
            log_level: "info".to_string(),
            slides: Vec::new(),
        }
    }
}

/// Fails when `value` lies outside the half-open interval `(0, 1]`.
fn check_unit_interval(field: &'static str, value: f64) -> Result<(), MotionError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MotionError::OutOfRange { field, value })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), MotionError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MotionError::OutOfRange { field, value })
    }
}

impl PageConfig {
    /// Parse and validate a JSON override block.
    pub fn from_json(raw: &str) -> Result<Self, MotionError> {
        let config: PageConfig =
            serde_json::from_str(raw).map_err(|e| MotionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the page's `#motion-config` block, falling back to defaults when it
    /// is absent or unusable.
    pub fn from_document() -> Self {
        let raw = gloo_utils::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        match raw {
            None => Self::default(),
            Some(raw) if raw.trim().is_empty() => Self::default(),
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
        }
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        check_unit_interval("damping", self.damping)?;
        check_unit_interval("reduced_motion_damping", self.reduced_motion_damping)?;
        check_unit_interval("mouse_ease", self.mouse_ease)?;
        if !self.stop_epsilon.is_finite() || self.stop_epsilon < MIN_STOP_EPSILON {
            return Err(MotionError::OutOfRange {
                field: "stop_epsilon",
                value: self.stop_epsilon,
            });
        }
        check_positive("autoplay_period_ms", self.autoplay_period_ms as f64)?;
        check_positive("transition_ms", self.transition_ms as f64)?;
        check_positive("reduced_motion_time_scale", self.reduced_motion_time_scale)?;
        check_positive("counter_duration_ms", self.counter_duration_ms)?;
        if self.swipe_threshold_px < 0.0 {
            return Err(MotionError::OutOfRange {
                field: "swipe_threshold_px",
                value: self.swipe_threshold_px,
            });
        }
        Ok(())
    }

    /// Collapse scroll easing to a direct pass-through.
    pub fn apply_reduced_motion(&mut self) {
        self.damping = self.reduced_motion_damping;
    }

    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn carousel_settings(&self) -> CarouselSettings {
        CarouselSettings {
            transition_ms: self.transition_ms,
            autoplay_period_ms: self.autoplay_period_ms,
            swipe_threshold_px: self.swipe_threshold_px,
        }
    }
}
