//! Inertial scroll engine.
//!
//! Wheel input moves a *target* offset; every frame the *current* offset closes
//! a fixed fraction (`damping`) of the remaining distance. Other effects read
//! `current` so they inherit the easing for free.

use crate::config::{DEFAULT_DAMPING, STOP_EPSILON};
use crate::utils::round_to_hundredths;

const MIN_STEP: f64 = 0.01;

/// Whether the rendered offset is still catching up with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Animating,
}

#[derive(Debug, Clone)]
pub struct InertialScroller {
    target: f64,
    current: f64,
    damping: f64,
    epsilon: f64,
    phase: ScrollPhase,
}

impl Default for InertialScroller {
    fn default() -> Self {
        Self::new(DEFAULT_DAMPING, STOP_EPSILON)
    }
}

impl InertialScroller {
    /// `damping` is clamped into `(0, 1]`; `1` renders the target directly.
    pub fn new(damping: f64, epsilon: f64) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            damping: clamp_damping(damping),
            epsilon: epsilon.abs(),
            phase: ScrollPhase::Idle,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == ScrollPhase::Animating
    }

    /// Accumulate a wheel delta. `max_offset` must be measured by the caller on
    /// every event since the document can grow after images load.
    pub fn on_wheel(&mut self, delta_y: f64, max_offset: f64) {
        if !delta_y.is_finite() {
            return;
        }
        self.target = clamp_offset(self.target + delta_y, max_offset);
        self.phase = ScrollPhase::Animating;
    }

    /// Adopt the native scroll position when the user moved the scrollbar
    /// directly. Returns `true` if a resync happened.
    pub fn on_native_scroll(&mut self, native_offset: f64) -> bool {
        if self.is_animating() {
            return false;
        }
        self.target = native_offset;
        self.current = native_offset;
        true
    }

    /// Jump the target (anchor navigation) and ease toward it.
    pub fn set_target(&mut self, offset: f64, max_offset: f64) {
        self.target = clamp_offset(offset, max_offset);
        self.phase = ScrollPhase::Animating;
    }

    /// Advance one display frame and return the offset to render.
    pub fn tick(&mut self) -> f64 {
        let remaining = self.target - self.current;
        let mut next = round_to_hundredths(self.current + remaining * self.damping);
        // Steps under half a hundredth round back to the same value.
        if next == self.current && remaining.abs() >= self.epsilon {
            next = if remaining.abs() <= MIN_STEP {
                self.target
            } else {
                round_to_hundredths(self.current + MIN_STEP.copysign(remaining))
            };
        }
        // Targets off the hundredths grid can round past; never overshoot.
        if (self.target - next) * remaining < 0.0 {
            next = self.target;
        }
        self.current = next;

        let gap = (self.target - self.current).abs();
        if gap < self.epsilon || gap == 0.0 {
            self.phase = ScrollPhase::Idle;
        }
        self.current
    }
}

fn clamp_damping(damping: f64) -> f64 {
    if damping.is_finite() && damping > 0.0 {
        damping.min(1.0)
    } else {
        DEFAULT_DAMPING
    }
}

fn clamp_offset(offset: f64, max_offset: f64) -> f64 {
    offset.min(max_offset.max(0.0)).max(0.0)
}
