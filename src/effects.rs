//! Small per-frame page effects driven by the frame loop and pointer input.

use crate::config::{MOUSE_EASE, NAV_HIDE_AFTER_PX, REVEAL_SHIFT_PX};
use crate::utils::{format_grouped, StatValue};

/// Eases a normalised pointer position toward the latest mouse sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseTracker {
    target: (f64, f64),
    current: (f64, f64),
    ease: f64,
}

impl Default for MouseTracker {
    fn default() -> Self {
        Self::new(MOUSE_EASE)
    }
}

impl MouseTracker {
    pub fn new(ease: f64) -> Self {
        Self {
            target: (0.5, 0.5),
            current: (0.5, 0.5),
            ease: ease.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.target = (client_x / width, client_y / height);
    }

    pub fn tick(&mut self) -> (f64, f64) {
        let (cx, cy) = self.current;
        let (tx, ty) = self.target;
        self.current = (cx + (tx - cx) * self.ease, cy + (ty - cy) * self.ease);
        self.current
    }

    /// Values for the `--mouse-x` / `--mouse-y` custom properties.
    pub fn css_vars(&self) -> (String, String) {
        (
            format!("{}%", self.current.0 * 100.0),
            format!("{}%", self.current.1 * 100.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavVisibility {
    Shown,
    Hidden,
}

impl NavVisibility {
    pub fn transform(self) -> &'static str {
        match self {
            NavVisibility::Shown => "translateY(0)",
            NavVisibility::Hidden => "translateY(-100%)",
        }
    }
}

/// Hides the navigation bar while scrolling down past a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct NavAutoHide {
    last_offset: f64,
    hide_after: f64,
}

impl Default for NavAutoHide {
    fn default() -> Self {
        Self::new(NAV_HIDE_AFTER_PX)
    }
}

impl NavAutoHide {
    pub fn new(hide_after: f64) -> Self {
        Self {
            last_offset: 0.0,
            hide_after,
        }
    }

    pub fn update(&mut self, offset: f64) -> NavVisibility {
        let visibility = if offset > self.last_offset && offset > self.hide_after {
            NavVisibility::Hidden
        } else {
            NavVisibility::Shown
        };
        self.last_offset = offset;
        visibility
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Card rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub const FLAT: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };
}

/// Tilt a card toward the pointer; the edges reach `max_deg`.
pub fn tilt_toward(pointer_x: f64, pointer_y: f64, rect: Rect, max_deg: f64) -> Tilt {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Tilt::FLAT;
    }
    let x = pointer_x - rect.left;
    let y = pointer_y - rect.top;
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;
    Tilt {
        rotate_x: ((y - center_y) / center_y) * max_deg,
        rotate_y: ((center_x - x) / center_x) * max_deg,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_y: f64,
}

impl RevealStyle {
    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }
}

/// Style for a reveal element at scroll progress `progress`.
pub fn reveal_style(progress: f64) -> RevealStyle {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    RevealStyle {
        opacity: p,
        translate_y: REVEAL_SHIFT_PX * (1.0 - p),
    }
}

/// `power2.out` in tween-engine naming: cubic ease-out.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Counts a statistic up from zero, keyed off frame timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCounter {
    stat: StatValue,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl StatCounter {
    pub fn new(stat: StatValue, duration_ms: f64) -> Self {
        Self {
            stat,
            duration_ms: duration_ms.max(1.0),
            started_at: None,
        }
    }

    /// Text to display at `now`, and whether the count has finished. The first
    /// call fixes the start time.
    pub fn tick(&mut self, now: f64) -> (String, bool) {
        let start = *self.started_at.get_or_insert(now);
        let t = ((now - start) / self.duration_ms).clamp(0.0, 1.0);
        let shown = (self.stat.value * ease_out_cubic(t)).floor().max(0.0) as u64;
        (format!("{}{}", format_grouped(shown), self.stat.suffix), t >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_eases_toward_pointer() {
        let mut m = MouseTracker::default();
        m.on_pointer_move(1000.0, 0.0, 1000.0, 500.0);
        let (x, y) = m.tick();
        assert!((x - 0.55).abs() < 1e-9);
        assert!((y - 0.45).abs() < 1e-9);
        for _ in 0..200 {
            m.tick();
        }
        let (x, y) = m.tick();
        assert!((x - 1.0).abs() < 1e-6 && y.abs() < 1e-6);
    }

    #[test]
    fn mouse_ignores_zero_viewport() {
        let mut m = MouseTracker::default();
        m.on_pointer_move(10.0, 10.0, 0.0, 0.0);
        assert_eq!(m.tick(), (0.5, 0.5));
        assert_eq!(m.css_vars(), ("50%".to_string(), "50%".to_string()));
    }

    #[test]
    fn nav_hides_only_when_scrolling_down_past_threshold() {
        let mut nav = NavAutoHide::default();
        assert_eq!(nav.update(50.0), NavVisibility::Shown);
        assert_eq!(nav.update(150.0), NavVisibility::Hidden);
        assert_eq!(nav.update(150.0), NavVisibility::Shown);
        assert_eq!(nav.update(120.0), NavVisibility::Shown);
        assert_eq!(nav.update(400.0), NavVisibility::Hidden);
    }

    #[test]
    fn tilt_at_corners_and_center() {
        let rect = Rect { left: 100.0, top: 50.0, width: 200.0, height: 100.0 };
        assert_eq!(tilt_toward(200.0, 100.0, rect, 5.0), Tilt::FLAT);
        let corner = tilt_toward(100.0, 50.0, rect, 5.0);
        assert_eq!(corner, Tilt { rotate_x: -5.0, rotate_y: 5.0 });
        let degenerate = Rect { width: 0.0, ..rect };
        assert_eq!(tilt_toward(1.0, 1.0, degenerate, 5.0), Tilt::FLAT);
    }

    #[test]
    fn reveal_interpolates_and_clamps() {
        assert_eq!(reveal_style(0.0), RevealStyle { opacity: 0.0, translate_y: 60.0 });
        assert_eq!(reveal_style(0.5).translate_y, 30.0);
        assert_eq!(reveal_style(2.0), RevealStyle { opacity: 1.0, translate_y: 0.0 });
        assert_eq!(reveal_style(f64::NAN).opacity, 0.0);
        assert_eq!(reveal_style(0.5).transform(), "translateY(30px)");
    }

    #[test]
    fn counter_runs_to_final_value() {
        let mut counter = StatCounter::new(
            StatValue { value: 12_000.0, suffix: "+".into() },
            2_000.0,
        );
        assert_eq!(counter.tick(100.0), ("0+".to_string(), false));
        let (mid, done) = counter.tick(1_100.0);
        assert!(!done);
        assert_eq!(mid, "10,500+");
        assert_eq!(counter.tick(2_100.0), ("12,000+".to_string(), true));
    }

    #[test]
    fn cubic_ease_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
    }
}
