//! Seamless-loop carousel state machine.
//!
//! The rendered track holds `N + 2` slides: a clone of the last slide, the `N`
//! real slides, then a clone of the first. Moving onto a clone is animated like
//! any other move; once the transition settles the position is swapped, without
//! animation, to the real slide the clone mirrors.

use crate::config::{AUTOPLAY_PERIOD_MS, SWIPE_THRESHOLD_PX, TRANSITION_MS};
use log::debug;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub transition_ms: u32,
    pub autoplay_period_ms: u32,
    pub swipe_threshold_px: f64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            transition_ms: TRANSITION_MS,
            autoplay_period_ms: AUTOPLAY_PERIOD_MS,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Prev),
            "ArrowRight" => Some(Direction::Next),
            _ => None,
        }
    }

    /// `delta_x` is touch-end minus touch-start. A leftward swipe shows the next
    /// slide. Swipes at or under the threshold are ignored.
    pub fn from_swipe(delta_x: f64, threshold: f64) -> Option<Self> {
        if delta_x.is_nan() || delta_x.abs() <= threshold {
            return None;
        }
        if delta_x < 0.0 {
            Some(Direction::Next)
        } else {
            Some(Direction::Prev)
        }
    }
}

/// Position is an index into the display track, `0..=N+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    Idle { position: usize },
    Transitioning { from: usize, to: usize },
}

/// An animated move that has just started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub logical: usize,
}

/// How a transition came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    InPlace { position: usize },
    /// Landed on a clone and jumped, unanimated, to the mirrored real slide.
    Corrected { from: usize, to: usize },
}

impl Settled {
    pub fn position(self) -> usize {
        match self {
            Settled::InPlace { position } => position,
            Settled::Corrected { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Started { period_ms: u32 },
    Stopped,
}

/// One entry of the display track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySlot {
    pub logical: usize,
    pub is_clone: bool,
}

/// Opens once every slide image has either loaded or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessGate {
    total: usize,
    settled: HashSet<usize>,
}

impl ReadinessGate {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            settled: HashSet::with_capacity(total),
        }
    }

    /// Record a load or error for slide `logical`. Returns `true` only on the
    /// call that opens the gate.
    pub fn settle(&mut self, logical: usize) -> bool {
        if logical >= self.total || self.is_open() {
            return false;
        }
        self.settled.insert(logical);
        self.is_open()
    }

    pub fn is_open(&self) -> bool {
        self.settled.len() >= self.total
    }

    pub fn pending(&self) -> usize {
        self.total - self.settled.len()
    }
}

/// Holds at most one live autoplay timer. Dropping the handle is expected to
/// cancel the timer.
#[derive(Debug)]
pub struct AutoplaySlot<H> {
    handle: Option<H>,
}

impl<H> Default for AutoplaySlot<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> AutoplaySlot<H> {
    /// Create a timer via `make` unless one is already armed.
    pub fn arm(&mut self, make: impl FnOnce() -> H) -> bool {
        if self.handle.is_some() {
            return false;
        }
        self.handle = Some(make());
        true
    }

    pub fn disarm(&mut self) -> Option<H> {
        self.handle.take()
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopingCarousel<T> {
    slides: Vec<T>,
    phase: CarouselPhase,
    /// Bumped by every transition, so two moves to the same position differ.
    transitions: u64,
    playing: bool,
    gate: ReadinessGate,
    settings: CarouselSettings,
}

impl<T> LoopingCarousel<T> {
    /// `None` for an empty slide list: nothing to clone, time or listen to.
    pub fn new(slides: Vec<T>, settings: CarouselSettings) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        let gate = ReadinessGate::new(slides.len());
        Some(Self {
            slides,
            phase: CarouselPhase::Idle { position: 1 },
            transitions: 0,
            playing: false,
            gate,
            settings,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn display_len(&self) -> usize {
        self.slides.len() + 2
    }

    pub fn settings(&self) -> CarouselSettings {
        self.settings
    }

    pub fn slides(&self) -> &[T] {
        &self.slides
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    /// Display position currently shown, or being animated toward.
    pub fn position(&self) -> usize {
        match self.phase {
            CarouselPhase::Idle { position } => position,
            CarouselPhase::Transitioning { to, .. } => to,
        }
    }

    pub fn logical_of(&self, position: usize) -> usize {
        let n = self.slides.len();
        (position + n - 1) % n
    }

    pub fn logical_index(&self) -> usize {
        self.logical_of(self.position())
    }

    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, CarouselPhase::Transitioning { .. })
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_open()
    }

    pub fn pending_images(&self) -> usize {
        self.gate.pending()
    }

    /// The display track: `[clone(last), slide_0 .. slide_{N-1}, clone(first)]`.
    pub fn display_slots(&self) -> Vec<DisplaySlot> {
        let n = self.slides.len();
        (0..n + 2)
            .map(|position| DisplaySlot {
                logical: self.logical_of(position),
                is_clone: position == 0 || position == n + 1,
            })
            .collect()
    }

    pub fn display_slides(&self) -> impl Iterator<Item = (DisplaySlot, &T)> + '_ {
        self.display_slots()
            .into_iter()
            .map(move |slot| (slot, &self.slides[slot.logical]))
    }

    /// Start an animated move one slide over. Refused while transitioning.
    pub fn advance(&mut self, direction: Direction) -> Option<Transition> {
        let CarouselPhase::Idle { position } = self.phase else {
            debug!("carousel busy, ignoring {:?}", direction);
            return None;
        };
        let to = match direction {
            Direction::Next => position + 1,
            Direction::Prev => position - 1,
        };
        Some(self.begin(position, to))
    }

    /// Animate directly to logical slide `logical`.
    pub fn go_to(&mut self, logical: usize) -> Option<Transition> {
        let CarouselPhase::Idle { position } = self.phase else {
            return None;
        };
        let to = logical + 1;
        if logical >= self.slides.len() || to == position {
            return None;
        }
        Some(self.begin(position, to))
    }

    fn begin(&mut self, from: usize, to: usize) -> Transition {
        self.phase = CarouselPhase::Transitioning { from, to };
        self.transitions += 1;
        Transition {
            from,
            to,
            logical: self.logical_of(to),
        }
    }

    /// Finish the running transition, correcting off a clone if needed.
    pub fn settle(&mut self) -> Option<Settled> {
        let CarouselPhase::Transitioning { to, .. } = self.phase else {
            return None;
        };
        let n = self.slides.len();
        let settled = if to == 0 {
            Settled::Corrected { from: 0, to: n }
        } else if to == n + 1 {
            Settled::Corrected { from: n + 1, to: 1 }
        } else {
            Settled::InPlace { position: to }
        };
        self.phase = CarouselPhase::Idle {
            position: settled.position(),
        };
        Some(settled)
    }

    /// Timer callback. Advances only while still playing.
    pub fn autoplay_tick(&mut self) -> Option<Transition> {
        if !self.playing {
            return None;
        }
        self.advance(Direction::Next)
    }

    /// `None` until every image has settled; autoplay has not started yet.
    pub fn toggle_play_pause(&mut self) -> Option<Playback> {
        if !self.gate.is_open() {
            debug!("carousel images pending, ignoring play/pause");
            return None;
        }
        if self.playing {
            self.pause();
            Some(Playback::Stopped)
        } else {
            self.play();
            Some(Playback::Started {
                period_ms: self.settings.autoplay_period_ms,
            })
        }
    }

    /// Returns `false` if already playing or the images are still loading.
    pub fn play(&mut self) -> bool {
        if !self.gate.is_open() {
            return false;
        }
        !std::mem::replace(&mut self.playing, true)
    }

    /// Returns `false` if already paused.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }

    /// An image for slide `logical` loaded or failed. Opening the gate starts
    /// autoplay.
    pub fn image_settled(&mut self, logical: usize) -> bool {
        let opened = self.gate.settle(logical);
        if opened {
            self.play();
        }
        opened
    }

    pub fn swipe(&mut self, delta_x: f64) -> Option<Transition> {
        Direction::from_swipe(delta_x, self.settings.swipe_threshold_px)
            .and_then(|direction| self.advance(direction))
    }

    pub fn key(&mut self, key: &str) -> Option<Transition> {
        Direction::from_key(key).and_then(|direction| self.advance(direction))
    }

    /// Horizontal track offset as a percentage of one slide width.
    pub fn track_offset_percent(&self) -> f64 {
        -(self.position() as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> LoopingCarousel<&'static str> {
        let names = ["a", "b", "c", "d", "e"];
        LoopingCarousel::new(names[..n].to_vec(), CarouselSettings::default()).unwrap()
    }

    #[test]
    fn empty_slides_build_nothing() {
        assert!(LoopingCarousel::<u8>::new(Vec::new(), CarouselSettings::default()).is_none());
    }

    #[test]
    fn display_track_wraps_with_clones() {
        let c = carousel(3);
        let track: Vec<_> = c.display_slides().map(|(slot, s)| (*s, slot.is_clone)).collect();
        assert_eq!(
            track,
            vec![("c", true), ("a", false), ("b", false), ("c", false), ("a", true)]
        );
        assert_eq!(c.position(), 1);
        assert_eq!(c.logical_index(), 0);
    }

    #[test]
    fn advance_refused_while_transitioning() {
        let mut c = carousel(3);
        assert!(c.advance(Direction::Next).is_some());
        let before = c.clone();
        assert!(c.advance(Direction::Next).is_none());
        assert!(c.go_to(0).is_none());
        assert_eq!(c, before);
    }

    #[test]
    fn prev_from_first_corrects_to_last() {
        let mut c = carousel(3);
        let t = c.advance(Direction::Prev).unwrap();
        assert_eq!((t.from, t.to, t.logical), (1, 0, 2));
        assert_eq!(c.settle(), Some(Settled::Corrected { from: 0, to: 3 }));
        assert_eq!(c.position(), 3);
        assert_eq!(c.logical_index(), 2);
    }

    #[test]
    fn next_from_last_corrects_to_first() {
        let mut c = carousel(2);
        c.go_to(1).unwrap();
        c.settle();
        let t = c.advance(Direction::Next).unwrap();
        assert_eq!(t.to, 3);
        assert_eq!(t.logical, 0);
        assert_eq!(c.settle(), Some(Settled::Corrected { from: 3, to: 1 }));
    }

    #[test]
    fn single_slide_still_loops() {
        let mut c = carousel(1);
        assert_eq!(c.display_len(), 3);
        c.advance(Direction::Next).unwrap();
        assert_eq!(c.settle(), Some(Settled::Corrected { from: 2, to: 1 }));
        c.advance(Direction::Prev).unwrap();
        assert_eq!(c.settle(), Some(Settled::Corrected { from: 0, to: 1 }));
    }

    #[test]
    fn go_to_ignores_current_and_out_of_range() {
        let mut c = carousel(3);
        assert!(c.go_to(0).is_none());
        assert!(c.go_to(3).is_none());
        let t = c.go_to(2).unwrap();
        assert_eq!((t.to, t.logical), (3, 2));
    }

    #[test]
    fn settle_when_idle_is_noop() {
        let mut c = carousel(3);
        assert_eq!(c.settle(), None);
    }

    fn ready(n: usize) -> LoopingCarousel<&'static str> {
        let mut c = carousel(n);
        for logical in 0..n {
            c.image_settled(logical);
        }
        c
    }

    #[test]
    fn autoplay_tick_requires_playing() {
        let mut c = ready(3);
        c.pause();
        assert!(c.autoplay_tick().is_none());
        c.play();
        assert!(c.autoplay_tick().is_some());
    }

    #[test]
    fn toggle_reports_period() {
        let mut c = ready(3);
        assert_eq!(c.toggle_play_pause(), Some(Playback::Stopped));
        assert_eq!(
            c.toggle_play_pause(),
            Some(Playback::Started { period_ms: 5_000 })
        );
        assert!(c.is_playing());
        assert!(c.pause());
        assert!(!c.pause());
    }

    #[test]
    fn play_pause_refused_while_images_load() {
        let mut c = carousel(3);
        assert_eq!(c.toggle_play_pause(), None);
        assert!(!c.play());
        assert!(!c.is_playing());
        c.image_settled(0);
        c.image_settled(1);
        assert_eq!(c.toggle_play_pause(), None);
        assert!(c.image_settled(2));
        assert!(c.is_playing());
    }

    #[test]
    fn repeated_move_to_same_position_is_a_new_transition() {
        let mut c = carousel(1);
        c.advance(Direction::Next).unwrap();
        let first = (c.position(), c.is_transitioning(), c.transition_count());
        c.settle();
        c.advance(Direction::Next).unwrap();
        let second = (c.position(), c.is_transitioning(), c.transition_count());
        assert_eq!((first.0, first.1), (second.0, second.1));
        assert_ne!(first.2, second.2);
    }

    #[test]
    fn readiness_counts_failures_and_ignores_duplicates() {
        let mut c = carousel(3);
        assert!(!c.image_settled(0));
        assert!(!c.image_settled(0));
        assert!(!c.image_settled(7));
        assert_eq!(c.pending_images(), 2);
        assert!(!c.image_settled(2));
        assert!(c.image_settled(1));
        assert!(c.is_ready());
        assert!(c.is_playing());
        assert!(!c.image_settled(1));
    }

    #[test]
    fn swipe_and_keys_map_to_directions() {
        assert_eq!(Direction::from_swipe(-60.0, 50.0), Some(Direction::Next));
        assert_eq!(Direction::from_swipe(60.0, 50.0), Some(Direction::Prev));
        assert_eq!(Direction::from_swipe(30.0, 50.0), None);
        assert_eq!(Direction::from_swipe(-50.0, 50.0), None);
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Prev));
        assert_eq!(Direction::from_key("Escape"), None);
    }

    #[test]
    fn autoplay_slot_holds_one_handle() {
        let mut slot = AutoplaySlot::default();
        let mut created = 0;
        assert!(slot.arm(|| {
            created += 1;
            created
        }));
        assert!(!slot.arm(|| 99));
        assert!(slot.is_armed());
        assert_eq!(slot.disarm(), Some(1));
        assert!(!slot.is_armed());
    }

    #[test]
    fn track_offset_follows_position() {
        let mut c = carousel(3);
        assert_eq!(c.track_offset_percent(), -100.0);
        c.advance(Direction::Next);
        assert_eq!(c.track_offset_percent(), -200.0);
    }
}
