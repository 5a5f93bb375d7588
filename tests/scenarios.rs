use yufeng_motion::carousel::{AutoplaySlot, Playback, Settled};
use yufeng_motion::{CarouselSettings, Direction, FrameDriver, InertialScroller, LoopingCarousel};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn target_stays_within_bounds_for_any_wheel_sequence() {
    let deltas = [
        120.0, -4000.0, 53.5, 9999.0, -0.5, 300.0, -120.0, 1e9, -1e9, 7.25, f64::NAN,
    ];
    let max = 2_400.0;
    let mut s = InertialScroller::default();
    for (i, delta) in deltas.iter().cycle().take(200).enumerate() {
        // shrink and grow the document as layout settles
        let bound = if i % 7 == 0 { max / 2.0 } else { max };
        s.on_wheel(*delta, bound);
        assert!(s.target() >= 0.0 && s.target() <= bound, "target {}", s.target());
        s.tick();
    }
}

#[test]
fn current_converges_without_overshoot() {
    for damping in [0.02, 0.075, 0.3, 0.75] {
        let mut s = InertialScroller::new(damping, 0.1);
        s.on_wheel(1000.0, 5000.0);
        let mut previous = s.current();
        let mut frames = 0;
        while s.is_animating() {
            let current = s.tick();
            assert!(current >= previous, "moved backwards at damping {}", damping);
            assert!(current <= 1000.0, "overshot at damping {}", damping);
            previous = current;
            frames += 1;
            assert!(frames < 2_000, "no convergence at damping {}", damping);
        }
        assert!((s.target() - s.current()).abs() < 0.1);
    }
}

#[test]
fn default_damping_scenario() {
    let mut s = InertialScroller::default();
    s.on_wheel(1000.0, 10_000.0);
    assert_eq!(s.tick(), 75.0);
    let mut frames = 1;
    while s.is_animating() {
        s.tick();
        frames += 1;
    }
    // 1000 * 0.925^n < 0.1 needs roughly 120 frames
    assert!((100..140).contains(&frames), "settled after {} frames", frames);
}

#[test]
fn three_slide_loop_returns_home() {
    let mut c = LoopingCarousel::new(vec!["north", "library", "lake"], CarouselSettings::default())
        .unwrap();
    assert_eq!(c.display_len(), 5);
    assert_eq!(c.position(), 1);

    let mut logical = vec![c.logical_index()];
    for _ in 0..3 {
        c.advance(Direction::Next).unwrap();
        c.settle().unwrap();
        logical.push(c.logical_index());
    }
    assert_eq!(logical, vec![0, 1, 2, 0]);
    assert_eq!(c.position(), 1);
}

#[test]
fn advance_during_transition_changes_nothing() {
    let mut c = LoopingCarousel::new(vec![1, 2, 3], CarouselSettings::default()).unwrap();
    c.advance(Direction::Next);
    let snapshot = c.clone();
    assert!(c.advance(Direction::Prev).is_none());
    assert!(c.swipe(-80.0).is_none());
    assert!(c.key("ArrowRight").is_none());
    assert!(c.autoplay_tick().is_none());
    assert_eq!(c, snapshot);
    assert_eq!(c.settle(), Some(Settled::InPlace { position: 2 }));
}

#[test]
fn double_toggle_restores_same_period() {
    let settings = CarouselSettings::default();
    let mut c = LoopingCarousel::new(vec!['a', 'b'], settings).unwrap();
    for _ in 0..4 {
        c.image_settled(0);
        c.image_settled(1);
    }
    assert!(c.is_playing());

    let mut slot = AutoplaySlot::default();
    let armed = Rc::new(RefCell::new(Vec::new()));
    let apply = |playback: Playback, slot: &mut AutoplaySlot<u32>| match playback {
        Playback::Started { period_ms } => {
            slot.arm(|| {
                armed.borrow_mut().push(period_ms);
                period_ms
            });
        }
        Playback::Stopped => {
            slot.disarm();
        }
    };
    apply(Playback::Started { period_ms: settings.autoplay_period_ms }, &mut slot);

    let first = c.toggle_play_pause().unwrap();
    apply(first, &mut slot);
    assert_eq!(first, Playback::Stopped);
    assert!(!slot.is_armed());

    let second = c.toggle_play_pause().unwrap();
    apply(second, &mut slot);
    assert!(c.is_playing());
    assert!(slot.is_armed());
    assert_eq!(*armed.borrow(), vec![5_000, 5_000]);
}

#[test]
fn swipe_threshold() {
    let mut c = LoopingCarousel::new(vec![1, 2, 3], CarouselSettings::default()).unwrap();
    assert!(c.swipe(30.0).is_none());
    let t = c.swipe(-60.0).unwrap();
    assert_eq!(t.to, 2);
}

#[test]
fn empty_carousel_is_inert() {
    assert!(LoopingCarousel::<String>::new(Vec::new(), CarouselSettings::default()).is_none());
}

#[test]
fn driver_ticks_scroller_like_a_frame_loop() {
    let driver = FrameDriver::new();
    let scroller = Rc::new(RefCell::new(InertialScroller::default()));
    let rendered = Rc::new(RefCell::new(Vec::new()));
    {
        let scroller = scroller.clone();
        let rendered = rendered.clone();
        driver.subscribe(move |_| rendered.borrow_mut().push(scroller.borrow_mut().tick()));
    }
    scroller.borrow_mut().on_wheel(1000.0, 4000.0);
    for frame in 0..3 {
        driver.tick(frame as f64 * 16.7);
    }
    let rendered = rendered.borrow();
    assert_eq!(rendered[0], 75.0);
    assert!(rendered[1] > rendered[0] && rendered[2] > rendered[1]);
}
