//! One animation-frame loop per page.
//!
//! Every per-frame effect subscribes here instead of running its own
//! `requestAnimationFrame` chain. Tests call [`FrameDriver::tick`] directly.

use gloo_render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Subscriber = Rc<RefCell<dyn FnMut(f64)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct DriverState {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    frame: Option<AnimationFrame>,
    running: bool,
}

/// Cheaply cloneable handle; clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct FrameDriver {
    state: Rc<RefCell<DriverState>>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback receiving the frame timestamp in milliseconds.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(f64) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        let subscriber: Subscriber = Rc::new(RefCell::new(callback));
        state.subscribers.push((id, subscriber));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sid, _)| *sid != id);
        state.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Run every subscriber once, in subscription order. Callbacks may
    /// subscribe or unsubscribe while the tick is in progress; anything removed
    /// mid-tick is skipped.
    pub fn tick(&self, timestamp: f64) {
        let snapshot: Vec<(SubscriptionId, Subscriber)> = self
            .state
            .borrow()
            .subscribers
            .iter()
            .map(|(id, s)| (*id, Rc::clone(s)))
            .collect();

        for (id, subscriber) in snapshot {
            let live = self
                .state
                .borrow()
                .subscribers
                .iter()
                .any(|(sid, _)| *sid == id);
            if !live {
                continue;
            }
            if let Ok(mut callback) = subscriber.try_borrow_mut() {
                callback(timestamp);
            }
        }
    }

    /// Begin ticking on every display refresh.
    pub fn start(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
        }
        Self::schedule(Rc::downgrade(&self.state));
    }

    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.frame.take();
    }

    /// Drop every subscriber. Subscribers holding a driver clone keep the
    /// state alive until this runs.
    pub fn clear(&self) {
        let drained: Vec<_> = self.state.borrow_mut().subscribers.drain(..).collect();
        drop(drained);
    }

    fn schedule(weak: Weak<RefCell<DriverState>>) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let next = weak.clone();
        let handle = request_animation_frame(move |timestamp| {
            let Some(state) = next.upgrade() else {
                return;
            };
            state.borrow_mut().frame.take();
            let driver = FrameDriver { state };
            driver.tick(timestamp);
            if driver.is_running() {
                Self::schedule(Rc::downgrade(&driver.state));
            }
        });
        state.borrow_mut().frame = Some(handle);
    }
}
