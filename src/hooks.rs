use crate::carousel::{AutoplaySlot, CarouselSettings, Direction, LoopingCarousel, Settled};
use crate::config::Slide;
use gloo_events::EventListener;
use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// Everything the carousel view renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselModel {
    /// `None` when there are no slides; every action is then ignored.
    pub carousel: Option<LoopingCarousel<Slide>>,
    /// Whether the latest position change should be animated. Corrective
    /// jumps off a clone slide are not.
    pub animate: bool,
}

impl CarouselModel {
    pub fn new(slides: Vec<Slide>, settings: CarouselSettings) -> Self {
        Self {
            carousel: LoopingCarousel::new(slides, settings),
            animate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarouselAction {
    Advance(Direction),
    GoTo(usize),
    Settle,
    AutoplayTick,
    TogglePlayPause,
    ImageSettled(usize),
    Swipe { delta_x: f64 },
    Key(String),
}

impl Reducible for CarouselModel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let Some(mut carousel) = self.carousel.clone() else {
            return self;
        };

        let moved = match &action {
            CarouselAction::Advance(direction) => carousel.advance(*direction).is_some(),
            CarouselAction::GoTo(logical) => carousel.go_to(*logical).is_some(),
            CarouselAction::AutoplayTick => carousel.autoplay_tick().is_some(),
            CarouselAction::Swipe { delta_x } => carousel.swipe(*delta_x).is_some(),
            CarouselAction::Key(key) => carousel.key(key).is_some(),
            CarouselAction::Settle => {
                return match carousel.settle() {
                    Some(Settled::Corrected { from, to }) => {
                        debug!("carousel corrected {} -> {}", from, to);
                        Rc::new(Self {
                            carousel: Some(carousel),
                            animate: false,
                        })
                    }
                    Some(Settled::InPlace { .. }) => Rc::new(Self {
                        carousel: Some(carousel),
                        animate: self.animate,
                    }),
                    None => self,
                };
            }
            CarouselAction::TogglePlayPause => {
                let Some(playback) = carousel.toggle_play_pause() else {
                    return self;
                };
                debug!("carousel playback: {:?}", playback);
                return Rc::new(Self {
                    carousel: Some(carousel),
                    animate: self.animate,
                });
            }
            CarouselAction::ImageSettled(logical) => {
                if carousel.image_settled(*logical) {
                    debug!("carousel images ready, autoplay starting");
                }
                if Some(&carousel) == self.carousel.as_ref() {
                    return self;
                }
                return Rc::new(Self {
                    carousel: Some(carousel),
                    animate: self.animate,
                });
            }
        };

        if moved {
            Rc::new(Self {
                carousel: Some(carousel),
                animate: true,
            })
        } else {
            self
        }
    }
}

/// Drive a [`LoopingCarousel`] from yew: settle timers, the autoplay interval
/// and arrow-key input are installed here and torn down on unmount.
#[hook]
pub fn use_looping_carousel(
    slides: Rc<Vec<Slide>>,
    settings: CarouselSettings,
) -> UseReducerHandle<CarouselModel> {
    let model = use_reducer(|| CarouselModel::new((*slides).clone(), settings));
    let autoplay = use_mut_ref(AutoplaySlot::<Interval>::default);

    let present = model.carousel.is_some();
    let (transition, transitioning, active) = model
        .carousel
        .as_ref()
        .map(|c| (c.transition_count(), c.is_transitioning(), c.is_playing()))
        .unwrap_or((0, false, false));

    // Correct off a clone slide once the CSS transition has run.
    {
        let dispatcher = model.dispatcher();
        use_effect_with((transition, transitioning), move |&(_, transitioning)| {
            let timeout = transitioning.then(|| {
                Timeout::new(settings.transition_ms, move || {
                    dispatcher.dispatch(CarouselAction::Settle)
                })
            });
            move || drop(timeout)
        });
    }

    // Exactly one interval while playing.
    {
        let dispatcher = model.dispatcher();
        let autoplay = autoplay.clone();
        use_effect_with(active, move |&active| {
            if active {
                autoplay.borrow_mut().arm(|| {
                    Interval::new(settings.autoplay_period_ms, move || {
                        dispatcher.dispatch(CarouselAction::AutoplayTick)
                    })
                });
            }
            move || {
                autoplay.borrow_mut().disarm();
            }
        });
    }

    {
        let dispatcher = model.dispatcher();
        use_effect_with(present, move |&present| {
            let listener = present.then(|| {
                EventListener::new(&gloo_utils::document(), "keydown", move |event| {
                    if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                        if Direction::from_key(&key.key()).is_some() {
                            dispatcher.dispatch(CarouselAction::Key(key.key()));
                        }
                    }
                })
            });
            move || drop(listener)
        });
    }

    model
}
