//! Page controller: owns the inertial scroller and the frame loop, and wires
//! every scroll-linked and pointer-driven effect into the document.
//!
//! Each feature is wired independently. A feature whose elements or engine are
//! missing logs a warning and is skipped; the rest of the page keeps working.

use crate::config::{PageConfig, HERO_PARALLAX_PX, REDUCED_MOTION_QUERY};
use crate::effects::{reveal_style, tilt_toward, MouseTracker, NavAutoHide, Rect, StatCounter};
use crate::engine::{self, RevealOptions};
use crate::frame::{FrameDriver, SubscriptionId};
use crate::scroll::InertialScroller;
use crate::utils::{
    anchor_scroll_target, anchor_target_id, max_scroll_offset, parse_stat_number, translate_y_css,
};
use crate::MotionError;
use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, info, trace, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent, WheelEvent, Window};

pub struct PageController {
    scroller: Rc<RefCell<InertialScroller>>,
    driver: FrameDriver,
    listeners: Vec<EventListener>,
    progress_callbacks: Vec<Closure<dyn FnMut(f64)>>,
    enter_callbacks: Vec<Closure<dyn FnMut()>>,
}

impl PageController {
    /// Wire the document and start the frame loop.
    pub fn mount(config: &PageConfig) -> Self {
        let window = gloo_utils::window();
        let document = gloo_utils::document();

        let mut config = config.clone();
        let reduced_motion = prefers_reduced_motion(&window);
        if reduced_motion {
            config.apply_reduced_motion();
        }

        let mut page = Self {
            scroller: Rc::new(RefCell::new(InertialScroller::new(
                config.damping,
                config.stop_epsilon,
            ))),
            driver: FrameDriver::new(),
            listeners: Vec::new(),
            progress_callbacks: Vec::new(),
            enter_callbacks: Vec::new(),
        };

        degrade("inertial scroll", page.wire_scroller(&window));
        degrade("scroll-linked engine", engine::configure());
        page.driver.subscribe(|_| engine::sync());
        degrade("mouse tracking", page.wire_mouse_tracking(&window, &document, &config));
        degrade("nav auto-hide", page.wire_nav(&document, &config));
        degrade("card tilt", page.wire_card_tilt(&document, &config));
        degrade("reveal elements", page.wire_reveals(&document));
        degrade("hero animation", page.wire_hero(&document));
        degrade("stat counters", page.wire_stat_counters(&document, &config));
        degrade("anchor links", page.wire_anchor_links(&document, &config));

        if reduced_motion {
            engine::set_time_scale(config.reduced_motion_time_scale);
            info!("Reduced motion preference detected, animations simplified");
        }

        page.driver.start();
        info!(
            "Smooth scroll active ({} frame subscribers, {} listeners)",
            page.driver.subscriber_count(),
            page.listeners.len()
        );
        page
    }

    fn wire_scroller(&mut self, window: &Window) -> Result<(), MotionError> {
        let body = gloo_utils::body();
        let root = gloo_utils::document_element();
        set_style(&body, "height", &format!("{}px", root.scroll_height()))?;

        let scroller = Rc::clone(&self.scroller);
        let (win, page_body) = (window.clone(), body.clone());
        self.listeners.push(EventListener::new_with_options(
            window,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                event.prevent_default();
                let (_, viewport_height) = viewport_size(&win);
                let max = max_scroll_offset(page_body.scroll_height() as f64, viewport_height);
                scroller.borrow_mut().on_wheel(wheel.delta_y(), max);
            },
        ));

        let scroller = Rc::clone(&self.scroller);
        let win = window.clone();
        self.listeners.push(EventListener::new(window, "scroll", move |_| {
            let native = win.scroll_y().unwrap_or(0.0);
            if scroller.borrow_mut().on_native_scroll(native) {
                trace!("resynced to native scroll offset {}", native);
            }
        }));

        let scroller = Rc::clone(&self.scroller);
        self.driver.subscribe(move |_| {
            let current = scroller.borrow_mut().tick();
            let _ = body.style().set_property("transform", &translate_y_css(current));
        });
        Ok(())
    }

    fn wire_mouse_tracking(
        &mut self,
        window: &Window,
        document: &Document,
        config: &PageConfig,
    ) -> Result<(), MotionError> {
        let root: HtmlElement = gloo_utils::document_element()
            .dyn_into()
            .map_err(|_| MotionError::MissingElement("html root element".to_string()))?;
        let tracker = Rc::new(RefCell::new(MouseTracker::new(config.mouse_ease)));

        let target = Rc::clone(&tracker);
        let win = window.clone();
        self.listeners.push(EventListener::new(document, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (width, height) = viewport_size(&win);
            target.borrow_mut().on_pointer_move(
                mouse.client_x() as f64,
                mouse.client_y() as f64,
                width,
                height,
            );
        }));

        self.driver.subscribe(move |_| {
            let mut tracker = tracker.borrow_mut();
            tracker.tick();
            let (x, y) = tracker.css_vars();
            let style = root.style();
            let _ = style.set_property("--mouse-x", &x);
            let _ = style.set_property("--mouse-y", &y);
        });
        Ok(())
    }

    fn wire_nav(&mut self, document: &Document, config: &PageConfig) -> Result<(), MotionError> {
        let Some(nav) = query_one::<HtmlElement>(document, ".lib-nav")? else {
            debug!("no .lib-nav on this page");
            return Ok(());
        };
        let scroller = Rc::clone(&self.scroller);
        let mut auto_hide = NavAutoHide::new(config.nav_hide_after_px);
        self.driver.subscribe(move |_| {
            let visibility = auto_hide.update(scroller.borrow().current());
            let _ = nav.style().set_property("transform", visibility.transform());
        });
        Ok(())
    }

    fn wire_card_tilt(&mut self, document: &Document, config: &PageConfig) -> Result<(), MotionError> {
        for card in select_all::<Element>(document, ".interactive-card")? {
            let target = card.clone();
            let max_deg = config.tilt_max_deg;
            self.listeners.push(EventListener::new(&card, "mousemove", move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let bounds = target.get_bounding_client_rect();
                let rect = Rect {
                    left: bounds.left(),
                    top: bounds.top(),
                    width: bounds.width(),
                    height: bounds.height(),
                };
                let tilt = tilt_toward(mouse.client_x() as f64, mouse.client_y() as f64, rect, max_deg);
                engine::tilt_card(&target, tilt);
            }));

            let target = card.clone();
            self.listeners.push(EventListener::new(&card, "mouseleave", move |_| {
                engine::release_card(&target);
            }));
        }
        Ok(())
    }

    fn wire_reveals(&mut self, document: &Document) -> Result<(), MotionError> {
        let elements = select_all::<HtmlElement>(document, ".reveal-element")?;
        for (index, element) in elements.into_iter().enumerate() {
            let target = element.clone();
            let on_progress = Closure::wrap(Box::new(move |progress: f64| {
                let style = reveal_style(progress);
                let css = target.style();
                let _ = css.set_property("opacity", &style.opacity.to_string());
                let _ = css.set_property("transform", &style.transform());
            }) as Box<dyn FnMut(f64)>);

            engine::register_reveal(
                &element,
                &RevealOptions::staggered(index),
                on_progress.as_ref().unchecked_ref(),
            )?;
            self.progress_callbacks.push(on_progress);
        }
        Ok(())
    }

    fn wire_hero(&mut self, document: &Document) -> Result<(), MotionError> {
        if query_one::<Element>(document, ".hero-stats")?.is_some() {
            engine::register_parallax(".hero-stats", ".lib-hero", HERO_PARALLAX_PX)?;
        }
        engine::play_hero_entrance()
    }

    fn wire_stat_counters(
        &mut self,
        document: &Document,
        config: &PageConfig,
    ) -> Result<(), MotionError> {
        if query_one::<Element>(document, ".hero-stats")?.is_none() {
            return Ok(());
        }
        let driver = self.driver.clone();
        let duration_ms = config.counter_duration_ms;
        let on_enter = Closure::wrap(Box::new(move || {
            let document = gloo_utils::document();
            match select_all::<HtmlElement>(&document, ".stat-number") {
                Ok(numbers) => {
                    for element in numbers {
                        start_counter(&driver, element, duration_ms);
                    }
                }
                Err(e) => warn!("stat counters skipped: {}", e),
            }
        }) as Box<dyn FnMut()>);

        engine::once_in_view(".hero-stats", "top 80%", on_enter.as_ref().unchecked_ref())?;
        self.enter_callbacks.push(on_enter);
        Ok(())
    }

    fn wire_anchor_links(
        &mut self,
        document: &Document,
        config: &PageConfig,
    ) -> Result<(), MotionError> {
        for anchor in select_all::<Element>(document, "a[href^=\"#\"]")? {
            let href = anchor.get_attribute("href").unwrap_or_default();
            let scroller = Rc::clone(&self.scroller);
            let nav_offset = config.nav_offset_px;
            self.listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some(id) = anchor_target_id(&href) else {
                        return;
                    };
                    let Some(target) = gloo_utils::document()
                        .get_element_by_id(id)
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    else {
                        debug!("anchor #{} has no target", id);
                        return;
                    };
                    let (_, viewport_height) = viewport_size(&gloo_utils::window());
                    let max =
                        max_scroll_offset(gloo_utils::body().scroll_height() as f64, viewport_height);
                    let offset = anchor_scroll_target(target.offset_top() as f64, nav_offset);
                    scroller.borrow_mut().set_target(offset, max);
                },
            ));
        }
        Ok(())
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.driver.stop();
        self.driver.clear();
        debug!(
            "page controller dropped ({} listeners, {} engine callbacks)",
            self.listeners.len(),
            self.progress_callbacks.len() + self.enter_callbacks.len()
        );
    }
}

/// Count a `.stat-number` up on the frame loop, then unsubscribe.
fn start_counter(driver: &FrameDriver, element: HtmlElement, duration_ms: f64) {
    let Some(stat) = element.text_content().as_deref().and_then(parse_stat_number) else {
        return;
    };
    let mut counter = StatCounter::new(stat, duration_ms);
    let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::default();

    let handle = driver.clone();
    let id_slot = Rc::clone(&own_id);
    let id = driver.subscribe(move |now| {
        let (text, done) = counter.tick(now);
        element.set_text_content(Some(&text));
        if done {
            if let Some(id) = id_slot.get() {
                handle.unsubscribe(id);
            }
        }
    });
    own_id.set(Some(id));
}

fn degrade(feature: &str, result: Result<(), MotionError>) {
    if let Err(e) = result {
        warn!("{} disabled: {}", feature, e);
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (read(window.inner_width()), read(window.inner_height()))
}

fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), MotionError> {
    element
        .style()
        .set_property(property, value)
        .map_err(MotionError::from)
}

fn query_one<T: JsCast>(document: &Document, selector: &str) -> Result<Option<T>, MotionError> {
    Ok(document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<T>().ok()))
}

fn select_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, MotionError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}
