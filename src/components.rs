//! Yew view components for the campus carousel.
//!
//! State lives in [`use_looping_carousel`]; everything here renders from props
//! and emits actions.

use crate::carousel::{CarouselSettings, Direction};
use crate::config::Slide;
use crate::hooks::{use_looping_carousel, CarouselAction};
use std::rc::Rc;
use yew::prelude::*;

/// Inline style for the slide track.
pub fn track_style(offset_percent: f64, animate: bool, transition_ms: u32) -> String {
    let transition = if animate {
        format!("transform {}ms ease", transition_ms)
    } else {
        "none".to_string()
    };
    format!(
        "transform: translateX({}%); transition: {};",
        offset_percent, transition
    )
}

#[derive(Properties, PartialEq)]
pub struct CarouselProps {
    pub slides: Rc<Vec<Slide>>,
    #[prop_or_default]
    pub settings: CarouselSettings,
}

#[function_component(Carousel)]
pub fn carousel(props: &CarouselProps) -> Html {
    let model = use_looping_carousel(props.slides.clone(), props.settings);
    let touch_start = use_mut_ref(|| None::<f64>);

    let Some(carousel) = model.carousel.as_ref() else {
        return html! {};
    };

    let dispatch = {
        let model = model.clone();
        Callback::from(move |action: CarouselAction| model.dispatch(action))
    };

    let ontouchstart = {
        let touch_start = touch_start.clone();
        Callback::from(move |e: TouchEvent| {
            *touch_start.borrow_mut() = e.touches().get(0).map(|t| t.client_x() as f64);
        })
    };
    let ontouchend = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: TouchEvent| {
            let start = touch_start.borrow_mut().take();
            let end = e.changed_touches().get(0).map(|t| t.client_x() as f64);
            if let (Some(start), Some(end)) = (start, end) {
                dispatch.emit(CarouselAction::Swipe {
                    delta_x: end - start,
                });
            }
        })
    };

    let settings = carousel.settings();
    let style = track_style(
        carousel.track_offset_percent(),
        model.animate,
        settings.transition_ms,
    );

    html! {
        <div class="carousel" {ontouchstart} {ontouchend}>
            <LoadingOverlay visible={!carousel.is_ready()} />
            <div class="carousel-track" {style}>
                { for carousel.display_slides().enumerate().map(|(position, (slot, slide))| {
                    let settled = dispatch.reform(move |_: Event| CarouselAction::ImageSettled(slot.logical));
                    html! {
                        <div key={position}
                             class={classes!("carousel-slide", slot.is_clone.then_some("is-clone"))}
                             aria-hidden={slot.is_clone.to_string()}>
                            <img src={slide.src.clone()}
                                 alt={slide.alt.clone()}
                                 onload={settled.clone()}
                                 onerror={settled} />
                            if let Some(caption) = &slide.caption {
                                <p class="carousel-caption">{ caption.clone() }</p>
                            }
                        </div>
                    }
                }) }
            </div>
            <CarouselControls
                playing={carousel.is_playing()}
                onaction={dispatch.clone()} />
            <Indicators
                count={carousel.len()}
                active={carousel.logical_index()}
                onselect={dispatch.reform(CarouselAction::GoTo)} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingOverlayProps {
    pub visible: bool,
}

#[function_component(LoadingOverlay)]
pub fn loading_overlay(props: &LoadingOverlayProps) -> Html {
    html! {
        <div class={classes!("carousel-loading", (!props.visible).then_some("is-hidden"))}>
            <span class="carousel-spinner" />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CarouselControlsProps {
    pub playing: bool,
    pub onaction: Callback<CarouselAction>,
}

/// Prev / next buttons and the play-pause toggle.
#[function_component(CarouselControls)]
pub fn carousel_controls(props: &CarouselControlsProps) -> Html {
    let emit = |action: CarouselAction| props.onaction.reform(move |_: MouseEvent| action.clone());
    let (label, icon) = if props.playing {
        ("Pause slideshow", "❚❚")
    } else {
        ("Play slideshow", "▶")
    };

    html! {
        <div class="carousel-controls">
            <button class="carousel-prev" aria-label="Previous slide"
                    onclick={emit(CarouselAction::Advance(Direction::Prev))}>{ "‹" }</button>
            <button class="carousel-toggle" aria-label={label}
                    onclick={emit(CarouselAction::TogglePlayPause)}>{ icon }</button>
            <button class="carousel-next" aria-label="Next slide"
                    onclick={emit(CarouselAction::Advance(Direction::Next))}>{ "›" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct IndicatorsProps {
    pub count: usize,
    pub active: usize,
    pub onselect: Callback<usize>,
}

#[function_component(Indicators)]
pub fn indicators(props: &IndicatorsProps) -> Html {
    html! {
        <div class="carousel-indicators">
            { for (0..props.count).map(|i| {
                let onclick = props.onselect.reform(move |_: MouseEvent| i);
                html! {
                    <button key={i}
                            class={classes!("carousel-indicator", (i == props.active).then_some("active"))}
                            aria-label={format!("Go to slide {}", i + 1)}
                            {onclick} />
                }
            }) }
        </div>
    }
}
