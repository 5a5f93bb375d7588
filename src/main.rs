//! Entry point: mounts the page controller and renders the carousel.

use gloo_utils::document;
use log::{info, warn, LevelFilter};
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;
use yufeng_motion::{
    components::Carousel,
    config::{PageConfig, CAROUSEL_HOST_ID},
    logging,
    page::PageController,
};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<PageConfig>,
}

/// Owns the page controller for the app's lifetime and portals the carousel
/// into its host element.
#[function_component]
pub fn App(props: &AppProps) -> Html {
    {
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let controller = PageController::mount(&config);
            move || drop(controller)
        });
    }

    let host = use_state(|| document().get_element_by_id(CAROUSEL_HOST_ID));
    let slides = use_memo(props.config.clone(), |config| config.slides.clone());

    match (*host).clone() {
        Some(host) if !slides.is_empty() => yew::create_portal(
            html! {
                <Carousel
                    slides={slides.clone()}
                    settings={props.config.carousel_settings()} />
            },
            host,
        ),
        _ => html! {},
    }
}

fn report_carousel_host(host: Option<&Element>, slide_count: usize) {
    match (host, slide_count) {
        (None, n) if n > 0 => warn!("#{} not found, carousel disabled", CAROUSEL_HOST_ID),
        (Some(_), 0) => warn!("#{} present but no slides configured", CAROUSEL_HOST_ID),
        _ => {}
    }
}

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    let config = PageConfig::from_document();
    log::set_max_level(config.log_filter());
    report_carousel_host(
        document().get_element_by_id(CAROUSEL_HOST_ID).as_ref(),
        config.slides.len(),
    );
    info!("Yufeng motion loaded");

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
