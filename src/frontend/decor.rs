use super::dom;
use crate::motion::{stagger, web::play, Easing, Property, Tween};
use std::time::Duration;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

const HOVER_DURATION: Duration = Duration::from_millis(200);
const PRESS_DURATION: Duration = Duration::from_millis(150);
const INTRO_SELECTOR: &str = ".card-hover, .project-card, .skill-card";

fn animate_target(tween: Tween) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        if let Some(element) = event.target_dyn_into::<Element>() {
            play(&element, &tween);
        }
    })
}

pub fn card_hover_in() -> Callback<MouseEvent> {
    animate_target(Tween::new(HOVER_DURATION, Easing::EaseOutQuad).to(Property::Scale, 1.02))
}

pub fn card_hover_out() -> Callback<MouseEvent> {
    animate_target(Tween::new(HOVER_DURATION, Easing::EaseOutQuad).to(Property::Scale, 1.0))
}

pub fn nav_hover_in() -> Callback<MouseEvent> {
    animate_target(Tween::new(HOVER_DURATION, Easing::EaseOutQuad).to(Property::TranslateY, -2.0))
}

pub fn nav_hover_out() -> Callback<MouseEvent> {
    animate_target(Tween::new(HOVER_DURATION, Easing::EaseOutQuad).to(Property::TranslateY, 0.0))
}

/// Pulse for primary and submit buttons.
pub fn press_pulse() -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        let Some(button) = event
            .target_dyn_into::<Element>()
            .and_then(|target| target.closest("button, .btn-primary").ok().flatten())
        else {
            return;
        };
        play(
            &button,
            &Tween::new(PRESS_DURATION, Easing::EaseOutQuad)
                .through(Property::Scale, &[1.0, 0.95, 1.0]),
        );
    })
}

/// Fades the page in and staggers the cards up into place.
pub fn play_page_intro() {
    if let Some(body) = dom::body() {
        play(
            &body,
            &Tween::new(Duration::from_millis(500), Easing::EaseOutQuad)
                .from_to(Property::Opacity, 0.0, 1.0),
        );
    }

    for (index, element) in dom::query_all(INTRO_SELECTOR).iter().enumerate() {
        play(
            element,
            &Tween::new(Duration::from_millis(600), Easing::EaseOutQuad)
                .from_to(Property::Opacity, 0.0, 1.0)
                .from_to(Property::TranslateY, 30.0, 0.0)
                .delayed(stagger(index, Duration::from_millis(100))),
        );
    }
}
