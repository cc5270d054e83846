use super::millis;
use crate::{
    effects::typewriter::{Typewriter, TypingOptions, GLOW_CLASS},
    logging::{log_event, LogLevel},
};
use gloo_timers::future::TimeoutFuture;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TypedNameProps {
    pub script: Vec<String>,
    pub fallback: AttrValue,
}

#[function_component(TypedName)]
pub fn typed_name(props: &TypedNameProps) -> Html {
    let text = use_state(String::new);
    let glowing = use_state(|| false);
    let cursor = use_state(|| None::<char>);

    {
        let text = text.clone();
        let glowing = glowing.clone();
        let cursor = cursor.clone();
        let fallback = props.fallback.clone();
        use_effect_with(props.script.clone(), move |script| {
            match Typewriter::new(script.iter(), TypingOptions::default()) {
                Ok(typewriter) => {
                    cursor.set(Some(typewriter.options().cursor));
                    spawn_local(type_out(typewriter, text, glowing));
                }
                Err(error) => {
                    log_event(
                        LogLevel::Warn,
                        "typewriter_init_failed",
                        json!({ "error": error.to_string() }),
                    );
                    text.set(fallback.to_string());
                    glowing.set(true);
                }
            }
            || ()
        });
    }

    html! {
        <>
            <span id="typed-name" class={classes!((*glowing).then_some(GLOW_CLASS))}>
                {(*text).clone()}
            </span>
            if let Some(cursor) = *cursor {
                <span class="typed-cursor" aria-hidden="true">{cursor.to_string()}</span>
            }
        </>
    }
}

async fn type_out(
    mut typewriter: Typewriter,
    text: UseStateHandle<String>,
    glowing: UseStateHandle<bool>,
) {
    let options = typewriter.options();
    TimeoutFuture::new(millis(options.start_delay)).await;

    while typewriter.tick() {
        text.set(typewriter.text());
        TimeoutFuture::new(millis(options.type_speed)).await;
    }

    text.set(typewriter.text());
    glowing.set(true);
}
