use crate::{
    effects::{
        particles::{rgba, ParticleField, PARTICLE_COUNT},
        EffectError,
    },
    logging::{log_event, LogLevel},
};
use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use std::{cell::RefCell, f64::consts::TAU, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};
use yew::prelude::*;

const CONTAINER_ID: &str = "particle-container";

#[function_component(ParticleBackdrop)]
pub fn particle_backdrop() -> Html {
    let container = use_node_ref();
    let canvas = use_node_ref();

    {
        let container = container.clone();
        let canvas = canvas.clone();
        use_effect_with((), move |_| {
            let backdrop = match Backdrop::start(&container, &canvas) {
                Ok(backdrop) => Some(backdrop),
                Err(error) => {
                    log_event(
                        LogLevel::Warn,
                        "particle_background_failed",
                        json!({ "error": error.to_string() }),
                    );
                    None
                }
            };

            move || {
                if let Some(backdrop) = backdrop {
                    backdrop.stop();
                }
            }
        });
    }

    html! {
        <div id={CONTAINER_ID} class="particle-container" ref={container} aria-hidden="true">
            <canvas ref={canvas}></canvas>
        </div>
    }
}

struct Backdrop {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: RefCell<ParticleField>,
    frame: RefCell<Option<AnimationFrame>>,
    resize_listener: RefCell<Option<EventListener>>,
}

impl Backdrop {
    fn start(container: &NodeRef, canvas: &NodeRef) -> Result<Rc<Self>, EffectError> {
        let container = container
            .cast::<HtmlElement>()
            .ok_or_else(|| EffectError::MissingElement(CONTAINER_ID.to_string()))?;
        let canvas = canvas
            .cast::<HtmlCanvasElement>()
            .ok_or_else(|| EffectError::MissingElement(format!("{CONTAINER_ID} canvas")))?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(EffectError::NoCanvasContext)?;

        let (width, height) = container_size(&container);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let field = ParticleField::new(width, height, PARTICLE_COUNT, js_sys::Math::random);
        let backdrop = Rc::new(Self {
            field: RefCell::new(field),
            container,
            canvas,
            context,
            frame: RefCell::new(None),
            resize_listener: RefCell::new(None),
        });

        if let Some(window) = window() {
            let weak = Rc::downgrade(&backdrop);
            let listener = EventListener::new(&window, "resize", move |_| {
                if let Some(backdrop) = weak.upgrade() {
                    backdrop.resize();
                }
            });
            *backdrop.resize_listener.borrow_mut() = Some(listener);
        }

        backdrop.schedule();
        Ok(backdrop)
    }

    fn stop(&self) {
        self.frame.borrow_mut().take();
        self.resize_listener.borrow_mut().take();
    }

    fn schedule(self: &Rc<Self>) {
        let backdrop = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            backdrop.frame.borrow_mut().take();
            backdrop.draw();
            backdrop.schedule();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn resize(&self) {
        let (width, height) = container_size(&self.container);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field.borrow_mut().resize(width, height);
    }

    fn draw(&self) {
        let mut field = self.field.borrow_mut();
        field.step();

        let context = &self.context;
        let (width, height) = field.size();
        context.clear_rect(0.0, 0.0, width, height);

        context.set_line_width(1.0);
        for link in field.links() {
            context.set_stroke_style_str(&rgba(link.alpha));
            context.begin_path();
            context.move_to(link.from.0, link.from.1);
            context.line_to(link.to.0, link.to.1);
            context.stroke();
        }

        for particle in field.particles() {
            context.set_fill_style_str(&rgba(particle.opacity));
            context.begin_path();
            let _ = context.arc(particle.x, particle.y, particle.size / 2.0, 0.0, TAU);
            context.fill();
        }
    }
}

fn container_size(container: &HtmlElement) -> (f64, f64) {
    (
        f64::from(container.offset_width().max(0)),
        f64::from(container.offset_height().max(0)),
    )
}
