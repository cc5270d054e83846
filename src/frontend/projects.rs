use super::{
    decor, dom,
    filtering::{filter_controls, use_category_filter},
};
use crate::{
    content::Project,
    filter::FilterStyle,
    logging::{log_event, LogLevel},
    modal::{self, ModalAnimation, ModalController},
    motion::web::play,
};
use gloo_events::EventListener;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, KeyboardEvent, MouseEvent, Node};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
struct ModalState {
    modals: ModalController,
    pending: Vec<ModalAnimation>,
    epoch: u64,
}

enum ModalAction {
    Open(String),
    Close(String),
    Backdrop(String),
    Escape,
    Settle { id: String, generation: u64 },
}

impl ModalState {
    fn started(&self, modals: ModalController, pending: Vec<ModalAnimation>) -> Rc<Self> {
        Rc::new(Self {
            modals,
            pending,
            epoch: self.epoch + 1,
        })
    }
}

impl Reducible for ModalState {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: ModalAction) -> Rc<Self> {
        let mut modals = self.modals.clone();

        match action {
            ModalAction::Open(id) => match modals.open(&id) {
                Ok(pending) if !pending.is_empty() => self.started(modals, pending),
                Ok(_) => self,
                Err(error) => {
                    log_event(
                        LogLevel::Warn,
                        "modal_open_failed",
                        json!({ "error": error.to_string() }),
                    );
                    self
                }
            },
            ModalAction::Close(id) => match modals.close(&id) {
                Some(animation) => self.started(modals, vec![animation]),
                None => self,
            },
            ModalAction::Backdrop(id) => match modals.backdrop_click(&id) {
                Some(animation) => self.started(modals, vec![animation]),
                None => self,
            },
            ModalAction::Escape => match modals.escape() {
                Some(animation) => self.started(modals, vec![animation]),
                None => self,
            },
            ModalAction::Settle { id, generation } => {
                if !modals.settle(&id, generation) {
                    return self;
                }
                Rc::new(Self {
                    modals,
                    pending: self.pending.clone(),
                    epoch: self.epoch,
                })
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectsProps {
    pub projects: Rc<Vec<Project>>,
}

#[function_component(ProjectsSection)]
pub fn projects_section(props: &ProjectsProps) -> Html {
    let (filter, cards) = use_category_filter(
        props
            .projects
            .iter()
            .map(|project| project.categories.clone())
            .collect(),
        FilterStyle::projects(),
    );
    let modal_state = use_reducer({
        let ids: Vec<String> = props.projects.iter().map(|project| project.id.clone()).collect();
        move || ModalState {
            modals: ModalController::new(ids),
            pending: Vec::new(),
            epoch: 0,
        }
    });
    let roots = use_memo(props.projects.len(), |count| {
        (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let contents = use_memo(props.projects.len(), |count| {
        (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });

    {
        let epoch = modal_state.epoch;
        let modal_state = modal_state.clone();
        let contents = contents.clone();
        let projects = props.projects.clone();
        use_effect_with(epoch, move |_| {
            for animation in &modal_state.pending {
                let content = projects
                    .iter()
                    .position(|project| project.id == animation.id)
                    .and_then(|index| contents[index].cast::<Element>());
                play_modal(&modal_state, content, animation);
            }
            || ()
        });
    }

    {
        let locked = modal_state.modals.scroll_locked();
        use_effect_with(locked, |locked| {
            dom::set_scroll_locked(*locked);
            || ()
        });
    }

    {
        let dispatcher = modal_state.dispatcher();
        use_effect_with((), move |_| {
            let listener = dom::document().map(|document| {
                EventListener::new(&document, "keydown", move |event| {
                    let escape = event
                        .dyn_ref::<KeyboardEvent>()
                        .is_some_and(|event| event.key() == "Escape");
                    if escape {
                        dispatcher.dispatch(ModalAction::Escape);
                    }
                })
            });
            move || drop(listener)
        });
    }

    let dispatch = |action: fn(String) -> ModalAction, id: &str| {
        let dispatcher = modal_state.dispatcher();
        let id = id.to_string();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(action(id.clone())))
    };

    html! {
        <>
            { filter_controls(&filter) }
            <div class="projects-grid">
                { for props.projects.iter().enumerate().map(|(index, project)| {
                    let open = dispatch(ModalAction::Open, &project.id);
                    let pulse = decor::press_pulse();
                    let on_details = Callback::from(move |event: MouseEvent| {
                        pulse.emit(event.clone());
                        open.emit(event);
                    });
                    let hidden = filter.filter.is_hidden(index).then_some("hidden");
                    html! {
                        <article
                            ref={cards[index].clone()}
                            class={classes!("project-card", "card-hover", hidden)}
                            data-category={project.categories.join(" ")}
                            onmouseenter={decor::card_hover_in()}
                            onmouseleave={decor::card_hover_out()}
                        >
                            <h3>{project.title.clone()}</h3>
                            <p class="project-summary">{project.summary.clone()}</p>
                            <ul class="tech-list">
                                { for project.tech.iter().map(|tech| html! {
                                    <li>{tech.clone()}</li>
                                }) }
                            </ul>
                            <button
                                type="button"
                                class="btn-primary"
                                onclick={on_details}
                            >
                                {"View details"}
                            </button>
                        </article>
                    }
                }) }
            </div>
            { for props.projects.iter().enumerate().map(|(index, project)| {
                let displayed = modal_state.modals.is_displayed(&project.id);
                let onclick = {
                    let root = roots[index].clone();
                    let backdrop = dispatch(ModalAction::Backdrop, &project.id);
                    Callback::from(move |event: MouseEvent| {
                        let target = event
                            .target()
                            .and_then(|target| target.dyn_into::<Node>().ok());
                        if target.is_some() && target == root.get() {
                            backdrop.emit(event);
                        }
                    })
                };
                html! {
                    <div
                        ref={roots[index].clone()}
                        id={modal::element_id(&project.id)}
                        class={classes!("modal", displayed.then_some("active"))}
                        style={if displayed { "display: block;" } else { "display: none;" }}
                        role="dialog"
                        aria-modal="true"
                        aria-hidden={(!displayed).to_string()}
                        {onclick}
                    >
                        <div ref={contents[index].clone()} class="modal-content">
                            <button
                                type="button"
                                class="modal-close"
                                aria-label="Close"
                                onclick={dispatch(ModalAction::Close, &project.id)}
                            >
                                {"×"}
                            </button>
                            <h3>{project.title.clone()}</h3>
                            <p>{project.summary.clone()}</p>
                            <ul class="modal-details">
                                { for project.details.iter().map(|detail| html! {
                                    <li>{detail.clone()}</li>
                                }) }
                            </ul>
                            if let Some(link) = project.link.clone() {
                                <a
                                    class="btn-primary"
                                    href={link}
                                    target="_blank"
                                    rel="noopener noreferrer"
                                >
                                    {"View source"}
                                </a>
                            }
                        </div>
                    </div>
                }
            }) }
        </>
    }
}

fn play_modal(
    state: &UseReducerHandle<ModalState>,
    content: Option<Element>,
    animation: &ModalAnimation,
) {
    let dispatcher = state.dispatcher();
    let settle = ModalAction::Settle {
        id: animation.id.clone(),
        generation: animation.generation,
    };

    match content {
        Some(content) => {
            let tween = animation.tween.clone();
            spawn_local(async move {
                play(&content, &tween).await;
                dispatcher.dispatch(settle);
            });
        }
        None => dispatcher.dispatch(settle),
    }
}
