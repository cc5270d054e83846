use super::{decor, millis};
use crate::{
    config::SiteConfig,
    contact::{
        deliver, web::FetchTransport, ContactFields, ContactForm, Field, Notice, SubmitError,
        Submission,
    },
    logging::{log_event, LogLevel},
};
use gloo_timers::callback::Timeout;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, InputEvent, SubmitEvent};
use yew::prelude::*;

#[derive(Clone, Default, PartialEq)]
struct ContactState {
    form: ContactForm,
    outbox: Option<ContactFields>,
    sent: u64,
}

enum ContactAction {
    Edit(Field, String),
    Submit,
    Resolve(Result<(), SubmitError>),
    Expire(u64),
}

impl Reducible for ContactState {
    type Action = ContactAction;

    fn reduce(self: Rc<Self>, action: ContactAction) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            ContactAction::Edit(field, value) => next.form.set_field(field, value),
            ContactAction::Submit => match next.form.submit() {
                Submission::Send(fields) => {
                    next.outbox = Some(fields);
                    next.sent += 1;
                }
                Submission::Invalid(error) => {
                    log_event(
                        LogLevel::Debug,
                        "contact_invalid",
                        json!({ "error": error.to_string() }),
                    );
                }
                Submission::AlreadySending => return self,
            },
            ContactAction::Resolve(outcome) => {
                if !next.form.resolve(&outcome) {
                    return self;
                }
                next.outbox = None;
            }
            ContactAction::Expire(ticket) => {
                if !next.form.expire(ticket) {
                    return self;
                }
            }
        }

        Rc::new(next)
    }
}

fn event_value(event: &InputEvent) -> String {
    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn display(visible: bool, shown_as: &str) -> String {
    if visible {
        format!("display: {shown_as};")
    } else {
        "display: none;".to_string()
    }
}

#[function_component(ContactSection)]
pub fn contact_section() -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let state = use_reducer(ContactState::default);

    {
        let sent = state.sent;
        let outbox = state.outbox.clone();
        let dispatcher = state.dispatcher();
        let endpoint = config.contact_endpoint.clone();
        use_effect_with(sent, move |sent| {
            if let Some(fields) = outbox.filter(|_| *sent > 0) {
                spawn_local(async move {
                    let outcome = deliver(&FetchTransport, endpoint.as_ref(), &fields).await;
                    if let Err(error) = &outcome {
                        log_event(
                            LogLevel::Warn,
                            "contact_submit_failed",
                            json!({ "error": error.to_string() }),
                        );
                    }
                    dispatcher.dispatch(ContactAction::Resolve(outcome));
                });
            }
            || ()
        });
    }

    {
        let ticket = state.form.notice_ticket();
        let showing = state.form.notice().is_some();
        let dispatcher = state.dispatcher();
        let timeout = config.message_timeout;
        use_effect_with((ticket, showing), move |(ticket, showing)| {
            if *showing {
                let ticket = *ticket;
                Timeout::new(millis(timeout), move || {
                    dispatcher.dispatch(ContactAction::Expire(ticket));
                })
                .forget();
            }
            || ()
        });
    }

    let on_edit = |field: Field| {
        let dispatcher = state.dispatcher();
        Callback::from(move |event: InputEvent| {
            dispatcher.dispatch(ContactAction::Edit(field, event_value(&event)));
        })
    };

    let onsubmit = {
        let dispatcher = state.dispatcher();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            dispatcher.dispatch(ContactAction::Submit);
        })
    };

    let fields = state.form.fields();
    let loading = state.form.is_loading();
    let notice = state.form.notice();
    let success_style = display(notice == Some(Notice::Success), "block");
    let error_style = display(notice == Some(Notice::Failure), "block");

    html! {
        <form id="contact-form" class="contact-form" novalidate="novalidate" {onsubmit}>
            { text_field(Field::Name, "text", fields, on_edit(Field::Name)) }
            { text_field(Field::Email, "email", fields, on_edit(Field::Email)) }
            { text_field(Field::Subject, "text", fields, on_edit(Field::Subject)) }
            <div class="form-row">
                <label for="message">{"Message"}</label>
                <textarea
                    id="message"
                    name="message"
                    rows="5"
                    value={fields.message.clone()}
                    oninput={on_edit(Field::Message)}
                />
            </div>
            <button
                id="submit-btn"
                type="submit"
                class="btn-primary"
                disabled={loading}
                onclick={decor::press_pulse()}
            >
                <span id="btn-text" style={display(!loading, "block")}>{"Send Message"}</span>
                <div id="loading" class="loading" style={display(loading, "flex")}>
                    <span class="spinner" aria-hidden="true"></span>
                    {"Sending..."}
                </div>
            </button>
            <div
                id="success-message"
                class="form-message success"
                role="status"
                style={success_style}
            >
                {"Thanks! Your message has been sent."}
            </div>
            <div id="error-message" class="form-message error" role="alert" style={error_style}>
                {"Something went wrong. Please check the form and try again."}
            </div>
        </form>
    }
}

fn text_field(
    field: Field,
    kind: &'static str,
    fields: &ContactFields,
    oninput: Callback<InputEvent>,
) -> Html {
    let name = field.as_str();
    let mut label = name.to_string();
    label[..1].make_ascii_uppercase();

    html! {
        <div class="form-row">
            <label for={name}>{label}</label>
            <input id={name} {name} type={kind} value={fields.get(field).to_string()} {oninput} />
        </div>
    }
}
