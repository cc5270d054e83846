mod backdrop;
mod contact_form;
mod decor;
mod dom;
mod filtering;
mod hero;
mod projects;
mod skills;

use crate::{
    config::SiteConfig,
    content::{NavLink, Owner, Project, SiteContent, Skill},
    logging::{self, log_event, LogLevel},
    reveal::{RevealTracker, REVEALED_CLASS},
    viewport::{self, Rect, Viewport},
};
use backdrop::ParticleBackdrop;
use contact_form::ContactSection;
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use hero::TypedName;
use projects::ProjectsSection;
use serde_json::json;
use skills::SkillsSection;
use std::{cell::RefCell, rc::Rc, time::Duration};
use web_sys::{window, Element, MouseEvent};
use yew::prelude::*;

/// Sections that fade in once their heading is fully on screen, in page order.
const REVEAL_SECTIONS: [&str; 4] = ["about", "skills", "projects", "contact"];

pub fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Bumped once per debounced scroll burst.
#[derive(PartialEq)]
struct ScrollEpoch(u32);

impl Reducible for ScrollEpoch {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

#[derive(PartialEq)]
struct RevealState(RevealTracker);

struct RevealScan {
    viewport: Viewport,
    rects: Vec<Option<Rect>>,
}

impl Reducible for RevealState {
    type Action = RevealScan;

    fn reduce(self: Rc<Self>, scan: RevealScan) -> Rc<Self> {
        let mut tracker = self.0.clone();
        let revealed = tracker.scan(scan.viewport, scan.rects);
        if revealed.is_empty() {
            return self;
        }

        for index in revealed {
            log_event(
                LogLevel::Debug,
                "section_revealed",
                json!({ "section": REVEAL_SECTIONS.get(index).copied().unwrap_or_default() }),
            );
        }
        Rc::new(Self(tracker))
    }
}

/// Smooth-scrolls in-page `#anchor` links instead of jumping.
fn anchor_click(menu_open: UseStateHandle<bool>) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        let Some(href) = event
            .target_dyn_into::<Element>()
            .and_then(|target| target.closest("a").ok().flatten())
            .and_then(|anchor| anchor.get_attribute("href"))
            .filter(|href| href.len() > 1 && href.starts_with('#'))
        else {
            return;
        };

        event.prevent_default();
        if dom::scroll_to_anchor(&href) {
            log_event(LogLevel::Debug, "scroll_to_anchor", json!({ "href": href }));
        }
        menu_open.set(false);
    })
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: SiteConfig,
    owner: Owner,
    nav: Vec<NavLink>,
    about: Vec<String>,
    skills: Rc<Vec<Skill>>,
    projects: Rc<Vec<Project>>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let menu_open = use_state(|| false);
    let scroll_epoch = use_reducer(|| ScrollEpoch(0));
    let reveal = use_reducer(|| RevealState(RevealTracker::new(REVEAL_SECTIONS.len())));
    let headings = use_memo((), |_| {
        REVEAL_SECTIONS
            .iter()
            .map(|_| NodeRef::default())
            .collect::<Vec<_>>()
    });

    {
        let skills = props.skills.len();
        let projects = props.projects.len();
        use_effect_with((), move |_| {
            decor::play_page_intro();
            log_event(
                LogLevel::Info,
                "page_ready",
                json!({ "skills": skills, "projects": projects }),
            );
            || ()
        });
    }

    {
        let bump = scroll_epoch.dispatcher();
        let debounce = props.config.scroll_debounce;
        use_effect_with(debounce, move |debounce| {
            let debounce = millis(*debounce);
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            let listener = window().map(|window| {
                let pending = Rc::clone(&pending);
                EventListener::new(&window, "scroll", move |_| {
                    let bump = bump.clone();
                    // Replacing the handle cancels the previous timer.
                    let timer = Timeout::new(debounce, move || bump.dispatch(()));
                    *pending.borrow_mut() = Some(timer);
                })
            });

            move || {
                drop(listener);
                pending.borrow_mut().take();
            }
        });
    }

    {
        let dispatcher = reveal.dispatcher();
        let headings = headings.clone();
        use_effect_with(scroll_epoch.0, move |_| {
            dispatcher.dispatch(RevealScan {
                viewport: viewport::web::current(),
                rects: dom::rects(&headings),
            });
            || ()
        });
    }

    let on_menu_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let on_anchor = anchor_click(menu_open.clone());

    let section_class = |index: usize| {
        classes!(
            "section-reveal",
            reveal.0.is_revealed(index).then_some(REVEALED_CLASS)
        )
    };

    html! {
        <ContextProvider<SiteConfig> context={props.config.clone()}>
            <nav class="navbar">
                <div class="nav-container">
                    <a class="nav-logo" href="#home" onclick={on_anchor.clone()}>
                        {props.owner.name.clone()}
                    </a>
                    <ul class={classes!("nav-menu", (*menu_open).then_some("active"))}>
                        { for props.nav.iter().map(|link| html! {
                            <li>
                                <a
                                    class="nav-link"
                                    href={link.href.clone()}
                                    onclick={on_anchor.clone()}
                                    onmouseenter={decor::nav_hover_in()}
                                    onmouseleave={decor::nav_hover_out()}
                                >
                                    {link.label.clone()}
                                </a>
                            </li>
                        }) }
                    </ul>
                    <button
                        type="button"
                        class={classes!("hamburger", (*menu_open).then_some("active"))}
                        aria-label="Toggle navigation"
                        aria-expanded={(*menu_open).to_string()}
                        onclick={on_menu_toggle}
                    >
                        <span class="bar"></span>
                        <span class="bar"></span>
                        <span class="bar"></span>
                    </button>
                </div>
            </nav>

            <main>
                <section id="home" class="hero">
                    <ParticleBackdrop />
                    <div class="hero-content">
                        <h1 class="hero-title">
                            <TypedName
                                script={props.owner.typed.clone()}
                                fallback={AttrValue::from(props.owner.name.clone())}
                            />
                        </h1>
                        <p class="hero-role">{props.owner.role.clone()}</p>
                        <p class="hero-tagline">{props.owner.tagline.clone()}</p>
                        <div class="hero-actions">
                            <a class="btn-primary" href="#projects" onclick={on_anchor.clone()}>
                                {"View my work"}
                            </a>
                            <a class="btn-secondary" href="#contact" onclick={on_anchor.clone()}>
                                {"Get in touch"}
                            </a>
                        </div>
                    </div>
                </section>

                <section id="about" class={section_class(0)}>
                    <h2 ref={headings[0].clone()} class="section-title">{"About"}</h2>
                    <div class="about-text card-hover">
                        { for props.about.iter().map(|paragraph| html! {
                            <p>{paragraph.clone()}</p>
                        }) }
                    </div>
                </section>

                <section id="skills" class={section_class(1)}>
                    <h2 ref={headings[1].clone()} class="section-title">{"Skills"}</h2>
                    <SkillsSection skills={props.skills.clone()} scroll_epoch={scroll_epoch.0} />
                </section>

                <section id="projects" class={section_class(2)}>
                    <h2 ref={headings[2].clone()} class="section-title">{"Projects"}</h2>
                    <ProjectsSection projects={props.projects.clone()} />
                </section>

                <section id="contact" class={section_class(3)}>
                    <h2 ref={headings[3].clone()} class="section-title">{"Contact"}</h2>
                    <p class="contact-intro">
                        {"Have a project in mind? Write to "}
                        <a href={format!("mailto:{}", props.owner.email)}>
                            {props.owner.email.clone()}
                        </a>
                        {" or use the form below."}
                    </p>
                    <ContactSection />
                </section>
            </main>

            <footer class="footer">
                <p>{format!("© {}", props.owner.name)}</p>
            </footer>
        </ContextProvider<SiteConfig>>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let Some(mount) = dom::document().and_then(|document| document.get_element_by_id("app")) else {
        log_event(LogLevel::Warn, "mount_point_missing", json!({ "id": "app" }));
        return;
    };

    let config = SiteConfig::from_element(&mount);
    logging::set_level(config.log_level);
    if config.contact_endpoint.is_none() {
        log_event(
            LogLevel::Warn,
            "contact_endpoint_missing",
            json!({ "attribute": crate::config::CONTACT_ENDPOINT_ATTR }),
        );
    }

    let content = match SiteContent::load() {
        Ok(content) => content,
        Err(error) => {
            log_event(
                LogLevel::Warn,
                "content_load_failed",
                json!({ "error": error.to_string() }),
            );
            mount.set_text_content(Some("This page failed to load its content."));
            return;
        }
    };

    let app = AppProps {
        config,
        owner: content.owner,
        nav: content.nav,
        about: content.about,
        skills: Rc::new(content.skills),
        projects: Rc::new(content.projects),
    };

    yew::Renderer::<App>::with_root_and_props(mount, app).render();
}
