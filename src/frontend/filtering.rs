use crate::{
    filter::{CategoryFilter, FilterStyle, Selection, Transition},
    motion::web::play,
};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct FilterState {
    pub filter: CategoryFilter,
    pending: Vec<Transition>,
    epoch: u64,
    settled: u64,
}

impl FilterState {
    /// Count of completed card transitions.
    pub fn settled(&self) -> u64 {
        self.settled
    }
}

pub enum FilterAction {
    Select(usize),
    Settle { index: usize, generation: u64 },
}

impl Reducible for FilterState {
    type Action = FilterAction;

    fn reduce(self: Rc<Self>, action: FilterAction) -> Rc<Self> {
        match action {
            FilterAction::Select(control) => {
                let mut filter = self.filter.clone();
                let pending = filter.select_control(control);
                Rc::new(Self {
                    filter,
                    pending,
                    epoch: self.epoch + 1,
                    settled: self.settled,
                })
            }
            FilterAction::Settle { index, generation } => {
                let mut filter = self.filter.clone();
                if !filter.settle(index, generation) {
                    return self;
                }
                Rc::new(Self {
                    filter,
                    pending: self.pending.clone(),
                    epoch: self.epoch,
                    settled: self.settled + 1,
                })
            }
        }
    }
}

/// Transitions from a click are played after the render that un-hides the
/// entering cards.
#[hook]
pub fn use_category_filter(
    categories: Vec<Vec<String>>,
    style: FilterStyle,
) -> (UseReducerHandle<FilterState>, Rc<Vec<NodeRef>>) {
    let cards = use_memo(categories.len(), |count| {
        (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let state = use_reducer(move || FilterState {
        filter: CategoryFilter::new(categories, style),
        pending: Vec::new(),
        epoch: 0,
        settled: 0,
    });

    {
        let epoch = state.epoch;
        let state = state.clone();
        let cards = cards.clone();
        use_effect_with(epoch, move |_| {
            for transition in &state.pending {
                play_transition(&state, &cards, transition);
            }
            || ()
        });
    }

    (state, cards)
}

fn play_transition(
    state: &UseReducerHandle<FilterState>,
    cards: &[NodeRef],
    transition: &Transition,
) {
    let dispatcher = state.dispatcher();
    let settle = FilterAction::Settle {
        index: transition.index,
        generation: transition.generation,
    };

    match cards.get(transition.index).and_then(|card| card.cast::<Element>()) {
        Some(card) => {
            let tween = transition.tween.clone();
            spawn_local(async move {
                play(&card, &tween).await;
                dispatcher.dispatch(settle);
            });
        }
        None => dispatcher.dispatch(settle),
    }
}

fn control_label(selection: &Selection) -> String {
    let mut chars = selection.as_str().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn filter_controls(state: &UseReducerHandle<FilterState>) -> Html {
    html! {
        <div class="filter-bar" role="group">
            { for state.filter.controls().iter().enumerate().map(|(index, selection)| {
                let active = state.filter.is_active(index);
                let dispatcher = state.dispatcher();
                let onclick = Callback::from(move |_: MouseEvent| {
                    dispatcher.dispatch(FilterAction::Select(index));
                });
                html! {
                    <button
                        type="button"
                        class={classes!("filter-btn", active.then_some("active"))}
                        data-filter={selection.as_str().to_string()}
                        aria-pressed={active.to_string()}
                        {onclick}
                    >
                        {control_label(selection)}
                    </button>
                }
            }) }
        </div>
    }
}
