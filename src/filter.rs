use crate::motion::{stagger, Easing, Property, Tween};
use std::time::Duration;

pub const ALL_FILTER: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    Category(String),
}

impl Selection {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_FILTER,
            Self::Category(category) => category,
        }
    }

    pub fn matches(&self, categories: &[String]) -> bool {
        match self {
            Self::All => true,
            Self::Category(target) => categories.iter().any(|category| category == target),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
    Entering,
    Leaving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterItem {
    categories: Vec<String>,
    visibility: Visibility,
    generation: u64,
}

impl FilterItem {
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterMotion {
    Rise { offset: f64 },
    Zoom { from_scale: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterStyle {
    pub motion: FilterMotion,
    pub enter_duration: Duration,
    pub exit_duration: Duration,
    pub stagger: Duration,
}

impl FilterStyle {
    pub fn skills() -> Self {
        Self {
            motion: FilterMotion::Rise { offset: 20.0 },
            enter_duration: Duration::from_millis(300),
            exit_duration: Duration::from_millis(200),
            stagger: Duration::ZERO,
        }
    }

    pub fn projects() -> Self {
        Self {
            motion: FilterMotion::Zoom { from_scale: 0.8 },
            enter_duration: Duration::from_millis(400),
            exit_duration: Duration::from_millis(300),
            stagger: Duration::from_millis(100),
        }
    }

    fn enter(&self, index: usize) -> Tween {
        let tween = Tween::new(self.enter_duration, Easing::EaseOutQuad)
            .from_to(Property::Opacity, 0.0, 1.0)
            .delayed(stagger(index, self.stagger));

        match self.motion {
            FilterMotion::Rise { offset } => tween.from_to(Property::TranslateY, offset, 0.0),
            FilterMotion::Zoom { from_scale } => tween.from_to(Property::Scale, from_scale, 1.0),
        }
    }

    fn exit(&self) -> Tween {
        let tween =
            Tween::new(self.exit_duration, Easing::EaseInQuad).to(Property::Opacity, 0.0);

        match self.motion {
            FilterMotion::Rise { offset } => tween.to(Property::TranslateY, offset),
            FilterMotion::Zoom { from_scale } => tween.to(Property::Scale, from_scale),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Enter,
    Exit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub index: usize,
    pub generation: u64,
    pub kind: TransitionKind,
    pub tween: Tween,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryFilter {
    controls: Vec<Selection>,
    active: usize,
    items: Vec<FilterItem>,
    style: FilterStyle,
}

impl CategoryFilter {
    /// Controls are `all`, then each category in order of first appearance.
    pub fn new<I, C>(items: I, style: FilterStyle) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let items: Vec<FilterItem> = items
            .into_iter()
            .map(|categories| FilterItem {
                categories: categories.into_iter().map(Into::into).collect(),
                visibility: Visibility::Shown,
                generation: 0,
            })
            .collect();

        let mut controls = vec![Selection::All];
        for category in items.iter().flat_map(|item| item.categories.iter()) {
            let selection = Selection::Category(category.clone());
            if !controls.contains(&selection) {
                controls.push(selection);
            }
        }

        Self {
            controls,
            active: 0,
            items,
            style,
        }
    }

    pub fn controls(&self) -> &[Selection] {
        &self.controls
    }

    pub fn is_active(&self, control: usize) -> bool {
        self.active == control
    }

    pub fn visibility(&self, index: usize) -> Option<Visibility> {
        self.items.get(index).map(FilterItem::visibility)
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.visibility(index) == Some(Visibility::Hidden)
    }

    /// Entering cards are delayed by their index in the full list.
    pub fn select_control(&mut self, control: usize) -> Vec<Transition> {
        let Some(selection) = self.controls.get(control).cloned() else {
            return Vec::new();
        };
        self.active = control;

        let mut transitions = Vec::new();

        for (index, item) in self.items.iter_mut().enumerate() {
            if selection.matches(&item.categories) {
                item.generation += 1;
                item.visibility = Visibility::Entering;
                transitions.push(Transition {
                    index,
                    generation: item.generation,
                    kind: TransitionKind::Enter,
                    tween: self.style.enter(index),
                });
            } else if item.visibility != Visibility::Hidden {
                item.generation += 1;
                item.visibility = Visibility::Leaving;
                transitions.push(Transition {
                    index,
                    generation: item.generation,
                    kind: TransitionKind::Exit,
                    tween: self.style.exit(),
                });
            }
        }

        transitions
    }

    /// Completions for superseded transitions are dropped.
    pub fn settle(&mut self, index: usize, generation: u64) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        if item.generation != generation {
            return false;
        }

        let next = match item.visibility {
            Visibility::Entering => Visibility::Shown,
            Visibility::Leaving => Visibility::Hidden,
            settled => settled,
        };
        let changed = next != item.visibility;
        item.visibility = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Selection {
        fn parse(tag: &str) -> Self {
            if tag.eq_ignore_ascii_case(ALL_FILTER) {
                Self::All
            } else {
                Self::Category(tag.to_string())
            }
        }
    }

    impl CategoryFilter {
        fn active(&self) -> &Selection {
            &self.controls[self.active]
        }

        fn select(&mut self, selection: &Selection) -> Vec<Transition> {
            match self.controls.iter().position(|control| control == selection) {
                Some(control) => self.select_control(control),
                None => Vec::new(),
            }
        }
    }

    fn sample() -> CategoryFilter {
        CategoryFilter::new(
            [vec!["A"], vec!["B"], vec!["A", "B"]],
            FilterStyle::projects(),
        )
    }

    fn settle_all(filter: &mut CategoryFilter, transitions: &[Transition]) {
        for transition in transitions {
            filter.settle(transition.index, transition.generation);
        }
    }

    fn visible(filter: &CategoryFilter) -> Vec<usize> {
        (0..filter.items.len())
            .filter(|index| filter.visibility(*index) == Some(Visibility::Shown))
            .collect()
    }

    #[test]
    fn controls_list_all_then_categories_in_order() {
        let filter = sample();

        let labels: Vec<&str> = filter.controls().iter().map(Selection::as_str).collect();

        assert_eq!(labels, vec!["all", "A", "B"]);
        assert_eq!(filter.active(), &Selection::All);
    }

    #[test]
    fn category_selection_keeps_matching_items() {
        let mut filter = sample();

        let transitions = filter.select(&Selection::parse("A"));
        settle_all(&mut filter, &transitions);

        assert_eq!(visible(&filter), vec![0, 2]);
        assert!(filter.is_hidden(1));
    }

    #[test]
    fn all_selection_shows_every_item() {
        let mut filter = sample();
        let transitions = filter.select(&Selection::parse("B"));
        settle_all(&mut filter, &transitions);

        let transitions = filter.select(&Selection::parse("all"));
        settle_all(&mut filter, &transitions);

        assert_eq!(visible(&filter), vec![0, 1, 2]);
    }

    #[test]
    fn exactly_one_control_is_active_after_each_click() {
        let mut filter = sample();

        for control in [2, 1, 1, 0, 2] {
            filter.select_control(control);
            let active = (0..filter.controls().len())
                .filter(|candidate| filter.is_active(*candidate))
                .count();
            assert_eq!(active, 1);
            assert!(filter.is_active(control));
        }
    }

    #[test]
    fn leaving_item_is_not_hidden_before_its_fade_completes() {
        let mut filter = sample();

        let transitions = filter.select(&Selection::parse("A"));

        assert_eq!(filter.visibility(1), Some(Visibility::Leaving));
        assert!(!filter.is_hidden(1));

        let exit = transitions
            .iter()
            .find(|transition| transition.index == 1)
            .expect("item 1 should fade out");
        assert_eq!(exit.kind, TransitionKind::Exit);
        assert!(filter.settle(exit.index, exit.generation));
        assert!(filter.is_hidden(1));
    }

    #[test]
    fn stale_fade_out_does_not_hide_a_retargeted_item() {
        let mut filter = sample();
        let first = filter.select(&Selection::parse("A"));
        let second = filter.select(&Selection::All);

        settle_all(&mut filter, &first);
        assert_eq!(filter.visibility(1), Some(Visibility::Entering));

        settle_all(&mut filter, &second);
        assert_eq!(visible(&filter), vec![0, 1, 2]);
    }

    #[test]
    fn hidden_items_stay_put_when_still_filtered_out() {
        let mut filter = sample();
        let transitions = filter.select(&Selection::parse("A"));
        settle_all(&mut filter, &transitions);

        let transitions = filter.select(&Selection::parse("A"));

        assert!(transitions.iter().all(|transition| transition.index != 1));
        assert!(filter.is_hidden(1));
    }

    #[test]
    fn entering_items_are_staggered_by_index() {
        let mut filter = sample();

        let delays: Vec<Duration> = filter
            .select(&Selection::All)
            .into_iter()
            .map(|transition| transition.tween.delay)
            .collect();

        assert_eq!(
            delays,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200)
            ]
        );
    }

    #[test]
    fn category_stagger_keeps_each_card_slot() {
        let mut filter = sample();

        let delays: Vec<(usize, Duration)> = filter
            .select(&Selection::parse("B"))
            .into_iter()
            .filter(|transition| transition.kind == TransitionKind::Enter)
            .map(|transition| (transition.index, transition.tween.delay))
            .collect();

        assert_eq!(
            delays,
            vec![
                (1, Duration::from_millis(100)),
                (2, Duration::from_millis(200))
            ]
        );
    }

    #[test]
    fn skills_style_slides_without_stagger() {
        let mut filter =
            CategoryFilter::new([vec!["frontend"], vec!["backend"]], FilterStyle::skills());

        let transitions = filter.select(&Selection::parse("backend"));

        let exit = &transitions[0];
        assert_eq!(exit.kind, TransitionKind::Exit);
        assert_eq!(
            exit.tween.final_frame().transform.as_deref(),
            Some("translateY(20px)")
        );
        let enter = &transitions[1];
        assert_eq!(enter.kind, TransitionKind::Enter);
        assert_eq!(enter.tween.delay, Duration::ZERO);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut filter = sample();

        assert!(filter.select(&Selection::parse("Z")).is_empty());
        assert_eq!(filter.active(), &Selection::All);
    }

    #[test]
    fn settle_out_of_range_is_a_no_op() {
        let mut filter = sample();

        assert!(!filter.settle(99, 1));
    }
}
