use super::{
    decor, dom,
    filtering::{filter_controls, use_category_filter},
    millis,
};
use crate::{
    content::Skill,
    filter::FilterStyle,
    skill_bars::{SkillBar, SkillBarAnimator, SKILL_BAR_FILL_DELAY, SKILL_BAR_INITIAL_DELAY},
    viewport,
};
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

#[derive(PartialEq)]
struct FilledBars(Vec<bool>);

impl Reducible for FilledBars {
    type Action = usize;

    fn reduce(self: Rc<Self>, index: usize) -> Rc<Self> {
        if self.0.get(index).copied().unwrap_or(true) {
            return self;
        }
        let mut filled = self.0.clone();
        filled[index] = true;
        Rc::new(Self(filled))
    }
}

#[derive(Properties, PartialEq)]
pub struct SkillsProps {
    pub skills: Rc<Vec<Skill>>,
    pub scroll_epoch: u32,
}

#[function_component(SkillsSection)]
pub fn skills_section(props: &SkillsProps) -> Html {
    let (filter, cards) = use_category_filter(
        props.skills.iter().map(|skill| vec![skill.category.clone()]).collect(),
        FilterStyle::skills(),
    );
    let tracks = use_memo(props.skills.len(), |count| {
        (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let animator = use_mut_ref({
        let skills = props.skills.clone();
        move || SkillBarAnimator::new(skills.iter().map(|skill| SkillBar::new(skill.percent)))
    });
    let filled = use_reducer({
        let count = props.skills.len();
        move || FilledBars(vec![false; count])
    });

    // Measures the untransformed track; the fill itself sits off to the left
    // until it is filled.
    let scan: Rc<dyn Fn()> = {
        let tracks = tracks.clone();
        let fill = filled.dispatcher();
        Rc::new(move || {
            let ready = animator
                .borrow_mut()
                .scan(viewport::web::current(), dom::rects(&tracks));
            for index in ready {
                let fill = fill.clone();
                Timeout::new(millis(SKILL_BAR_FILL_DELAY), move || fill.dispatch(index))
                    .forget();
            }
        })
    };

    {
        let scan = scan.clone();
        use_effect_with((), move |_| {
            let timer = Timeout::new(millis(SKILL_BAR_INITIAL_DELAY), move || scan());
            move || drop(timer)
        });
    }

    {
        let scan = scan.clone();
        use_effect_with(props.scroll_epoch, move |epoch| {
            if *epoch > 0 {
                scan();
            }
            || ()
        });
    }

    // Cards shown again by a filter had no layout box during earlier scans.
    use_effect_with(filter.settled(), move |settled| {
        if *settled > 0 {
            scan();
        }
        || ()
    });

    html! {
        <>
            { filter_controls(&filter) }
            <div class="skills-grid">
                { for props.skills.iter().enumerate().map(|(index, skill)| {
                    let bar = SkillBar::new(skill.percent);
                    let transform = if filled.0.get(index).copied().unwrap_or(false) {
                        bar.fill_transform()
                    } else {
                        SkillBar::new(0).fill_transform()
                    };
                    let hidden = filter.filter.is_hidden(index).then_some("hidden");
                    html! {
                        <div
                            ref={cards[index].clone()}
                            class={classes!("skill-card", "card-hover", hidden)}
                            data-category={skill.category.clone()}
                            onmouseenter={decor::card_hover_in()}
                            onmouseleave={decor::card_hover_out()}
                        >
                            <div class="skill-header">
                                <h3>{skill.name.clone()}</h3>
                                <span class="skill-percent">{format!("{}%", bar.percent())}</span>
                            </div>
                            <div ref={tracks[index].clone()} class="skill-bar">
                                <div
                                    class="skill-progress"
                                    style={format!("transform: {transform};")}
                                ></div>
                            </div>
                        </div>
                    }
                }) }
            </div>
        </>
    }
}
