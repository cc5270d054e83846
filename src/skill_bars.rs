use crate::viewport::{Rect, Viewport};
use std::time::Duration;

pub const SKILL_BAR_FILL_DELAY: Duration = Duration::from_millis(200);
pub const SKILL_BAR_INITIAL_DELAY: Duration = Duration::from_millis(1_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillBar {
    percent: u8,
}

impl SkillBar {
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
        }
    }

    pub fn percent(self) -> u8 {
        self.percent
    }

    /// Transform that slides the bar fill so that `percent` of it shows.
    pub fn fill_transform(self) -> String {
        format!("translateX(-{}%)", 100 - self.percent)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BarState {
    Empty,
    Scheduled,
}

/// Decides when each skill bar starts filling. A bar is handed out once, the
/// first time a scan finds it fully on screen.
#[derive(Clone, Debug, Default)]
pub struct SkillBarAnimator {
    states: Vec<BarState>,
}

impl SkillBarAnimator {
    pub fn new(bars: impl IntoIterator<Item = SkillBar>) -> Self {
        Self {
            states: bars.into_iter().map(|_| BarState::Empty).collect(),
        }
    }

    /// Bars handed out by an earlier scan are never returned again.
    pub fn scan<I>(&mut self, viewport: Viewport, rects: I) -> Vec<usize>
    where
        I: IntoIterator<Item = Option<Rect>>,
    {
        let mut ready = Vec::new();

        for (index, rect) in rects.into_iter().enumerate() {
            let Some(state) = self.states.get_mut(index) else {
                break;
            };
            if *state == BarState::Scheduled {
                continue;
            }
            if rect.is_some_and(|rect| viewport.contains(&rect)) {
                *state = BarState::Scheduled;
                ready.push(index);
            }
        }

        ready
    }
}
