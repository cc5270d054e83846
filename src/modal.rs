use crate::motion::{Easing, Property, Tween};
use std::time::Duration;
use thiserror::Error;

pub const MODAL_SUFFIX: &str = "-modal";
const OPEN_DURATION: Duration = Duration::from_millis(300);
const CLOSE_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("no modal registered under `{0}`")]
    Unknown(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalDirection {
    Open,
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModalAnimation {
    pub id: String,
    pub generation: u64,
    pub direction: ModalDirection,
    pub tween: Tween,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ModalEntry {
    id: String,
    phase: ModalPhase,
    generation: u64,
}

/// At most one modal is active; opening another closes the current one first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalController {
    modals: Vec<ModalEntry>,
    active: Option<usize>,
}

pub fn element_id(id: &str) -> String {
    format!("{id}{MODAL_SUFFIX}")
}

impl ModalController {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modals: ids
                .into_iter()
                .map(|id| ModalEntry {
                    id: id.into(),
                    phase: ModalPhase::Closed,
                    generation: 0,
                })
                .collect(),
            active: None,
        }
    }

    pub fn phase(&self, id: &str) -> Option<ModalPhase> {
        self.position(id).map(|index| self.modals[index].phase)
    }

    pub fn is_displayed(&self, id: &str) -> bool {
        self.phase(id).is_some_and(|phase| phase != ModalPhase::Closed)
    }

    pub fn scroll_locked(&self) -> bool {
        self.modals
            .iter()
            .any(|modal| modal.phase != ModalPhase::Closed)
    }

    pub fn open(&mut self, id: &str) -> Result<Vec<ModalAnimation>, ModalError> {
        let index = self
            .position(id)
            .ok_or_else(|| ModalError::Unknown(id.to_string()))?;

        if matches!(self.modals[index].phase, ModalPhase::Opening | ModalPhase::Open) {
            return Ok(Vec::new());
        }

        let mut animations = Vec::new();
        if let Some(previous) = self.active.filter(|previous| *previous != index) {
            animations.extend(self.begin_close(previous));
        }

        let modal = &mut self.modals[index];
        modal.generation += 1;
        modal.phase = ModalPhase::Opening;
        self.active = Some(index);

        animations.push(ModalAnimation {
            id: modal.id.clone(),
            generation: modal.generation,
            direction: ModalDirection::Open,
            tween: Tween::new(OPEN_DURATION, Easing::EaseOutQuad)
                .from_to(Property::Scale, 0.8, 1.0)
                .from_to(Property::Opacity, 0.0, 1.0),
        });

        Ok(animations)
    }

    pub fn close(&mut self, id: &str) -> Option<ModalAnimation> {
        let index = self.position(id)?;
        self.begin_close(index)
    }

    pub fn escape(&mut self) -> Option<ModalAnimation> {
        let index = self.active?;
        self.begin_close(index)
    }

    pub fn backdrop_click(&mut self, id: &str) -> Option<ModalAnimation> {
        self.close(id)
    }

    /// Superseded animations are ignored.
    pub fn settle(&mut self, id: &str, generation: u64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let modal = &mut self.modals[index];
        if modal.generation != generation {
            return false;
        }

        match modal.phase {
            ModalPhase::Opening => {
                modal.phase = ModalPhase::Open;
                true
            }
            ModalPhase::Closing => {
                modal.phase = ModalPhase::Closed;
                true
            }
            ModalPhase::Open | ModalPhase::Closed => false,
        }
    }

    fn begin_close(&mut self, index: usize) -> Option<ModalAnimation> {
        let modal = &mut self.modals[index];
        if matches!(modal.phase, ModalPhase::Closed | ModalPhase::Closing) {
            return None;
        }

        modal.generation += 1;
        modal.phase = ModalPhase::Closing;
        if self.active == Some(index) {
            self.active = None;
        }

        Some(ModalAnimation {
            id: modal.id.clone(),
            generation: modal.generation,
            direction: ModalDirection::Close,
            tween: Tween::new(CLOSE_DURATION, Easing::EaseInQuad)
                .from_to(Property::Scale, 1.0, 0.8)
                .from_to(Property::Opacity, 1.0, 0.0),
        })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.modals.iter().position(|modal| modal.id == id)
    }
}
