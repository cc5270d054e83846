use crate::viewport::{Rect, Viewport};

pub const REVEALED_CLASS: &str = "revealed";

/// A candidate that has been revealed stays revealed for the lifetime of the
/// page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(candidates: usize) -> Self {
        Self {
            revealed: vec![false; candidates],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Returns the indices that flipped on this call. `None` rects never reveal.
    pub fn scan<I>(&mut self, viewport: Viewport, rects: I) -> Vec<usize>
    where
        I: IntoIterator<Item = Option<Rect>>,
    {
        let mut newly_revealed = Vec::new();

        for (index, rect) in rects.into_iter().enumerate() {
            let Some(slot) = self.revealed.get_mut(index) else {
                break;
            };
            if *slot {
                continue;
            }
            if rect.is_some_and(|rect| viewport.contains(&rect)) {
                *slot = true;
                newly_revealed.push(index);
            }
        }

        newly_revealed
    }
}
