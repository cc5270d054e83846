pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;
pub const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.top >= 0.0
            && rect.left >= 0.0
            && rect.bottom <= self.height
            && rect.right <= self.width
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT)
    }
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::{Rect, Viewport, FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH};
    use web_sys::{window, Element};

    pub fn current() -> Viewport {
        let Some(win) = window() else {
            return Viewport::default();
        };

        let client = win
            .document()
            .and_then(|document| document.document_element())
            .map(|root| (f64::from(root.client_width()), f64::from(root.client_height())));

        let width = win
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .filter(|value| *value > 0.0)
            .or_else(|| client.map(|(width, _)| width))
            .unwrap_or(FALLBACK_VIEWPORT_WIDTH);
        let height = win
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .filter(|value| *value > 0.0)
            .or_else(|| client.map(|(_, height)| height))
            .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);

        Viewport::new(width, height)
    }

    /// `None` for elements without a layout box (`display: none`), which
    /// report an all-zero rect.
    pub fn rect_of(element: &Element) -> Option<Rect> {
        let rect = element.get_bounding_client_rect();
        if rect.width() == 0.0 && rect.height() == 0.0 {
            return None;
        }
        Some(Rect::new(rect.top(), rect.left(), rect.bottom(), rect.right()))
    }
}
