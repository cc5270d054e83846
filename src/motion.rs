use std::time::Duration;

/// Web Animations `fill`. The first keyframe applies during `delay` and the
/// last one holds after the animation ends.
pub const FILL_MODE: &str = "both";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    EaseOutQuad,
    EaseInQuad,
}

impl Easing {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::EaseOutQuad => "cubic-bezier(0.25, 0.46, 0.45, 0.94)",
            Self::EaseInQuad => "cubic-bezier(0.55, 0.085, 0.68, 0.53)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    Opacity,
    Scale,
    TranslateX,
    TranslateY,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub property: Property,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub tracks: Vec<Track>,
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub opacity: Option<f64>,
    pub transform: Option<String>,
}

impl Tween {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            tracks: Vec::new(),
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    pub fn from_to(mut self, property: Property, from: f64, to: f64) -> Self {
        self.tracks.push(Track {
            property,
            values: vec![from, to],
        });
        self
    }

    /// Animates from whatever value the element currently has.
    pub fn to(mut self, property: Property, to: f64) -> Self {
        self.tracks.push(Track {
            property,
            values: vec![to],
        });
        self
    }

    pub fn through(mut self, property: Property, values: &[f64]) -> Self {
        if !values.is_empty() {
            self.tracks.push(Track {
                property,
                values: values.to_vec(),
            });
        }
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Keyframes in play order. Tracks shorter than the longest one hold their
    /// last value.
    pub fn keyframes(&self) -> Vec<Frame> {
        let count = self
            .tracks
            .iter()
            .map(|track| track.values.len())
            .max()
            .unwrap_or(0);

        (0..count).map(|step| self.frame_at(step)).collect()
    }

    pub fn final_frame(&self) -> Frame {
        self.keyframes().pop().unwrap_or_default()
    }

    fn frame_at(&self, step: usize) -> Frame {
        let value = |property: Property| {
            self.tracks
                .iter()
                .find(|track| track.property == property)
                .and_then(|track| track.values.get(step).or_else(|| track.values.last()))
                .copied()
        };

        let mut transform = Vec::new();
        if let Some(x) = value(Property::TranslateX) {
            transform.push(format!("translateX({x}px)"));
        }
        if let Some(y) = value(Property::TranslateY) {
            transform.push(format!("translateY({y}px)"));
        }
        if let Some(scale) = value(Property::Scale) {
            transform.push(format!("scale({scale})"));
        }

        Frame {
            opacity: value(Property::Opacity),
            transform: (!transform.is_empty()).then(|| transform.join(" ")),
        }
    }
}

pub fn stagger(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::{Frame, Tween, FILL_MODE};
    use js_sys::{Array, Function, Object, Promise, Reflect};
    use std::{
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    };
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Element, HtmlElement};

    /// Completion handle for a started animation. The animation runs whether
    /// or not the handle is awaited.
    pub struct Motion {
        finished: Option<JsFuture>,
    }

    impl Future for Motion {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            match self.finished.as_mut() {
                Some(finished) => Pin::new(finished).poll(cx).map(|_| ()),
                None => Poll::Ready(()),
            }
        }
    }

    pub fn play(element: &Element, tween: &Tween) -> Motion {
        match start(element, tween) {
            Some(finished) => Motion {
                finished: Some(JsFuture::from(finished)),
            },
            None => {
                apply_frame(element, &tween.final_frame());
                Motion { finished: None }
            }
        }
    }

    fn start(element: &Element, tween: &Tween) -> Option<Promise> {
        let keyframes = Array::new();
        for frame in tween.keyframes() {
            keyframes.push(&frame_object(&frame));
        }

        let options = Object::new();
        let duration_ms = tween.duration.as_secs_f64() * 1_000.0;
        let delay_ms = tween.delay.as_secs_f64() * 1_000.0;
        set(&options, "duration", &JsValue::from_f64(duration_ms));
        set(&options, "delay", &JsValue::from_f64(delay_ms));
        set(&options, "easing", &JsValue::from_str(tween.easing.as_css()));
        set(&options, "fill", &JsValue::from_str(FILL_MODE));

        let element_js: &JsValue = element.as_ref();
        let animate = Reflect::get(element_js, &JsValue::from_str("animate")).ok()?;
        let animate = animate.dyn_ref::<Function>()?;
        let animation = animate.call2(element_js, &keyframes, &options).ok()?;
        let finished = Reflect::get(&animation, &JsValue::from_str("finished")).ok()?;

        finished.dyn_into::<Promise>().ok()
    }

    fn frame_object(frame: &Frame) -> Object {
        let object = Object::new();
        if let Some(opacity) = frame.opacity {
            set(&object, "opacity", &JsValue::from_f64(opacity));
        }
        if let Some(transform) = frame.transform.as_deref() {
            set(&object, "transform", &JsValue::from_str(transform));
        }
        object
    }

    fn set(target: &Object, key: &str, value: &JsValue) {
        let _ = Reflect::set(target, &JsValue::from_str(key), value);
    }

    pub fn apply_frame(element: &Element, frame: &Frame) {
        let Some(element) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = element.style();
        if let Some(opacity) = frame.opacity {
            let _ = style.set_property("opacity", &opacity.to_string());
        }
        if let Some(transform) = frame.transform.as_deref() {
            let _ = style.set_property("transform", transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyframes_compose_transform_and_opacity() {
        let tween = Tween::new(Duration::from_millis(400), Easing::EaseOutQuad)
            .from_to(Property::Opacity, 0.0, 1.0)
            .from_to(Property::Scale, 0.8, 1.0);

        let frames = tween.keyframes();

        assert_eq!(
            frames,
            vec![
                Frame {
                    opacity: Some(0.0),
                    transform: Some("scale(0.8)".to_string()),
                },
                Frame {
                    opacity: Some(1.0),
                    transform: Some("scale(1)".to_string()),
                },
            ]
        );
    }

    #[test]
    fn translate_precedes_scale_in_transform() {
        let tween = Tween::new(Duration::from_millis(200), Easing::EaseInQuad)
            .to(Property::Scale, 1.02)
            .to(Property::TranslateY, -2.0);

        assert_eq!(
            tween.final_frame().transform.as_deref(),
            Some("translateY(-2px) scale(1.02)")
        );
    }

    #[test]
    fn shorter_tracks_hold_their_last_value() {
        let tween = Tween::new(Duration::from_millis(150), Easing::EaseOutQuad)
            .through(Property::Scale, &[1.0, 0.95, 1.0])
            .to(Property::Opacity, 1.0);

        let frames = tween.keyframes();

        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|frame| frame.opacity == Some(1.0)));
        assert_eq!(frames[1].transform.as_deref(), Some("scale(0.95)"));
    }

    #[test]
    fn empty_tween_has_no_frames() {
        let tween = Tween::new(Duration::from_millis(100), Easing::EaseOutQuad);

        assert!(tween.keyframes().is_empty());
        assert_eq!(tween.final_frame(), Frame::default());
    }

    #[test]
    fn delayed_tween_starts_from_its_first_keyframe() {
        let tween = Tween::new(Duration::from_millis(400), Easing::EaseOutQuad)
            .from_to(Property::Opacity, 0.0, 1.0)
            .delayed(Duration::from_millis(200));

        assert_eq!(FILL_MODE, "both");
        assert_eq!(tween.keyframes()[0].opacity, Some(0.0));
        assert_eq!(tween.final_frame().opacity, Some(1.0));
    }

    #[test]
    fn stagger_grows_with_index() {
        let step = Duration::from_millis(100);

        assert_eq!(stagger(0, step), Duration::ZERO);
        assert_eq!(stagger(3, step), Duration::from_millis(300));
    }

    #[test]
    fn easing_maps_to_css_curves() {
        assert!(Easing::EaseOutQuad.as_css().starts_with("cubic-bezier("));
        assert_ne!(Easing::EaseOutQuad.as_css(), Easing::EaseInQuad.as_css());
    }
}
