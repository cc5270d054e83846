use crate::viewport::{self, Rect};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, Element, HtmlElement};
use yew::NodeRef;

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|document| document.query_selector_all(selector).ok())
    else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn rects(refs: &[NodeRef]) -> Vec<Option<Rect>> {
    refs.iter()
        .map(|node| node.cast::<Element>().and_then(|element| viewport::web::rect_of(&element)))
        .collect()
}

pub fn set_scroll_locked(locked: bool) {
    let Some(body) = body() else {
        return;
    };
    let style = body.style();
    if locked {
        let _ = style.set_property("overflow", "hidden");
    } else {
        let _ = style.remove_property("overflow");
    }
}

/// Returns whether a target was found.
pub fn scroll_to_anchor(href: &str) -> bool {
    let Some(target) = document().and_then(|document| document.query_selector(href).ok().flatten())
    else {
        return false;
    };

    let options = Object::new();
    let _ = Reflect::set(&options, &JsValue::from_str("behavior"), &JsValue::from_str("smooth"));
    let _ = Reflect::set(&options, &JsValue::from_str("block"), &JsValue::from_str("start"));

    let target_js: &JsValue = target.as_ref();
    let scrolled = Reflect::get(target_js, &JsValue::from_str("scrollIntoView"))
        .ok()
        .and_then(|method| method.dyn_into::<Function>().ok())
        .is_some_and(|method| method.call1(target_js, &options).is_ok());

    if !scrolled {
        target.scroll_into_view();
    }
    true
}
