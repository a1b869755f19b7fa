//! DOM helpers.
//!
//! Lookups are done per call rather than cached: the page template may render
//! gated regions and address inputs after the bridge starts.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};
use ws_session_core::presentation::display_value;

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nl) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

/// Every element carrying `class`.
pub fn by_class(class: &str) -> Vec<Element> {
    query_all(&format!(".{class}"))
}

pub fn input_fields(selector: &str) -> Vec<HtmlInputElement> {
    query_all(selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn set_visible(el: &Element, visible: bool) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", display_value(visible));
    }
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document().create_element(tag)
}

/// Attach a click listener that lives for the rest of the page.
pub fn on_click(el: &Element, mut handler: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
        handler();
    }) as Box<dyn FnMut(_)>);
    let _ = el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
    cb.forget();
}

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
