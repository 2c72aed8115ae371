use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, NodeList};

/// Attaches a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        log::warn!("Could not listen for {}: {:?}", event, e);
    }
    callback.forget();
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn toggle_class(element: &Element, class: &str) {
    let _ = element.class_list().toggle(class);
}
