use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

const TARGETS: &str =
    ".step, .feature, .pricing-card, .pricing-card--featured, .faq, .interlude__title, .interlude__text";
const HIDDEN: &str = "reveal";
const VISIBLE: &str = "reveal--visible";
const THRESHOLD: f64 = 0.15;
const ROOT_MARGIN: &str = "0px 0px -40px 0px";

/// Fades sections in the first time they scroll into view.
pub fn bind(document: &Document) {
    let Ok(list) = document.query_selector_all(TARGETS) else {
        return;
    };
    let targets = dom::elements(list);
    for el in &targets {
        dom::add_class(el, HIDDEN);
    }

    if !observer_supported() {
        show_all(&targets);
        return;
    }

    match observer() {
        Ok(observer) => {
            for el in &targets {
                observer.observe(el);
            }
        }
        Err(e) => {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
            show_all(&targets);
        }
    }
}

fn observer_supported() -> bool {
    web_sys::window()
        .map(|window| Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

fn observer() -> Result<IntersectionObserver, JsValue> {
    let callback = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                let target = entry.target();
                dom::add_class(&target, VISIBLE);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

fn show_all(targets: &[Element]) {
    for el in targets {
        dom::add_class(el, VISIBLE);
    }
}
