use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlAnchorElement, ScrollBehavior, ScrollIntoViewOptions};

use crate::dom;
use crate::pricing::tier::TierKey;

/// Selector for an in-page href, or `None` when the browser should handle it.
pub fn scroll_target(href: &str) -> Option<&str> {
    match href {
        "#" => None,
        target if target.starts_with('#') => Some(target),
        _ => None,
    }
}

// Checkout anchors have their own click handling.
fn is_checkout_anchor(id: &str) -> bool {
    TierKey::ALL.iter().any(|key| key.checkout_id() == id)
}

pub fn bind(document: &Document) {
    let Ok(list) = document.query_selector_all("a[href^=\"#\"]") else {
        return;
    };
    for anchor in dom::elements(list) {
        if is_checkout_anchor(&anchor.id()) {
            continue;
        }
        let Ok(anchor) = anchor.dyn_into::<HtmlAnchorElement>() else {
            continue;
        };
        let document = document.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event: Event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = scroll_target(&href) else {
                return;
            };
            if let Ok(Some(target)) = document.query_selector(selector) {
                event.prevent_default();
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_target() {
        assert_eq!(scroll_target("#book"), Some("#book"));
        assert_eq!(scroll_target("#"), None);
        assert_eq!(scroll_target("/checkout/audio"), None);
        assert_eq!(scroll_target("https://example.com/#faq"), None);
    }

    #[test]
    fn test_checkout_anchors_are_skipped() {
        assert!(is_checkout_anchor("checkout-audio"));
        assert!(is_checkout_anchor("checkout-video"));
        assert!(!is_checkout_anchor("book-now"));
        assert!(!is_checkout_anchor(""));
    }
}
