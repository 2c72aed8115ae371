use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlAnchorElement};

use crate::config;
use crate::pricing::tier::{format_price, AddonToggle, Tier};

const PULSE_CLASS: &str = "price-updated";
const CHECKOUT_LABEL_SELECTOR: &str = ".checkout-price";

/// Where a tier's derived values get painted.
pub trait TierView {
    fn set_price_text(&self, text: &str);
    fn set_checkout_label(&self, text: &str);
    fn set_checkout_href(&self, href: &str);
    /// Cosmetic "just updated" feedback on the price.
    fn pulse_price(&self);
}

pub fn render_tier<T: AddonToggle, V: TierView>(tier: &Tier<T>, view: &V) {
    let price = format_price(tier.compute_total());
    view.set_price_text(&price);
    view.set_checkout_label(&price);
    view.set_checkout_href(tier.compute_link().href());
    view.pulse_price();
}

pub struct DomTierView {
    button: HtmlAnchorElement,
    price: Option<Element>,
    label: Option<Element>,
}

impl DomTierView {
    pub fn new(button: HtmlAnchorElement, price: Option<Element>) -> Self {
        let label = button.query_selector(CHECKOUT_LABEL_SELECTOR).ok().flatten();
        Self { button, price, label }
    }

    pub fn button(&self) -> &HtmlAnchorElement {
        &self.button
    }
}

impl TierView for DomTierView {
    fn set_price_text(&self, text: &str) {
        if let Some(price) = &self.price {
            price.set_text_content(Some(text));
        }
    }

    fn set_checkout_label(&self, text: &str) {
        if let Some(label) = &self.label {
            label.set_text_content(Some(text));
        }
    }

    fn set_checkout_href(&self, href: &str) {
        self.button.set_href(href);
    }

    fn pulse_price(&self) {
        let Some(price) = self.price.clone() else {
            return;
        };
        if let Err(e) = price.class_list().add_1(PULSE_CLASS) {
            log::debug!("Could not mark price as updated: {:?}", e);
            return;
        }
        Timeout::new(config::PRICE_PULSE_MS, move || {
            let _ = price.class_list().remove_1(PULSE_CLASS);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::tier::tests::tier;
    use crate::pricing::tier::TierKey;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingView {
        price: RefCell<Option<String>>,
        label: RefCell<Option<String>>,
        href: RefCell<Option<String>>,
        pulses: RefCell<u32>,
    }

    impl TierView for RecordingView {
        fn set_price_text(&self, text: &str) {
            *self.price.borrow_mut() = Some(text.to_string());
        }
        fn set_checkout_label(&self, text: &str) {
            *self.label.borrow_mut() = Some(text.to_string());
        }
        fn set_checkout_href(&self, href: &str) {
            *self.href.borrow_mut() = Some(href.to_string());
        }
        fn pulse_price(&self) {
            *self.pulses.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_render_writes_price_label_and_link() {
        let (mut audio, toggle) = tier(TierKey::Audio);
        audio.apply_links(Some("https://pay/audio"), Some("https://pay/audio-storage"));
        let view = RecordingView::default();

        render_tier(&audio, &view);
        assert_eq!(view.price.borrow().as_deref(), Some("$299"));
        assert_eq!(view.label.borrow().as_deref(), Some("$299"));
        assert_eq!(view.href.borrow().as_deref(), Some("https://pay/audio"));

        toggle.set(true);
        render_tier(&audio, &view);
        assert_eq!(view.price.borrow().as_deref(), Some("$398"));
        assert_eq!(view.label.borrow().as_deref(), Some("$398"));
        assert_eq!(view.href.borrow().as_deref(), Some("https://pay/audio-storage"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let (video, _toggle) = tier(TierKey::Video);
        let view = RecordingView::default();

        render_tier(&video, &view);
        let first = (view.price.borrow().clone(), view.href.borrow().clone());
        render_tier(&video, &view);
        let second = (view.price.borrow().clone(), view.href.borrow().clone());

        assert_eq!(first, second);
        assert_eq!(*view.pulses.borrow(), 2);
    }

    #[test]
    fn test_render_never_sets_empty_href() {
        let (mut video, toggle) = tier(TierKey::Video);
        video.apply_links(Some(""), None);
        let view = RecordingView::default();

        for on in [false, true, false] {
            toggle.set(on);
            render_tier(&video, &view);
            assert!(!view.href.borrow().as_deref().unwrap_or_default().is_empty());
        }
    }
}
