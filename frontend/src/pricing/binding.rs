use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlAnchorElement, HtmlInputElement};

use crate::dom;
use crate::pricing::checkout::{checkout_decision, navigate};
use crate::pricing::render::{render_tier, DomTierView};
use crate::pricing::tier::{AddonToggle, Tier, TierKey};
use crate::remote_config::RemoteConfig;

pub struct CheckboxToggle(HtmlInputElement);

impl AddonToggle for CheckboxToggle {
    fn is_enabled(&self) -> bool {
        self.0.checked()
    }
}

/// A tier bound to its markup. There is one per key.
pub struct PricingTier {
    tier: RefCell<Tier<CheckboxToggle>>,
    view: DomTierView,
}

impl PricingTier {
    fn lookup(document: &Document, key: TierKey) -> Option<Self> {
        let button = document
            .get_element_by_id(&key.checkout_id())?
            .dyn_into::<HtmlAnchorElement>()
            .ok()?;
        let toggle = document
            .query_selector(&key.toggle_selector())
            .ok()
            .flatten()?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        let price = document.get_element_by_id(&key.price_id());

        Some(Self {
            tier: RefCell::new(Tier::with_default_prices(key, CheckboxToggle(toggle))),
            view: DomTierView::new(button, price),
        })
    }

    pub fn key(&self) -> TierKey {
        self.tier.borrow().key()
    }

    pub fn refresh(&self) {
        render_tier(&*self.tier.borrow(), &self.view);
    }

    pub fn apply_config(&self, config: &RemoteConfig) {
        {
            let mut tier = self.tier.borrow_mut();
            config.apply_to(&mut *tier);
        }
        self.refresh();
    }

    fn on_checkout(&self, event: &Event) {
        let decision = checkout_decision(&*self.tier.borrow());
        navigate(decision, event);
    }
}

pub struct PricingTable {
    tiers: Vec<Rc<PricingTier>>,
}

impl PricingTable {
    /// Tiers whose button or toggle is missing are left out.
    pub fn bind(document: &Document) -> Self {
        let tiers = TierKey::ALL
            .iter()
            .filter_map(|&key| {
                let tier = PricingTier::lookup(document, key);
                if tier.is_none() {
                    log::debug!("Pricing markup for {} not found, skipping", key);
                }
                tier
            })
            .map(Rc::new)
            .collect();
        Self { tiers }
    }

    pub fn find(&self, key: TierKey) -> Option<&Rc<PricingTier>> {
        self.tiers.iter().find(|tier| tier.key() == key)
    }

    pub fn render_all(&self) {
        for tier in &self.tiers {
            tier.refresh();
        }
    }

    pub fn apply_config(&self, config: &RemoteConfig) {
        for tier in &self.tiers {
            tier.apply_config(config);
        }
    }

    pub fn bind_checkout_buttons(&self) {
        for tier in &self.tiers {
            let handler = tier.clone();
            dom::listen(tier.view.button(), "click", move |event: Event| {
                handler.on_checkout(&event);
            });
        }
    }
}

// Only the add-on checkboxes count; cards may carry `data-tier` as well.
fn tier_key_of(event: &Event) -> Option<TierKey> {
    let checkbox = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
    TierKey::parse(&checkbox.get_attribute("data-tier")?)
}

/// Re-renders on both `change` and `click`: some browsers are unreliable
/// about `change` on checkboxes. The click path waits a tick so `checked`
/// has already flipped.
pub fn bind_toggle_events(document: &Document, table: Rc<PricingTable>) {
    let on_change = table.clone();
    dom::listen(document, "change", move |event: Event| {
        if let Some(tier) = tier_key_of(&event).and_then(|key| on_change.find(key)) {
            tier.refresh();
        }
    });

    dom::listen(document, "click", move |event: Event| {
        if let Some(tier) = tier_key_of(&event).and_then(|key| table.find(key)) {
            let tier = tier.clone();
            Timeout::new(0, move || tier.refresh()).forget();
        }
    });
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::dom::fixture::{document, fire, Fixture};
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::wasm_bindgen_test;

    const PRICING: &str = r#"
        <div class="pricing-card" data-tier="audio">
            <p id="price-audio">$299</p>
            <label><input type="checkbox" data-tier="audio"> Storage</label>
            <a id="checkout-audio" href="/checkout/audio">Buy <span class="checkout-price">$299</span></a>
        </div>
        <div class="pricing-card" data-tier="video">
            <p id="price-video">$499</p>
            <label><input type="checkbox" data-tier="video"> Storage</label>
            <a id="checkout-video" href="/checkout/video">Buy <span class="checkout-price">$499</span></a>
        </div>"#;

    const AUDIO_STORAGE: &str = "https://buy.stripe.com/audio-storage";

    fn bound_table() -> Rc<PricingTable> {
        let document = document();
        let table = Rc::new(PricingTable::bind(&document));
        table.render_all();
        bind_toggle_events(&document, table.clone());
        table.apply_config(&RemoteConfig {
            stripe_audio_link: Some("https://buy.stripe.com/audio".to_string()),
            stripe_audio_storage_link: Some(AUDIO_STORAGE.to_string()),
            ..RemoteConfig::default()
        });
        table
    }

    fn assert_audio_reads(fixture: &Fixture, price: &str, href: &str) {
        assert_eq!(fixture.element("#price-audio").text_content().as_deref(), Some(price));
        assert_eq!(
            fixture.element("#checkout-audio .checkout-price").text_content().as_deref(),
            Some(price)
        );
        assert_eq!(fixture.element("#checkout-audio").get_attribute("href").as_deref(), Some(href));
    }

    // Lets the deferred click render run.
    async fn next_tick() {
        TimeoutFuture::new(20).await;
    }

    #[wasm_bindgen_test]
    fn test_missing_checkbox_skips_only_that_tier() {
        let fixture = Fixture::mount(PRICING);
        fixture.element(r#"input[data-tier="audio"]"#).remove();

        let table = PricingTable::bind(&document());
        table.render_all();

        assert!(table.find(TierKey::Audio).is_none());
        assert!(table.find(TierKey::Video).is_some());
        assert_eq!(fixture.element("#price-audio").text_content().as_deref(), Some("$299"));
    }

    #[wasm_bindgen_test]
    fn test_missing_price_element_still_binds() {
        let fixture = Fixture::mount(PRICING);
        fixture.element("#price-video").remove();

        let table = PricingTable::bind(&document());
        table.render_all();

        assert!(table.find(TierKey::Video).is_some());
        assert_eq!(
            fixture.element("#checkout-video .checkout-price").text_content().as_deref(),
            Some("$499")
        );
    }

    #[wasm_bindgen_test]
    async fn test_change_then_click_renders_storage_total() {
        let fixture = Fixture::mount(PRICING);
        let _table = bound_table();
        assert_audio_reads(&fixture, "$299", "https://buy.stripe.com/audio");

        let checkbox = fixture.input(r#"input[data-tier="audio"]"#);
        checkbox.set_checked(true);
        fire(&checkbox, "change");
        assert_audio_reads(&fixture, "$398", AUDIO_STORAGE);

        fire(&checkbox, "click");
        next_tick().await;
        assert_audio_reads(&fixture, "$398", AUDIO_STORAGE);
    }

    #[wasm_bindgen_test]
    async fn test_click_then_change_renders_storage_total() {
        let fixture = Fixture::mount(PRICING);
        let _table = bound_table();

        let checkbox = fixture.input(r#"input[data-tier="audio"]"#);
        checkbox.set_checked(true);
        fire(&checkbox, "click");
        fire(&checkbox, "change");
        assert_audio_reads(&fixture, "$398", AUDIO_STORAGE);

        next_tick().await;
        assert_audio_reads(&fixture, "$398", AUDIO_STORAGE);
    }

    #[wasm_bindgen_test]
    async fn test_click_alone_renders_after_a_tick() {
        let fixture = Fixture::mount(PRICING);
        let _table = bound_table();

        let checkbox = fixture.input(r#"input[data-tier="audio"]"#);
        checkbox.set_checked(true);
        fire(&checkbox, "click");
        next_tick().await;

        assert_audio_reads(&fixture, "$398", AUDIO_STORAGE);
        assert_eq!(
            fixture.element("#price-video").text_content().as_deref(),
            Some("$499")
        );
    }

    #[wasm_bindgen_test]
    async fn test_clicks_on_a_tier_card_are_ignored() {
        let fixture = Fixture::mount(PRICING);
        let _table = bound_table();
        // Outlast the pulse from the initial render.
        TimeoutFuture::new(400).await;
        let price = fixture.element("#price-audio");
        assert!(!price.class_list().contains("price-updated"));

        fire(&fixture.element(r#".pricing-card[data-tier="audio"]"#), "click");
        fire(&fixture.element(r#".pricing-card[data-tier="audio"]"#), "change");
        next_tick().await;

        assert!(!price.class_list().contains("price-updated"));
        assert_audio_reads(&fixture, "$299", "https://buy.stripe.com/audio");
    }
}
