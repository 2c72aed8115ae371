use std::fmt;

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TierKey {
    Audio,
    Video,
}

impl TierKey {
    pub const ALL: [TierKey; 2] = [TierKey::Audio, TierKey::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            TierKey::Audio => "audio",
            TierKey::Video => "video",
        }
    }

    /// Reads the value of a `data-tier` attribute.
    pub fn parse(value: &str) -> Option<TierKey> {
        match value.trim() {
            "audio" => Some(TierKey::Audio),
            "video" => Some(TierKey::Video),
            _ => None,
        }
    }

    pub fn base_price(&self) -> u32 {
        match self {
            TierKey::Audio => config::AUDIO_PRICE,
            TierKey::Video => config::VIDEO_PRICE,
        }
    }

    pub fn checkout_id(&self) -> String {
        format!("checkout-{}", self.as_str())
    }

    pub fn price_id(&self) -> String {
        format!("price-{}", self.as_str())
    }

    pub fn toggle_selector(&self) -> String {
        format!("input[data-tier=\"{}\"]", self.as_str())
    }

    /// Server route used until a payment link is configured.
    pub fn fallback_base_path(&self) -> String {
        format!("{}/checkout/{}", config::get_backend_url(), self.as_str())
    }

    pub fn fallback_addon_path(&self) -> String {
        format!("{}/checkout/{}/storage", config::get_backend_url(), self.as_str())
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a checkout button sends the visitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutLink {
    /// Local route or anchor that is always navigable on its own.
    Fallback(String),
    /// Payment link delivered by the remote config.
    External(String),
}

impl CheckoutLink {
    pub fn href(&self) -> &str {
        match self {
            CheckoutLink::Fallback(path) => path,
            CheckoutLink::External(url) => url,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, CheckoutLink::External(_))
    }
}

/// Read access to the add-on checkbox bound to a tier.
pub trait AddonToggle {
    fn is_enabled(&self) -> bool;
}

pub struct Tier<T> {
    key: TierKey,
    base_price: u32,
    addon_price: u32,
    toggle: T,
    base_link: CheckoutLink,
    addon_link: CheckoutLink,
}

impl<T: AddonToggle> Tier<T> {
    pub fn new(key: TierKey, base_price: u32, addon_price: u32, toggle: T) -> Self {
        Self {
            key,
            base_price,
            addon_price,
            toggle,
            base_link: CheckoutLink::Fallback(key.fallback_base_path()),
            addon_link: CheckoutLink::Fallback(key.fallback_addon_path()),
        }
    }

    /// Tier with the site-wide prices for `key`.
    pub fn with_default_prices(key: TierKey, toggle: T) -> Self {
        Self::new(key, key.base_price(), config::STORAGE_ADDON_PRICE, toggle)
    }

    pub fn key(&self) -> TierKey {
        self.key
    }

    pub fn addon_enabled(&self) -> bool {
        self.toggle.is_enabled()
    }

    pub fn compute_total(&self) -> u32 {
        if self.addon_enabled() {
            self.base_price + self.addon_price
        } else {
            self.base_price
        }
    }

    pub fn compute_link(&self) -> &CheckoutLink {
        if self.addon_enabled() {
            &self.addon_link
        } else {
            &self.base_link
        }
    }

    #[cfg(test)]
    pub fn base_link(&self) -> &CheckoutLink {
        &self.base_link
    }

    #[cfg(test)]
    pub fn addon_link(&self) -> &CheckoutLink {
        &self.addon_link
    }

    /// Overrides links with the non-empty values given. Absent or blank values
    /// keep whatever link is already in place.
    pub fn apply_links(&mut self, base: Option<&str>, addon: Option<&str>) {
        if let Some(url) = non_empty(base) {
            self.base_link = CheckoutLink::External(url.to_string());
        }
        if let Some(url) = non_empty(addon) {
            self.addon_link = CheckoutLink::External(url.to_string());
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn format_price(total: u32) -> String {
    format!("${}", total)
}
