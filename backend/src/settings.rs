use std::path::PathBuf;

use crate::tiers::Tier;

const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Site configuration read from the environment (`.env` is loaded first).
/// Every payment link is optional; a blank value counts as unset.
#[derive(Clone, Debug)]
pub struct SiteSettings {
    pub calendly_url: Option<String>,
    pub stripe_audio_link: Option<String>,
    pub stripe_audio_storage_link: Option<String>,
    pub stripe_video_link: Option<String>,
    pub stripe_video_storage_link: Option<String>,
    pub static_dir: PathBuf,
    pub bind_addr: String,
    pub sentry_dsn: Option<String>,
}

impl SiteSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            calendly_url: get("CALENDLY_URL"),
            stripe_audio_link: get("STRIPE_AUDIO_LINK"),
            stripe_audio_storage_link: get("STRIPE_AUDIO_STORAGE_LINK"),
            stripe_video_link: get("STRIPE_VIDEO_LINK"),
            stripe_video_storage_link: get("STRIPE_VIDEO_STORAGE_LINK"),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            sentry_dsn: get("SENTRY_DSN"),
        }
    }

    pub fn checkout_link(&self, tier: Tier, storage: bool) -> Option<&str> {
        let link = match (tier, storage) {
            (Tier::Audio, false) => &self.stripe_audio_link,
            (Tier::Audio, true) => &self.stripe_audio_storage_link,
            (Tier::Video, false) => &self.stripe_video_link,
            (Tier::Video, true) => &self.stripe_video_storage_link,
        };
        link.as_deref()
    }

    /// Startup report of what the site will fall back on.
    pub fn log_missing(&self) {
        if self.calendly_url.is_none() {
            tracing::warn!("CALENDLY_URL not set, booking widget stays on its placeholder");
        }
        for tier in Tier::ALL {
            for storage in [false, true] {
                if self.checkout_link(tier, storage).is_none() {
                    tracing::warn!(
                        "No payment link for {}{}, checkout falls back to the booking section",
                        tier.as_str(),
                        if storage { " + storage" } else { "" }
                    );
                }
            }
        }
    }
}
