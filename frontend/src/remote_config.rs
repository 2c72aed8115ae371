use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

use crate::pricing::tier::{AddonToggle, Tier, TierKey};

/// Overrides served by `/api/config`. Every field is optional and a missing
/// field is a normal answer.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteConfig {
    pub calendly_url: Option<String>,
    pub stripe_audio_link: Option<String>,
    pub stripe_audio_storage_link: Option<String>,
    pub stripe_video_link: Option<String>,
    pub stripe_video_storage_link: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config request failed: {0}")]
    Network(String),
    #[error("config endpoint answered with status {0}")]
    Status(u16),
    #[error("config body could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RemoteConfig {
    pub fn from_json(body: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(body)?)
    }

    /// `(base, storage)` payment links for a tier.
    pub fn links_for(&self, key: TierKey) -> (Option<&str>, Option<&str>) {
        match key {
            TierKey::Audio => (
                self.stripe_audio_link.as_deref(),
                self.stripe_audio_storage_link.as_deref(),
            ),
            TierKey::Video => (
                self.stripe_video_link.as_deref(),
                self.stripe_video_storage_link.as_deref(),
            ),
        }
    }

    pub fn scheduling_url(&self) -> Option<&str> {
        self.calendly_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn apply_to<T: AddonToggle>(&self, tier: &mut Tier<T>) {
        let (base, addon) = self.links_for(tier.key());
        tier.apply_links(base, addon);
    }
}

pub async fn fetch_remote_config(url: &str) -> Result<RemoteConfig, ConfigError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ConfigError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ConfigError::Status(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ConfigError::Network(e.to_string()))?;
    RemoteConfig::from_json(&body)
}

/// Failures are swallowed here: the page keeps its local defaults.
pub fn settle(outcome: Result<RemoteConfig, ConfigError>) -> Option<RemoteConfig> {
    match outcome {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Using local checkout defaults: {}", e);
            None
        }
    }
}
