use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Body of `GET /api/config`. Unset values are left out entirely.
#[derive(Serialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendly_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_audio_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_audio_storage_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_video_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_video_storage_link: Option<String>,
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<PublicConfig> {
    let settings = &state.settings;
    Json(PublicConfig {
        calendly_url: settings.calendly_url.clone(),
        stripe_audio_link: settings.stripe_audio_link.clone(),
        stripe_audio_storage_link: settings.stripe_audio_storage_link.clone(),
        stripe_video_link: settings.stripe_video_link.clone(),
        stripe_video_storage_link: settings.stripe_video_storage_link.clone(),
    })
}
