use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::tiers::Tier;
use crate::AppState;

/// Where checkout lands while no payment link is configured.
pub const BOOKING_FALLBACK: &str = "/#book";

// These routes are the frontend's local defaults; they forward to Stripe once
// a link is configured.
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(tier): Path<String>,
) -> Result<Redirect, AppError> {
    redirect_for(&state, &tier, false)
}

pub async fn checkout_with_storage(
    State(state): State<Arc<AppState>>,
    Path(tier): Path<String>,
) -> Result<Redirect, AppError> {
    redirect_for(&state, &tier, true)
}

fn redirect_for(state: &AppState, tier: &str, storage: bool) -> Result<Redirect, AppError> {
    let tier = Tier::parse(tier).ok_or_else(|| AppError::UnknownTier(tier.to_string()))?;
    match state.settings.checkout_link(tier, storage) {
        Some(link) => {
            tracing::info!("Checkout for {} (storage: {}) redirected to payment link", tier.as_str(), storage);
            Ok(Redirect::temporary(link))
        }
        None => {
            tracing::info!("No payment link for {} (storage: {}), sending to booking", tier.as_str(), storage);
            Ok(Redirect::temporary(BOOKING_FALLBACK))
        }
    }
}
