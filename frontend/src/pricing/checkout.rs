use web_sys::Event;

use crate::pricing::tier::{AddonToggle, Tier};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutDecision {
    /// Cancel the anchor's own navigation and go here instead.
    Redirect(String),
    /// Let the anchor follow its local fallback href.
    FollowDefault,
}

/// Resolves the destination at click time so a toggle flipped after the last
/// render still wins.
pub fn checkout_decision<T: AddonToggle>(tier: &Tier<T>) -> CheckoutDecision {
    let link = tier.compute_link();
    if link.is_external() {
        CheckoutDecision::Redirect(link.href().to_string())
    } else {
        CheckoutDecision::FollowDefault
    }
}

pub fn navigate(decision: CheckoutDecision, event: &Event) {
    let CheckoutDecision::Redirect(url) = decision else {
        return;
    };
    event.prevent_default();
    if let Some(window) = web_sys::window() {
        log::debug!("Redirecting to checkout: {}", url);
        if let Err(e) = window.location().set_href(&url) {
            log::warn!("Checkout redirect failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::tier::tests::tier;
    use crate::pricing::tier::TierKey;

    #[test]
    fn test_fallback_links_follow_default() {
        let (audio, toggle) = tier(TierKey::Audio);
        assert_eq!(checkout_decision(&audio), CheckoutDecision::FollowDefault);
        toggle.set(true);
        assert_eq!(checkout_decision(&audio), CheckoutDecision::FollowDefault);
    }

    #[test]
    fn test_external_link_redirects() {
        let (mut video, _toggle) = tier(TierKey::Video);
        video.apply_links(Some("https://buy.stripe.com/video"), None);

        let decision = checkout_decision(&video);
        assert_eq!(decision, CheckoutDecision::Redirect("https://buy.stripe.com/video".to_string()));
        assert_ne!(decision, CheckoutDecision::Redirect(TierKey::Video.fallback_base_path()));
    }

    #[test]
    fn test_toggle_flip_after_render_is_seen_at_click() {
        let (mut audio, toggle) = tier(TierKey::Audio);
        audio.apply_links(Some("https://pay/audio"), Some("https://pay/audio-storage"));
        assert_eq!(checkout_decision(&audio), CheckoutDecision::Redirect("https://pay/audio".to_string()));

        // No re-render in between.
        toggle.set(true);
        assert_eq!(
            checkout_decision(&audio),
            CheckoutDecision::Redirect("https://pay/audio-storage".to_string())
        );
    }

    #[test]
    fn test_only_addon_configured() {
        let (mut audio, toggle) = tier(TierKey::Audio);
        audio.apply_links(None, Some("https://pay/audio-storage"));
        assert_eq!(checkout_decision(&audio), CheckoutDecision::FollowDefault);
        toggle.set(true);
        assert_eq!(
            checkout_decision(&audio),
            CheckoutDecision::Redirect("https://pay/audio-storage".to_string())
        );
    }
}
