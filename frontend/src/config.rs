
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3000"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

pub const CONFIG_PATH: &str = "/api/config";

pub fn config_url() -> String {
    format!("{}{}", get_backend_url(), CONFIG_PATH)
}

// Whole dollars
pub const AUDIO_PRICE: u32 = 299;
pub const VIDEO_PRICE: u32 = 499;
pub const STORAGE_ADDON_PRICE: u32 = 99;

pub const PRICE_PULSE_MS: u32 = 300;

pub const WIDGET_POLL_INTERVAL_MS: u32 = 250;
pub const WIDGET_POLL_MAX_ATTEMPTS: u32 = 40;
pub const WIDGET_MIN_HEIGHT: &str = "660px";
