//! Frontend configuration

use voucherify_core::ClientConfig;

/// Toast configuration
pub struct ToastConfig;

impl ToastConfig {
    /// How long a toast stays on screen, in milliseconds
    pub const DURATION_MS: u32 = 5_000;
}

/// Client settings for the browser.
///
/// The backend URL is fixed at build time through `VOUCHERIFY_API_URL`.
pub fn client_config() -> ClientConfig {
    let mut config = match option_env!("VOUCHERIFY_API_URL") {
        Some(url) if !url.is_empty() => ClientConfig::with_base_url(url),
        _ => ClientConfig::default(),
    };
    // The browser enforces its own timeouts
    config.timeout_secs = None;
    config
}
