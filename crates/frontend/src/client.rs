//! Client configuration and initialization

use crate::auth::WebTokenStore;
use crate::config::client_config;
use crate::toast::ToastNotifier;
use once_cell::sync::Lazy;
use std::sync::Mutex;
use voucherify_core::SessionStore;
pub use voucherify_http::ClientError;
use voucherify_http::ApiGateway;

/// Gateway type used by every page
pub type Gateway = ApiGateway<WebTokenStore, ToastNotifier>;

/// Global gateway instance
static GATEWAY: Lazy<Mutex<Option<Gateway>>> = Lazy::new(|| Mutex::new(None));

/// Get the shared gateway, creating it on first use
pub fn gateway() -> Result<Gateway, ClientError> {
    let mut gateway_lock = GATEWAY
        .lock()
        .map_err(|_| ClientError::Configuration("gateway lock poisoned".into()))?;

    if let Some(gateway) = gateway_lock.as_ref() {
        return Ok(gateway.clone());
    }

    let config = client_config();
    let gateway = ApiGateway::new(
        &config,
        WebTokenStore::new(config.token_key.clone()),
        ToastNotifier,
    )?;
    *gateway_lock = Some(gateway.clone());
    Ok(gateway)
}

/// Session backed by the same slot the gateway reads
pub fn session() -> SessionStore<WebTokenStore> {
    SessionStore::new(WebTokenStore::new(client_config().token_key))
}
