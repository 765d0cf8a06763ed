//! Voucherify API gateway
//!
//! Every backend call goes through [`ApiGateway::send`], which attaches the
//! stored bearer token on the way out and clears the session on a 401 on the
//! way back.

pub mod auth;
pub mod campaigns;
pub mod error;
pub mod request;
pub mod vouchers;

pub use error::ClientError;
pub use request::ApiRequest;

use reqwest::{Client, ClientBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use voucherify_core::{ClientConfig, Notification, Notifier, SessionStore, TokenStore};

/// Notification shown once when a request is rejected with 401
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please refresh the page";

/// Shared client for the Voucherify backend
#[derive(Clone)]
pub struct ApiGateway<S, N> {
    client: Client,
    base_url: String,
    session: SessionStore<S>,
    notifier: N,
}

impl<S: TokenStore, N: Notifier> ApiGateway<S, N> {
    /// Create a gateway from client configuration
    pub fn new(config: &ClientConfig, store: S, notifier: N) -> Result<Self, ClientError> {
        let mut builder = ApiGatewayBuilder::new().base_url(&config.base_url);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build(store, notifier)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session the gateway reads tokens from and clears on 401
    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Build the outgoing request, reading the token at dispatch time
    fn prepare(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self.client.request(request.method().clone(), url);

        if let Some(token) = self.session.read() {
            builder = builder
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json");
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        builder
    }

    /// Send a request and decode a successful response body as `T`.
    ///
    /// An empty success body decodes as JSON `null`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.dispatch(request).await?;
        let body = response.text().await?;
        let body = if body.trim().is_empty() {
            "null"
        } else {
            body.as_str()
        };
        Ok(serde_json::from_str(body)?)
    }

    /// Send a request whose success body is not needed.
    ///
    /// Any 2xx counts as success, whatever the body holds.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ClientError> {
        let response = self.dispatch(request).await?;
        let status = response.status();
        // Drain the body so the connection can be reused
        if let Err(e) = response.bytes().await {
            debug!(error = %e, status = status.as_u16(), "Discarding unread response body");
        }
        Ok(())
    }

    /// Send a request and return the response if it succeeded
    async fn dispatch(&self, request: ApiRequest) -> Result<Response, ClientError> {
        debug!(
            method = %request.method(),
            path = request.path(),
            attempt = request.attempt(),
            "Sending request"
        );

        let response = self.prepare(&request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_else(|_| status.to_string());

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.handle_auth_failure(request, message));
        }

        debug!(status = status.as_u16(), path = request.path(), "Request failed");
        Err(ClientError::from_status(status, message))
    }

    /// Clear the session and notify, once per request
    fn handle_auth_failure(&self, request: ApiRequest, message: String) -> ClientError {
        if request.is_auth_failure_handled() {
            debug!(
                path = request.path(),
                attempt = request.attempt(),
                "Authentication failure already handled"
            );
        } else {
            warn!(path = request.path(), "Authentication failed, clearing session");
            self.session.remove();
            self.notifier
                .notify(Notification::error(SESSION_EXPIRED_MESSAGE));
        }

        ClientError::AuthenticationFailed {
            message,
            request: Some(Box::new(request.mark_auth_failure_handled())),
        }
    }
}

/// Builder for ApiGateway
#[derive(Default)]
pub struct ApiGatewayBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiGatewayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout (ignored in the browser)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent (ignored in the browser)
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the gateway around a token store and notifier
    pub fn build<S: TokenStore, N: Notifier>(
        self,
        store: S,
        notifier: N,
    ) -> Result<ApiGateway<S, N>, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = ClientBuilder::new().user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("voucherify/", env!("CARGO_PKG_VERSION")).to_string()),
            );
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = {
            // The browser owns timeouts and the user agent
            let _ = (self.timeout, self.user_agent);
            ClientBuilder::new().build()?
        };

        Ok(ApiGateway {
            client,
            base_url,
            session: SessionStore::new(store),
            notifier,
        })
    }
}
