//! Authentication endpoints

use super::{ApiGateway, ApiRequest, ClientError};
use crate::types::{LoginRequest, LoginResponse, RegisterRequest};
use voucherify_core::{Notifier, TokenStore};

impl<S: TokenStore, N: Notifier> ApiGateway<S, N> {
    /// Exchange credentials for an access token.
    ///
    /// The token is returned, not stored; callers decide whether to keep it.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.into(),
            password: password.into(),
        };
        self.send(ApiRequest::post("/auth/login").json(&body)?).await
    }

    /// Create an account
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        self.send_unit(ApiRequest::post("/auth/register").json(request)?).await
    }
}
