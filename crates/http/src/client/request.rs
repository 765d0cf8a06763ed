//! Outgoing request descriptions

use super::ClientError;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// A request as the gateway sees it, before any headers are attached.
///
/// Values are immutable; retrying produces a new value with the attempt
/// counter bumped and the auth-failure flag carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    attempt: u32,
    auth_failure_handled: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            attempt: 1,
            auth_failure_handled: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// 1 for the first send
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Whether a 401 for this request already cleared the session
    pub fn is_auth_failure_handled(&self) -> bool {
        self.auth_failure_handled
    }

    /// The next attempt of this request
    pub fn retry(&self) -> Self {
        Self {
            attempt: self.attempt.saturating_add(1),
            ..self.clone()
        }
    }

    pub(crate) fn mark_auth_failure_handled(self) -> Self {
        Self {
            auth_failure_handled: true,
            ..self
        }
    }
}
