//! Identity decoded from an access token
//!
//! Tokens are JWTs issued by the backend. Only the payload segment is read;
//! the signature is never checked here, so an [`Identity`] is a hint for
//! routing and display, not proof of anything.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Role claim carried by the token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Customer,
    /// Any role this client has no special handling for
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Customer => "CUSTOMER",
            Self::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ADMIN" => Self::Admin,
            "CUSTOMER" => Self::Customer,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            role => role.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a token could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    MissingPayload,

    #[error("payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a JSON object with a role claim: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Claims read from the token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,

    #[serde(default, deserialize_with = "lenient_string")]
    pub sub: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,

    /// Expiry, seconds since the epoch
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub exp: Option<i64>,

    /// Issued at, seconds since the epoch
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub iat: Option<i64>,

    /// Remaining claims, kept for display only
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Decode a token, logging and discarding any failure
    pub fn decode(token: &str) -> Option<Self> {
        match Self::try_decode(token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "Failed to decode access token");
                None
            }
        }
    }

    /// Decode a token's payload segment
    pub fn try_decode(token: &str) -> Result<Self, DecodeError> {
        let payload = token
            .split('.')
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or(DecodeError::MissingPayload)?;

        // Accept both base64 alphabets, with or without padding
        let normalized: String = payload
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                c => c,
            })
            .collect();

        let bytes = URL_SAFE_NO_PAD.decode(normalized)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Expiry as a timestamp, if the token carries one
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the `exp` claim lies at or before `now` (seconds since the epoch)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| now >= exp)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::encode_token;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    #[test]
    fn test_decode_admin_token() {
        let token = encode_token(&json!({
            "sub": "64f0c1",
            "email": "admin@example.com",
            "role": "ADMIN",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
        }));

        let identity = Identity::decode(&token).unwrap();
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.email.as_deref(), Some("admin@example.com"));
        assert_eq!(identity.exp, Some(1_700_003_600));
        assert_eq!(
            identity.expires_at().unwrap().timestamp(),
            1_700_003_600
        );
    }

    #[test]
    fn test_decode_keeps_unknown_claims() {
        let token = encode_token(&json!({ "role": "CUSTOMER", "tenant": "acme" }));
        let identity = Identity::decode(&token).unwrap();
        assert_eq!(identity.role, Role::Customer);
        assert_eq!(identity.extra.get("tenant"), Some(&json!("acme")));
    }

    #[test]
    fn test_decode_rejects_malformed_tokens() {
        for token in ["", "no-dots", "header.", "a.%%%.c", "a.bm90LWpzb24.c"] {
            assert!(Identity::decode(token).is_none(), "decoded {token:?}");
        }
    }

    #[test]
    fn test_decode_requires_role() {
        let token = encode_token(&json!({ "sub": "u1" }));
        assert!(matches!(
            Identity::try_decode(&token),
            Err(DecodeError::Claims(_))
        ));
        assert!(Identity::decode(&token).is_none());
    }

    #[test]
    fn test_decode_rejects_non_object_payload() {
        let token = encode_token(&json!(["ADMIN"]));
        assert!(Identity::decode(&token).is_none());
    }

    #[test]
    fn test_decode_accepts_padded_standard_alphabet() {
        let payload = STANDARD.encode(br#"{"role":"ADMIN"}"#);
        assert!(payload.ends_with("=="));

        let token = format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig");
        let identity = Identity::decode(&token).unwrap();
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_numeric_subject_and_float_expiry() {
        let token = encode_token(&json!({ "role": "CUSTOMER", "sub": 42, "exp": 1.7e9 }));
        let identity = Identity::decode(&token).unwrap();
        assert_eq!(identity.sub.as_deref(), Some("42"));
        assert_eq!(identity.exp, Some(1_700_000_000));
    }

    #[test]
    fn test_expiry_check() {
        let token = encode_token(&json!({ "role": "ADMIN", "exp": 100 }));
        let identity = Identity::decode(&token).unwrap();
        assert!(!identity.is_expired_at(99));
        assert!(identity.is_expired_at(100));

        let token = encode_token(&json!({ "role": "ADMIN" }));
        assert!(!Identity::decode(&token).unwrap().is_expired_at(i64::MAX));
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(Role::from("ADMIN"), Role::Admin);
        assert_eq!(Role::from("CUSTOMER"), Role::Customer);
        assert_eq!(Role::from("admin"), Role::Other("admin".into()));
        assert_eq!(
            serde_json::to_value(Role::Other("AUDITOR".into())).unwrap(),
            json!("AUDITOR")
        );
        assert_eq!(serde_json::to_value(Role::Customer).unwrap(), json!("CUSTOMER"));
        assert_eq!("ADMIN".parse::<Role>().unwrap().to_string(), "ADMIN");
    }
}
