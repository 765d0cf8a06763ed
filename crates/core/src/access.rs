//! Client-side access policy for guarded views
//!
//! This only decides where the UI should send the user. The backend must
//! still authorize every request on its own.

use crate::identity::{Identity, Role};
use std::fmt::{self, Display};
use tracing::debug;

/// Landing page
pub const HOME_PATH: &str = "/";
/// Login view every denied navigation is sent to
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const ADMIN_DASHBOARD_PATH: &str = "/dashboard/admin";
pub const CUSTOMER_DASHBOARD_PATH: &str = "/dashboard/customer";

/// Reason a view was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No token stored
    MissingToken,
    /// Token present but its payload could not be read
    Undecodable,
    /// Token role is outside the view's allowed set
    RoleNotAllowed(Role),
}

impl Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "no access token"),
            Self::Undecodable => write!(f, "access token could not be decoded"),
            Self::RoleNotAllowed(role) => write!(f, "role {role} is not allowed here"),
        }
    }
}

/// Outcome of [`authorize`]
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Allow { identity: Identity },
    Redirect { to: &'static str, reason: Denial },
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// Path to navigate to, if the view was denied
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::Allow { .. } => None,
            Self::Redirect { to, .. } => Some(to),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Allow { identity } => Some(identity),
            Self::Redirect { .. } => None,
        }
    }
}

/// Decide whether a session holding `token` may enter a view open to `allowed`.
///
/// Expiry is not checked; a token is judged only by presence and its role claim.
pub fn authorize(token: Option<&str>, allowed: &[Role]) -> Access {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return deny(Denial::MissingToken);
    };

    let Some(identity) = Identity::decode(token) else {
        return deny(Denial::Undecodable);
    };

    if !allowed.contains(&identity.role) {
        return deny(Denial::RoleNotAllowed(identity.role));
    }

    Access::Allow { identity }
}

fn deny(reason: Denial) -> Access {
    debug!(%reason, "Redirecting to login");
    Access::Redirect {
        to: LOGIN_PATH,
        reason,
    }
}

/// Landing view for a freshly logged-in user
pub fn dashboard_for(role: &Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD_PATH,
        _ => CUSTOMER_DASHBOARD_PATH,
    }
}
