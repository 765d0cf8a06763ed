//! Role guard for dashboard routes

use crate::app::Route;
use crate::client::session;
use tracing::{info, warn};
use voucherify_core::{Access, Role, authorize};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RequireRoleProps {
    /// Roles allowed to see the children
    pub allowed: Vec<Role>,
    pub children: Children,
}

/// Renders its children and sends the user to login when the stored
/// session does not carry one of the allowed roles.
///
/// The check runs after render, once per mount and again whenever the
/// current route changes.
#[function_component(RequireRole)]
pub fn require_role(props: &RequireRoleProps) -> Html {
    let navigator = use_navigator();
    let route = use_route::<Route>();

    {
        let allowed = props.allowed.clone();
        use_effect_with(route, move |route| {
            let token = session().read();
            match authorize(token.as_deref(), &allowed) {
                Access::Allow { identity } => {
                    let now = (js_sys::Date::now() / 1000.0) as i64;
                    if identity.is_expired_at(now) {
                        warn!(
                            role = %identity.role,
                            exp = identity.exp,
                            "Admitting expired access token"
                        );
                    }
                }
                Access::Redirect { to, reason } => {
                    info!(?route, %reason, "Access denied");
                    if let Some(navigator) = navigator {
                        navigator.replace(&Route::from_path(to));
                    }
                }
            }
        });
    }

    html! { <>{ props.children.clone() }</> }
}
