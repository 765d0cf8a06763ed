use super::bind_input;
use crate::app::Route;
use crate::client::gateway;
use crate::toast::toast;
use tracing::warn;
use voucherify_core::{Notification, Role, dashboard_for};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const LOGIN_SUCCESS: &str = "Login successful!";
const INVALID_TOKEN: &str = "Invalid token received.";
const NO_TOKEN: &str = "Login failed. No access token received.";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Log in, store the token and return the role it carries
async fn sign_in(email: String, password: String) -> Result<Role, &'static str> {
    let gateway = gateway().map_err(|e| {
        warn!(error = %e, "Gateway unavailable");
        LOGIN_FAILED
    })?;

    let response = gateway.login(email, password).await.map_err(|e| {
        warn!(error = %e, "Login request failed");
        LOGIN_FAILED
    })?;

    let token = response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(NO_TOKEN)?;

    let session = gateway.session();
    session.save(&token);
    let identity = session.decode(&token).ok_or(INVALID_TOKEN)?;
    Ok(identity.role)
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let loading = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email = (*email).clone();
            let password = (*password).clone();
            let loading = loading.clone();
            let navigator = navigator.clone();

            loading.set(true);
            spawn_local(async move {
                match sign_in(email, password).await {
                    Ok(role) => {
                        toast(Notification::success(LOGIN_SUCCESS));
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::from_path(dashboard_for(&role)));
                        }
                    }
                    Err(message) => toast(Notification::error(message)),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4">
            <div class="max-w-md w-full bg-white rounded-lg shadow-md p-8">
                <h2 class="text-2xl font-bold text-center text-gray-900 mb-6">{"Login"}</h2>
                <form {onsubmit} class="space-y-4">
                    <input
                        type="email"
                        placeholder="Email"
                        class="w-full px-4 py-2 border rounded-lg"
                        value={(*email).clone()}
                        oninput={bind_input(&email)}
                        required=true
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        class="w-full px-4 py-2 border rounded-lg"
                        value={(*password).clone()}
                        oninput={bind_input(&password)}
                        required=true
                    />
                    <button
                        type="submit"
                        class="w-full py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 disabled:opacity-50"
                        disabled={*loading}
                    >
                        {if *loading { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="mt-4 text-center text-sm text-gray-600">
                    {"Don't have an account? "}
                    <Link<Route> to={Route::Register} classes={classes!("text-blue-600", "hover:underline")}>
                        {"Register"}
                    </Link<Route>>
                </p>
            </div>
        </div>
    }
}
