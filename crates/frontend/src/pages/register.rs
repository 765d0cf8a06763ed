use super::{bind_input, select_value};
use crate::app::Route;
use crate::client::gateway;
use crate::toast::toast;
use tracing::warn;
use voucherify_core::{Notification, Role};
use voucherify_http::types::RegisterRequest;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const REGISTER_SUCCESS: &str = "Registration successful. Please login.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";

async fn register(request: RegisterRequest) -> Result<(), String> {
    let gateway = gateway().map_err(|e| e.user_message(REGISTER_FAILED))?;
    gateway.register(&request).await.map_err(|e| {
        warn!(error = %e, "Registration failed");
        e.user_message(REGISTER_FAILED)
    })
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let role = use_state(|| Role::Customer);

    let on_role_change = {
        let role = role.clone();
        Callback::from(move |e: Event| role.set(Role::from(select_value(&e))))
    };

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let role = role.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = RegisterRequest {
                email: (*email).clone(),
                password: (*password).clone(),
                role: (*role).clone(),
            };
            let navigator = navigator.clone();

            spawn_local(async move {
                match register(request).await {
                    Ok(()) => {
                        toast(Notification::success(REGISTER_SUCCESS));
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(message) => toast(Notification::error(message)),
                }
            });
        })
    };

    html! {
        <div class="flex items-center justify-center min-h-screen bg-gray-100">
            <form {onsubmit} class="w-full max-w-md p-6 bg-white shadow-lg rounded-lg">
                <h1 class="text-2xl font-bold text-center text-blue-600">{"Register"}</h1>
                <p class="mb-4 text-sm text-center text-gray-600">
                    {"Create your account to access the dashboard."}
                </p>
                <input
                    type="email"
                    placeholder="Email"
                    class="w-full px-4 py-2 mb-4 border rounded-lg"
                    value={(*email).clone()}
                    oninput={bind_input(&email)}
                    required=true
                />
                <input
                    type="password"
                    placeholder="Password"
                    class="w-full px-4 py-2 mb-4 border rounded-lg"
                    value={(*password).clone()}
                    oninput={bind_input(&password)}
                    required=true
                />
                <select class="w-full px-4 py-2 mb-4 border rounded-lg" onchange={on_role_change}>
                    <option value="CUSTOMER" selected={*role == Role::Customer}>{"Customer"}</option>
                    <option value="ADMIN" selected={*role == Role::Admin}>{"Admin"}</option>
                </select>
                <button
                    type="submit"
                    class="w-full px-4 py-2 font-bold text-white bg-blue-600 rounded-lg hover:bg-blue-700"
                >
                    {"Register"}
                </button>
                <p class="mt-4 text-sm text-center text-gray-600">
                    {"Already have an account? "}
                    <Link<Route> to={Route::Login} classes={classes!("font-semibold", "text-blue-600", "hover:underline")}>
                        {"Login"}
                    </Link<Route>>
                </p>
            </form>
        </div>
    }
}
