//! Routed pages

pub mod admin;
mod customer;
mod home;
mod login;
mod not_found;
mod register;

pub use admin::AdminDashboard;
pub use customer::CustomerDashboard;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;

use crate::app::Route;
use crate::client::session;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::Navigator;

/// Keep a text state in sync with an `<input>`
pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Value of the `<select>` that fired a change event
pub(crate) fn select_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

/// Ask the user to confirm a destructive action
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Drop the session and go to the login page
pub(crate) fn logout_callback(navigator: Option<Navigator>) -> Callback<MouseEvent> {
    Callback::from(move |_| {
        session().remove();
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    })
}
