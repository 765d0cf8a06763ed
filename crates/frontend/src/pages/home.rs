use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-50">
            <h1 class="text-4xl font-bold text-gray-900 mb-8">{"Welcome to Voucherify"}</h1>
            <Link<Route> to={Route::Register} classes={classes!("px-6", "py-3", "bg-blue-600", "text-white", "rounded-lg", "hover:bg-blue-700")}>
                {"Go to Registration"}
            </Link<Route>>
        </div>
    }
}
