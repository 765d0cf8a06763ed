use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-50">
            <h1 class="text-2xl font-semibold text-gray-900 mb-4">{"Page not found"}</h1>
            <Link<Route> to={Route::Home} classes={classes!("text-blue-600", "hover:underline")}>
                {"Back to home"}
            </Link<Route>>
        </div>
    }
}
