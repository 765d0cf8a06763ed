use crate::auth::RequireRole;
use crate::pages::{AdminDashboard, CustomerDashboard, HomePage, LoginPage, NotFoundPage, RegisterPage};
use crate::toast::ToastContainer;
use voucherify_core::Role;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/auth/login")]
    Login,
    #[at("/auth/register")]
    Register,
    #[at("/dashboard/admin")]
    AdminDashboard,
    #[at("/dashboard/customer")]
    CustomerDashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Route for a path produced by the access policy
    pub fn from_path(path: &str) -> Self {
        Self::recognize(path).unwrap_or(Self::NotFound)
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::AdminDashboard => html! {
            <RequireRole allowed={vec![Role::Admin]}>
                <AdminDashboard />
            </RequireRole>
        },
        Route::CustomerDashboard => html! {
            <RequireRole allowed={vec![Role::Customer]}>
                <CustomerDashboard />
            </RequireRole>
        },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <ToastContainer />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voucherify_core::access::{
        ADMIN_DASHBOARD_PATH, CUSTOMER_DASHBOARD_PATH, HOME_PATH, LOGIN_PATH, REGISTER_PATH,
    };

    #[test]
    fn test_routes_match_policy_paths() {
        assert_eq!(Route::Home.to_path(), HOME_PATH);
        assert_eq!(Route::Login.to_path(), LOGIN_PATH);
        assert_eq!(Route::Register.to_path(), REGISTER_PATH);
        assert_eq!(Route::AdminDashboard.to_path(), ADMIN_DASHBOARD_PATH);
        assert_eq!(Route::CustomerDashboard.to_path(), CUSTOMER_DASHBOARD_PATH);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path(LOGIN_PATH), Route::Login);
        assert_eq!(Route::from_path("/dashboard/admin"), Route::AdminDashboard);
        assert_eq!(Route::from_path("/nowhere"), Route::NotFound);
    }
}
