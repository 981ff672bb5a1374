//! Route table, navigation guard and pages. `paths`, `table` and `guard` are
//! target independent; the pages and the Leptos route tree are browser only.

pub(crate) mod guard;
pub(crate) mod paths;
pub(crate) mod table;

#[cfg(target_arch = "wasm32")]
mod admin;
#[cfg(target_arch = "wasm32")]
mod home;
#[cfg(target_arch = "wasm32")]
mod login;
#[cfg(target_arch = "wasm32")]
mod my;
#[cfg(target_arch = "wasm32")]
mod not_found;
#[cfg(target_arch = "wasm32")]
mod register;
#[cfg(target_arch = "wasm32")]
mod tools;

#[cfg(target_arch = "wasm32")]
pub(crate) use app_routes::AppRoutes;

#[cfg(target_arch = "wasm32")]
mod app_routes {
    use super::{
        admin::{AdminArticlesPage, AdminPage, AdminSetupPage},
        home::HomePage,
        login::{AdminLoginPage, LoginPage},
        my::MyPage,
        not_found::NotFoundPage,
        register::RegisterPage,
        tools::ToolsPage,
    };
    use crate::features::auth::NavigationGuard;
    use leptos::prelude::*;
    use leptos_router::components::{Route, Routes};
    use leptos_router::path;

    /// Maps each route descriptor in `table` to its page, behind the guard.
    #[component]
    pub fn AppRoutes() -> impl IntoView {
        view! {
            <NavigationGuard>
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/tools") view=ToolsPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/my") view=MyPage />
                    <Route path=path!("/admin") view=AdminPage />
                    <Route path=path!("/admin/setup") view=AdminSetupPage />
                    <Route path=path!("/admin/login") view=AdminLoginPage />
                    <Route path=path!("/admin/articles") view=AdminArticlesPage />
                </Routes>
            </NavigationGuard>
        }
    }
}
