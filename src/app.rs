use crate::components::AppShell;
use crate::features::auth::state::AuthProvider;
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

/// Root component. The auth provider sits inside the router so logout and
/// the navigation guard can redirect.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <AuthProvider>
                <AppShell>
                    <AppRoutes />
                </AppShell>
            </AuthProvider>
        </Router>
    }
}
