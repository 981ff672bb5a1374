//! Admin pages. Which of them is reachable is decided by the navigation guard
//! from the remote admin-existence check and the session token.

use crate::{
    app_lib::theme::Theme,
    features::auth::state::use_auth,
    routes::{paths, register::RegisterForm},
};
use leptos::prelude::*;
use leptos_router::components::A;

/// Renders the admin dashboard.
#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let username = move || auth.user.get().map(|user| user.username).unwrap_or_default();

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class=Theme::HEADING>"Admin Dashboard"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Signed in as " {username}
                </p>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <A href=paths::ADMIN_ARTICLES {..} class=format!("group {} hover:border-blue-500 transition-all", Theme::CARD)>
                    <h2 class="font-semibold text-gray-900 dark:text-white">"Articles"</h2>
                    <p class="text-sm text-gray-500">"Manage published articles."</p>
                </A>
            </div>
        </div>
    }
}

#[component]
pub fn AdminArticlesPage() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <A href=paths::ADMIN {..} class="text-sm text-blue-700 hover:underline dark:text-blue-500">
                "Back to dashboard"
            </A>
            <h1 class=Theme::HEADING>"Articles"</h1>
            <p class="text-sm text-gray-500 dark:text-gray-400">"No articles to manage yet."</p>
        </div>
    }
}

/// Shown only while no administrator account exists.
#[component]
pub fn AdminSetupPage() -> impl IntoView {
    view! {
        <RegisterForm
            heading="Set up the administrator"
            intro="No administrator account exists yet. Create one, then sign in."
            login_path=paths::ADMIN_LOGIN
        />
    }
}
