//! Landing page. Public and intentionally minimal.

use crate::{app_lib::theme::Theme, features::auth::state::use_auth, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || match auth.user.get() {
        Some(user) => format!("Welcome back, {}.", user.username),
        None => "Welcome.".to_string(),
    };

    view! {
        <div class="space-y-4">
            <h1 class=Theme::HEADING>"Home"</h1>
            <p class="text-gray-500 dark:text-gray-400">{greeting}</p>
            <A href=paths::TOOLS {..} class="text-blue-700 hover:underline dark:text-blue-500">
                "Browse tools"
            </A>
        </div>
    }
}
