//! Signed-in user's page. Reachable only through the navigation guard, which
//! requires a stored token.

use crate::{
    app_lib::theme::Theme,
    components::{Button, ButtonVariant, Spinner},
    features::auth::{state::use_auth, types::User},
};
use leptos::prelude::*;

#[component]
pub fn MyPage() -> impl IntoView {
    let auth = use_auth();

    // Re-reads the profile; a rejected token signs out and navigates home.
    let refresh = Action::new_local(move |(): &()| {
        let store = auth.store();
        async move { store.refresh_user().await }
    });

    view! {
        <div class="max-w-xl mx-auto space-y-6">
            <h1 class=Theme::HEADING>"My account"</h1>
            <div class=Theme::CARD>
                {move || match auth.user.get() {
                    Some(user) => render_profile(user).into_any(),
                    None => view! {
                        <p class="text-sm text-gray-500 dark:text-gray-400">
                            "Profile not loaded yet."
                        </p>
                    }
                    .into_any(),
                }}
            </div>
            <div class="flex flex-col sm:flex-row gap-3">
                <Button
                    disabled=refresh.pending()
                    on_click=Callback::new(move |()| {
                        refresh.dispatch(());
                    })
                >
                    "Refresh profile"
                </Button>
                <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |()| auth.logout())>
                    "Sign out"
                </Button>
                {move || refresh.pending().get().then_some(view! { <Spinner /> })}
            </div>
        </div>
    }
}

fn render_profile(user: User) -> impl IntoView {
    let status = match user.is_active {
        Some(false) => "Disabled",
        _ => "Active",
    };

    view! {
        <dl class="space-y-2 text-sm">
            <div class="flex justify-between">
                <dt class="text-gray-500">"Username"</dt>
                <dd class="font-medium dark:text-white">{user.username}</dd>
            </div>
            <div class="flex justify-between">
                <dt class="text-gray-500">"Email"</dt>
                <dd class="font-medium dark:text-white">{user.email}</dd>
            </div>
            <div class="flex justify-between">
                <dt class="text-gray-500">"Status"</dt>
                <dd class="font-medium dark:text-white">{status}</dd>
            </div>
        </dl>
    }
}
