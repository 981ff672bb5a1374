use crate::{
    components::{Button, ButtonVariant},
    features::auth::state::use_auth,
    routes::paths,
};
use leptos::prelude::*;
use leptos_router::components::A;

/// Renders the signed-in state for auth routes (login/register).
#[component]
pub fn AlreadySignedInPanel(#[prop(optional)] continue_to: Option<&'static str>) -> impl IntoView {
    let auth = use_auth();
    let username = Signal::derive(move || {
        auth.user
            .get()
            .map(|user| user.username)
            .unwrap_or_default()
    });
    let continue_to = continue_to.unwrap_or(paths::MY);

    view! {
        <div class="max-w-sm mx-auto text-center space-y-6 py-8">
            <div class="space-y-2">
                <h2 class="text-xl font-bold text-gray-900 dark:text-white">
                    "Already Signed In"
                </h2>
                <p class="text-gray-500 dark:text-gray-400">
                    "You are currently signed in as "
                    <span class="font-medium text-gray-900 dark:text-gray-200">
                        {move || username.get()}
                    </span> "."
                </p>
            </div>
            <div class="flex flex-col gap-3">
                <A
                    href=continue_to
                    {..}
                    class="w-full inline-flex justify-center items-center px-5 py-2.5 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 transition-all shadow-sm"
                >
                    "Continue"
                </A>
                <Button
                    variant=ButtonVariant::Secondary
                    on_click=Callback::new(move |()| auth.logout())
                >
                    "Sign Out"
                </Button>
            </div>
        </div>
    }
}
