use crate::{
    components::Spinner,
    features::auth::state::use_auth,
    routes::{
        guard::{self, GuardDecision, PathDecision},
        table,
    },
};
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    hooks::{use_location, use_navigate},
};

/// Runs the navigation guard for every location change and only renders its
/// children once the current path is allowed.
#[component]
pub fn NavigationGuard(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let decision = LocalResource::new(move || {
        let path = location.pathname.get();
        let authenticated = auth.is_authenticated.get();
        let store = auth.store();
        async move {
            let decision = match table::resolve(&path) {
                Some(route) => guard::evaluate(store.api(), route, authenticated).await,
                // Unknown paths outside /admin fall through to the not-found page.
                None => GuardDecision::Allow,
            };
            PathDecision { path, decision }
        }
    });

    Effect::new(move |_| {
        let Some(decided) = decision.get() else {
            return;
        };
        if let Some(target) = decided.redirect_for(&location.pathname.get_untracked()) {
            // UX-only guard; real access control must live on the API.
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || match decision.get() {
        Some(decided) if decided.allows(&location.pathname.get()) => children().into_any(),
        _ => view! {
            <div class="flex justify-center py-8">
                <Spinner />
            </div>
        }
        .into_any(),
    }
}
