use crate::{
    app_lib::{AppError, theme::Theme},
    components::{AlreadySignedInPanel, Button, ErrorAlert, Spinner},
    features::auth::{
        state::use_auth,
        validation::{self, LoginInput},
    },
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{components::A, hooks::use_navigate};
use secrecy::SecretString;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <LoginForm heading="Sign in" success_path=paths::MY />
        <p class="max-w-sm mx-auto mt-6 text-sm text-gray-500 dark:text-gray-400">
            "No account yet? "
            <A href=paths::REGISTER {..} class="text-blue-700 hover:underline dark:text-blue-500">
                "Create one"
            </A>
        </p>
    }
}

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    view! { <LoginForm heading="Administrator sign in" success_path=paths::ADMIN /> }
}

/// Credential form bound to the session store. Navigates to `success_path`
/// once the session is stored.
#[component]
fn LoginForm(heading: &'static str, success_path: &'static str) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        let store = auth.store();
        async move {
            store
                .login(&input.username, SecretString::from(input.password))
                .await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_user) => {
                    set_password.set(String::new());
                    navigate(success_path, Default::default());
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        match validation::login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(input) => {
                login_action.dispatch(input);
            }
            Err(err) => set_error.set(Some(err)),
        }
    };

    let form = move || {
        view! {
            <form class="max-w-sm mx-auto" on:submit=on_submit>
                <h1 class=format!("{} mb-6", Theme::HEADING)>{heading}</h1>
                <div class="mb-5">
                    <label class=Theme::LABEL for="username">
                        "Username"
                    </label>
                    <input
                        id="username"
                        type="text"
                        class=Theme::INPUT
                        autocomplete="username"
                        required
                        prop:value=move || username.get()
                        on:input=move |event| set_username.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
                    <label class=Theme::LABEL for="password">
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class=Theme::INPUT
                        autocomplete="current-password"
                        required
                        prop:value=move || password.get()
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" disabled=login_action.pending()>
                    "Sign in"
                </Button>
                {move || {
                    login_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                <ErrorAlert error=error />
            </form>
        }
    };

    view! {
        <Show
            when=move || auth.is_authenticated.get() && login_action.value().with(|value| value.is_none())
            fallback=form
        >
            <AlreadySignedInPanel continue_to=success_path />
        </Show>
    }
}
