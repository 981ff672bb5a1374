//! Account registration. Registering never signs the user in; on success the
//! form points to the matching sign-in page.

use crate::{
    app_lib::{AppError, theme::Theme},
    components::{Alert, AlertKind, Button, ErrorAlert, Spinner},
    features::auth::{
        state::use_auth,
        validation::{self, RegistrationInput},
    },
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::components::A;
use secrecy::SecretString;

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! { <RegisterForm heading="Create an account" login_path=paths::LOGIN /> }
}

/// Registration form bound to the session store.
#[component]
pub fn RegisterForm(
    heading: &'static str,
    login_path: &'static str,
    #[prop(optional)] intro: Option<&'static str>,
) -> impl IntoView {
    let auth = use_auth();
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);
    let (created, set_created) = signal::<Option<String>>(None);

    let register_action = Action::new_local(move |input: &RegistrationInput| {
        let input = input.clone();
        let store = auth.store();
        async move {
            store
                .register(
                    &input.username,
                    &input.email,
                    SecretString::from(input.password),
                )
                .await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(user) => {
                    set_password.set(String::new());
                    set_confirm_password.set(String::new());
                    set_created.set(Some(user.username));
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_created.set(None);

        match validation::registration_input(
            &username.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm_password.get_untracked(),
        ) {
            Ok(input) => {
                register_action.dispatch(input);
            }
            Err(err) => set_error.set(Some(err)),
        }
    };

    view! {
        <form class="max-w-sm mx-auto" on:submit=on_submit>
            <h1 class=format!("{} mb-2", Theme::HEADING)>{heading}</h1>
            {intro.map(|text| view! { <p class="mb-6 text-sm text-gray-500 dark:text-gray-400">{text}</p> })}
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
                    on:input=move |event| set_username.set(event_target_value(&event))
                />
            </div>
            <div class="mb-5">
                <label class=Theme::LABEL for="email">
                    "Email"
                </label>
                <input
                    id="email"
                    type="email"
                    class=Theme::INPUT
                    autocomplete="email"
                    placeholder="name@example.com"
                    required
                    on:input=move |event| set_email.set(event_target_value(&event))
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
                    autocomplete="new-password"
                    required
                    prop:value=move || password.get()
                    on:input=move |event| set_password.set(event_target_value(&event))
                />
            </div>
            <div class="mb-5">
                <label class=Theme::LABEL for="confirm-password">
                    "Confirm password"
                </label>
                <input
                    id="confirm-password"
                    type="password"
                    class=Theme::INPUT
                    autocomplete="new-password"
                    required
                    prop:value=move || confirm_password.get()
                    on:input=move |event| set_confirm_password.set(event_target_value(&event))
                />
            </div>
            <Button button_type="submit" disabled=register_action.pending()>
                "Register"
            </Button>
            {move || {
                register_action
                    .pending()
                    .get()
                    .then_some(view! { <div class="mt-4"><Spinner /></div> })
            }}
            <ErrorAlert error=error />
            {move || {
                created
                    .get()
                    .map(|name| {
                        view! {
                            <div class="mt-4 space-y-3">
                                <Alert
                                    kind=AlertKind::Success
                                    message=format!("Account {name} created. Sign in to continue.")
                                />
                                <A href=login_path {..} class="text-sm text-blue-700 hover:underline dark:text-blue-500">
                                    "Go to sign in"
                                </A>
                            </div>
                        }
                    })
            }}
        </form>
    }
}
