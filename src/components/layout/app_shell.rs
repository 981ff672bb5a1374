//! Shared layout wrapper with navigation and content container. It centralizes
//! header markup and the mobile menu toggle so routes can focus on content.
//! Navigation remains client-side; backend routes must enforce access control.

use crate::{app_lib::theme::Theme, features::auth::state::use_auth, routes::paths};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let toggle_menu = move |_| {
        set_menu_open.update(|open| *open = !*open);
    };
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let location = use_location();
    let on_login = move || location.pathname.get() == paths::LOGIN;
    let close_menu = move |_| set_menu_open.set(false);

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-gray-200 dark:bg-gray-900">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A
                        href=paths::HOME
                        {..}
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                        on:click=close_menu
                    >
                        <span class="font-semibold whitespace-nowrap dark:text-white">"Quill"</span>
                    </A>
                    <button
                        type="button"
                        class="inline-flex items-center p-2 w-10 h-10 justify-center text-sm text-gray-500 rounded-lg md:hidden hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-gray-200 dark:text-gray-400 dark:hover:bg-gray-700 dark:focus:ring-gray-600"
                        aria-controls="navbar-default"
                        aria-expanded=move || menu_open.get().to_string()
                        on:click=toggle_menu
                    >
                        <span class="sr-only">"Open main menu"</span>
                        <span class="material-symbols-outlined">"menu"</span>
                    </button>
                    <div
                        id="navbar-default"
                        class="w-full md:block md:w-auto"
                        class:hidden=move || !menu_open.get()
                    >
                        <ul class="font-medium flex flex-col p-4 md:p-0 mt-4 border border-gray-100 rounded-lg bg-gray-50 md:flex-row md:space-x-8 rtl:space-x-reverse md:mt-0 md:border-0 md:bg-white dark:bg-gray-800 md:dark:bg-gray-900 dark:border-gray-700">
                            <li>
                                <A href=paths::TOOLS {..} class=Theme::NAV_LINK on:click=close_menu>
                                    "Tools"
                                </A>
                            </li>
                            <Show
                                when=move || is_authenticated.get()
                                fallback=move || {
                                    view! {
                                        <li>
                                            <Show
                                                when=on_login
                                                fallback=move || {
                                                    view! {
                                                        <A href=paths::LOGIN {..} class=Theme::NAV_LINK on:click=close_menu>
                                                            "Sign In"
                                                        </A>
                                                    }
                                                }
                                            >
                                                <A href=paths::REGISTER {..} class=Theme::NAV_LINK on:click=close_menu>
                                                    "Sign Up"
                                                </A>
                                            </Show>
                                        </li>
                                    }
                                }
                            >
                                <li>
                                    <A href=paths::MY {..} class=Theme::NAV_LINK on:click=close_menu>
                                        "My"
                                    </A>
                                </li>
                                <li>
                                    <button
                                        type="button"
                                        class=Theme::NAV_LINK
                                        on:click=move |_| {
                                            set_menu_open.set(false);
                                            auth.logout();
                                        }
                                    >
                                        "Sign Out"
                                    </button>
                                </li>
                            </Show>
                        </ul>
                    </div>
                </div>
            </header>
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6">
                    {children()}
                </div>
            </main>
        </div>
    }
}
