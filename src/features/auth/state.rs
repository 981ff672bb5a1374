//! Auth session context for the frontend. The provider builds the single
//! `SessionStore`, mirrors its session into a signal through the store's
//! subscription channel, and validates any stored token once on mount.

use crate::{
    app_lib::{
        config::AppConfig,
        storage::{
            BrowserStorage, CookieJar, DocumentCookieJar, KeyValueStore, MemoryCookieJar,
            MemoryStore,
        },
    },
    features::auth::{client::HttpAuthApi, session::Session, store::SessionStore, types::User},
};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;
use std::rc::Rc;
use tracing::warn;

pub type AppSessionStore = SessionStore<HttpAuthApi>;

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub session: RwSignal<Session>,
    pub is_authenticated: Signal<bool>,
    pub user: Signal<Option<User>>,
    store: StoredValue<Rc<AppSessionStore>, LocalStorage>,
}

impl AuthContext {
    /// Builds a context around the store and subscribes to its changes.
    fn new(store: Rc<AppSessionStore>) -> Self {
        let session = RwSignal::new(store.session());
        let is_authenticated = Signal::derive(move || session.with(Session::is_authenticated));
        let user = Signal::derive(move || session.with(|session| session.user().cloned()));
        store.subscribe(move |next| session.set(next.clone()));

        Self {
            session,
            is_authenticated,
            user,
            store: StoredValue::new_local(store),
        }
    }

    /// Returns a handle to the store for async operations.
    pub fn store(&self) -> Rc<AppSessionStore> {
        self.store.get_value()
    }

    pub fn logout(&self) {
        self.store.with_value(|store| store.logout());
    }
}

/// Provides auth context and validates the stored session once on mount.
/// Must be rendered inside the `Router` so logout can navigate.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = AppConfig::load();
    let navigate = use_navigate();

    let storage: Box<dyn KeyValueStore> = match BrowserStorage::local() {
        Some(storage) => Box::new(storage),
        None => {
            warn!("local storage unavailable, session will not survive a reload");
            Box::new(MemoryStore::new())
        }
    };
    let cookies: Box<dyn CookieJar> = match DocumentCookieJar::current() {
        Some(jar) => Box::new(jar),
        None => {
            warn!("document cookies unavailable, proxy authentication will fail");
            Box::new(MemoryCookieJar::new())
        }
    };

    let store = Rc::new(SessionStore::new(
        HttpAuthApi::new(config.api_base_url),
        storage,
        cookies,
        Box::new(move |path: &str| navigate(path, Default::default())),
    ));
    provide_context(AuthContext::new(Rc::clone(&store)));

    spawn_local(async move {
        let _ = store.refresh_user().await;
    });

    view! { {children()} }
}

/// Returns the auth context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
