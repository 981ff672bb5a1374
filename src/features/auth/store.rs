//! Session store: the single owner of the token/user pair. It talks to the API,
//! keeps storage and the auth cookie in step with memory, and notifies
//! subscribers after every change. Borrows of the session never span an
//! `.await`, so a subscriber or a concurrent call can always read it.

use crate::{
    app_lib::{
        AppError,
        storage::{CookieJar, KeyValueStore},
    },
    features::auth::{
        client::AuthApi,
        session::Session,
        types::{LoginRequest, RegisterRequest, User},
    },
    routes::paths,
};
use secrecy::SecretString;
use std::cell::RefCell;
use tracing::{info, warn};

/// Client-side navigation used by `logout`.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, path: &str) {
        self(path);
    }
}

type Listener = Box<dyn Fn(&Session)>;

pub struct SessionStore<A> {
    api: A,
    storage: Box<dyn KeyValueStore>,
    cookies: Box<dyn CookieJar>,
    navigator: Box<dyn Navigator>,
    session: RefCell<Session>,
    listeners: RefCell<Vec<Listener>>,
}

impl<A: AuthApi> SessionStore<A> {
    /// Creates the store and restores any persisted session.
    pub fn new(
        api: A,
        storage: Box<dyn KeyValueStore>,
        cookies: Box<dyn CookieJar>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let session = Session::load(storage.as_ref());
        Self {
            api,
            storage,
            cookies,
            navigator,
            session: RefCell::new(session),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token().map(str::to_string)
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Registers a callback invoked with the new session after each change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Signs in and persists the session. On error the previous session is kept.
    pub async fn login(&self, username: &str, password: SecretString) -> Result<User, AppError> {
        let request = LoginRequest {
            username: username.to_string(),
            password,
        };
        let response = self.api.login(&request).await?;
        let user = response.user.clone();
        let session = Session::authenticated(response.access_token, response.user);
        if !session.is_authenticated() {
            return Err(AppError::Parse(
                "Login response did not include a token.".to_string(),
            ));
        }

        if let Err(err) = session.persist(self.storage.as_ref()) {
            warn!(error = %err, "failed to persist session");
        }
        if let Err(err) = session.write_cookie(self.cookies.as_ref()) {
            warn!(error = %err, "failed to write auth cookie");
        }
        self.replace(session);
        info!(username = %user.username, "signed in");
        Ok(user)
    }

    /// Creates an account. The session is not touched; signing in is a separate step.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: SecretString,
    ) -> Result<User, AppError> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password,
        };
        let user = self.api.register(&request).await?;
        info!(username = %user.username, "account registered");
        Ok(user)
    }

    /// Clears memory, storage and cookie, then navigates home.
    pub fn logout(&self) {
        if let Err(err) = Session::clear(self.storage.as_ref()) {
            warn!(error = %err, "failed to clear stored session");
        }
        if let Err(err) = Session::anonymous().write_cookie(self.cookies.as_ref()) {
            warn!(error = %err, "failed to expire auth cookie");
        }
        let was_authenticated = self.is_authenticated();
        self.replace(Session::anonymous());
        if was_authenticated {
            info!("signed out");
        }
        self.navigator.navigate(paths::HOME);
    }

    /// Re-reads the profile for the current token.
    ///
    /// Returns `None` without a request when signed out. Any failure is treated
    /// as a stale session and logs out.
    pub async fn refresh_user(&self) -> Option<User> {
        let token = self.token()?;

        match self.api.current_user(&token).await {
            Ok(user) => {
                if self.token().as_deref() != Some(token.as_str()) {
                    // Signed out or replaced while the request was in flight.
                    return None;
                }
                let mut session = self.session();
                session.set_user(user.clone());
                if let Err(err) = session.persist(self.storage.as_ref()) {
                    warn!(error = %err, "failed to persist refreshed user");
                }
                self.replace(session);
                Some(user)
            }
            Err(err) => {
                if self.token().as_deref() != Some(token.as_str()) {
                    return None;
                }
                if err.is_unauthorized() {
                    warn!("stored session was rejected, signing out");
                } else {
                    warn!(error = %err, "failed to refresh user, signing out");
                }
                self.logout();
                None
            }
        }
    }

    fn replace(&self, session: Session) {
        *self.session.borrow_mut() = session.clone();
        for listener in self.listeners.borrow().iter() {
            listener(&session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::storage::{MemoryCookieJar, MemoryStore};
    use crate::features::auth::session::{COOKIE_NAME, TOKEN_KEY, USER_KEY};
    use crate::features::auth::testing::{
        BrokenCookieJar, FakeAuthApi, FlakyStore, RecordingNavigator, user,
    };
    use crate::features::auth::types::LoginResponse;
    use std::rc::Rc;

    /// Wraps `FakeAuthApi` and runs a hook once while `/me` is in flight,
    /// after the request left and before its reply is handled.
    #[derive(Clone)]
    struct InterruptingApi {
        inner: FakeAuthApi,
        before_reply: Rc<RefCell<Option<Box<dyn Fn()>>>>,
    }

    impl InterruptingApi {
        fn new(inner: FakeAuthApi) -> Self {
            Self {
                inner,
                before_reply: Rc::default(),
            }
        }

        fn interrupt_with(&self, hook: impl Fn() + 'static) {
            let hook: Box<dyn Fn()> = Box::new(hook);
            *self.before_reply.borrow_mut() = Some(hook);
        }
    }

    impl AuthApi for InterruptingApi {
        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
            self.inner.login(request).await
        }

        async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
            self.inner.register(request).await
        }

        async fn current_user(&self, token: &str) -> Result<User, AppError> {
            let hook = self.before_reply.borrow_mut().take();
            if let Some(hook) = hook {
                hook();
            }
            self.inner.current_user(token).await
        }

        async fn admin_exists(&self) -> Result<bool, AppError> {
            self.inner.admin_exists().await
        }
    }

    /// Store over `InterruptingApi` whose hook signs out mid-refresh.
    fn store_signing_out_mid_refresh(
        api: &InterruptingApi,
        storage: &MemoryStore,
        navigator: &RecordingNavigator,
    ) -> Rc<SessionStore<InterruptingApi>> {
        let store = Rc::new(SessionStore::new(
            api.clone(),
            Box::new(storage.clone()),
            Box::new(MemoryCookieJar::new()),
            Box::new(navigator.as_fn()),
        ));
        let weak = Rc::downgrade(&store);
        api.interrupt_with(move || {
            if let Some(store) = weak.upgrade() {
                store.logout();
            }
        });
        store
    }

    struct Harness {
        api: FakeAuthApi,
        storage: MemoryStore,
        cookies: MemoryCookieJar,
        navigator: RecordingNavigator,
        store: SessionStore<FakeAuthApi>,
    }

    fn harness(api: FakeAuthApi, storage: MemoryStore) -> Harness {
        let cookies = MemoryCookieJar::new();
        let navigator = RecordingNavigator::default();
        let store = SessionStore::new(
            api.clone(),
            Box::new(storage.clone()),
            Box::new(cookies.clone()),
            Box::new(navigator.as_fn()),
        );
        Harness {
            api,
            storage,
            cookies,
            navigator,
            store,
        }
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn stored_session(token: &str, username: &str) -> MemoryStore {
        let storage = MemoryStore::new();
        Session::authenticated(token, user(username))
            .persist(&storage)
            .unwrap();
        storage
    }

    #[test]
    fn new_restores_persisted_session() {
        let h = harness(FakeAuthApi::new(), stored_session("jwt-1", "ada"));
        assert!(h.store.is_authenticated());
        assert_eq!(h.store.token().as_deref(), Some("jwt-1"));
        assert_eq!(h.store.current_user().map(|u| u.username), Some("ada".to_string()));
    }

    #[tokio::test]
    async fn login_with_valid_credentials_persists_everywhere() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        let h = harness(api, MemoryStore::new());

        let user = h.store.login("ada", secret("pw")).await.unwrap();

        assert_eq!(user.username, "ada");
        assert_eq!(h.store.token().as_deref(), Some("jwt-ada"));
        assert_eq!(h.store.current_user(), Some(user.clone()));
        assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("jwt-ada"));
        let stored: User = serde_json::from_str(&h.storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, user);
        assert_eq!(h.cookies.value(COOKIE_NAME).as_deref(), Some("jwt-ada"));
        assert!(h.navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn login_with_invalid_credentials_keeps_prior_session() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        let h = harness(api, stored_session("jwt-old", "grace"));
        let before = h.store.session();

        let err = h.store.login("ada", secret("wrong")).await.unwrap_err();

        assert_eq!(err.to_string(), "Incorrect username or password");
        assert_eq!(h.store.session(), before);
        assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("jwt-old"));
        assert_eq!(h.cookies.value(COOKIE_NAME), None);
    }

    #[tokio::test]
    async fn login_when_server_is_unreachable_returns_network_error() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        api.set_unreachable(true);
        let h = harness(api, MemoryStore::new());

        let err = h.store.login("ada", secret("pw")).await.unwrap_err();

        assert_eq!(err, AppError::unreachable());
        assert!(!h.store.is_authenticated());
        assert_eq!(h.storage.get(TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn register_does_not_touch_the_session() {
        let h = harness(FakeAuthApi::new(), MemoryStore::new());

        let created = h
            .store
            .register("ada", "ada@quill.dev", secret("pw"))
            .await
            .unwrap();

        assert_eq!(created.username, "ada");
        assert_eq!(created.email, "ada@quill.dev");
        assert!(!h.store.is_authenticated());
        assert_eq!(h.storage.get(TOKEN_KEY), None);
        assert_eq!(h.cookies.value(COOKIE_NAME), None);
    }

    #[tokio::test]
    async fn register_surfaces_api_rejection() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        let h = harness(api, MemoryStore::new());

        let err = h
            .store
            .register("ada", "ada@quill.dev", secret("pw"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Username already registered");
    }

    #[tokio::test]
    async fn logout_clears_everything_and_navigates_home() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        let h = harness(api, MemoryStore::new());
        h.store.login("ada", secret("pw")).await.unwrap();

        h.store.logout();

        assert_eq!(h.store.session(), Session::anonymous());
        assert_eq!(h.storage.get(TOKEN_KEY), None);
        assert_eq!(h.storage.get(USER_KEY), None);
        assert_eq!(h.cookies.value(COOKIE_NAME), None);
        assert_eq!(h.navigator.paths(), vec![paths::HOME.to_string()]);
    }

    #[test]
    fn logout_when_signed_out_still_navigates_home() {
        let h = harness(FakeAuthApi::new(), MemoryStore::new());
        h.store.logout();
        assert!(!h.store.is_authenticated());
        assert_eq!(h.navigator.paths(), vec![paths::HOME.to_string()]);
    }

    #[tokio::test]
    async fn refresh_without_token_is_a_noop() {
        let h = harness(FakeAuthApi::new(), MemoryStore::new());

        assert_eq!(h.store.refresh_user().await, None);
        assert!(h.api.calls().is_empty());
        assert!(h.navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn refresh_with_rejected_token_logs_out() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-stale");
        api.revoke("jwt-stale");
        let h = harness(api, stored_session("jwt-stale", "ada"));
        h.cookies
            .write(&crate::features::auth::session::auth_cookie("jwt-stale").unwrap())
            .unwrap();

        assert_eq!(h.store.refresh_user().await, None);

        assert_eq!(h.api.calls(), vec!["me"]);
        assert!(!h.store.is_authenticated());
        assert_eq!(h.storage.get(TOKEN_KEY), None);
        assert_eq!(h.storage.get(USER_KEY), None);
        assert_eq!(h.cookies.value(COOKIE_NAME), None);
        assert_eq!(h.navigator.paths(), vec![paths::HOME.to_string()]);
    }

    #[tokio::test]
    async fn refresh_with_network_failure_also_logs_out() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        api.set_unreachable(true);
        let h = harness(api, stored_session("jwt-ada", "ada"));

        assert_eq!(h.store.refresh_user().await, None);
        assert!(!h.store.is_authenticated());
    }

    #[tokio::test]
    async fn refresh_with_valid_token_updates_user() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        let mut renamed = user("ada");
        renamed.email = "ada@lovelace.dev".to_string();
        api.set_profile("jwt-ada", renamed.clone());
        let h = harness(api, stored_session("jwt-ada", "ada"));

        assert_eq!(h.store.refresh_user().await, Some(renamed.clone()));

        assert_eq!(h.store.current_user(), Some(renamed.clone()));
        let stored: User = serde_json::from_str(&h.storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, renamed);
        assert_eq!(h.store.token().as_deref(), Some("jwt-ada"));
        assert!(h.navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn refresh_reply_after_logout_is_discarded() {
        let inner = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        let api = InterruptingApi::new(inner.clone());
        let storage = stored_session("jwt-ada", "ada");
        let navigator = RecordingNavigator::default();
        let store = store_signing_out_mid_refresh(&api, &storage, &navigator);

        assert_eq!(store.refresh_user().await, None);

        assert_eq!(inner.calls(), vec!["me"]);
        assert_eq!(store.session(), Session::anonymous());
        // The late profile must not be written back after the logout.
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
        assert_eq!(navigator.paths(), vec![paths::HOME.to_string()]);
    }

    #[tokio::test]
    async fn refresh_failure_after_logout_does_not_log_out_again() {
        let inner = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        inner.revoke("jwt-ada");
        let api = InterruptingApi::new(inner.clone());
        let storage = stored_session("jwt-ada", "ada");
        let navigator = RecordingNavigator::default();
        let store = store_signing_out_mid_refresh(&api, &storage, &navigator);
        let notified = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&notified);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        assert_eq!(store.refresh_user().await, None);

        assert!(!store.is_authenticated());
        // Only the logout that happened mid-flight navigates and notifies.
        assert_eq!(navigator.paths(), vec![paths::HOME.to_string()]);
        assert_eq!(*notified.borrow(), 1);
    }

    #[tokio::test]
    async fn login_survives_storage_and_cookie_failures() {
        let storage = FlakyStore::new();
        storage.fail_writes_to(TOKEN_KEY);
        storage.fail_writes_to(USER_KEY);
        let cookies = BrokenCookieJar::default();
        let store = SessionStore::new(
            FakeAuthApi::new().with_account("ada", "pw", "jwt-ada"),
            Box::new(storage.clone()),
            Box::new(cookies.clone()),
            Box::new(|_: &str| {}),
        );

        let user = store.login("ada", secret("pw")).await.unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("jwt-ada"));
        assert_eq!(store.current_user(), Some(user));
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(cookies.attempts(), 1);
    }

    #[tokio::test]
    async fn login_with_failing_user_write_drops_previous_user() {
        let storage = FlakyStore::new();
        Session::authenticated("jwt-grace", user("grace"))
            .persist(&storage)
            .unwrap();
        storage.fail_writes_to(USER_KEY);
        let store = SessionStore::new(
            FakeAuthApi::new().with_account("ada", "pw", "jwt-ada"),
            Box::new(storage.clone()),
            Box::new(MemoryCookieJar::new()),
            Box::new(|_: &str| {}),
        );

        store.login("ada", secret("pw")).await.unwrap();

        let reloaded = Session::load(&storage);
        assert_eq!(reloaded.token(), Some("jwt-ada"));
        assert_eq!(reloaded.user(), None);
    }

    #[test]
    fn logout_with_broken_cookies_still_clears_the_session() {
        let storage = stored_session("jwt-ada", "ada");
        let navigator = RecordingNavigator::default();
        let store = SessionStore::new(
            FakeAuthApi::new(),
            Box::new(storage.clone()),
            Box::new(BrokenCookieJar::default()),
            Box::new(navigator.as_fn()),
        );

        store.logout();

        assert_eq!(store.session(), Session::anonymous());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(navigator.paths(), vec![paths::HOME.to_string()]);
    }

    #[tokio::test]
    async fn subscribers_see_every_change() {
        let api = FakeAuthApi::new().with_account("ada", "pw", "jwt-ada");
        let h = harness(api, MemoryStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        h.store
            .subscribe(move |session| sink.borrow_mut().push(session.is_authenticated()));

        h.store.login("ada", secret("pw")).await.unwrap();
        h.store.refresh_user().await.unwrap();
        h.store.logout();

        assert_eq!(*seen.borrow(), vec![true, true, false]);
    }

    #[tokio::test]
    async fn failed_login_does_not_notify() {
        let h = harness(FakeAuthApi::new(), MemoryStore::new());
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        h.store.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(h.store.login("nobody", secret("pw")).await.is_err());
        assert_eq!(*count.borrow(), 0);
    }
}
