use crate::{
    app_lib::{
        AppError,
        storage::{CookieJar, KeyValueStore, MemoryStore},
    },
    features::auth::{
        client::AuthApi,
        types::{LoginRequest, LoginResponse, RegisterRequest, User},
    },
};
use secrecy::ExposeSecret;
use serde_json::Map;
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    rc::Rc,
};

pub fn user(username: &str) -> User {
    User {
        id: 1,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        is_active: Some(true),
        extra: Map::new(),
    }
}

pub fn rejected(status: u16, message: &str) -> AppError {
    AppError::Http {
        status,
        message: message.to_string(),
    }
}

/// Scripted `AuthApi`. Accounts map username to (password, token); tokens map
/// to profiles for `/me`.
#[derive(Clone, Default)]
pub struct FakeAuthApi {
    accounts: Rc<RefCell<HashMap<String, (String, String)>>>,
    profiles: Rc<RefCell<HashMap<String, User>>>,
    admin: Rc<RefCell<Option<Result<bool, AppError>>>>,
    unreachable: Rc<RefCell<bool>>,
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl FakeAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, username: &str, password: &str, token: &str) -> Self {
        self.accounts.borrow_mut().insert(
            username.to_string(),
            (password.to_string(), token.to_string()),
        );
        self.profiles
            .borrow_mut()
            .insert(token.to_string(), user(username));
        self
    }

    pub fn with_admin(self, result: Result<bool, AppError>) -> Self {
        *self.admin.borrow_mut() = Some(result);
        self
    }

    pub fn set_profile(&self, token: &str, profile: User) {
        self.profiles
            .borrow_mut()
            .insert(token.to_string(), profile);
    }

    pub fn revoke(&self, token: &str) {
        self.profiles.borrow_mut().remove(token);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.borrow_mut() = unreachable;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), AppError> {
        self.calls.borrow_mut().push(call);
        if *self.unreachable.borrow() {
            Err(AppError::unreachable())
        } else {
            Ok(())
        }
    }
}

impl AuthApi for FakeAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        self.record("login")?;
        let accounts = self.accounts.borrow();
        match accounts.get(&request.username) {
            Some((password, token)) if password == request.password.expose_secret() => {
                Ok(LoginResponse {
                    access_token: token.clone(),
                    token_type: Some("bearer".to_string()),
                    user: user(&request.username),
                })
            }
            _ => Err(rejected(401, "Incorrect username or password")),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        self.record("register")?;
        if self.accounts.borrow().contains_key(&request.username) {
            return Err(rejected(400, "Username already registered"));
        }
        let mut created = user(&request.username);
        created.email.clone_from(&request.email);
        Ok(created)
    }

    async fn current_user(&self, token: &str) -> Result<User, AppError> {
        self.record("me")?;
        self.profiles
            .borrow()
            .get(token)
            .cloned()
            .ok_or_else(|| rejected(401, "Could not validate credentials"))
    }

    async fn admin_exists(&self) -> Result<bool, AppError> {
        self.record("admin_check")?;
        self.admin.borrow().clone().unwrap_or(Ok(true))
    }
}

/// Navigator that records every requested path.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    paths: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }

    pub fn as_fn(&self) -> impl Fn(&str) + 'static {
        let paths = Rc::clone(&self.paths);
        move |path: &str| paths.borrow_mut().push(path.to_string())
    }
}

/// Memory-backed store whose writes to selected keys fail, as a full quota would.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Rc<RefCell<HashSet<String>>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes_to(&self, key: &str) {
        self.failing.borrow_mut().insert(key.to_string());
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.failing.borrow().contains(key) {
            return Err(AppError::Storage(format!("quota exceeded writing `{key}`")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.inner.remove(key)
    }
}

/// Cookie jar that rejects every write and counts the attempts.
#[derive(Clone, Default)]
pub struct BrokenCookieJar {
    attempts: Rc<Cell<usize>>,
}

impl BrokenCookieJar {
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl CookieJar for BrokenCookieJar {
    fn write(&self, _cookie: &str) -> Result<(), AppError> {
        self.attempts.set(self.attempts.get() + 1);
        Err(AppError::Storage("cookies disabled".to_string()))
    }
}
