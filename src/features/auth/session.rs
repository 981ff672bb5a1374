//! Session snapshot and its persisted form: the `token` and `user` storage
//! keys plus the `token` cookie read by the reverse proxy.

use crate::{
    app_lib::{
        AppError,
        storage::{CookieJar, KeyValueStore},
    },
    features::auth::types::User,
};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const COOKIE_NAME: &str = "token";
/// Cookie lifetime in seconds (24h).
pub const COOKIE_MAX_AGE_SECS: u32 = 86_400;

/// Current authentication state. `user` is only ever set alongside a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builds a signed-in session. An empty token yields an anonymous session.
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        let token = token.into();
        if token.is_empty() {
            return Self::anonymous();
        }
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Replaces the profile of a signed-in session; ignored when anonymous.
    pub(crate) fn set_user(&mut self, user: User) {
        if self.is_authenticated() {
            self.user = Some(user);
        }
    }

    /// Reads the persisted session. A corrupt `user` entry, or a user without a
    /// token, is dropped.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        let token = storage.get(TOKEN_KEY).filter(|token| !token.is_empty());
        let Some(token) = token else {
            return Self::anonymous();
        };

        let user = storage
            .get(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable stored user");
                    None
                }
            });

        Self {
            token: Some(token),
            user,
        }
    }

    /// Writes both storage keys; anonymous sessions remove them.
    ///
    /// The previous `user` entry is removed before the token is written, so a
    /// failed write can leave a token without a user but never a token next to
    /// another account's user.
    pub fn persist(&self, storage: &dyn KeyValueStore) -> Result<(), AppError> {
        let Some(token) = self.token() else {
            return Self::clear(storage);
        };
        storage.remove(USER_KEY)?;
        storage.set(TOKEN_KEY, token)?;

        match &self.user {
            Some(user) => {
                let raw = serde_json::to_string(user).map_err(|err| {
                    AppError::Serialization(format!("Failed to encode user: {err}"))
                })?;
                storage.set(USER_KEY, &raw)
            }
            None => storage.remove(USER_KEY),
        }
    }

    pub fn clear(storage: &dyn KeyValueStore) -> Result<(), AppError> {
        let token = storage.remove(TOKEN_KEY);
        let user = storage.remove(USER_KEY);
        token.and(user)
    }

    /// Mirrors the token into the auth cookie, or expires it when anonymous.
    pub fn write_cookie(&self, cookies: &dyn CookieJar) -> Result<(), AppError> {
        match self.token() {
            Some(token) => cookies.write(&auth_cookie(token)?),
            None => cookies.write(&expired_auth_cookie()),
        }
    }
}

/// Builds the auth cookie. Tokens are written verbatim, so anything outside the
/// RFC 6265 cookie-octet set (whitespace, quotes, `,`, `;`, `\`) is rejected
/// rather than producing a cookie the proxy would misread.
pub fn auth_cookie(token: &str) -> Result<String, AppError> {
    if token.is_empty() || !token.bytes().all(is_cookie_octet) {
        return Err(AppError::Storage(
            "Token contains characters that cannot be stored in a cookie.".to_string(),
        ));
    }
    Ok(format!(
        "{COOKIE_NAME}={token}; path=/; max-age={COOKIE_MAX_AGE_SECS}; SameSite=Lax"
    ))
}

fn is_cookie_octet(byte: u8) -> bool {
    matches!(byte, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

pub fn expired_auth_cookie() -> String {
    format!("{COOKIE_NAME}=; path=/; max-age=0")
}
