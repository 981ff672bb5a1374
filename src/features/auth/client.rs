//! Client wrappers for the auth API endpoints. The `AuthApi` trait is the seam
//! between the session store / navigation guard and the network, so both can be
//! exercised without a browser.

use crate::{
    app_lib::AppError,
    features::auth::types::{LoginRequest, LoginResponse, RegisterRequest, User},
};

pub const LOGIN_PATH: &str = "/api/auth/login-json";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const ME_PATH: &str = "/api/auth/me";
pub const ADMIN_CHECK_PATH: &str = "/api/admin/check";

/// Fallback messages used when an error response carries no usable detail.
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const PROFILE_FAILED: &str = "Failed to fetch user profile";
pub const ADMIN_CHECK_FAILED: &str = "Failed to check administrator status";

/// Remote auth operations consumed by the session store and the guard.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Exchanges credentials for a token and profile.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError>;

    /// Creates an account; does not sign in.
    async fn register(&self, request: &RegisterRequest) -> Result<User, AppError>;

    /// Fetches the profile for a bearer token.
    async fn current_user(&self, token: &str) -> Result<User, AppError>;

    /// Reports whether an administrator account exists.
    async fn admin_exists(&self) -> Result<bool, AppError>;
}

/// `AuthApi` over `gloo-net` against the configured API base URL.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    base_url: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        crate::app_lib::api::post_json(&self.base_url, LOGIN_PATH, request, LOGIN_FAILED).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        crate::app_lib::api::post_json(&self.base_url, REGISTER_PATH, request, REGISTER_FAILED)
            .await
    }

    async fn current_user(&self, token: &str) -> Result<User, AppError> {
        crate::app_lib::api::get_json(&self.base_url, ME_PATH, Some(token), PROFILE_FAILED).await
    }

    async fn admin_exists(&self) -> Result<bool, AppError> {
        let response: crate::features::auth::types::AdminCheckResponse =
            crate::app_lib::api::get_json(&self.base_url, ADMIN_CHECK_PATH, None, ADMIN_CHECK_FAILED)
                .await?;
        Ok(response.exists)
    }
}
