//! Auth feature module covering the session store, its persistence and the
//! API client. It keeps authentication logic out of the UI. This module
//! handles bearer tokens and passwords and must avoid logging them.
//!
//! Flow Overview: Login posts credentials, stores the returned token and user
//! in `localStorage` and mirrors the token into a cookie. Register only creates
//! the account. On start-up the stored token is validated against
//! `/api/auth/me`; a rejected token signs the user out.

pub(crate) mod client;
#[cfg(target_arch = "wasm32")]
mod guards;
pub(crate) mod session;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
pub(crate) mod store;
#[cfg(test)]
pub(crate) mod testing;
pub(crate) mod types;
pub(crate) mod validation;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::NavigationGuard;
