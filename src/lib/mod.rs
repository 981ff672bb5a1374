//! Shared frontend utilities for API access, configuration, errors, logging,
//! browser persistence and build metadata.
//!
//! ## Session Persistence
//!
//! 1. **Login:** The client POSTs credentials to `/api/auth/login-json` and
//!    receives `{access_token, user}`.
//! 2. **Persist:** The token and user are written to `localStorage` (`token`,
//!    `user`) and the token is mirrored into a `token` cookie so the reverse
//!    proxy can validate requests with an auth subrequest.
//! 3. **Validate:** On start-up the stored token is checked against
//!    `/api/auth/me`; a rejected token clears everything.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids duplicated
//! logic in routes and features. Callers must avoid logging token material.

pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod logging;
pub(crate) mod storage;
#[cfg(target_arch = "wasm32")]
pub(crate) mod theme;

pub(crate) use errors::AppError;
