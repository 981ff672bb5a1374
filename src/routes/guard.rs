//! Navigation policy evaluated before a route renders. `decide` is the pure
//! decision table; `evaluate` performs the admin-existence check for
//! admin-scoped targets and feeds the result in. The check is never cached.
//! This is a UX guard only; the API must enforce access itself.

use super::{paths, table::RouteDescriptor};
use crate::features::auth::client::AuthApi;
use tracing::{debug, warn};

/// Result of the remote admin-existence check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminStatus {
    Exists,
    Missing,
    /// The check failed (network, HTTP or decode error).
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// A decision tagged with the path it was computed for. Evaluations can finish
/// after the user has navigated elsewhere; such results are stale and must be
/// neither rendered nor followed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathDecision {
    pub path: String,
    pub decision: GuardDecision,
}

impl PathDecision {
    /// Redirect target to follow while `current` is still the evaluated path.
    pub fn redirect_for(&self, current: &str) -> Option<&'static str> {
        match self.decision {
            GuardDecision::Redirect(target) if self.path == current => Some(target),
            _ => None,
        }
    }

    /// Whether the page at `current` may render.
    pub fn allows(&self, current: &str) -> bool {
        self.decision == GuardDecision::Allow && self.path == current
    }
}

/// Applies the redirect policy. `admin` is `None` for routes outside `/admin`.
pub fn decide(
    route: &RouteDescriptor,
    admin: Option<AdminStatus>,
    authenticated: bool,
) -> GuardDecision {
    let admin_scoped = route.is_admin_scoped();
    let is_setup = route.path == paths::ADMIN_SETUP;

    if admin_scoped {
        match admin {
            Some(AdminStatus::Missing) if !is_setup => {
                return GuardDecision::Redirect(paths::ADMIN_SETUP);
            }
            Some(AdminStatus::Exists) if is_setup => {
                return GuardDecision::Redirect(paths::ADMIN_LOGIN);
            }
            Some(AdminStatus::Unknown) if route.requires_auth && !is_setup => {
                return GuardDecision::Redirect(paths::ADMIN_LOGIN);
            }
            _ => {}
        }
    }

    if route.requires_auth && !authenticated {
        let login = if admin_scoped {
            paths::ADMIN_LOGIN
        } else {
            paths::LOGIN
        };
        return GuardDecision::Redirect(login);
    }

    GuardDecision::Allow
}

/// Fetches admin status when needed, then applies [`decide`].
pub async fn evaluate<A: AuthApi>(
    api: &A,
    route: &RouteDescriptor,
    authenticated: bool,
) -> GuardDecision {
    let admin = if route.is_admin_scoped() {
        Some(admin_status(api).await)
    } else {
        None
    };

    if admin == Some(AdminStatus::Unknown) && !route.requires_auth {
        warn!(path = route.path, "admin status unknown, allowing public admin route");
    }

    let decision = decide(route, admin, authenticated);
    debug!(path = route.path, ?admin, authenticated, ?decision, "navigation guard");
    decision
}

async fn admin_status<A: AuthApi>(api: &A) -> AdminStatus {
    match api.admin_exists().await {
        Ok(true) => AdminStatus::Exists,
        Ok(false) => AdminStatus::Missing,
        Err(err) => {
            warn!(error = %err, "admin existence check failed");
            AdminStatus::Unknown
        }
    }
}
