//! Static route descriptors. The Leptos route table maps each descriptor to its
//! page; the navigation guard reads `requires_auth` from here.

use super::paths;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

impl RouteDescriptor {
    const fn public(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            requires_auth: false,
        }
    }

    const fn protected(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            requires_auth: true,
        }
    }

    /// `/admin` and everything below it.
    pub fn is_admin_scoped(&self) -> bool {
        is_admin_path(self.path)
    }
}

pub const HOME: RouteDescriptor = RouteDescriptor::public(paths::HOME, "Home");
pub const TOOLS: RouteDescriptor = RouteDescriptor::public(paths::TOOLS, "Tools");
pub const LOGIN: RouteDescriptor = RouteDescriptor::public(paths::LOGIN, "Login");
pub const REGISTER: RouteDescriptor = RouteDescriptor::public(paths::REGISTER, "Register");
pub const MY: RouteDescriptor = RouteDescriptor::protected(paths::MY, "My");
pub const ADMIN: RouteDescriptor = RouteDescriptor::protected(paths::ADMIN, "Admin");
pub const ADMIN_SETUP: RouteDescriptor = RouteDescriptor::public(paths::ADMIN_SETUP, "AdminSetup");
pub const ADMIN_LOGIN: RouteDescriptor = RouteDescriptor::public(paths::ADMIN_LOGIN, "AdminLogin");
pub const ADMIN_ARTICLES: RouteDescriptor =
    RouteDescriptor::protected(paths::ADMIN_ARTICLES, "AdminArticles");

pub static ROUTES: &[RouteDescriptor] = &[
    HOME,
    TOOLS,
    LOGIN,
    REGISTER,
    MY,
    ADMIN,
    ADMIN_SETUP,
    ADMIN_LOGIN,
    ADMIN_ARTICLES,
];

/// Stands in for admin paths without a page of their own so they still get
/// the admin-existence check before the not-found page renders.
pub static ADMIN_UNKNOWN: RouteDescriptor =
    RouteDescriptor::public("/admin/*", "AdminUnknown");

/// Segment-aware prefix match: `/admin/x` is admin-scoped, `/administrator` is not.
pub fn is_admin_path(path: &str) -> bool {
    path.strip_prefix(paths::ADMIN)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Looks up the descriptor for a path, ignoring a trailing slash.
pub fn find(path: &str) -> Option<&'static RouteDescriptor> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { paths::HOME } else { trimmed };
    ROUTES.iter().find(|route| route.path == normalized)
}

/// Descriptor the navigation guard evaluates for a path: the routed
/// descriptor, [`ADMIN_UNKNOWN`] for other admin paths, `None` otherwise.
pub fn resolve(path: &str) -> Option<&'static RouteDescriptor> {
    find(path).or_else(|| is_admin_path(path).then_some(&ADMIN_UNKNOWN))
}
