pub const HOME: &str = "/";
pub const TOOLS: &str = "/tools";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const MY: &str = "/my";
pub const ADMIN: &str = "/admin";
pub const ADMIN_SETUP: &str = "/admin/setup";
pub const ADMIN_LOGIN: &str = "/admin/login";
pub const ADMIN_ARTICLES: &str = "/admin/articles";
