use std::fmt;

/// Message shown when the API cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Unable to reach the server. Check that the backend service is running.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
    Storage(String),
}

impl AppError {
    pub fn unreachable() -> Self {
        AppError::Network(UNREACHABLE_MESSAGE.to_string())
    }

    /// Returns true for 401/403 responses, which mean the credentials or token were refused.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: 401 | 403, .. })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) | AppError::Network(message) => {
                write!(formatter, "{message}")
            }
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            // Server-provided details are already user facing.
            AppError::Http { message, .. } => write!(formatter, "{message}"),
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            AppError::Storage(message) => write!(formatter, "Storage error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}
