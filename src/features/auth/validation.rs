//! Early form checks for the login and registration pages. The API remains the
//! authority; these only save a round trip for obviously incomplete input.

use crate::app_lib::AppError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Trims the username and requires both fields.
pub fn login_input(username: &str, password: &str) -> Result<LoginInput, AppError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(AppError::Config(
            "Username and password are required.".to_string(),
        ));
    }
    Ok(LoginInput {
        username: username.to_string(),
        password: password.to_string(),
    })
}

pub fn registration_input(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegistrationInput, AppError> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.trim().is_empty() {
        return Err(AppError::Config(
            "Username, email and password are required.".to_string(),
        ));
    }
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err(AppError::Config("Enter a valid email address.".to_string()));
    }
    if password != confirm_password {
        return Err(AppError::Config("Passwords do not match.".to_string()));
    }
    Ok(RegistrationInput {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}
