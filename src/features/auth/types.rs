//! Request and response types for auth-related API calls. Requests carry
//! passwords and responses carry bearer tokens, so they must never be logged.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdminCheckResponse {
    pub exists: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Profile record returned by the API and persisted under the `user` key.
/// Fields the client does not model are kept in `extra` so a reload
/// round-trips the record unchanged.
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
