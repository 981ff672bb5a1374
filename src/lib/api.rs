//! HTTP helpers for JSON APIs with consistent timeouts and error handling. Feature
//! clients use these helpers to avoid duplicating request setup and to enforce a
//! predictable timeout policy. The helpers do not store tokens; they only attach
//! the bearer header a caller passes in.

use super::errors::AppError;
use serde::Deserialize;
use serde_json::Value;

/// Default request timeout (milliseconds) applied to all HTTP helpers.
#[cfg(target_arch = "wasm32")]
const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Error body shape returned by the API (`{"detail": ...}`).
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Builds a URL from an explicit base URL and the provided path.
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps a non-2xx response into `AppError::Http`.
///
/// A JSON body surfaces its `detail` (a string, or the `msg` fields of a
/// validation list). JSON without a usable detail yields `fallback`. A body that
/// is not JSON yields a status-based message.
pub fn api_error(status: u16, status_text: &str, body: &str, fallback: &str) -> AppError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .detail
            .as_ref()
            .and_then(detail_message)
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) => format!("Server error: {status} {}", status_text.trim())
            .trim_end()
            .to_string(),
    };

    AppError::Http {
        status,
        message: truncate(&message),
    }
}

fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
#[cfg(target_arch = "wasm32")]
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        tracing::debug!(error = %message, "request failed before a response");
        AppError::unreachable()
    }
}

/// Fetches JSON, optionally authorized with a bearer token.
#[cfg(target_arch = "wasm32")]
pub async fn get_json<T: serde::de::DeserializeOwned>(
    base_url: &str,
    path: &str,
    bearer: Option<&str>,
    fallback: &str,
) -> Result<T, AppError> {
    use gloo_net::http::Request;

    let url = build_url_with_base(base_url, path);
    let response = send_with_timeout(|signal| {
        let mut builder = Request::get(&url).abort_signal(Some(signal));
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        builder
            .build()
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response, fallback).await
}

/// Posts a JSON body and parses a JSON response.
#[cfg(target_arch = "wasm32")]
pub async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    base_url: &str,
    path: &str,
    body: &B,
    fallback: &str,
) -> Result<T, AppError> {
    use gloo_net::http::Request;

    let url = build_url_with_base(base_url, path);
    let payload = serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
    let response = send_with_timeout(move |signal| {
        Request::post(&url)
            .header("Content-Type", "application/json")
            .abort_signal(Some(signal))
            .body(payload)
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response, fallback).await
}

/// Sends a request with an abort timeout to avoid hanging UI state.
#[cfg(target_arch = "wasm32")]
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<gloo_net::http::Request, AppError>,
) -> Result<gloo_net::http::Response, AppError> {
    use gloo_timers::callback::Timeout;
    use web_sys::AbortController;

    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

/// Parses JSON responses and maps HTTP errors through [`api_error`].
#[cfg(target_arch = "wasm32")]
async fn handle_json_response<T: serde::de::DeserializeOwned>(
    response: gloo_net::http::Response,
    fallback: &str,
) -> Result<T, AppError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &status_text, &body, fallback))
    }
}
