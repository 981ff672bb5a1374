//! Build-time configuration for the API endpoint and log level with an optional
//! runtime override. The runtime config is read from `window.QUILL_CONFIG`
//! (if present) so static deployments can change endpoints without rebuilding.
//! Configuration values are public; do not store secrets here.

/// API base used by debug builds when nothing else is configured.
const DEV_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::from_build_env(
            option_env!("QUILL_API_BASE_URL"),
            option_env!("QUILL_LOG_LEVEL"),
        );

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    fn from_build_env(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        // Release bundles are served behind the same origin as the API.
        let default_base = if cfg!(debug_assertions) {
            DEV_API_BASE_URL
        } else {
            ""
        };

        Self {
            api_base_url: api_base_url.unwrap_or(default_base).trim().to_string(),
            log_level: log_level
                .and_then(normalize_runtime_value)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.log_level {
        config.log_level = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("QUILL_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
