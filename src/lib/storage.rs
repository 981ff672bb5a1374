//! Persistence seams for the session: a key/value store (`localStorage` in the
//! browser) and a cookie jar (`document.cookie`). Both have in-memory versions
//! used when the browser facility is unavailable and by tests. Values written
//! here include the auth token, so never log them.

use super::errors::AppError;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Minimal string key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Write-only cookie access; takes a full `Set-Cookie` style string.
pub trait CookieJar {
    fn write(&self, cookie: &str) -> Result<(), AppError>;
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// In-memory cookie jar keeping the current value of each cookie name.
/// A `max-age=0` write deletes the cookie, mirroring browser behavior.
#[derive(Clone, Default)]
pub struct MemoryCookieJar {
    cookies: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).cloned()
    }
}

impl CookieJar for MemoryCookieJar {
    fn write(&self, cookie: &str) -> Result<(), AppError> {
        let mut parts = cookie.split(';').map(str::trim);
        let (name, value) = parts
            .next()
            .and_then(|pair| pair.split_once('='))
            .ok_or_else(|| AppError::Storage(format!("Malformed cookie: {cookie}")))?;
        let expired = parts.any(|attribute| attribute.eq_ignore_ascii_case("max-age=0"));

        let mut cookies = self.cookies.borrow_mut();
        if expired {
            cookies.remove(name);
        } else {
            cookies.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// `window.localStorage` wrapper.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    /// Returns `None` when storage is disabled (private mode, sandboxed frames).
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| AppError::Storage(format!("Failed to write `{key}` to local storage.")))
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.storage
            .remove_item(key)
            .map_err(|_| AppError::Storage(format!("Failed to remove `{key}` from local storage.")))
    }
}

/// `document.cookie` wrapper.
#[cfg(target_arch = "wasm32")]
pub struct DocumentCookieJar {
    document: web_sys::HtmlDocument,
}

#[cfg(target_arch = "wasm32")]
impl DocumentCookieJar {
    pub fn current() -> Option<Self> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()?;
        Some(Self { document })
    }
}

#[cfg(target_arch = "wasm32")]
impl CookieJar for DocumentCookieJar {
    fn write(&self, cookie: &str) -> Result<(), AppError> {
        self.document
            .set_cookie(cookie)
            .map_err(|_| AppError::Storage("Failed to write cookie.".to_string()))
    }
}
