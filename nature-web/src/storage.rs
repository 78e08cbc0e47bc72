//! `window.localStorage` as the game's key-value backend.
use nature_game::KeyValueStore;

use crate::dom;

/// Key-value store over the page's `localStorage`. The handle is looked up on
/// every call, so a store created before the page finished loading still works.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LocalStore {
    fn handle() -> Result<web_sys::Storage, WebStorageError> {
        dom::local_storage().map_err(|err| WebStorageError::Unavailable(dom::js_error_message(&err)))
    }
}

fn storage_error(err: &wasm_bindgen::JsValue) -> WebStorageError {
    let message = dom::js_error_message(err);
    dom::console_error(&format!("localStorage: {message}"));
    WebStorageError::Storage(message)
}

impl KeyValueStore for LocalStore {
    type Error = WebStorageError;

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|err| storage_error(&err))
    }

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::handle()?.get_item(key).map_err(|err| storage_error(&err))
    }

    fn clear(&self, key: &str) -> Result<(), Self::Error> {
        Self::handle()?
            .remove_item(key)
            .map_err(|err| storage_error(&err))
    }
}
