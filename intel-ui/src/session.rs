use intel_client::{SessionStore, SESSION_TOKEN_KEY};

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Keeps the token in browser local storage so a reload stays signed in.
#[derive(Default)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    pub fn new() -> Self {
        Self
    }
}

impl SessionStore for BrowserSessionStore {
    fn token(&self) -> Option<String> {
        storage()?.get_item(SESSION_TOKEN_KEY).ok().flatten()
    }

    fn store_token(&self, token: &str) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(SESSION_TOKEN_KEY, token);
        }
    }

    fn clear_token(&self) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(SESSION_TOKEN_KEY);
        }
    }
}
