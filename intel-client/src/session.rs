use std::cell::RefCell;

pub const SESSION_TOKEN_KEY: &str = "auth_token";

/// Where the bearer token lives between requests. The browser build backs
/// this with localStorage; tests use the in-memory store.
pub trait SessionStore {
    fn token(&self) -> Option<String>;
    fn store_token(&self, token: &str);
    fn clear_token(&self);
}

#[derive(Default)]
pub struct MemorySessionStore {
    token: RefCell<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store_token(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.borrow_mut() = None;
    }
}
