mod app;
mod download;
mod fetch;
mod layout;
mod pages;
mod session;

use std::rc::Rc;

use leptos::*;

use intel_client::{absolute_base_url, ApiClient, DEFAULT_BASE_URL};

use crate::app::App;
use crate::session::BrowserSessionStore;

fn api_base_url() -> String {
    let configured = option_env!("INTEL_API_BASE").unwrap_or(DEFAULT_BASE_URL);
    match web_sys::window().and_then(|window| window.location().origin().ok()) {
        Some(origin) => absolute_base_url(configured, &origin),
        None => configured.to_string(),
    }
}

fn main() {
    let client = ApiClient::new(api_base_url(), Rc::new(BrowserSessionStore::new()));
    mount_to_body(|| view! { <App client=client/> });
}
