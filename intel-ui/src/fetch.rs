use std::future::Future;

use leptos::{logging, RwSignal, SignalSet};
use wasm_bindgen_futures::spawn_local;

use intel_client::{ApiClient, ClientError, ClientResult, FetchGate, ViewState};

/// Drives one remote load into a page-owned view state. The ticket taken
/// before the request starts recognizes responses that were superseded by a
/// newer load, and those are dropped without touching the state.
pub fn load_into<T, F>(
    client: ApiClient,
    state: RwSignal<ViewState<T>>,
    gate: FetchGate,
    failure_message: &'static str,
    request: F,
) where
    T: Clone + 'static,
    F: Future<Output = ClientResult<T>> + 'static,
{
    let ticket = gate.issue();
    state.set(ViewState::Loading);
    spawn_local(async move {
        let result = request.await;
        if !ticket.is_current() {
            return;
        }
        match result {
            Ok(value) => state.set(ViewState::Ready(value)),
            Err(error) => {
                logging::error!("{failure_message}: {error}");
                if redirect_on_unauthorized(&client, &error) {
                    return;
                }
                state.set(ViewState::Failed(failure_message.to_string()));
            }
        }
    });
}

/// A 401 on any authenticated call means the session is gone: forget the
/// token and drop back to the login screen. Returns true when the redirect
/// was taken.
pub fn redirect_on_unauthorized(client: &ApiClient, error: &ClientError) -> bool {
    if !error.is_unauthorized() {
        return false;
    }
    client.session().clear_token();
    force_login();
    true
}

fn force_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}
