use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

use intel_client::services::auth;
use intel_client::{ApiClient, ClientError};

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = auth::login(
                &client,
                username.get_untracked().trim(),
                &password.get_untracked(),
            )
            .await;
            busy.set(false);
            match result {
                Ok(_) => navigate("/", Default::default()),
                Err(ClientError::Validation(message))
                | Err(ClientError::Authentication(message)) => error.set(Some(message)),
                Err(other) => {
                    logging::error!("login failed: {other}");
                    error.set(Some(auth::LOGIN_FALLBACK_MESSAGE.to_string()));
                }
            }
        });
    };

    view! {
      <div class="login-screen">
        <section class="panel login-panel">
          <h2>"Threat Intelligence Platform"</h2>
          <Show when=move || error.get().is_some() fallback=|| ()>
            <pre class="error">{move || error.get().unwrap_or_default()}</pre>
          </Show>
          <form class="stack" on:submit=submit>
            <input
              prop:value=move || username.get()
              on:input=move |ev| username.set(event_target_value(&ev))
              placeholder="Username"
            />
            <input
              type="password"
              prop:value=move || password.get()
              on:input=move |ev| password.set(event_target_value(&ev))
              placeholder="Password"
            />
            <button type="submit" disabled=move || busy.get()>
              {move || if busy.get() { "Signing in..." } else { "Sign In" }}
            </button>
          </form>
          <p class="meta">"For demo purposes, use username: admin, password: admin"</p>
        </section>
      </div>
    }
}
