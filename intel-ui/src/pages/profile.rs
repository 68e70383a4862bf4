use leptos::*;

use intel_client::model::User;
use intel_client::services::auth;
use intel_client::{ApiClient, FetchGate, ViewState};

use crate::fetch::load_into;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let gate = store_value(FetchGate::new());
    let state = create_rw_signal(ViewState::<User>::Idle);

    let load = move || {
        let client = client.get_value();
        load_into(
            client.clone(),
            state,
            gate.get_value(),
            "Failed to load profile",
            async move { auth::current_user(&client).await },
        );
    };
    load();

    view! {
      <div class="page">
        <h2>"User Profile"</h2>
        <section class="panel">
          {move || match state.get() {
              ViewState::Idle | ViewState::Loading => {
                  view! { <p class="meta">"Loading profile..."</p> }.into_view()
              }
              ViewState::Failed(message) => {
                  view! { <pre class="error">{message}</pre> }.into_view()
              }
              ViewState::Ready(user) => {
                  view! {
                    <div class="stack">
                      <div><span class="meta">"Username: "</span>{user.username.clone()}</div>
                      <div><span class="meta">"Email: "</span>{user.email.clone()}</div>
                      <div><span class="meta">"Role: "</span>{user.role.as_str()}</div>
                    </div>
                  }
                      .into_view()
              }
          }}
        </section>
      </div>
    }
}
