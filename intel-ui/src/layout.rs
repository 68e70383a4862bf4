use leptos::*;
use leptos_router::{use_navigate, Outlet, A};
use wasm_bindgen_futures::spawn_local;

use intel_client::model::User;
use intel_client::services::auth;
use intel_client::ApiClient;

use crate::fetch::redirect_on_unauthorized;

/// Top bar plus sidebar around the routed pages. Loads the signed-in user
/// once and shares it with the pages below through context.
#[component]
pub fn AppLayout() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let current_user = create_rw_signal(None::<User>);
    provide_context(current_user);

    {
        let client = client.clone();
        spawn_local(async move {
            match auth::current_user(&client).await {
                Ok(user) => current_user.set(Some(user)),
                Err(error) => {
                    logging::error!("Failed to load current user: {error}");
                    redirect_on_unauthorized(&client, &error);
                }
            }
        });
    }

    let navigate = use_navigate();
    let sign_out = move |_| {
        auth::logout(&client);
        navigate("/login", Default::default());
    };

    view! {
      <div class="shell">
        <header class="topbar">
          <h1>"Threat Intelligence Platform"</h1>
          <div class="row">
            <span class="meta">
              {move || current_user.get().map(|user| user.username).unwrap_or_default()}
            </span>
            <A href="/profile">"Profile"</A>
            <button on:click=sign_out>"Logout"</button>
          </div>
        </header>
        <div class="body">
          <nav class="sidebar">
            <A href="/" exact=true>"Dashboard"</A>
            <A href="/search">"Search"</A>
            <A href="/feeds">"Threat Feeds"</A>
            <A href="/visualizations">"Visualizations"</A>
            <div class="nav-group">"Reports"</div>
            <A href="/reports">"Reports"</A>
            <A href="/compliance">"Compliance"</A>
            <div class="nav-group">"Administration"</div>
            <A href="/settings">"Settings"</A>
          </nav>
          <main class="content">
            <Outlet/>
          </main>
        </div>
      </div>
    }
}
