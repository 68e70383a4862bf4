use leptos::*;
use leptos_router::{use_location, Redirect, Route, Router, Routes};

use intel_client::services::auth;
use intel_client::ApiClient;

use crate::layout::AppLayout;
use crate::pages::{
    DashboardPage, FeedsPage, LoginPage, ProfilePage, ReportsPage, SearchPage, SettingsPage,
    VisualizationsPage,
};

#[component]
pub fn App(client: ApiClient) -> impl IntoView {
    provide_context(client);

    view! {
      <Router>
        <Routes>
          <Route path="/login" view=LoginPage/>
          <Route path="/" view=ProtectedLayout>
            <Route path="" view=DashboardPage/>
            <Route path="search" view=SearchPage/>
            <Route path="feeds" view=FeedsPage/>
            <Route path="visualizations" view=VisualizationsPage/>
            <Route path="reports" view=ReportsPage/>
            <Route path="compliance" view=ReportsPage/>
            <Route path="settings" view=SettingsPage/>
            <Route path="profile" view=ProfilePage/>
          </Route>
          <Route path="/*any" view=|| view! { <Redirect path="/"/> }/>
        </Routes>
      </Router>
    }
}

#[component]
fn ProtectedLayout() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    // Tracked so the token check re-runs on every navigation.
    let pathname = use_location().pathname;

    view! {
      <Show
        when=move || {
            let _ = pathname.get();
            auth::is_authenticated(&client)
        }
        fallback=|| view! { <Redirect path="/login"/> }
      >
        <AppLayout/>
      </Show>
    }
}
