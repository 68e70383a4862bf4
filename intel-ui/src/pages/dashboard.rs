use leptos::*;

use intel_client::model::{SearchFilters, VisualizationData};
use intel_client::services::threat;
use intel_client::{ApiClient, FetchGate, ViewState};

use crate::fetch::load_into;
use crate::pages::count_series;

/// Summary cards and overview panels. Every number on this page comes out
/// of the fetched visualization payload.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let gate = store_value(FetchGate::new());
    let state = create_rw_signal(ViewState::<VisualizationData>::Idle);

    let load = move || {
        let client = client.get_value();
        load_into(
            client.clone(),
            state,
            gate.get_value(),
            "Failed to load dashboard data",
            async move { threat::fetch_visualization_data(&client, &SearchFilters::default()).await },
        );
    };
    load();

    view! {
      <div class="page">
        <h2>"Threat Intelligence Dashboard"</h2>
        {move || match state.get() {
            ViewState::Idle | ViewState::Loading => {
                view! { <p class="meta">"Loading dashboard data..."</p> }.into_view()
            }
            ViewState::Failed(message) => view! { <pre class="error">{message}</pre> }.into_view(),
            ViewState::Ready(data) => {
                view! {
                  <div class="cards">
                    <section class="panel card">
                      <h3>"Total Indicators"</h3>
                      <p class="metric">{data.total_indicators().to_string()}</p>
                    </section>
                    <section class="panel card">
                      <h3>"Active Sources"</h3>
                      <p class="metric">{data.active_sources().to_string()}</p>
                    </section>
                    <section class="panel card">
                      <h3>"Recent Activity"</h3>
                      <p class="metric">{data.recent_activity().to_string()}</p>
                    </section>
                  </div>
                  <div class="cards">
                    <section class="panel">
                      <h3>"Threat Timeline"</h3>
                      {count_series(
                          data.timeline_data.as_ref().map(|points| {
                              points
                                  .iter()
                                  .map(|point| (point.date.clone(), point.count))
                                  .collect()
                          }),
                          "No timeline data available.",
                      )}
                    </section>
                    <section class="panel">
                      <h3>"Threat Sources"</h3>
                      {count_series(
                          data.source_distribution.as_ref().map(|sources| {
                              sources
                                  .iter()
                                  .map(|entry| (entry.source.clone(), entry.count))
                                  .collect()
                          }),
                          "No source data available.",
                      )}
                    </section>
                    <section class="panel">
                      <h3>"Indicator Types"</h3>
                      {count_series(
                          data.type_distribution.as_ref().map(|types| {
                              types
                                  .iter()
                                  .map(|entry| (entry.kind.clone(), entry.count))
                                  .collect()
                          }),
                          "No type data available.",
                      )}
                    </section>
                  </div>
                }
                    .into_view()
            }
        }}
      </div>
    }
}
