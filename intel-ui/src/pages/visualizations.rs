use leptos::*;

use intel_client::model::{SearchFilters, VisualizationData};
use intel_client::services::threat;
use intel_client::{ApiClient, FetchGate, ViewState};

use crate::fetch::load_into;
use crate::pages::count_series;

const TIME_RANGES: [(&str, &str); 6] = [
    ("24h", "Last 24 Hours"),
    ("7d", "Last 7 Days"),
    ("30d", "Last 30 Days"),
    ("90d", "Last 90 Days"),
    ("1y", "Last Year"),
    ("all", "All Time"),
];

#[component]
pub fn VisualizationsPage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let gate = store_value(FetchGate::new());
    let state = create_rw_signal(ViewState::<VisualizationData>::Idle);

    let viz_type = create_rw_signal("timeline".to_string());
    let time_range = create_rw_signal("7d".to_string());

    let load = move || {
        let client = client.get_value();
        load_into(
            client.clone(),
            state,
            gate.get_value(),
            "Failed to load visualization data",
            async move { threat::fetch_visualization_data(&client, &SearchFilters::default()).await },
        );
    };

    // Changing the range re-fetches; changing the type only re-renders.
    create_effect(move |_| {
        let _ = time_range.get();
        load();
    });

    view! {
      <div class="page">
        <h2>"Threat Visualizations"</h2>

        <section class="panel">
          <div class="grid">
            <label class="stack">
              <span class="meta">"Visualization Type"</span>
              <select
                prop:value=move || viz_type.get()
                on:change=move |ev| viz_type.set(event_target_value(&ev))
              >
                <option value="timeline">"Timeline"</option>
                <option value="sources">"Source Distribution"</option>
                <option value="types">"Type Distribution"</option>
                <option value="relationships">"Relationship Graph"</option>
              </select>
            </label>
            <label class="stack">
              <span class="meta">"Time Range"</span>
              <select
                prop:value=move || time_range.get()
                on:change=move |ev| time_range.set(event_target_value(&ev))
              >
                {TIME_RANGES
                    .iter()
                    .copied()
                    .map(|(value, label)| view! { <option value=value>{label}</option> })
                    .collect_view()}
              </select>
            </label>
          </div>
        </section>

        <section class="panel">
          <h3>
            {move || match viz_type.get().as_str() {
                "sources" => "Source Distribution",
                "types" => "Type Distribution",
                "relationships" => "Relationship Graph",
                _ => "Threat Timeline",
            }}
          </h3>
          {move || match state.get() {
              ViewState::Idle | ViewState::Loading => {
                  view! { <p class="meta">"Loading visualization data..."</p> }.into_view()
              }
              ViewState::Failed(message) => {
                  view! { <pre class="error">{message}</pre> }.into_view()
              }
              ViewState::Ready(data) => match viz_type.get().as_str() {
                  "sources" => source_series(&data),
                  "types" => type_series(&data),
                  "relationships" => {
                      view! { <p class="meta">"Relationship graph is not available yet."</p> }
                          .into_view()
                  }
                  _ => timeline_series(&data),
              },
          }}
        </section>
      </div>
    }
}

fn timeline_series(data: &VisualizationData) -> View {
    count_series(
        data.timeline_data.as_ref().map(|points| {
            points
                .iter()
                .map(|point| (point.date.clone(), point.count))
                .collect()
        }),
        "No timeline data available.",
    )
}

fn source_series(data: &VisualizationData) -> View {
    count_series(
        data.source_distribution.as_ref().map(|sources| {
            sources
                .iter()
                .map(|entry| (entry.source.clone(), entry.count))
                .collect()
        }),
        "No source data available.",
    )
}

fn type_series(data: &VisualizationData) -> View {
    count_series(
        data.type_distribution.as_ref().map(|types| {
            types
                .iter()
                .map(|entry| (entry.kind.clone(), entry.count))
                .collect()
        }),
        "No type data available.",
    )
}
