use leptos::*;

use intel_client::model::{SearchFilters, ThreatIndicator};
use intel_client::services::threat;
use intel_client::{ApiClient, FetchGate, ViewState};

use crate::fetch::load_into;

const INDICATOR_TYPES: [&str; 8] = [
    "IP", "Domain", "URL", "Email", "Hash", "File", "Process", "Registry",
];

const SOURCES: [&str; 6] = [
    "MISP",
    "OTX",
    "Recorded Future",
    "VirusTotal",
    "AbuseIPDB",
    "Internal",
];

const CONFIDENCE_LEVELS: [(&str, &str); 5] = [
    ("0", "Any"),
    ("25", "Low (25+)"),
    ("50", "Medium (50+)"),
    ("75", "High (75+)"),
    ("90", "Very High (90+)"),
];

#[component]
pub fn SearchPage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let results_gate = store_value(FetchGate::new());
    let detail_gate = store_value(FetchGate::new());
    let related_gate = store_value(FetchGate::new());

    let search_term = create_rw_signal(String::new());
    let kind = create_rw_signal(String::new());
    let source = create_rw_signal(String::new());
    let confidence = create_rw_signal("0".to_string());
    let from_date = create_rw_signal(String::new());
    let to_date = create_rw_signal(String::new());
    let tags_text = create_rw_signal(String::new());

    let results = create_rw_signal(ViewState::<Vec<ThreatIndicator>>::Idle);
    let selected = create_rw_signal(None::<String>);
    let detail = create_rw_signal(ViewState::<ThreatIndicator>::Idle);
    let related = create_rw_signal(ViewState::<Vec<ThreatIndicator>>::Idle);

    // Unset fields stay None so they are left out of the request body.
    let build_filters = move || {
        let pick = |value: String| {
            let trimmed = value.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };
        let tags: Vec<String> = tags_text
            .get_untracked()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect();
        SearchFilters {
            kind: pick(kind.get_untracked()),
            source: pick(source.get_untracked()),
            confidence: confidence
                .get_untracked()
                .parse::<f64>()
                .ok()
                .filter(|threshold| *threshold > 0.0),
            from_date: pick(from_date.get_untracked()),
            to_date: pick(to_date.get_untracked()),
            tags: (!tags.is_empty()).then_some(tags),
            search_term: pick(search_term.get_untracked()),
        }
    };

    let run_search = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let filters = build_filters();
        let client = client.get_value();
        load_into(
            client.clone(),
            results,
            results_gate.get_value(),
            "Failed to perform search",
            async move { threat::search_indicators(&client, &filters).await },
        );
    };

    create_effect(move |_| {
        let Some(id) = selected.get() else { return };
        let client = client.get_value();
        load_into(
            client.clone(),
            detail,
            detail_gate.get_value(),
            "Failed to load indicator details",
            {
                let client = client.clone();
                let id = id.clone();
                async move { threat::fetch_indicator(&client, &id).await }
            },
        );
        load_into(
            client.clone(),
            related,
            related_gate.get_value(),
            "Failed to load related indicators",
            {
                let client = client.clone();
                async move { threat::fetch_related(&client, &id).await }
            },
        );
    });

    view! {
      <div class="page">
        <h2>"Search Threat Indicators"</h2>

        <section class="panel">
          <form class="stack" on:submit=run_search>
            <input
              prop:value=move || search_term.get()
              on:input=move |ev| search_term.set(event_target_value(&ev))
              placeholder="Enter IP, domain, hash, etc."
            />
            <div class="grid">
              <label class="stack">
                <span class="meta">"Indicator Type"</span>
                <select
                  prop:value=move || kind.get()
                  on:change=move |ev| kind.set(event_target_value(&ev))
                >
                  <option value="">"Any"</option>
                  {INDICATOR_TYPES
                      .iter()
                      .copied()
                      .map(|name| view! { <option value=name>{name}</option> })
                      .collect_view()}
                </select>
              </label>
              <label class="stack">
                <span class="meta">"Source"</span>
                <select
                  prop:value=move || source.get()
                  on:change=move |ev| source.set(event_target_value(&ev))
                >
                  <option value="">"Any"</option>
                  {SOURCES
                      .iter()
                      .copied()
                      .map(|name| view! { <option value=name>{name}</option> })
                      .collect_view()}
                </select>
              </label>
              <label class="stack">
                <span class="meta">"Confidence"</span>
                <select
                  prop:value=move || confidence.get()
                  on:change=move |ev| confidence.set(event_target_value(&ev))
                >
                  {CONFIDENCE_LEVELS
                      .iter()
                      .copied()
                      .map(|(value, label)| view! { <option value=value>{label}</option> })
                      .collect_view()}
                </select>
              </label>
              <label class="stack">
                <span class="meta">"Tags"</span>
                <input
                  prop:value=move || tags_text.get()
                  on:input=move |ev| tags_text.set(event_target_value(&ev))
                  placeholder="Tags (comma separated)"
                />
              </label>
              <label class="stack">
                <span class="meta">"From Date"</span>
                <input
                  type="date"
                  prop:value=move || from_date.get()
                  on:input=move |ev| from_date.set(event_target_value(&ev))
                />
              </label>
              <label class="stack">
                <span class="meta">"To Date"</span>
                <input
                  type="date"
                  prop:value=move || to_date.get()
                  on:input=move |ev| to_date.set(event_target_value(&ev))
                />
              </label>
            </div>
            <div class="row">
              <button type="submit" disabled=move || results.get().is_loading()>
                {move || if results.get().is_loading() { "Searching..." } else { "Search" }}
              </button>
            </div>
          </form>
        </section>

        <section class="panel">
          <h3>"Search Results"</h3>
          {move || match results.get() {
              ViewState::Idle => {
                  view! { <p class="meta">"Run a search to see matching indicators."</p> }
                      .into_view()
              }
              ViewState::Loading => view! { <p class="meta">"Searching..."</p> }.into_view(),
              ViewState::Failed(message) => {
                  view! { <pre class="error">{message}</pre> }.into_view()
              }
              ViewState::Ready(indicators) if indicators.is_empty() => {
                  view! {
                    <p class="meta">"No results found. Try adjusting your search criteria."</p>
                  }
                      .into_view()
              }
              ViewState::Ready(indicators) => {
                  view! {
                    <table>
                      <thead>
                        <tr>
                          <th>"Type"</th>
                          <th>"Value"</th>
                          <th>"Source"</th>
                          <th>"Confidence"</th>
                          <th>"Timestamp"</th>
                          <th>"Tags"</th>
                        </tr>
                      </thead>
                      <tbody>
                        <For
                          each=move || indicators.clone()
                          key=|indicator| indicator.id.clone()
                          children=move |indicator| {
                              let id = indicator.id.clone();
                              view! {
                                <tr
                                  class="selectable"
                                  on:click=move |_| selected.set(Some(id.clone()))
                                >
                                  <td>{indicator.kind.clone()}</td>
                                  <td>{indicator.value.clone()}</td>
                                  <td>{indicator.source.clone()}</td>
                                  <td>{indicator.confidence.to_string()}</td>
                                  <td>{indicator.timestamp.clone()}</td>
                                  <td>{indicator.tags.join(", ")}</td>
                                </tr>
                              }
                          }
                        />
                      </tbody>
                    </table>
                  }
                      .into_view()
              }
          }}
        </section>

        <Show when=move || selected.get().is_some() fallback=|| ()>
          <section class="panel">
            <h3>"Indicator Details"</h3>
            {move || match detail.get() {
                ViewState::Idle | ViewState::Loading => {
                    view! { <p class="meta">"Loading indicator details..."</p> }.into_view()
                }
                ViewState::Failed(message) => {
                    view! { <pre class="error">{message}</pre> }.into_view()
                }
                ViewState::Ready(indicator) => {
                    view! {
                      <div class="stack">
                        <div><b>{indicator.kind.clone()}</b>" "{indicator.value.clone()}</div>
                        <div class="meta">
                          {format!("Source: {} | Confidence: {}", indicator.source, indicator.confidence)}
                        </div>
                        <div class="meta">{format!("First seen: {}", indicator.timestamp)}</div>
                        <div class="meta">{format!("Tags: {}", indicator.tags.join(", "))}</div>
                        <div>{indicator.description.clone().unwrap_or_default()}</div>
                      </div>
                    }
                        .into_view()
                }
            }}

            <h3>"Related Indicators"</h3>
            {move || match related.get() {
                ViewState::Idle | ViewState::Loading => {
                    view! { <p class="meta">"Loading related indicators..."</p> }.into_view()
                }
                ViewState::Failed(message) => {
                    view! { <pre class="error">{message}</pre> }.into_view()
                }
                ViewState::Ready(indicators) if indicators.is_empty() => {
                    view! { <p class="meta">"No related indicators."</p> }.into_view()
                }
                ViewState::Ready(indicators) => {
                    view! {
                      <ul class="series">
                        <For
                          each=move || indicators.clone()
                          key=|indicator| indicator.id.clone()
                          children=move |indicator| {
                              let id = indicator.id.clone();
                              view! {
                                <li
                                  class="selectable"
                                  on:click=move |_| selected.set(Some(id.clone()))
                                >
                                  <span>{format!("{}: {}", indicator.kind, indicator.value)}</span>
                                  <span class="meta">{indicator.source.clone()}</span>
                                </li>
                              }
                          }
                        />
                      </ul>
                    }
                        .into_view()
                }
            }}
          </section>
        </Show>
      </div>
    }
}
