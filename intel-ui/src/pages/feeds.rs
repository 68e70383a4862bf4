use leptos::*;

use intel_client::model::ThreatFeed;
use intel_client::services::threat;
use intel_client::{ApiClient, FetchGate, ViewState};

use crate::fetch::load_into;

#[component]
pub fn FeedsPage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let gate = store_value(FetchGate::new());
    let state = create_rw_signal(ViewState::<Vec<ThreatFeed>>::Idle);
    let selected = create_rw_signal(None::<ThreatFeed>);

    let load = move || {
        let client = client.get_value();
        load_into(
            client.clone(),
            state,
            gate.get_value(),
            "Failed to load threat feeds",
            async move { threat::fetch_feeds(&client).await },
        );
    };
    load();

    view! {
      <div class="page">
        <div class="row">
          <h2>"Threat Feeds"</h2>
          <button disabled=true>"Add New Feed"</button>
        </div>

        {move || match state.get() {
            ViewState::Idle | ViewState::Loading => {
                view! { <p class="meta">"Loading threat feeds..."</p> }.into_view()
            }
            ViewState::Failed(message) => view! { <pre class="error">{message}</pre> }.into_view(),
            ViewState::Ready(feeds) if feeds.is_empty() => {
                view! {
                  <section class="panel">
                    <p class="meta">
                      "No threat feeds configured. Click \"Add New Feed\" to get started."
                    </p>
                  </section>
                }
                    .into_view()
            }
            ViewState::Ready(feeds) => {
                view! {
                  <div class="cards">
                    <For
                      each=move || feeds.clone()
                      key=|feed| feed.id.clone()
                      children=move |feed| {
                          let details = feed.clone();
                          view! {
                            <section class="panel card">
                              <h3>{feed.name.clone()}</h3>
                              <p class="meta">{format!("Last Updated: {}", feed.last_updated)}</p>
                              <p class="meta">{format!("{} indicators", feed.indicators.len())}</p>
                              <p>{feed.description.clone()}</p>
                              <div class="row">
                                <button on:click=move |_| selected.set(Some(details.clone()))>
                                  "Details"
                                </button>
                                <button on:click=move |_| load()>"Refresh"</button>
                              </div>
                            </section>
                          }
                      }
                    />
                  </div>
                }
                    .into_view()
            }
        }}

        <Show when=move || selected.get().is_some() fallback=|| ()>
          {move || {
              selected
                  .get()
                  .map(|feed| {
                      view! {
                        <section class="panel">
                          <h3>{format!("{} Details", feed.name)}</h3>
                          <p class="meta">{format!("Source: {}", feed.source)}</p>
                          <p class="meta">{format!("Last Updated: {}", feed.last_updated)}</p>
                          <p>{feed.description.clone()}</p>
                          <p class="meta">
                            {format!("{} indicators in this feed", feed.indicators.len())}
                          </p>
                          <button on:click=move |_| selected.set(None)>"Close"</button>
                        </section>
                      }
                  })
          }}
        </Show>
      </div>
    }
}
