use leptos::*;
use wasm_bindgen_futures::spawn_local;

use intel_client::model::{Report, ReportDraft, ReportFormat, User};
use intel_client::services::report;
use intel_client::{ApiClient, FetchGate, ViewState};

use crate::download::save_blob;
use crate::fetch::{load_into, redirect_on_unauthorized};

/// Reports table with create, delete and export actions. Every mutation is
/// followed by a full re-fetch of the listing.
#[component]
pub fn ReportsPage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let current_user = expect_context::<RwSignal<Option<User>>>();
    let gate = store_value(FetchGate::new());
    let state = create_rw_signal(ViewState::<Vec<Report>>::Idle);

    let show_dialog = create_rw_signal(false);
    let draft_name = create_rw_signal(String::new());
    let draft_description = create_rw_signal(String::new());
    let draft_format = create_rw_signal("pdf".to_string());

    let load = move || {
        let client = client.get_value();
        load_into(
            client.clone(),
            state,
            gate.get_value(),
            "Failed to load reports",
            async move { report::fetch_reports(&client).await },
        );
    };
    load();

    let close_dialog = move || {
        show_dialog.set(false);
        draft_name.set(String::new());
        draft_description.set(String::new());
        draft_format.set("pdf".to_string());
    };

    let create = move |_| {
        let name = draft_name.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        let draft = ReportDraft {
            name,
            description: draft_description.get_untracked().trim().to_string(),
            format: ReportFormat::parse(&draft_format.get_untracked())
                .unwrap_or(ReportFormat::Pdf),
            content: String::new(),
            created_by: current_user
                .get_untracked()
                .map(|user| user.username)
                .unwrap_or_default(),
        };
        let client = client.get_value();
        spawn_local(async move {
            match report::create_report(&client, &draft).await {
                Ok(_) => {
                    close_dialog();
                    load();
                }
                Err(error) => {
                    logging::error!("Failed to create report: {error}");
                    redirect_on_unauthorized(&client, &error);
                }
            }
        });
    };

    let delete = move |id: String| {
        let client = client.get_value();
        spawn_local(async move {
            match report::delete_report(&client, &id).await {
                Ok(()) => load(),
                Err(error) => {
                    logging::error!("Failed to delete report: {error}");
                    redirect_on_unauthorized(&client, &error);
                }
            }
        });
    };

    let export = move |id: String, format: ReportFormat| {
        let client = client.get_value();
        spawn_local(async move {
            match report::export_report(&client, &id, format).await {
                Ok(bytes) => {
                    let filename = format!("report-{id}.{format}");
                    if let Err(error) = save_blob(&bytes, format.mime_type(), &filename) {
                        logging::error!("Failed to save exported report: {error}");
                    }
                }
                Err(error) => {
                    logging::error!("Failed to export report: {error}");
                    redirect_on_unauthorized(&client, &error);
                }
            }
        });
    };

    view! {
      <div class="page">
        <div class="row">
          <h2>"Reports"</h2>
          <button on:click=move |_| show_dialog.set(true)>"Create Report"</button>
        </div>

        <Show when=move || show_dialog.get() fallback=|| ()>
          <section class="panel dialog">
            <h3>"Create New Report"</h3>
            <div class="stack">
              <input
                prop:value=move || draft_name.get()
                on:input=move |ev| draft_name.set(event_target_value(&ev))
                placeholder="Report Name"
              />
              <textarea
                prop:value=move || draft_description.get()
                on:input=move |ev| draft_description.set(event_target_value(&ev))
                placeholder="Description"
              ></textarea>
              <select
                prop:value=move || draft_format.get()
                on:change=move |ev| draft_format.set(event_target_value(&ev))
              >
                <option value="pdf">"PDF"</option>
                <option value="csv">"CSV"</option>
                <option value="json">"JSON"</option>
              </select>
              <div class="row">
                <button on:click=move |_| close_dialog()>"Cancel"</button>
                <button
                  disabled=move || draft_name.get().trim().is_empty()
                  on:click=create
                >
                  "Create"
                </button>
              </div>
            </div>
          </section>
        </Show>

        <section class="panel">
          {move || match state.get() {
              ViewState::Idle | ViewState::Loading => {
                  view! { <p class="meta">"Loading reports..."</p> }.into_view()
              }
              ViewState::Failed(message) => {
                  view! { <pre class="error">{message}</pre> }.into_view()
              }
              ViewState::Ready(reports) if reports.is_empty() => {
                  view! {
                    <p class="meta">
                      "No reports found. Click \"Create Report\" to get started."
                    </p>
                  }
                      .into_view()
              }
              ViewState::Ready(reports) => {
                  view! {
                    <table>
                      <thead>
                        <tr>
                          <th>"Name"</th>
                          <th>"Description"</th>
                          <th>"Created By"</th>
                          <th>"Date"</th>
                          <th>"Format"</th>
                          <th>"Actions"</th>
                        </tr>
                      </thead>
                      <tbody>
                        <For
                          each=move || reports.clone()
                          key=|entry| entry.id.clone()
                          children=move |entry| {
                              let pdf_id = entry.id.clone();
                              let csv_id = entry.id.clone();
                              let delete_id = entry.id.clone();
                              view! {
                                <tr>
                                  <td>{entry.name.clone()}</td>
                                  <td>{entry.description.clone()}</td>
                                  <td>{entry.created_by.clone()}</td>
                                  <td>{entry.created_at.clone()}</td>
                                  <td>{entry.format.as_str().to_uppercase()}</td>
                                  <td>
                                    <div class="row">
                                      <button on:click=move |_| {
                                          export(pdf_id.clone(), ReportFormat::Pdf)
                                      }>"PDF"</button>
                                      <button on:click=move |_| {
                                          export(csv_id.clone(), ReportFormat::Csv)
                                      }>"CSV"</button>
                                      <button on:click=move |_| delete(delete_id.clone())>
                                        "Delete"
                                      </button>
                                    </div>
                                  </td>
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
      </div>
    }
}
