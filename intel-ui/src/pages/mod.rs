use leptos::*;

mod dashboard;
mod feeds;
mod login;
mod profile;
mod reports;
mod search;
mod settings;
mod visualizations;

pub use dashboard::DashboardPage;
pub use feeds::FeedsPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use reports::ReportsPage;
pub use search::SearchPage;
pub use settings::SettingsPage;
pub use visualizations::VisualizationsPage;

/// Labeled count list for one visualization series, or a muted line when
/// the series is absent or empty.
pub(crate) fn count_series(
    entries: Option<Vec<(String, u64)>>,
    empty_message: &'static str,
) -> View {
    match entries {
        Some(entries) if !entries.is_empty() => view! {
          <ul class="series">
            {entries
                .into_iter()
                .map(|(label, count)| {
                    view! { <li><span>{label}</span><b>{count.to_string()}</b></li> }
                })
                .collect_view()}
          </ul>
        }
        .into_view(),
        _ => view! { <p class="meta">{empty_message}</p> }.into_view(),
    }
}
