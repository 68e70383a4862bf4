use leptos::*;

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
      <div class="page">
        <h2>"Settings"</h2>
        <section class="panel">
          <p class="meta">"Settings Page (To be implemented)"</p>
        </section>
      </div>
    }
}
