//! Loading Component

use leptos::*;

/// Spinner with a caption, shown while a list is first fetched
#[component]
pub fn Loading(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="loading">
            <span class="loading-spinner" />
            <p>{label}</p>
        </div>
    }
}
