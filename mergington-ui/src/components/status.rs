//! Status Message Component
//!
//! Shows the current success or error message of one view.

use leptos::*;

use crate::state::{StatusKind, StatusMessage};

#[component]
pub fn StatusLine(#[prop(into)] message: Signal<Option<StatusMessage>>) -> impl IntoView {
    move || {
        message.get().map(|message| {
            let class = match message.kind {
                StatusKind::Success => "message success",
                StatusKind::Error => "message error",
            };
            view! { <div class=class>{message.text}</div> }
        })
    }
}
