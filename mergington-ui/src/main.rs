//! Mergington High School
//!
//! Browser frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Activity list with rosters, signup and per-participant removal
//! - Personal task list scoped to a student email
//!
//! # Architecture
//!
//! Client-side rendered Leptos application compiled to WebAssembly. It talks
//! to the school API over HTTP and re-fetches a list after every change.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
