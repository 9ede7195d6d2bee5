//! Signup Form Component

use leptos::*;

use crate::state::{ActivitiesRegion, GlobalState};

/// Email field plus an activity selector fed by the loaded catalog
#[component]
pub fn SignupForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (email, set_email) = create_signal(String::new());
    let (activity, set_activity) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get_untracked();
        let activity_value = activity.get_untracked();

        spawn_local(async move {
            // Rejected signups keep what the user typed
            if state.signup(activity_value, email_value).await {
                set_email.set(String::new());
                set_activity.set(String::new());
            }
        });
    };

    let options = move || match state.activities.get() {
        ActivitiesRegion::Ready(catalog) => catalog
            .into_iter()
            .map(|(name, _)| view! { <option value=name.clone()>{name}</option> })
            .collect_view(),
        _ => ().into_view(),
    };

    view! {
        <form id="signup-form" on:submit=on_submit>
            <div class="form-group">
                <label for="email">"Student Email:"</label>
                <input
                    type="email"
                    id="email"
                    required
                    placeholder="your-email@mergington.edu"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="activity">"Select Activity:"</label>
                <select
                    id="activity"
                    required
                    prop:value=activity
                    on:change=move |ev| set_activity.set(event_target_value(&ev))
                >
                    <option value="">"-- Select an activity --"</option>
                    {options}
                </select>
            </div>
            <button type="submit">"Sign Up"</button>
        </form>
    }
}
