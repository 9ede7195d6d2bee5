//! Activity List Component
//!
//! Cards for every activity in server order, each with its roster and a
//! removal control per participant.

use leptos::*;

use crate::api::Activity;
use crate::components::Loading;
use crate::state::{ActivitiesRegion, GlobalState};

#[component]
pub fn ActivityList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div id="activities-list">
            {move || match state.activities.get() {
                ActivitiesRegion::Loading => {
                    view! { <Loading label="Loading activities..." /> }.into_view()
                }
                ActivitiesRegion::Failed => view! {
                    <p>"Failed to load activities. Please try again later."</p>
                }
                .into_view(),
                ActivitiesRegion::Ready(catalog) => catalog
                    .into_iter()
                    .map(|(name, activity)| view! { <ActivityCard name=name activity=activity /> })
                    .collect_view(),
            }}
        </div>
    }
}

#[component]
fn ActivityCard(name: String, activity: Activity) -> impl IntoView {
    let spots_left = activity.spots_left();

    let roster = if activity.participants.is_empty() {
        view! { <p class="no-participants">"No participants yet"</p> }.into_view()
    } else {
        view! {
            <h5>"Participants:"</h5>
            <ul class="participants-list">
                {activity
                    .participants
                    .iter()
                    .map(|email| view! { <ParticipantRow activity=name.clone() email=email.clone() /> })
                    .collect_view()}
            </ul>
        }
        .into_view()
    };

    view! {
        <div class="activity-card">
            <h4>{name.clone()}</h4>
            <p>{activity.description}</p>
            <p><strong>"Schedule: "</strong>{activity.schedule}</p>
            <p><strong>"Availability: "</strong>{format!("{} spots left", spots_left)}</p>
            <div class="participants-section">
                {roster}
            </div>
        </div>
    }
}

#[component]
fn ParticipantRow(activity: String, email: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let label = email.clone();

    let on_remove = move |_| {
        let activity = activity.clone();
        let email = email.clone();
        spawn_local(async move {
            state.unregister(activity, email).await;
        });
    };

    view! {
        <li class="participant-item">
            <span class="participant-email">{label}</span>
            <button class="delete-btn" title="Unregister" on:click=on_remove>"✕"</button>
        </li>
    }
}
