//! Todo Form Component
//!
//! Committing the email field (blur) switches the list to that student.

use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn TodoForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (email, set_email) = create_signal(String::new());
    let (title, set_title) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (due_date, set_due_date) = create_signal(String::new());

    let on_blur = move |_| spawn_local(state.email_entered(email.get_untracked()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let create = state.create_todo(
            email.get_untracked(),
            title.get_untracked(),
            description.get_untracked(),
            due_date.get_untracked(),
        );

        spawn_local(async move {
            // Email stays so the next task goes to the same student
            if create.await {
                set_title.set(String::new());
                set_description.set(String::new());
                set_due_date.set(String::new());
            }
        });
    };

    view! {
        <form id="todo-form" on:submit=on_submit>
            <div class="form-group">
                <label for="todo-email">"Your Email:"</label>
                <input
                    type="email"
                    id="todo-email"
                    required
                    placeholder="your-email@mergington.edu"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    on:blur=on_blur
                />
            </div>
            <div class="form-group">
                <label for="todo-title">"Task Title:"</label>
                <input
                    type="text"
                    id="todo-title"
                    required
                    prop:value=title
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="todo-description">"Description:"</label>
                <textarea
                    id="todo-description"
                    prop:value=description
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="todo-due-date">"Due Date:"</label>
                <input
                    type="date"
                    id="todo-due-date"
                    prop:value=due_date
                    on:input=move |ev| set_due_date.set(event_target_value(&ev))
                />
            </div>
            <button type="submit">"Add Task"</button>
        </form>
    }
}
