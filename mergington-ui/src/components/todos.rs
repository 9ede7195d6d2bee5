//! Todo List Component
//!
//! Cards for the current email's tasks, or the placeholder that fits the
//! list's state.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use leptos::*;

use crate::api::Todo;
use crate::components::Loading;
use crate::state::{GlobalState, TodosRegion};

/// en-US `M/D/YYYY` for the calendar date as written. Unparseable input is shown raw.
pub fn format_due_date(raw: &str) -> String {
    let raw = raw.trim();

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        });

    match date {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

#[component]
pub fn TodoList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div id="todos-list">
            {move || match state.todos.get() {
                TodosRegion::Prompt => view! {
                    <p class="no-todos">"Enter your email above to view your tasks"</p>
                }
                .into_view(),
                TodosRegion::Loading => view! { <Loading label="Loading tasks..." /> }.into_view(),
                TodosRegion::Failed => view! {
                    <p class="error">"Failed to load tasks. Please try again later."</p>
                }
                .into_view(),
                TodosRegion::Ready(todos) if todos.is_empty() => view! {
                    <p class="no-todos">"No tasks yet. Add your first task above!"</p>
                }
                .into_view(),
                TodosRegion::Ready(todos) => todos
                    .into_iter()
                    .map(|todo| view! { <TodoCard todo=todo /> })
                    .collect_view(),
            }}
        </div>
    }
}

#[component]
fn TodoCard(todo: Todo) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let id = todo.id;
    let completed = todo.completed;
    let class = if completed { "todo-item completed" } else { "todo-item" };
    let toggle_label = if completed { "Mark Incomplete" } else { "Mark Complete" };

    let description = todo
        .description
        .filter(|d| !d.is_empty())
        .map(|d| view! { <p class="todo-description">{d}</p> });
    let due = todo.due_date.filter(|d| !d.is_empty()).map(|d| {
        view! { <p class="todo-due-date">{format!("Due: {}", format_due_date(&d))}</p> }
    });

    let on_toggle = move |_| spawn_local(state.toggle_todo(id, completed));
    let on_delete = move |_| spawn_local(state.delete_todo(id));

    view! {
        <div class=class>
            <div class="todo-header">
                <h4 class="todo-title">{todo.title}</h4>
            </div>
            {description}
            {due}
            <div class="todo-actions">
                <button class="toggle-btn" on:click=on_toggle>
                    {toggle_label}
                </button>
                <button class="delete-todo-btn" on:click=on_delete>"Delete"</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_date_formats() {
        assert_eq!(format_due_date("2025-03-09"), "3/9/2025");
        assert_eq!(format_due_date("2025-12-31T23:30:00Z"), "12/31/2025");
        assert_eq!(format_due_date("2025-01-01T00:15"), "1/1/2025");
        assert_eq!(format_due_date("next friday"), "next friday");
    }
}
