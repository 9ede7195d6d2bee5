//! Global Application State
//!
//! Reactive state for the two views plus the commands that change it. Every
//! command issues one request and, when the server accepts it, re-fetches the
//! affected list. Overlapping requests are not coordinated; the last response
//! to land wins.

use leptos::*;

use crate::api::{self, Activity, ApiFailure, Todo};

pub const ACTIVITY_MESSAGE_MS: u32 = 5000;
pub const TODO_MESSAGE_MS: u32 = 5000;
pub const TODO_DELETE_MESSAGE_MS: u32 = 3000;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

#[derive(Clone, Debug, PartialEq)]
pub enum ActivitiesRegion {
    Loading,
    Ready(Vec<(String, Activity)>),
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TodosRegion {
    /// No email entered yet
    Prompt,
    Loading,
    Ready(Vec<Todo>),
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// One transient message. `id` ties it to the timer that hides it.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub id: u64,
    pub kind: StatusKind,
    pub text: String,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    pub activities: RwSignal<ActivitiesRegion>,
    pub todos: RwSignal<TodosRegion>,
    /// Email the todo commands are scoped to
    pub current_email: RwSignal<String>,
    pub activity_status: RwSignal<Option<StatusMessage>>,
    pub todo_status: RwSignal<Option<StatusMessage>>,
    next_message_id: RwSignal<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        activities: create_rw_signal(ActivitiesRegion::Loading),
        todos: create_rw_signal(TodosRegion::Prompt),
        current_email: create_rw_signal(String::new()),
        activity_status: create_rw_signal(None),
        todo_status: create_rw_signal(None),
        next_message_id: create_rw_signal(0),
    };

    provide_context(state);
    state
}

fn log_error(context: &str, failure: &ApiFailure) {
    web_sys::console::error_1(&format!("{}: {}", context, failure).into());
}

impl GlobalState {
    /// Replace `slot` with a new message and hide it after `ttl_ms`, unless
    /// a newer message has taken its place by then
    fn show(&self, slot: RwSignal<Option<StatusMessage>>, kind: StatusKind, text: String, ttl_ms: u32) {
        let id = self.next_message_id.get_untracked() + 1;
        self.next_message_id.set(id);
        slot.set(Some(StatusMessage { id, kind, text }));

        gloo_timers::callback::Timeout::new(ttl_ms, move || {
            let current = slot.with_untracked(|message| message.as_ref().map(|m| m.id));
            if current == Some(id) {
                slot.set(None);
            }
        })
        .forget();
    }

    fn report(
        &self,
        slot: RwSignal<Option<StatusMessage>>,
        failure: &ApiFailure,
        network_text: &str,
        ttl_ms: u32,
    ) {
        match failure {
            ApiFailure::Network(_) => log_error(network_text, failure),
            ApiFailure::Rejected(_) => web_sys::console::warn_1(&failure.to_string().into()),
        }
        self.show(slot, StatusKind::Error, failure.message(network_text), ttl_ms);
    }

    // ============ Activities ============

    pub async fn load_activities(self) {
        match api::fetch_activities().await {
            Ok(catalog) => self.activities.set(ActivitiesRegion::Ready(catalog)),
            Err(failure) => {
                log_error("Error fetching activities", &failure);
                self.activities.set(ActivitiesRegion::Failed);
            }
        }
    }

    /// Returns true when the server accepted the signup
    pub async fn signup(self, activity: String, email: String) -> bool {
        let result = api::signup(&activity, &email).await;
        self.finish_activity_command(result, "Failed to sign up. Please try again.")
            .await
    }

    pub async fn unregister(self, activity: String, email: String) -> bool {
        let result = api::unregister(&activity, &email).await;
        self.finish_activity_command(result, "Failed to unregister. Please try again.")
            .await
    }

    async fn finish_activity_command(
        self,
        result: Result<api::MessageResponse, ApiFailure>,
        network_text: &str,
    ) -> bool {
        match result {
            Ok(response) => {
                self.show(
                    self.activity_status,
                    StatusKind::Success,
                    response.message,
                    ACTIVITY_MESSAGE_MS,
                );
                self.load_activities().await;
                true
            }
            Err(failure) => {
                self.report(self.activity_status, &failure, network_text, ACTIVITY_MESSAGE_MS);
                false
            }
        }
    }

    // ============ Todos ============

    /// Blank email shows the prompt without a request
    pub async fn load_todos(self, email: String) {
        if email.is_empty() {
            self.todos.set(TodosRegion::Prompt);
            return;
        }

        if matches!(self.todos.get_untracked(), TodosRegion::Prompt) {
            self.todos.set(TodosRegion::Loading);
        }

        match api::fetch_todos(&email).await {
            Ok(todos) => self.todos.set(TodosRegion::Ready(todos)),
            Err(failure) => {
                log_error("Error fetching todos", &failure);
                self.todos.set(TodosRegion::Failed);
            }
        }
    }

    /// Email field committed (blur)
    pub async fn email_entered(self, email: String) {
        if email.is_empty() {
            return;
        }
        self.current_email.set(email.clone());
        self.load_todos(email).await;
    }

    pub async fn create_todo(
        self,
        email: String,
        title: String,
        description: String,
        due_date: String,
    ) -> bool {
        match api::create_todo(&email, &title, &description, &due_date).await {
            Ok(_) => {
                self.current_email.set(email.clone());
                self.show(
                    self.todo_status,
                    StatusKind::Success,
                    "Task added successfully!".to_string(),
                    TODO_MESSAGE_MS,
                );
                self.load_todos(email).await;
                true
            }
            Err(failure) => {
                self.report(
                    self.todo_status,
                    &failure,
                    "Failed to add task. Please try again.",
                    TODO_MESSAGE_MS,
                );
                false
            }
        }
    }

    pub async fn toggle_todo(self, id: u64, completed: bool) {
        match api::set_completed(id, !completed).await {
            Ok(_) => self.load_todos(self.current_email.get_untracked()).await,
            Err(failure) => self.report(
                self.todo_status,
                &failure,
                "Failed to update task. Please try again.",
                TODO_MESSAGE_MS,
            ),
        }
    }

    /// Deletes after the user confirms; declining sends nothing
    pub async fn delete_todo(self, id: u64) {
        if !confirm(DELETE_PROMPT) {
            return;
        }

        match api::delete_todo(id).await {
            Ok(_) => {
                self.show(
                    self.todo_status,
                    StatusKind::Success,
                    "Task deleted successfully!".to_string(),
                    TODO_DELETE_MESSAGE_MS,
                );
                self.load_todos(self.current_email.get_untracked()).await;
            }
            Err(failure) => self.report(
                self.todo_status,
                &failure,
                "Failed to delete task. Please try again.",
                TODO_MESSAGE_MS,
            ),
        }
    }
}

fn confirm(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}

