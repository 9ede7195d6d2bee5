//! Todo view
//!
//! Todos are scoped by the current email, which is whatever the user last
//! committed in the email field. Changing it re-scopes every later operation.

use std::time::Duration;

use super::render::{TodoCard, TODOS_EMPTY, TODOS_FAILED, TODOS_PROMPT};
use super::status::StatusBoard;
use super::{failure_text, Confirm, Outcome};
use crate::client::{Backend, ClientError};
use crate::models::{NewTodo, Todo, TodoUpdate};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

const CREATE_FAILED: &str = "Failed to add task. Please try again.";
const TOGGLE_FAILED: &str = "Failed to update task. Please try again.";
const DELETE_FAILED: &str = "Failed to delete task. Please try again.";

/// What the todo list region currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodosRegion {
    /// No email yet
    Prompt,
    /// The email has no todos
    Empty,
    Ready(Vec<Todo>),
    Failed,
}

/// Todo form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub email: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

/// Message lifetimes for the todo status region
#[derive(Debug, Clone, Copy)]
pub struct TodoMessageTtl {
    pub message: Duration,
    pub delete_success: Duration,
}

impl Default for TodoMessageTtl {
    fn default() -> Self {
        Self {
            message: Duration::from_secs(5),
            delete_success: Duration::from_secs(3),
        }
    }
}

pub struct TodoView<B> {
    backend: B,
    region: TodosRegion,
    current_email: Option<String>,
    form: TodoForm,
    status: StatusBoard,
    ttl: TodoMessageTtl,
}

impl<B: Backend> TodoView<B> {
    pub fn new(backend: B, ttl: TodoMessageTtl) -> Self {
        Self {
            backend,
            region: TodosRegion::Prompt,
            current_email: None,
            form: TodoForm::default(),
            status: StatusBoard::new(),
            ttl,
        }
    }

    pub fn region(&self) -> &TodosRegion {
        &self.region
    }

    pub fn current_email(&self) -> Option<&str> {
        self.current_email.as_deref()
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    /// Look up a rendered todo by id
    pub fn todo(&self, id: u64) -> Option<&Todo> {
        match &self.region {
            TodosRegion::Ready(todos) => todos.iter().find(|t| t.id == id),
            _ => None,
        }
    }

    pub fn cards(&self) -> Vec<TodoCard> {
        match &self.region {
            TodosRegion::Ready(todos) => todos.iter().map(TodoCard::new).collect(),
            _ => Vec::new(),
        }
    }

    /// Text rendering of the list region
    pub fn render(&self) -> String {
        let placeholder = match &self.region {
            TodosRegion::Prompt => TODOS_PROMPT,
            TodosRegion::Empty => TODOS_EMPTY,
            TodosRegion::Failed => TODOS_FAILED,
            TodosRegion::Ready(_) => {
                return self.cards().iter().map(|card| card.to_string()).collect();
            }
        };
        format!("{}\n", placeholder)
    }

    /// The email field lost focus. A non-empty value becomes the current
    /// email and loads its todos.
    pub async fn email_entered(&mut self, email: &str) {
        self.form.email = email.to_string();
        if email.is_empty() {
            return;
        }
        self.current_email = Some(email.to_string());
        self.load(Some(email)).await;
    }

    /// Fetch the todos for `email`. A missing or empty email shows the prompt
    /// without calling the backend.
    pub async fn load(&mut self, email: Option<&str>) {
        let email = match email.filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => {
                self.region = TodosRegion::Prompt;
                return;
            }
        };

        match self.backend.list_todos(email).await {
            Ok(todos) if todos.is_empty() => self.region = TodosRegion::Empty,
            Ok(todos) => {
                tracing::debug!(count = todos.len(), %email, "todos loaded");
                self.region = TodosRegion::Ready(todos);
            }
            Err(e) => {
                tracing::error!("Error fetching todos: {}", e);
                self.region = TodosRegion::Failed;
            }
        }
    }

    /// Reload the list for the current email
    pub async fn refresh(&mut self) {
        let email = self.current_email.clone();
        self.load(email.as_deref()).await;
    }

    /// Fill the form and submit it
    pub async fn create(
        &mut self,
        email: &str,
        title: &str,
        description: Option<&str>,
        due_date: Option<&str>,
    ) -> Outcome {
        self.form = TodoForm {
            email: email.to_string(),
            title: title.to_string(),
            description: description.unwrap_or_default().to_string(),
            due_date: due_date.unwrap_or_default().to_string(),
        };
        self.submit_create().await
    }

    /// Submit the todo form. On success the email is kept and becomes the
    /// current email; the other fields are cleared.
    pub async fn submit_create(&mut self) -> Outcome {
        let body = NewTodo::new(self.form.email.clone(), self.form.title.clone())
            .description(self.form.description.clone())
            .due_date(self.form.due_date.clone());

        match self.backend.create_todo(&body).await {
            Ok(todo) => {
                tracing::info!(id = todo.id, email = %todo.student_email, "task added");
                self.status
                    .success("Task added successfully!", self.ttl.message);
                self.form.title.clear();
                self.form.description.clear();
                self.form.due_date.clear();

                let email = body.student_email;
                self.current_email = Some(email.clone());
                self.load(Some(&email)).await;
                Outcome::Completed
            }
            Err(e) => self.report(e, CREATE_FAILED),
        }
    }

    /// Flip a todo's completed flag. On failure the list keeps showing the
    /// old state until the next refresh.
    pub async fn toggle(&mut self, id: u64, currently_completed: bool) -> Outcome {
        let update = TodoUpdate::completed(!currently_completed);

        match self.backend.update_todo(id, &update).await {
            Ok(todo) => {
                tracing::info!(id, completed = todo.completed, "task updated");
                self.refresh().await;
                Outcome::Completed
            }
            Err(e) => self.report(e, TOGGLE_FAILED),
        }
    }

    /// Delete a todo after the user confirms. Declining issues no request.
    pub async fn delete(&mut self, id: u64, confirm: &dyn Confirm) -> Outcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return Outcome::Declined;
        }

        match self.backend.delete_todo(id).await {
            Ok(_) => {
                tracing::info!(id, "task deleted");
                self.status
                    .success("Task deleted successfully!", self.ttl.delete_success);
                self.refresh().await;
                Outcome::Completed
            }
            Err(e) => self.report(e, DELETE_FAILED),
        }
    }

    fn report(&mut self, err: ClientError, network_text: &str) -> Outcome {
        let outcome = Outcome::from_error(&err);
        if outcome == Outcome::Failed {
            tracing::error!("{}: {}", network_text, err);
        } else {
            tracing::warn!("command rejected: {}", err);
        }
        self.status
            .error(failure_text(&err, network_text), Some(self.ttl.message));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::MemoryBackend;
    use crate::view::StatusKind;
    use std::sync::Arc;

    fn view(backend: &Arc<MemoryBackend>) -> TodoView<Arc<MemoryBackend>> {
        TodoView::new(Arc::clone(backend), TodoMessageTtl::default())
    }

    #[tokio::test]
    async fn test_blank_email_shows_prompt_without_request() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);

        view.load(None).await;
        view.load(Some("")).await;
        view.email_entered("").await;

        assert_eq!(view.region(), &TodosRegion::Prompt);
        assert_eq!(view.render().trim(), TODOS_PROMPT);
        assert!(backend.calls().is_empty());
        assert_eq!(view.current_email(), None);
    }

    #[tokio::test]
    async fn test_empty_collection_renders_placeholder() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);

        view.email_entered("s@x.com").await;

        assert_eq!(view.region(), &TodosRegion::Empty);
        assert_eq!(view.render().trim(), TODOS_EMPTY);
        assert_eq!(view.current_email(), Some("s@x.com"));
    }

    #[tokio::test]
    async fn test_create_clears_fields_but_keeps_email() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);

        let outcome = view
            .create("s@x.com", "Essay", Some("Five pages"), Some("2025-03-09"))
            .await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(
            view.form(),
            &TodoForm {
                email: "s@x.com".to_string(),
                ..Default::default()
            }
        );
        assert_eq!(view.current_email(), Some("s@x.com"));
        assert_eq!(view.status().current().unwrap().text, "Task added successfully!");

        let cards = view.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].due.as_deref(), Some("3/9/2025"));
    }

    #[tokio::test]
    async fn test_create_network_failure_keeps_fields() {
        let backend = Arc::new(MemoryBackend::default());
        backend.set_offline(true);
        let mut view = view(&backend);

        let outcome = view.create("s@x.com", "Essay", None, None).await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(view.form().title, "Essay");
        assert_eq!(view.status().current().unwrap().text, CREATE_FAILED);
        assert_eq!(view.current_email(), None);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_server_state() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);
        view.create("s@x.com", "Essay", None, None).await;

        let id = view.cards()[0].id;
        assert!(!backend.todo(id).unwrap().completed);

        assert_eq!(view.toggle(id, false).await, Outcome::Completed);
        assert!(backend.todo(id).unwrap().completed);
        assert!(view.cards()[0].completed);

        let completed = view.todo(id).unwrap().completed;
        assert_eq!(view.toggle(id, completed).await, Outcome::Completed);
        assert!(!backend.todo(id).unwrap().completed);
        assert!(!view.cards()[0].completed);
    }

    #[tokio::test]
    async fn test_toggle_missing_todo_leaves_list_stale() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);
        view.create("s@x.com", "Essay", None, None).await;
        let loads = backend.call_count("GET /todos");

        let outcome = view.toggle(99, false).await;

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(backend.call_count("GET /todos"), loads);
        let message = view.status().current().unwrap();
        assert_eq!(message.kind, StatusKind::Error);
        assert_eq!(message.text, "Todo not found");
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_request() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);
        view.create("s@x.com", "Essay", None, None).await;
        let before = view.region().clone();
        let calls = backend.calls().len();

        let outcome = view.delete(1, &|_: &str| false).await;

        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(backend.calls().len(), calls);
        assert_eq!(view.region(), &before);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);
        view.create("s@x.com", "Essay", None, None).await;

        let outcome = view
            .delete(1, &|prompt: &str| prompt == DELETE_PROMPT)
            .await;

        assert_eq!(outcome, Outcome::Completed);
        assert!(backend.todo(1).is_none());
        assert_eq!(view.region(), &TodosRegion::Empty);
        assert_eq!(view.status().current().unwrap().text, "Task deleted successfully!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_message_is_shorter_lived() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);
        view.create("s@x.com", "Essay", None, None).await;
        view.delete(1, &|_: &str| true).await;

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(view.status().current().is_none());
    }

    #[tokio::test]
    async fn test_switching_email_rescopes() {
        let backend = Arc::new(MemoryBackend::default());
        let mut view = view(&backend);
        view.create("a@x.com", "Mine", None, None).await;

        view.email_entered("b@x.com").await;

        assert_eq!(view.current_email(), Some("b@x.com"));
        assert_eq!(view.region(), &TodosRegion::Empty);
        assert!(backend.calls().contains(&"GET /todos b@x.com".to_string()));
    }

    #[tokio::test]
    async fn test_failed_load_replaces_prompt() {
        let backend = Arc::new(MemoryBackend::default());
        backend.set_offline(true);
        let mut view = view(&backend);
        assert_eq!(view.render().trim(), TODOS_PROMPT);

        view.email_entered("s@x.com").await;

        assert_eq!(view.region(), &TodosRegion::Failed);
        assert_eq!(view.render().trim(), TODOS_FAILED);
        assert_eq!(backend.call_count("GET /todos"), 1);
    }
}
