//! Todo types
//!
//! Todos are scoped to a student email and owned by the server; the client
//! only ever sends create, partial update and delete requests.

use serde::{Deserialize, Serialize};

/// A task as returned by `GET /todos` and the mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw due date as entered, usually `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub student_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Todo {
    /// Description text, treating an empty string as absent
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Due date text, treating an empty string as absent
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref().filter(|d| !d.is_empty())
    }
}

/// Body for `POST /todos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always serialized; `null` when no due date was entered
    #[serde(default)]
    pub due_date: Option<String>,
    pub student_email: String,
}

impl NewTodo {
    pub fn new(student_email: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            student_email: student_email.into(),
        }
    }

    /// Builder method: set the description as typed. Empty input clears it.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    /// Builder method: set the due date as typed. Empty input clears it.
    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = non_empty(due_date.into());
        self
    }
}

/// Body for `PUT /todos/{id}`. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoUpdate {
    /// Update that only sets the completed flag
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Apply this update to a todo, the way the server does
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = Some(description.clone());
        }
        if let Some(due_date) = &self.due_date {
            todo.due_date = Some(due_date.clone());
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
