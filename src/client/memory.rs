//! In-memory backend double for view tests
//!
//! Mirrors the server's rules (duplicate signup, unknown activity, unknown
//! todo) and records every call so tests can assert what was requested.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{Backend, ClientError, ClientResult};
use crate::models::{Activity, ActivityCatalog, MessageResponse, NewTodo, Todo, TodoUpdate};

#[derive(Default)]
struct Inner {
    catalog: ActivityCatalog,
    todos: Vec<Todo>,
    next_id: u64,
    offline: bool,
    calls: Vec<String>,
}

#[derive(Default)]
pub(crate) struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new(catalog: ActivityCatalog) -> Self {
        Self {
            inner: Mutex::new(Inner {
                catalog,
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    pub fn chess_club() -> Self {
        Self::new(ActivityCatalog::new().with(
            "Chess Club",
            Activity::new("Learn strategies", "Fridays", 10).participant("a@x.com"),
        ))
    }

    /// Make every subsequent call fail as if the network were down
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().unwrap().offline = offline;
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn todo(&self, id: u64) -> Option<Todo> {
        self.inner.lock().unwrap().todos.iter().find(|t| t.id == id).cloned()
    }

    pub fn participants(&self, activity: &str) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .catalog
            .get(activity)
            .map(|a| a.participants.clone())
            .unwrap_or_default()
    }

    fn enter(&self, call: String) -> ClientResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.offline {
            return Err(ClientError::Unavailable);
        }
        Ok(inner)
    }
}

fn rejected(status: u16, detail: &str) -> ClientError {
    ClientError::Api {
        status,
        detail: Some(detail.to_string()),
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_activities(&self) -> ClientResult<ActivityCatalog> {
        let inner = self.enter("GET /activities".to_string())?;
        Ok(inner.catalog.clone())
    }

    async fn signup(&self, activity: &str, email: &str) -> ClientResult<MessageResponse> {
        let mut inner = self.enter(format!("POST /activities/{}/signup {}", activity, email))?;
        let entry = inner
            .catalog
            .get_mut(activity)
            .ok_or_else(|| rejected(404, "Activity not found"))?;

        if entry.has_participant(email) {
            return Err(rejected(400, "Student is already signed up"));
        }
        entry.participants.push(email.to_string());

        Ok(MessageResponse {
            message: format!("Signed up {} for {}", email, activity),
        })
    }

    async fn unregister(&self, activity: &str, email: &str) -> ClientResult<MessageResponse> {
        let mut inner = self.enter(format!("DELETE /activities/{}/unregister {}", activity, email))?;
        let entry = inner
            .catalog
            .get_mut(activity)
            .ok_or_else(|| rejected(404, "Activity not found"))?;

        if !entry.has_participant(email) {
            return Err(rejected(400, "Student is not signed up for this activity"));
        }
        entry.participants.retain(|p| p != email);

        Ok(MessageResponse {
            message: format!("Unregistered {} from {}", email, activity),
        })
    }

    async fn list_todos(&self, email: &str) -> ClientResult<Vec<Todo>> {
        let inner = self.enter(format!("GET /todos {}", email))?;
        Ok(inner
            .todos
            .iter()
            .filter(|t| t.student_email == email)
            .cloned()
            .collect())
    }

    async fn create_todo(&self, todo: &NewTodo) -> ClientResult<Todo> {
        let mut inner = self.enter(format!("POST /todos {}", todo.title))?;
        let created = Todo {
            id: inner.next_id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo.due_date.clone(),
            completed: false,
            student_email: todo.student_email.clone(),
            created_at: None,
        };
        inner.next_id += 1;
        inner.todos.push(created.clone());
        Ok(created)
    }

    async fn update_todo(&self, id: u64, update: &TodoUpdate) -> ClientResult<Todo> {
        let mut inner = self.enter(format!("PUT /todos/{}", id))?;
        let todo = inner
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| rejected(404, "Todo not found"))?;
        update.apply(todo);
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: u64) -> ClientResult<MessageResponse> {
        let mut inner = self.enter(format!("DELETE /todos/{}", id))?;
        let index = inner
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| rejected(404, "Todo not found"))?;
        inner.todos.remove(index);
        Ok(MessageResponse {
            message: "Todo deleted successfully".to_string(),
        })
    }
}
