//! School API Client
//!
//! The [`Backend`] trait is the seam between the views and the network.
//! [`HttpBackend`] talks to the real REST API; tests swap in an in-memory
//! double.
//!
//! ## Endpoints
//!
//! - `GET /activities`
//! - `POST /activities/{name}/signup?email=...`
//! - `DELETE /activities/{name}/unregister?email=...`
//! - `GET /todos?email=...`
//! - `POST /todos`
//! - `PUT /todos/{id}`
//! - `DELETE /todos/{id}`

mod error;
mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use error::{ClientError, ClientResult};
pub use http::{ClientConfig, HttpBackend};

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{ActivityCatalog, MessageResponse, NewTodo, Todo, TodoUpdate};

/// Operations the school API offers to this client
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch every activity, in server order
    async fn list_activities(&self) -> ClientResult<ActivityCatalog>;

    /// Add `email` to an activity's roster
    async fn signup(&self, activity: &str, email: &str) -> ClientResult<MessageResponse>;

    /// Remove `email` from an activity's roster
    async fn unregister(&self, activity: &str, email: &str) -> ClientResult<MessageResponse>;

    /// Fetch the todos owned by `email`
    async fn list_todos(&self, email: &str) -> ClientResult<Vec<Todo>>;

    async fn create_todo(&self, todo: &NewTodo) -> ClientResult<Todo>;

    async fn update_todo(&self, id: u64, update: &TodoUpdate) -> ClientResult<Todo>;

    async fn delete_todo(&self, id: u64) -> ClientResult<MessageResponse>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn list_activities(&self) -> ClientResult<ActivityCatalog> {
        (**self).list_activities().await
    }

    async fn signup(&self, activity: &str, email: &str) -> ClientResult<MessageResponse> {
        (**self).signup(activity, email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> ClientResult<MessageResponse> {
        (**self).unregister(activity, email).await
    }

    async fn list_todos(&self, email: &str) -> ClientResult<Vec<Todo>> {
        (**self).list_todos(email).await
    }

    async fn create_todo(&self, todo: &NewTodo) -> ClientResult<Todo> {
        (**self).create_todo(todo).await
    }

    async fn update_todo(&self, id: u64, update: &TodoUpdate) -> ClientResult<Todo> {
        (**self).update_todo(id, update).await
    }

    async fn delete_todo(&self, id: u64) -> ClientResult<MessageResponse> {
        (**self).delete_todo(id).await
    }
}
