//! HTTP implementation of [`Backend`] on top of `reqwest`

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{Backend, ClientError, ClientResult};
use crate::models::{ActivityCatalog, ErrorBody, MessageResponse, NewTodo, Todo, TodoUpdate};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. "http://localhost:8000"
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// REST client for the school API
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL for a per-activity command; the name is encoded as one path segment
    fn activity_url(&self, activity: &str, action: &str) -> String {
        self.url(&format!(
            "/activities/{}/{}",
            urlencoding::encode(activity),
            action
        ))
    }
}

/// Decode a response body, turning non-2xx statuses into [`ClientError::Api`]
async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::from_reqwest);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.detail().map(str::to_string));

    tracing::debug!(status = status.as_u16(), ?detail, "request rejected");

    Err(ClientError::Api {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_activities(&self) -> ClientResult<ActivityCatalog> {
        let url = self.url("/activities");
        tracing::debug!(%url, "GET activities");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json(response).await
    }

    async fn signup(&self, activity: &str, email: &str) -> ClientResult<MessageResponse> {
        let url = self.activity_url(activity, "signup");
        tracing::debug!(%url, email, "POST signup");

        let response = self
            .client
            .post(&url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json(response).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> ClientResult<MessageResponse> {
        let url = self.activity_url(activity, "unregister");
        tracing::debug!(%url, email, "DELETE unregister");

        let response = self
            .client
            .delete(&url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json(response).await
    }

    async fn list_todos(&self, email: &str) -> ClientResult<Vec<Todo>> {
        let url = self.url("/todos");
        tracing::debug!(%url, email, "GET todos");

        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json(response).await
    }

    async fn create_todo(&self, todo: &NewTodo) -> ClientResult<Todo> {
        let url = self.url("/todos");
        tracing::debug!(%url, title = %todo.title, "POST todo");

        let response = self
            .client
            .post(&url)
            .json(todo)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json(response).await
    }

    async fn update_todo(&self, id: u64, update: &TodoUpdate) -> ClientResult<Todo> {
        let url = self.url(&format!("/todos/{}", id));
        tracing::debug!(%url, ?update, "PUT todo");

        let response = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json(response).await
    }

    async fn delete_todo(&self, id: u64) -> ClientResult<MessageResponse> {
        let url = self.url(&format!("/todos/{}", id));
        tracing::debug!(%url, "DELETE todo");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new(ClientConfig {
            base_url: "http://school.test/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(backend.base_url(), "http://school.test");
        assert_eq!(backend.url("/activities"), "http://school.test/activities");
    }

    #[test]
    fn test_activity_name_is_one_path_segment() {
        let backend = HttpBackend::new(ClientConfig::default()).unwrap();

        assert_eq!(
            backend.activity_url("Chess Club", "signup"),
            "http://localhost:8000/activities/Chess%20Club/signup"
        );
        assert_eq!(
            backend.activity_url("Art/Design", "unregister"),
            "http://localhost:8000/activities/Art%2FDesign/unregister"
        );
    }
}
