//! HTTP API Client
//!
//! Functions for communicating with the school REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// Local storage key holding an API base override
const API_URL_KEY: &str = "mergington_api_url";

/// Shown when the server rejects a request without a detail string
pub const GENERIC_ERROR: &str = "An error occurred";

/// Get the API base URL from local storage, falling back to the page origin
pub fn get_api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };

    let stored = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());

    let url = match stored {
        Some(url) => url,
        None => window.location().origin().unwrap_or_default(),
    };
    url.trim_end_matches('/').to_string()
}

// ============ Types ============

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity; negative when the roster is over the limit
    pub fn spots_left(&self) -> i64 {
        self.max_participants as i64 - self.participants.len() as i64
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub student_email: String,
}

#[derive(Debug, serde::Serialize)]
struct NewTodo<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    due_date: Option<&'a str>,
    student_email: &'a str,
}

#[derive(Debug, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Why a request produced no usable result
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// No response, or a success body that did not decode
    Network(String),
    /// Non-2xx status with the server's `detail`, when it was a string
    Rejected(Option<String>),
}

impl ApiFailure {
    /// Text for the status region. Network failures use the operation's fixed text.
    pub fn message(&self, network_text: &str) -> String {
        match self {
            ApiFailure::Network(_) => network_text.to_string(),
            ApiFailure::Rejected(Some(detail)) => detail.clone(),
            ApiFailure::Rejected(None) => GENERIC_ERROR.to_string(),
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiFailure::Network(e) => write!(f, "{}", e),
            ApiFailure::Rejected(detail) => {
                write!(f, "rejected: {}", detail.as_deref().unwrap_or(GENERIC_ERROR))
            }
        }
    }
}

/// String `detail` of an error body. Validation errors carry a list and count as absent.
pub fn detail_of(body: &serde_json::Value) -> Option<String> {
    body.get("detail")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Decode the activity object in the order the server listed it
pub fn decode_catalog(
    map: serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<(String, Activity)>, serde_json::Error> {
    map.into_iter()
        .map(|(name, value)| Ok((name, serde_json::from_value(value)?)))
        .collect()
}

fn encode(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

fn network(e: gloo_net::Error) -> ApiFailure {
    ApiFailure::Network(format!("Network error: {}", e))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
    if !response.ok() {
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .as_ref()
            .and_then(detail_of);
        return Err(ApiFailure::Rejected(detail));
    }

    response
        .json()
        .await
        .map_err(|e| ApiFailure::Network(format!("Parse error: {}", e)))
}

// ============ Activities ============

/// Fetch every activity in server order
pub async fn fetch_activities() -> Result<Vec<(String, Activity)>, ApiFailure> {
    let response = Request::get(&format!("{}/activities", get_api_base()))
        .send()
        .await
        .map_err(network)?;

    let map: serde_json::Map<String, serde_json::Value> = read_json(response).await?;
    decode_catalog(map).map_err(|e| ApiFailure::Network(format!("Parse error: {}", e)))
}

/// Sign a student up for an activity
pub async fn signup(activity: &str, email: &str) -> Result<MessageResponse, ApiFailure> {
    let url = format!(
        "{}/activities/{}/signup?email={}",
        get_api_base(),
        encode(activity),
        encode(email)
    );

    let response = Request::post(&url).send().await.map_err(network)?;
    read_json(response).await
}

/// Remove a student from an activity
pub async fn unregister(activity: &str, email: &str) -> Result<MessageResponse, ApiFailure> {
    let url = format!(
        "{}/activities/{}/unregister?email={}",
        get_api_base(),
        encode(activity),
        encode(email)
    );

    let response = Request::delete(&url).send().await.map_err(network)?;
    read_json(response).await
}

// ============ Todos ============

/// Fetch the todos owned by `email`
pub async fn fetch_todos(email: &str) -> Result<Vec<Todo>, ApiFailure> {
    let url = format!("{}/todos?email={}", get_api_base(), encode(email));

    let response = Request::get(&url).send().await.map_err(network)?;
    read_json(response).await
}

/// Create body with field values as typed. Empty description is omitted,
/// empty due date is sent as null.
fn new_todo<'a>(email: &'a str, title: &'a str, description: &'a str, due_date: &'a str) -> NewTodo<'a> {
    NewTodo {
        title,
        description: Some(description).filter(|d| !d.is_empty()),
        due_date: Some(due_date).filter(|d| !d.is_empty()),
        student_email: email,
    }
}

/// Create a todo
pub async fn create_todo(
    email: &str,
    title: &str,
    description: &str,
    due_date: &str,
) -> Result<Todo, ApiFailure> {
    let body = new_todo(email, title, description, due_date);

    let response = Request::post(&format!("{}/todos", get_api_base()))
        .json(&body)
        .map_err(|e| ApiFailure::Network(format!("Request build error: {}", e)))?
        .send()
        .await
        .map_err(network)?;

    read_json(response).await
}

/// Set a todo's completed flag
pub async fn set_completed(id: u64, completed: bool) -> Result<Todo, ApiFailure> {
    let response = Request::put(&format!("{}/todos/{}", get_api_base(), id))
        .json(&serde_json::json!({ "completed": completed }))
        .map_err(|e| ApiFailure::Network(format!("Request build error: {}", e)))?
        .send()
        .await
        .map_err(network)?;

    read_json(response).await
}

pub async fn delete_todo(id: u64) -> Result<MessageResponse, ApiFailure> {
    let response = Request::delete(&format!("{}/todos/{}", get_api_base(), id))
        .send()
        .await
        .map_err(network)?;

    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keeps_server_order() {
        let map = serde_json::from_str(
            r#"{
                "Zeta Club": {"description": "z", "schedule": "Mon", "max_participants": 5, "participants": []},
                "Art Club": {"description": "a", "schedule": "Tue", "max_participants": 2, "participants": ["a@x.com", "b@x.com", "c@x.com"]}
            }"#,
        )
        .unwrap();

        let catalog = decode_catalog(map).unwrap();
        let names: Vec<_> = catalog.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Zeta Club", "Art Club"]);
        assert_eq!(catalog[0].1.spots_left(), 5);
        assert_eq!(catalog[1].1.spots_left(), -1);
    }

    #[test]
    fn test_detail_only_when_string() {
        assert_eq!(
            detail_of(&serde_json::json!({"detail": "Already signed up"})),
            Some("Already signed up".to_string())
        );
        assert_eq!(
            detail_of(&serde_json::json!({"detail": [{"loc": ["query", "email"]}]})),
            None
        );
        assert_eq!(detail_of(&serde_json::json!({})), None);
    }

    #[test]
    fn test_failure_messages() {
        let network_text = "Failed to sign up. Please try again.";
        assert_eq!(
            ApiFailure::Network("refused".into()).message(network_text),
            network_text
        );
        assert_eq!(
            ApiFailure::Rejected(Some("Activity not found".into())).message(network_text),
            "Activity not found"
        );
        assert_eq!(ApiFailure::Rejected(None).message(network_text), GENERIC_ERROR);
    }

    #[test]
    fn test_new_todo_body() {
        let body = new_todo("b@x.com", "Essay", "", "");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"title": "Essay", "due_date": null, "student_email": "b@x.com"})
        );

        let body = new_todo("b@x.com", "Essay", "  two pages ", "2025-03-09");
        assert_eq!(body.description, Some("  two pages "));
        assert_eq!(body.due_date, Some("2025-03-09"));
    }
}
