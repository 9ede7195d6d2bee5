//! Wire types for the school REST API
//!
//! - [`ActivityCatalog`] / [`Activity`]: `GET /activities`
//! - [`Todo`], [`NewTodo`], [`TodoUpdate`]: the `/todos` endpoints
//! - [`MessageResponse`] / [`ErrorBody`]: command acknowledgements and failures

mod activity;
mod todo;

pub use activity::{Activity, ActivityCatalog};
pub use todo::{NewTodo, Todo, TodoUpdate};

use serde::{Deserialize, Serialize};

/// Success acknowledgement for signup, unregister and delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned with non-2xx responses.
///
/// `detail` is usually a string, but validation failures carry a list of
/// problems instead; only the string form is shown to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_ref().and_then(|d| d.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Activity not found"}"#).unwrap();
        assert_eq!(body.detail(), Some("Activity not found"));
    }

    #[test]
    fn test_error_body_validation_detail_is_not_shown() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["query", "email"], "msg": "field required"}]}"#)
                .unwrap();
        assert_eq!(body.detail(), None);
    }
}
