//! # Mergington
//!
//! Client for the Mergington High School activities API: browse
//! extracurricular activities, sign students up or remove them, and keep a
//! personal task list per student email.
//!
//! ## Modules
//!
//! - [`models`]: wire types for activities and todos
//! - [`client`]: the [`Backend`] seam and its HTTP implementation
//! - [`view`]: read models, command handlers, status messages and rendering
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mergington::client::{ClientConfig, HttpBackend};
//! use mergington::view::ActivitiesView;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(ClientConfig::default())?;
//!     let mut activities = ActivitiesView::new(backend, Duration::from_secs(5));
//!
//!     activities.load().await;
//!     print!("{}", activities.render());
//!
//!     let outcome = activities.signup("Chess Club", "emma@mergington.edu").await;
//!     if let Some(message) = activities.status().current() {
//!         println!("{} ({:?})", message, outcome);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod view;

pub use client::{Backend, ClientConfig, ClientError, ClientResult, HttpBackend};

pub use config::{BackendConfig, Config, ConfigError, LoggingConfig, StatusConfig};

pub use models::{Activity, ActivityCatalog, MessageResponse, NewTodo, Todo, TodoUpdate};

pub use view::{
    ActivitiesRegion, ActivitiesView, ActivityCard, Confirm, Outcome, StatusBoard, StatusKind,
    StatusMessage, TodoCard, TodoView, TodosRegion,
};
