//! UI Components
//!
//! Leptos components for the activities and task views.

pub mod activities;
pub mod loading;
pub mod signup_form;
pub mod status;
pub mod todo_form;
pub mod todos;

pub use activities::ActivityList;
pub use loading::Loading;
pub use signup_form::SignupForm;
pub use status::StatusLine;
pub use todo_form::TodoForm;
pub use todos::TodoList;
