//! State Management
//!
//! Global application state and the commands that update it.

pub mod global;

pub use global::{
    provide_global_state, ActivitiesRegion, GlobalState, StatusKind, StatusMessage, TodosRegion,
};
