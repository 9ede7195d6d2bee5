//! API Module
//!
//! HTTP client for the school REST API.

pub mod client;

pub use client::*;
