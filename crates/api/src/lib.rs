//! HTTP API layer for campus-rs.
//!
//! This crate provides the REST API and the chat relay:
//!
//! - **Endpoints**: JSON REST under `/api`
//! - **Extractors**: Token authentication
//! - **Middleware**: Auth, shared application state
//! - **Chat**: Room-keyed WebSocket broadcast
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod chat;
pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use chat::{chat_handler, ChatState};
pub use endpoints::router;
