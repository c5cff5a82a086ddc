//! # SessionGate API
//!
//! actix-web surface over the credential services: login, registration,
//! renewal, the bearer authentication middleware and the protected routes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
