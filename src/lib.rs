pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod upload;

// Re-export key functions for convenience
pub use app::{create_app, init_tracing};
