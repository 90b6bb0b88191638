//! HTTP API for cmdgen.
//!
//! ## Endpoints
//!
//! - `POST /generate` - Generate a shell command for a task (plain-text body)
//! - `GET /health` - Health check

pub mod error;
mod generate;
mod routes;
mod safety;
pub mod types;

pub use routes::{router, serve, AppState};
