//! # cmdgen
//!
//! Turns a natural-language task description into a single shell command.
//!
//! This library provides:
//! - An HTTP API (`POST /generate`) that validates the task and streams the
//!   model output back as plain text
//! - A streaming client for OpenAI-compatible chat completion APIs
//! - An allow-list filter applied to the finished command before it reaches
//!   the caller
//!
//! ## Architecture
//!
//! 1. Validate the request body and build the system prompt
//! 2. Start a streaming completion and relay fragments in arrival order
//! 3. The safety middleware buffers the finished body, checks the command
//!    prefix against the allow-list, and forwards or rejects it
//!
//! The allow-list is a prefix heuristic, not a sandbox. Generated commands
//! are never executed by this service.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cmdgen::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod api;
pub mod command;
pub mod config;
pub mod llm;

pub use config::Config;
