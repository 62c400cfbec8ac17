//! Shared types, errors, and configuration for Sidegig.
//!
//! This crate provides common types used across all other crates:
//! - Money rounding primitives with decimal precision
//! - Date and clock primitives for injected time
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
