//! Shared types, errors, and configuration for Expensebook.
//!
//! This crate provides common types used across all other crates:
//! - Fiscal-ordered `Month` enum
//! - Typed IDs for backend record references
//! - Two-decimal amount formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
