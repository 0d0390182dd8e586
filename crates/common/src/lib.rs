//! Shared utilities, configuration, and error handling for the Parents in Tech website API
//!
//! This crate provides common functionality used across the API crates:
//! - Configuration management following 12-factor principles
//! - Layered environment lookup and GitHub credential resolution
//! - Error types and their HTTP responses

pub mod config;
pub mod env;
pub mod error;

pub use config::{Config, ORGANIZATION};
pub use env::{Credential, EnvLayer, LayeredEnv, GITHUB_TOKEN_KEY};
pub use error::{Error, Result};
