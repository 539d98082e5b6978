//! Shared components - common types, errors, and utilities

pub mod types;
pub mod errors;
pub mod utils;
pub mod config;
pub mod logging;
