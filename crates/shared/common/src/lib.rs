//! Common utilities shared across the marketplace crates.
//!
//! This crate provides:
//! - The accessor-layer error taxonomy and its database error classification
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
