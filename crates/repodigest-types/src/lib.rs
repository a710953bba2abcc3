//! Shared domain types for repodigest.
//!
//! Plain data types and error enums used across the workspace. No IO,
//! no business logic.

pub mod config;
pub mod document;
pub mod error;
pub mod llm;
