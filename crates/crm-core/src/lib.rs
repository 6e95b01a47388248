//! # crm-core
//!
//! Core types, traits, and utilities for CRM RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types and the ordered validation error list
//! - Result type aliases
//! - Core traits (Entity, Identifiable, Auditable)
//! - Audit block shared by every entity
//! - Paging types and the API response envelope
//! - Configuration types

pub mod config;
pub mod envelope;
pub mod error;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod types;

pub use envelope::*;
pub use error::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use types::*;
