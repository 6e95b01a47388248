//! # crm-contracts
//!
//! Request validation for CRM RS.
//!
//! Contracts validate a request before its handler runs. Every violated rule
//! is collected in declaration order; nothing short-circuits on the first
//! failure.

pub mod base;
pub mod rules;

pub mod create;
pub mod delete;
pub mod queries;
pub mod update;

mod accounts;
mod catalog;
mod people;
mod sales;

pub use base::*;
pub use create::CreateContract;
pub use delete::DeleteContract;
pub use queries::{GetByIdContract, GetByNameContract, GetPagedContract};
pub use update::UpdateContract;
