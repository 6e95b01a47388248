//! # crm-db
//!
//! Database layer for CRM RS.
//!
//! This crate provides:
//! - The connection factory over a PostgreSQL pool
//! - The repository contract and its entity-specific extensions
//! - A generic PostgreSQL repository driven by each entity's record description
//! - An in-memory repository with the same semantics
//! - Backends that hand out repositories by capability

pub mod backend;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod record;
pub mod repository;

// Record descriptions per table
pub mod activities;
pub mod companies;
pub mod invoices;
pub mod lookups;
pub mod payments;
pub mod products;
pub mod quotes;
pub mod roles;
pub mod sales_orders;
pub mod teams;
pub mod users;

pub use backend::{Backend, MemoryBackend, PgBackend};
pub use memory::MemoryRepository;
pub use pool::{Database, DatabaseConfig, PoolStats};
pub use postgres::PgRepository;
pub use record::{NamedRecord, Record, SortKey, SqlValue, Statements, TotaledRecord};
pub use repository::{
    cancellable, DefaultRepository, NamedRepository, Repository, RepositoryError,
    RepositoryResult, TotalRepository,
};
