//! Repository factories
//!
//! A [`Backend`] hands out repositories by capability. Asking twice for the
//! same entity yields repositories over the same rows.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crm_core::Defaultable;
use sqlx::PgPool;

use crate::memory::MemoryRepository;
use crate::pool::Database;
use crate::postgres::PgRepository;
use crate::record::{NamedRecord, Record, TotaledRecord};
use crate::repository::{DefaultRepository, NamedRepository, Repository, TotalRepository};

pub trait Backend: Send + Sync {
    fn repository<T: Record>(&self) -> Arc<dyn Repository<T>>;

    fn named<T: NamedRecord>(&self) -> Arc<dyn NamedRepository<T>>;

    fn defaults<T: Record + Defaultable>(&self) -> Arc<dyn DefaultRepository<T>>;

    fn totals<T: TotaledRecord>(&self) -> Arc<dyn TotalRepository<T>>;
}

/// PostgreSQL-backed repositories sharing one pool
#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }
}

impl Backend for PgBackend {
    fn repository<T: Record>(&self) -> Arc<dyn Repository<T>> {
        Arc::new(PgRepository::<T>::new(self.pool.clone()))
    }

    fn named<T: NamedRecord>(&self) -> Arc<dyn NamedRepository<T>> {
        Arc::new(PgRepository::<T>::new(self.pool.clone()))
    }

    fn defaults<T: Record + Defaultable>(&self) -> Arc<dyn DefaultRepository<T>> {
        Arc::new(PgRepository::<T>::new(self.pool.clone()))
    }

    fn totals<T: TotaledRecord>(&self) -> Arc<dyn TotalRepository<T>> {
        Arc::new(PgRepository::<T>::new(self.pool.clone()))
    }
}

/// In-memory repositories, one store per entity type
#[derive(Default)]
pub struct MemoryBackend {
    stores: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store for `T`, created on first use
    pub fn store<T: Record>(&self) -> Arc<MemoryRepository<T>> {
        let mut stores = self.stores.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(MemoryRepository::<T>::new()) as Arc<dyn Any + Send + Sync>);

        match Arc::clone(entry).downcast::<MemoryRepository<T>>() {
            Ok(store) => store,
            // Keyed by TypeId, so the stored value always has type MemoryRepository<T>
            Err(_) => unreachable!("memory store registered under the wrong type"),
        }
    }
}

impl Backend for MemoryBackend {
    fn repository<T: Record>(&self) -> Arc<dyn Repository<T>> {
        self.store::<T>()
    }

    fn named<T: NamedRecord>(&self) -> Arc<dyn NamedRepository<T>> {
        self.store::<T>()
    }

    fn defaults<T: Record + Defaultable>(&self) -> Arc<dyn DefaultRepository<T>> {
        self.store::<T>()
    }

    fn totals<T: TotaledRecord>(&self) -> Arc<dyn TotalRepository<T>> {
        self.store::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_models::{Company, Role};
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_memory_backend_shares_store_per_type() {
        let backend = MemoryBackend::new();
        let token = CancellationToken::new();

        let named = backend.named::<Role>();
        named.add(Role::new("Admin"), &token).await.unwrap();

        let plain = backend.repository::<Role>();
        assert_eq!(plain.get_all(&token).await.unwrap().len(), 1);
        assert!(backend.repository::<Company>().get_all(&token).await.unwrap().is_empty());
    }
}
