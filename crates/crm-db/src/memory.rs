//! In-memory repository
//!
//! Same visibility, ordering and audit rules as [`PgRepository`](crate::PgRepository).
//! Used by tests and when the server runs without a database.

use async_trait::async_trait;
use crm_core::{Defaultable, PagedResult, PaginationParams};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::record::{NamedRecord, Record, TotaledRecord};
use crate::repository::{
    cancellable, DefaultRepository, NamedRepository, Repository, RepositoryError,
    RepositoryResult, TotalRepository,
};

pub struct MemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Repository pre-populated with rows, stored as given
    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Every stored row, including soft-deleted ones
    pub async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    async fn active_sorted(&self) -> Vec<T> {
        let mut rows: Vec<T> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|r| r.is_active())
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.sort_key());
        rows
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self, token: &CancellationToken) -> RepositoryResult<Vec<T>> {
        cancellable(token, async { Ok(self.active_sorted().await) }).await
    }

    async fn get_page(
        &self,
        pagination: PaginationParams,
        token: &CancellationToken,
    ) -> RepositoryResult<PagedResult<T>> {
        cancellable(token, async {
            let rows = self.active_sorted().await;
            let total = rows.len() as i64;
            let items = rows
                .into_iter()
                .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(pagination.limit()).unwrap_or(0))
                .collect();
            Ok(PagedResult::new(items, total, pagination))
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid, token: &CancellationToken) -> RepositoryResult<Option<T>> {
        cancellable(token, async {
            let rows = self.rows.read().await;
            Ok(rows.iter().find(|r| r.id() == id && r.is_active()).cloned())
        })
        .await
    }

    async fn add(&self, mut entity: T, token: &CancellationToken) -> RepositoryResult<T> {
        cancellable(token, async {
            if !entity.has_id() {
                entity.set_id(Uuid::new_v4());
            }

            let mut rows = self.rows.write().await;
            if rows.iter().any(|r| r.id() == entity.id()) {
                return Err(RepositoryError::Conflict(format!(
                    "{} with id {} already exists",
                    T::TYPE_NAME,
                    entity.id()
                )));
            }

            let audit = entity.audit_mut();
            audit.modified_date = audit.created_date;
            audit.active = true;

            rows.push(entity.clone());
            Ok(entity)
        })
        .await
    }

    async fn update(&self, mut entity: T, token: &CancellationToken) -> RepositoryResult<Option<T>> {
        cancellable(token, async {
            let mut rows = self.rows.write().await;
            let Some(row) = rows
                .iter_mut()
                .find(|r| r.id() == entity.id() && r.is_active())
            else {
                return Ok(None);
            };

            let incoming = entity.audit().clone();
            let mut audit = row.audit().clone();
            audit.touch_at(incoming.modified_by, incoming.modified_date);
            *entity.audit_mut() = audit;

            *row = entity.clone();
            Ok(Some(entity))
        })
        .await
    }

    async fn delete(
        &self,
        id: Uuid,
        modified_by: &str,
        token: &CancellationToken,
    ) -> RepositoryResult<bool> {
        cancellable(token, async {
            let mut rows = self.rows.write().await;
            match rows.iter_mut().find(|r| r.id() == id && r.is_active()) {
                Some(row) => {
                    row.audit_mut().deactivate(modified_by);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
        .await
    }

    async fn exists(&self, id: Uuid, token: &CancellationToken) -> RepositoryResult<bool> {
        cancellable(token, async {
            let rows = self.rows.read().await;
            Ok(rows.iter().any(|r| r.id() == id && r.is_active()))
        })
        .await
    }
}

#[async_trait]
impl<T: Record + Defaultable> DefaultRepository<T> for MemoryRepository<T> {
    async fn get_default(&self, token: &CancellationToken) -> RepositoryResult<Option<T>> {
        cancellable(token, async {
            let rows = self.active_sorted().await;
            let flagged = rows.iter().find(|r| r.is_default()).cloned();
            Ok(flagged.or_else(|| rows.into_iter().next()))
        })
        .await
    }
}

#[async_trait]
impl<T: NamedRecord> NamedRepository<T> for MemoryRepository<T> {
    async fn get_by_name(
        &self,
        name: &str,
        token: &CancellationToken,
    ) -> RepositoryResult<Option<T>> {
        let needle = name.to_lowercase();
        cancellable(token, async {
            let rows = self.rows.read().await;
            Ok(rows
                .iter()
                .find(|r| r.is_active() && r.name().to_lowercase() == needle)
                .cloned())
        })
        .await
    }
}

#[async_trait]
impl<T: TotaledRecord> TotalRepository<T> for MemoryRepository<T> {
    async fn get_total_for(
        &self,
        group_id: Uuid,
        token: &CancellationToken,
    ) -> RepositoryResult<Decimal> {
        cancellable(token, async {
            let rows = self.rows.read().await;
            Ok(rows
                .iter()
                .filter(|r| r.is_active() && r.group_id() == group_id)
                .map(|r| r.amount())
                .sum())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_core::{now, Audit, Auditable};
    use crm_models::{InvoiceStatus, Payment, Role, User};

    fn token() -> CancellationToken {
        CancellationToken::new()
    }

    #[tokio::test]
    async fn test_add_stamps_created_audit() {
        let repo = MemoryRepository::<Role>::new();
        let mut role = Role::new("Sales Rep");
        role.audit = Audit::created("alice");

        let stored = repo.add(role, &token()).await.unwrap();
        assert_eq!(stored.audit.created_date, stored.audit.modified_date);
        assert_eq!(stored.audit.created_by, "alice");
        assert!(stored.audit.active);
    }

    #[tokio::test]
    async fn test_add_assigns_id_when_nil_and_rejects_duplicates() {
        let repo = MemoryRepository::<Role>::new();
        let mut role = Role::new("Admin");
        role.id = Uuid::nil();

        let stored = repo.add(role, &token()).await.unwrap();
        assert!(!stored.id.is_nil());

        let duplicate = repo.add(stored.clone(), &token()).await;
        assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_soft_deleted_rows_are_hidden() {
        let repo = MemoryRepository::<Role>::new();
        let kept = repo.add(Role::new("Kept"), &token()).await.unwrap();
        let gone = repo.add(Role::new("Gone"), &token()).await.unwrap();

        assert!(repo.delete(gone.id, "bob", &token()).await.unwrap());

        let all = repo.get_all(&token()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, kept.id);
        assert!(repo.get_by_id(gone.id, &token()).await.unwrap().is_none());
        assert!(!repo.exists(gone.id, &token()).await.unwrap());
        assert!(repo.exists(kept.id, &token()).await.unwrap());

        let stored = repo.snapshot().await;
        let row = stored.iter().find(|r| r.id == gone.id).unwrap();
        assert!(!row.is_active());
        assert_eq!(row.audit.modified_by, "bob");
    }

    #[tokio::test]
    async fn test_delete_missing_row_writes_nothing() {
        let repo = MemoryRepository::<Role>::new();
        let role = repo.add(Role::new("Only"), &token()).await.unwrap();
        let before = repo.snapshot().await;

        assert!(!repo.delete(Uuid::new_v4(), "bob", &token()).await.unwrap());
        assert_eq!(repo.snapshot().await, before);

        assert!(repo.delete(role.id, "bob", &token()).await.unwrap());
        let after_first = repo.snapshot().await;
        assert!(!repo.delete(role.id, "carol", &token()).await.unwrap());
        assert_eq!(repo.snapshot().await, after_first);
    }

    #[tokio::test]
    async fn test_update_preserves_created_and_advances_modified() {
        let repo = MemoryRepository::<Role>::new();
        let at = now();
        let mut role = Role::new("Support");
        role.audit = Audit::created_at("alice", at);
        let stored = repo.add(role, &token()).await.unwrap();

        let mut changed = stored.clone();
        changed.name = "Customer Support".into();
        changed.audit = Audit::created_at("mallory", at);
        changed.audit.modified_by = "bob".into();

        let updated = repo.update(changed, &token()).await.unwrap().unwrap();
        assert_eq!(updated.name, "Customer Support");
        assert_eq!(updated.audit.created_by, "alice");
        assert_eq!(updated.audit.created_date, at);
        assert_eq!(updated.audit.modified_by, "bob");
        assert!(updated.audit.modified_date > stored.audit.modified_date);

        let mut again = updated.clone();
        again.audit = Audit::created_at("bob", at);
        let second = repo.update(again, &token()).await.unwrap().unwrap();
        assert!(second.audit.modified_date > updated.audit.modified_date);
    }

    #[tokio::test]
    async fn test_update_missing_or_inactive_returns_none() {
        let repo = MemoryRepository::<Role>::new();
        assert!(repo.update(Role::new("Nope"), &token()).await.unwrap().is_none());

        let role = repo.add(Role::new("Temp"), &token()).await.unwrap();
        repo.delete(role.id, "bob", &token()).await.unwrap();
        assert!(repo.update(role, &token()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookups_ordered_by_ordinal() {
        let repo = MemoryRepository::with_rows(vec![
            InvoiceStatus::new("Paid", 3),
            InvoiceStatus::new("Draft", 1),
            InvoiceStatus::new("Sent", 2),
        ]);

        let names: Vec<String> = repo
            .get_all(&token())
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Draft", "Sent", "Paid"]);
    }

    #[tokio::test]
    async fn test_get_default() {
        let repo = MemoryRepository::with_rows(vec![
            InvoiceStatus::new("Sent", 2),
            InvoiceStatus::new("Draft", 1),
        ]);
        let fallback = repo.get_default(&token()).await.unwrap().unwrap();
        assert_eq!(fallback.name, "Draft");

        let flagged = InvoiceStatus::new("Sent", 2).with_default(true);
        let repo = MemoryRepository::with_rows(vec![InvoiceStatus::new("Draft", 1), flagged]);
        let default = repo.get_default(&token()).await.unwrap().unwrap();
        assert_eq!(default.name, "Sent");
    }

    #[tokio::test]
    async fn test_get_by_name_is_case_insensitive() {
        let repo = MemoryRepository::<User>::new();
        repo.add(User::new("JDoe", "jdoe@example.test"), &token())
            .await
            .unwrap();

        let found = repo.get_by_name("jdoe", &token()).await.unwrap();
        assert_eq!(found.unwrap().username, "JDoe");
        assert!(repo.get_by_name("nobody", &token()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_total_for_invoice_skips_inactive_payments() {
        let invoice_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let repo = MemoryRepository::<Payment>::new();

        repo.add(Payment::new(invoice_id, Decimal::new(1000, 2), date), &token())
            .await
            .unwrap();
        repo.add(Payment::new(invoice_id, Decimal::new(550, 2), date), &token())
            .await
            .unwrap();
        let voided = repo
            .add(Payment::new(invoice_id, Decimal::new(9999, 2), date), &token())
            .await
            .unwrap();
        repo.add(Payment::new(Uuid::new_v4(), Decimal::new(1, 0), date), &token())
            .await
            .unwrap();
        repo.delete(voided.id, "bob", &token()).await.unwrap();

        let total = repo.get_total_for(invoice_id, &token()).await.unwrap();
        assert_eq!(total, Decimal::new(1550, 2));
        assert_eq!(
            repo.get_total_for(Uuid::new_v4(), &token()).await.unwrap(),
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_paging() {
        let repo = MemoryRepository::<Role>::new();
        for name in ["a", "b", "c", "d", "e"] {
            repo.add(Role::new(name), &token()).await.unwrap();
        }

        let page = repo
            .get_page(PaginationParams::new(2, 2), &token())
            .await
            .unwrap();
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        let names: Vec<_> = page.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "d"]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let repo = MemoryRepository::<Role>::new();
        repo.add(Role::new("a"), &token()).await.unwrap();

        let page = repo
            .get_page(PaginationParams::new(i64::MAX, 100), &token())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 1);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts() {
        let repo = MemoryRepository::<Role>::new();
        let token = CancellationToken::new();
        token.cancel();

        let result = repo.add(Role::new("Late"), &token).await;
        assert!(matches!(result, Err(RepositoryError::Cancelled)));
        assert!(repo.snapshot().await.is_empty());
    }
}
