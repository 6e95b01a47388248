//! Command handlers

use async_trait::async_trait;
use crm_core::{Audit, CrmResult};
use crm_db::Repository;
use crm_models::{CreateCommand, DeleteCommand, DetailsDto, Profile, UpdateCommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::handler::{logged, RequestHandler};

repository_handler!(
    /// Inserts a row stamped with the command's actor
    CreateHandler
);
repository_handler!(
    /// Rewrites the business fields of an active row
    UpdateHandler
);
repository_handler!(
    /// Soft deletes an active row
    DeleteHandler
);

#[async_trait]
impl<T, R> RequestHandler<CreateCommand<T>> for CreateHandler<T, R>
where
    T: Profile,
    R: Repository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME, id = %T::dto_id(&request.dto), actor = %request.actor))]
    async fn handle(
        &self,
        request: CreateCommand<T>,
        token: &CancellationToken,
    ) -> CrmResult<DetailsDto<T::Dto>> {
        info!("Creating row");
        let entity = T::from_dto(request.dto, Audit::created(request.actor));
        let created = logged(self.repository.add(entity, token).await, T::TYPE_NAME, "add")?;
        info!(id = %created.id(), "Created row");
        Ok(created.to_details_dto())
    }
}

#[async_trait]
impl<T, R> RequestHandler<UpdateCommand<T>> for UpdateHandler<T, R>
where
    T: Profile,
    R: Repository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME, id = %T::dto_id(&request.dto), actor = %request.actor))]
    async fn handle(
        &self,
        request: UpdateCommand<T>,
        token: &CancellationToken,
    ) -> CrmResult<Option<DetailsDto<T::Dto>>> {
        info!("Updating row");
        // The repository keeps the stored created stamp; only modified_* is taken from here
        let entity = T::from_dto(request.dto, Audit::created(request.actor));
        let updated = logged(
            self.repository.update(entity, token).await,
            T::TYPE_NAME,
            "update",
        )?;

        match updated {
            Some(row) => {
                info!("Updated row");
                Ok(Some(row.to_details_dto()))
            }
            None => {
                warn!("Nothing to update, row is absent or inactive");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<T, R> RequestHandler<DeleteCommand<T>> for DeleteHandler<T, R>
where
    T: Profile,
    R: Repository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME, id = %request.id, actor = %request.actor))]
    async fn handle(&self, request: DeleteCommand<T>, token: &CancellationToken) -> CrmResult<bool> {
        info!("Deleting row");
        let deleted = logged(
            self.repository.delete(request.id, &request.actor, token).await,
            T::TYPE_NAME,
            "delete",
        )?;

        if deleted {
            info!("Deleted row");
        } else {
            warn!("Nothing to delete, row is absent or inactive");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mediator;
    use crm_contracts::CreateContract;
    use crm_core::{CrmError, PagedResult, PaginationParams};
    use crm_db::{MemoryRepository, RepositoryResult};
    use crm_models::{
        Activity, ActivityDto, Company, CreateActivityCommand, DeleteInvoiceStatusCommand,
        InvoiceStatus,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;
    use uuid::Uuid;

    /// Counts every repository call and stores nothing
    #[derive(Default)]
    struct RecordingRepository {
        calls: AtomicUsize,
    }

    impl RecordingRepository {
        fn record(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Repository<Activity> for RecordingRepository {
        async fn get_all(&self, _token: &CancellationToken) -> RepositoryResult<Vec<Activity>> {
            self.record();
            Ok(Vec::new())
        }

        async fn get_page(
            &self,
            pagination: PaginationParams,
            _token: &CancellationToken,
        ) -> RepositoryResult<PagedResult<Activity>> {
            self.record();
            Ok(PagedResult::empty(pagination))
        }

        async fn get_by_id(&self, _id: Uuid, _token: &CancellationToken) -> RepositoryResult<Option<Activity>> {
            self.record();
            Ok(None)
        }

        async fn add(&self, entity: Activity, _token: &CancellationToken) -> RepositoryResult<Activity> {
            self.record();
            Ok(entity)
        }

        async fn update(&self, _entity: Activity, _token: &CancellationToken) -> RepositoryResult<Option<Activity>> {
            self.record();
            Ok(None)
        }

        async fn delete(&self, _id: Uuid, _modified_by: &str, _token: &CancellationToken) -> RepositoryResult<bool> {
            self.record();
            Ok(false)
        }

        async fn exists(&self, _id: Uuid, _token: &CancellationToken) -> RepositoryResult<bool> {
            self.record();
            Ok(false)
        }
    }

    fn activity_dto(id: Uuid) -> ActivityDto {
        ActivityDto {
            id,
            subject: "Kick-off call".into(),
            description: None,
            activity_status_id: None,
            company_id: None,
            owner_id: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_with_nil_id_never_reaches_repository() {
        let repository = Arc::new(RecordingRepository::default());
        let mut mediator = Mediator::new();
        mediator
            .register::<CreateActivityCommand, _>(CreateHandler::<Activity, _>::new(repository.clone()))
            .validate_with::<CreateActivityCommand, _>(CreateContract::<Activity>::new());

        let err = mediator
            .send(CreateActivityCommand::new(activity_dto(Uuid::nil())), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            CrmError::Validation(errors) => {
                assert!(errors.messages().contains(&"Activity ID is required".to_string()));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_stamps_actor() {
        let repository = Arc::new(MemoryRepository::<Activity>::new());
        let handler = CreateHandler::<Activity, _>::new(repository.clone());
        let id = Uuid::new_v4();

        let details = handler
            .handle(
                CreateActivityCommand::new(activity_dto(id)).by("alice"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(details.dto.id, id);
        assert_eq!(details.audit.created_by, "alice");
        assert_eq!(details.audit.modified_by, "alice");
        assert_eq!(details.audit.created_date, details.audit.modified_date);
        assert!(details.audit.active);
        assert_eq!(repository.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_created_stamp() {
        let token = CancellationToken::new();
        let repository = Arc::new(MemoryRepository::<Company>::new());
        let created = repository.add(Company::new("Initech"), &token).await.unwrap();

        let mut dto = created.to_dto();
        dto.name = "Initrode".into();
        let details = UpdateHandler::<Company, _>::new(repository.clone())
            .handle(UpdateCommand::<Company>::new(dto).by("bob"), &token)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(details.dto.name, "Initrode");
        assert_eq!(details.audit.created_by, created.audit.created_by);
        assert_eq!(details.audit.created_date, created.audit.created_date);
        assert_eq!(details.audit.modified_by, "bob");
        assert!(details.audit.modified_date > created.audit.modified_date);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_none() {
        let repository = Arc::new(MemoryRepository::<Company>::new());
        let dto = Company::new("Ghost").to_dto();

        let result = UpdateHandler::<Company, _>::new(repository.clone())
            .handle(UpdateCommand::<Company>::new(dto), &CancellationToken::new())
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(repository.snapshot().await.is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_delete_absent_lookup_row_writes_nothing() {
        let token = CancellationToken::new();
        let existing = InvoiceStatus::new("Paid", 1);
        let repository = Arc::new(MemoryRepository::with_rows(vec![existing.clone()]));
        let handler = DeleteHandler::<InvoiceStatus, _>::new(repository.clone());

        let deleted = handler
            .handle(DeleteInvoiceStatusCommand::new(Uuid::new_v4()), &token)
            .await
            .unwrap();

        assert!(!deleted);
        assert_eq!(repository.snapshot().await, vec![existing]);
        assert!(logs_contain("Nothing to delete"));
    }

    #[tokio::test]
    async fn test_delete_deactivates_and_records_actor() {
        let token = CancellationToken::new();
        let repository = Arc::new(MemoryRepository::<Company>::new());
        let created = repository.add(Company::new("Hooli"), &token).await.unwrap();

        let deleted = DeleteHandler::<Company, _>::new(repository.clone())
            .handle(DeleteCommand::<Company>::new(created.id).by("carol"), &token)
            .await
            .unwrap();

        assert!(deleted);
        let rows = repository.snapshot().await;
        assert!(!rows[0].audit.active);
        assert_eq!(rows[0].audit.modified_by, "carol");
        assert!(repository.get_by_id(created.id, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_repository_failure_surfaces_as_crm_error() {
        let token = CancellationToken::new();
        token.cancel();
        let repository = Arc::new(MemoryRepository::<Company>::new());

        let err = DeleteHandler::<Company, _>::new(repository)
            .handle(DeleteCommand::<Company>::new(Uuid::new_v4()), &token)
            .await
            .unwrap_err();

        assert!(matches!(err, CrmError::Cancelled));
    }
}
