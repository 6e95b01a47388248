//! Feature registration
//!
//! Wires every entity's handlers and contracts into a [`Mediator`].

use std::sync::Arc;

use crm_contracts::{
    CreateContract, DeleteContract, DtoRules, GetByIdContract, GetByNameContract,
    GetPagedContract, UpdateContract,
};
use crm_core::Defaultable;
use crm_db::{Backend, NamedRecord, Record, Repository, TotaledRecord};
use crm_models::{
    AccountType, Activity, ActivityStatus, Company, CreateCommand, DeleteCommand, GetAllQuery,
    GetByIdQuery, GetByNameQuery, GetDefaultQuery, GetPagedQuery, GetTotalQuery, Invoice,
    InvoiceStatus, Payment, PaymentMethod, Product, Quote, Role, SalesOrder, ServiceType, Team,
    UpdateCommand, User,
};

use crate::handlers::{
    CreateHandler, DeleteHandler, GetAllHandler, GetByIdHandler, GetByNameHandler,
    GetDefaultHandler, GetPagedHandler, GetTotalHandler, UpdateHandler,
};
use crate::mediator::Mediator;

/// Register handlers and contracts for every entity
pub fn register_features<B: Backend>(mediator: &mut Mediator, backend: &B) {
    // Accounts
    named::<Company, _>(mediator, backend);
    plain::<Activity, _>(mediator, backend);

    // Sales
    totaled::<Invoice, _>(mediator, backend);
    totaled::<Payment, _>(mediator, backend);
    plain::<Quote, _>(mediator, backend);
    totaled::<SalesOrder, _>(mediator, backend);

    // Catalog
    named::<Product, _>(mediator, backend);

    // People
    named::<User, _>(mediator, backend);
    named::<Role, _>(mediator, backend);
    named::<Team, _>(mediator, backend);

    // Lookups
    lookup::<AccountType, _>(mediator, backend);
    lookup::<ActivityStatus, _>(mediator, backend);
    lookup::<InvoiceStatus, _>(mediator, backend);
    lookup::<PaymentMethod, _>(mediator, backend);
    lookup::<ServiceType, _>(mediator, backend);

    tracing::debug!("Registered request handlers for all entities");
}

fn crud<T, R>(mediator: &mut Mediator, repository: Arc<R>)
where
    T: Record + DtoRules,
    R: Repository<T> + ?Sized + 'static,
{
    mediator
        .register::<GetAllQuery<T>, _>(GetAllHandler::<T, R>::new(repository.clone()))
        .register::<GetPagedQuery<T>, _>(GetPagedHandler::<T, R>::new(repository.clone()))
        .validate_with::<GetPagedQuery<T>, _>(GetPagedContract::<T>::new())
        .register::<GetByIdQuery<T>, _>(GetByIdHandler::<T, R>::new(repository.clone()))
        .validate_with::<GetByIdQuery<T>, _>(GetByIdContract::<T>::new())
        .register::<CreateCommand<T>, _>(CreateHandler::<T, R>::new(repository.clone()))
        .validate_with::<CreateCommand<T>, _>(CreateContract::<T>::new())
        .register::<UpdateCommand<T>, _>(UpdateHandler::<T, R>::new(repository.clone()))
        .validate_with::<UpdateCommand<T>, _>(UpdateContract::<T>::new())
        .register::<DeleteCommand<T>, _>(DeleteHandler::<T, R>::new(repository))
        .validate_with::<DeleteCommand<T>, _>(DeleteContract::<T>::new());
}

fn plain<T, B>(mediator: &mut Mediator, backend: &B)
where
    T: Record + DtoRules,
    B: Backend,
{
    crud::<T, _>(mediator, backend.repository::<T>());
}

fn named<T, B>(mediator: &mut Mediator, backend: &B)
where
    T: NamedRecord + DtoRules,
    B: Backend,
{
    let repository = backend.named::<T>();
    crud::<T, _>(mediator, repository.clone());
    mediator
        .register::<GetByNameQuery<T>, _>(GetByNameHandler::<T, _>::new(repository))
        .validate_with::<GetByNameQuery<T>, _>(GetByNameContract::<T>::new());
}

fn lookup<T, B>(mediator: &mut Mediator, backend: &B)
where
    T: Record + Defaultable + DtoRules,
    B: Backend,
{
    let repository = backend.defaults::<T>();
    crud::<T, _>(mediator, repository.clone());
    mediator.register::<GetDefaultQuery<T>, _>(GetDefaultHandler::<T, _>::new(repository));
}

fn totaled<T, B>(mediator: &mut Mediator, backend: &B)
where
    T: TotaledRecord + DtoRules,
    B: Backend,
{
    let repository = backend.totals::<T>();
    crud::<T, _>(mediator, repository.clone());
    mediator.register::<GetTotalQuery<T>, _>(GetTotalHandler::<T, _>::new(repository));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_core::{CrmError, PaginationParams};
    use crm_db::MemoryBackend;
    use crm_models::{
        DeleteCompanyCommand, GetAllInvoiceStatusesQuery, GetCompanyByIdQuery,
        GetCompanyByNameQuery, GetDefaultInvoiceStatusQuery, GetInvoicePaymentTotalQuery,
        GetPagedCompaniesQuery, Profile,
    };
    use rust_decimal::Decimal;
    use tokio_util::sync::CancellationToken;
    use tracing_test::traced_test;
    use uuid::Uuid;

    fn mediator() -> Mediator {
        let mut mediator = Mediator::new();
        register_features(&mut mediator, &MemoryBackend::new());
        mediator
    }

    #[test]
    fn test_every_entity_is_wired() {
        let mediator = mediator();

        assert!(mediator.handles::<GetAllQuery<Company>>());
        assert!(mediator.handles::<CreateCommand<Activity>>());
        assert!(mediator.handles::<UpdateCommand<Quote>>());
        assert!(mediator.handles::<DeleteCommand<ServiceType>>());
        assert!(mediator.handles::<GetByNameQuery<User>>());
        assert!(mediator.handles::<GetByNameQuery<Team>>());
        assert!(mediator.handles::<GetDefaultQuery<AccountType>>());
        assert!(mediator.handles::<GetTotalQuery<Invoice>>());
        assert!(mediator.handles::<GetTotalQuery<SalesOrder>>());
        assert!(mediator.handles::<GetPagedQuery<Product>>());
    }

    #[tokio::test]
    async fn test_company_lifecycle() {
        let mediator = mediator();
        let token = CancellationToken::new();
        let dto = Company::new("Umbrella Corp").to_dto();
        let id = dto.id;

        let created = mediator
            .send(CreateCommand::<Company>::new(dto).by("alice"), &token)
            .await
            .unwrap();
        assert_eq!(created.audit.created_by, "alice");

        let by_name = mediator
            .send(GetCompanyByNameQuery::new("UMBRELLA corp"), &token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.dto.id, id);

        let page = mediator
            .send(GetPagedCompaniesQuery::new(PaginationParams::new(1, 10)), &token)
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].modified_by, "alice");

        assert!(mediator.send(DeleteCompanyCommand::new(id), &token).await.unwrap());
        assert!(mediator
            .send(GetCompanyByIdQuery::new(id), &token)
            .await
            .unwrap()
            .is_none());
        assert!(!mediator.send(DeleteCompanyCommand::new(id), &token).await.unwrap());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_invalid_paging_is_rejected_and_logged() {
        let mediator = mediator();

        let err = mediator
            .send(
                GetPagedCompaniesQuery::new(PaginationParams::new(0, 500)),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        match err {
            CrmError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(logs_contain("Validation failed"));
    }

    #[tokio::test]
    async fn test_lookup_default_and_ordering() {
        let mediator = mediator();
        let token = CancellationToken::new();

        for (name, ordinal) in [("Overdue", 3), ("Draft", 1), ("Sent", 2)] {
            let dto = InvoiceStatus::new(name, ordinal).to_dto();
            mediator
                .send(CreateCommand::<InvoiceStatus>::new(dto), &token)
                .await
                .unwrap();
        }

        let all = mediator.send(GetAllInvoiceStatusesQuery::new(), &token).await.unwrap();
        let names: Vec<_> = all.iter().map(|row| row.dto.name.as_str()).collect();
        assert_eq!(names, vec!["Draft", "Sent", "Overdue"]);

        let default = mediator
            .send(GetDefaultInvoiceStatusQuery::new(), &token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(default.dto.name, "Draft");
    }

    #[tokio::test]
    async fn test_payment_total_for_invoice() {
        let mediator = mediator();
        let token = CancellationToken::new();
        let invoice_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut ids = Vec::new();
        for cents in [10_000, 2_550] {
            let dto = Payment::new(invoice_id, Decimal::new(cents, 2), date).to_dto();
            ids.push(dto.id);
            mediator
                .send(CreateCommand::<Payment>::new(dto), &token)
                .await
                .unwrap();
        }
        let other = Payment::new(Uuid::new_v4(), Decimal::new(999, 0), date).to_dto();
        mediator
            .send(CreateCommand::<Payment>::new(other), &token)
            .await
            .unwrap();

        let total = mediator
            .send(GetInvoicePaymentTotalQuery::new(invoice_id), &token)
            .await
            .unwrap();
        assert_eq!(total, Decimal::new(12_550, 2));

        mediator
            .send(DeleteCommand::<Payment>::new(ids[1]), &token)
            .await
            .unwrap();
        let total = mediator
            .send(GetInvoicePaymentTotalQuery::new(invoice_id), &token)
            .await
            .unwrap();
        assert_eq!(total, Decimal::new(10_000, 2));
    }
}
