//! Query handlers

use async_trait::async_trait;
use crm_core::{CrmResult, Defaultable, Named, PagedResult, Totaled};
use crm_db::{DefaultRepository, NamedRepository, Repository, TotalRepository};
use crm_models::{
    DetailsDto, GetAllQuery, GetByIdQuery, GetByNameQuery, GetDefaultQuery, GetPagedQuery,
    GetTotalQuery, ListDto, Profile,
};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::handler::{logged, RequestHandler};

repository_handler!(GetAllHandler);
repository_handler!(GetPagedHandler);
repository_handler!(GetByIdHandler);
repository_handler!(
    /// Case-insensitive lookup by name
    GetByNameHandler
);
repository_handler!(GetDefaultHandler);
repository_handler!(GetTotalHandler);

#[async_trait]
impl<T, R> RequestHandler<GetAllQuery<T>> for GetAllHandler<T, R>
where
    T: Profile,
    R: Repository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME))]
    async fn handle(
        &self,
        _request: GetAllQuery<T>,
        token: &CancellationToken,
    ) -> CrmResult<Vec<ListDto<T::Dto>>> {
        info!("Retrieving all rows");
        let rows = logged(self.repository.get_all(token).await, T::TYPE_NAME, "get_all")?;
        info!(count = rows.len(), "Retrieved rows");
        Ok(rows.iter().map(Profile::to_list_dto).collect())
    }
}

#[async_trait]
impl<T, R> RequestHandler<GetPagedQuery<T>> for GetPagedHandler<T, R>
where
    T: Profile,
    R: Repository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(
        entity = T::TYPE_NAME,
        page_number = request.pagination.page_number,
        page_size = request.pagination.page_size,
    ))]
    async fn handle(
        &self,
        request: GetPagedQuery<T>,
        token: &CancellationToken,
    ) -> CrmResult<PagedResult<ListDto<T::Dto>>> {
        info!("Retrieving page");
        let page = logged(
            self.repository.get_page(request.pagination, token).await,
            T::TYPE_NAME,
            "get_page",
        )?;
        info!(count = page.items.len(), total = page.total_count, "Retrieved page");
        Ok(page.map(|row| row.to_list_dto()))
    }
}

#[async_trait]
impl<T, R> RequestHandler<GetByIdQuery<T>> for GetByIdHandler<T, R>
where
    T: Profile,
    R: Repository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME, id = %request.id))]
    async fn handle(
        &self,
        request: GetByIdQuery<T>,
        token: &CancellationToken,
    ) -> CrmResult<Option<DetailsDto<T::Dto>>> {
        info!("Retrieving by id");
        let row = logged(
            self.repository.get_by_id(request.id, token).await,
            T::TYPE_NAME,
            "get_by_id",
        )?;
        match &row {
            Some(_) => info!("Retrieved row"),
            None => debug!("No active row with this id"),
        }
        Ok(row.as_ref().map(Profile::to_details_dto))
    }
}

#[async_trait]
impl<T, R> RequestHandler<GetByNameQuery<T>> for GetByNameHandler<T, R>
where
    T: Profile + Named,
    R: NamedRepository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME, name = %request.name))]
    async fn handle(
        &self,
        request: GetByNameQuery<T>,
        token: &CancellationToken,
    ) -> CrmResult<Option<DetailsDto<T::Dto>>> {
        info!("Retrieving by name");
        let row = logged(
            self.repository.get_by_name(request.name.trim(), token).await,
            T::TYPE_NAME,
            "get_by_name",
        )?;
        match &row {
            Some(found) => info!(id = %found.id(), "Retrieved row"),
            None => debug!("No active row with this name"),
        }
        Ok(row.as_ref().map(Profile::to_details_dto))
    }
}

#[async_trait]
impl<T, R> RequestHandler<GetDefaultQuery<T>> for GetDefaultHandler<T, R>
where
    T: Profile + Defaultable,
    R: DefaultRepository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME))]
    async fn handle(
        &self,
        _request: GetDefaultQuery<T>,
        token: &CancellationToken,
    ) -> CrmResult<Option<DetailsDto<T::Dto>>> {
        info!("Retrieving default");
        let row = logged(
            self.repository.get_default(token).await,
            T::TYPE_NAME,
            "get_default",
        )?;
        match &row {
            Some(found) => info!(id = %found.id(), flagged = found.is_default(), "Retrieved default"),
            None => debug!("Lookup table has no active rows"),
        }
        Ok(row.as_ref().map(Profile::to_details_dto))
    }
}

#[async_trait]
impl<T, R> RequestHandler<GetTotalQuery<T>> for GetTotalHandler<T, R>
where
    T: Profile + Totaled,
    R: TotalRepository<T> + ?Sized + 'static,
{
    #[instrument(skip_all, fields(entity = T::TYPE_NAME, group = T::GROUP_NAME, group_id = %request.group_id))]
    async fn handle(&self, request: GetTotalQuery<T>, token: &CancellationToken) -> CrmResult<Decimal> {
        info!("Computing total");
        let total = logged(
            self.repository.get_total_for(request.group_id, token).await,
            T::TYPE_NAME,
            "get_total_for",
        )?;
        info!(%total, "Computed total");
        Ok(total)
    }
}
