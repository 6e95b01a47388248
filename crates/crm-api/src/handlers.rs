//! Generic entity handlers
//!
//! Routes instantiate these per entity (`get_by_id::<Company>`). Each one
//! builds a request, sends it through the mediator and wraps the result in
//! the response envelope. `None` and `false` results become 404.

use axum::{extract::State, http::StatusCode, Json};
use crm_core::{ApiResponse, Defaultable, Named, PagedResult, Totaled};
use crm_models::{
    CreateCommand, DeleteCommand, DetailsDto, GetAllQuery, GetByIdQuery, GetByNameQuery,
    GetDefaultQuery, GetPagedQuery, GetTotalQuery, ListDto, Profile, UpdateCommand,
};
use rust_decimal::Decimal;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthenticatedUser, IdPath, NamePath, Paging, Payload, RequestToken};
use crate::state::AppState;

type Envelope<T> = Json<ApiResponse<T>>;

fn ok<T>(data: T, message: String) -> Envelope<T> {
    Json(ApiResponse::ok(data, message))
}

/// GET /
pub async fn get_all<T: Profile>(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    RequestToken(token): RequestToken,
) -> ApiResult<Envelope<Vec<ListDto<T::Dto>>>> {
    let rows = state.mediator.send(GetAllQuery::<T>::new(), &token).await?;
    Ok(ok(rows, format!("{} list retrieved successfully", T::TYPE_NAME)))
}

/// GET /paged?pageNumber=&pageSize=
pub async fn get_paged<T: Profile>(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    RequestToken(token): RequestToken,
    Paging(pagination): Paging,
) -> ApiResult<Envelope<PagedResult<ListDto<T::Dto>>>> {
    let page = state
        .mediator
        .send(GetPagedQuery::<T>::new(pagination), &token)
        .await?;
    Ok(ok(page, format!("{} page retrieved successfully", T::TYPE_NAME)))
}

/// GET /:id
pub async fn get_by_id<T: Profile>(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    RequestToken(token): RequestToken,
    IdPath(id): IdPath,
) -> ApiResult<Envelope<DetailsDto<T::Dto>>> {
    let details = state
        .mediator
        .send(GetByIdQuery::<T>::new(id), &token)
        .await?
        .ok_or_else(|| ApiError::not_found(T::TYPE_NAME, id))?;
    Ok(ok(details, format!("{} retrieved successfully", T::TYPE_NAME)))
}

/// GET /by-name/:name
pub async fn get_by_name<T: Profile + Named>(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    RequestToken(token): RequestToken,
    NamePath(name): NamePath,
) -> ApiResult<Envelope<DetailsDto<T::Dto>>> {
    let details = state
        .mediator
        .send(GetByNameQuery::<T>::new(name.clone()), &token)
        .await?
        .ok_or_else(|| ApiError::not_found(T::TYPE_NAME, &name))?;
    Ok(ok(details, format!("{} retrieved successfully", T::TYPE_NAME)))
}

/// GET /default
pub async fn get_default<T: Profile + Defaultable>(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    RequestToken(token): RequestToken,
) -> ApiResult<Envelope<DetailsDto<T::Dto>>> {
    let details = state
        .mediator
        .send(GetDefaultQuery::<T>::new(), &token)
        .await?
        .ok_or_else(|| ApiError::not_found(T::TYPE_NAME, "default"))?;
    Ok(ok(details, format!("Default {} retrieved successfully", T::TYPE_NAME)))
}

/// GET /total/{group}/:id
pub async fn get_total<T: Profile + Totaled>(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    RequestToken(token): RequestToken,
    IdPath(group_id): IdPath,
) -> ApiResult<Envelope<Decimal>> {
    let total = state
        .mediator
        .send(GetTotalQuery::<T>::new(group_id), &token)
        .await?;
    Ok(ok(
        total,
        format!("{} total for {} retrieved successfully", T::TYPE_NAME, T::GROUP_NAME),
    ))
}

/// POST /
pub async fn create<T: Profile>(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    RequestToken(token): RequestToken,
    Payload(dto): Payload<T::Dto>,
) -> ApiResult<(StatusCode, Envelope<DetailsDto<T::Dto>>)> {
    let details = state
        .mediator
        .send(CreateCommand::<T>::new(dto).by(user.actor()), &token)
        .await?;
    Ok((
        StatusCode::CREATED,
        ok(details, format!("{} created successfully", T::TYPE_NAME)),
    ))
}

/// PUT /:id
pub async fn update<T: Profile>(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    RequestToken(token): RequestToken,
    IdPath(id): IdPath,
    Payload(dto): Payload<T::Dto>,
) -> ApiResult<Envelope<DetailsDto<T::Dto>>> {
    // A nil body id is left for the validators to report
    let body_id = T::dto_id(&dto);
    if body_id != id && !body_id.is_nil() {
        return Err(ApiError::bad_request(format!(
            "{} ID in the route does not match the request body",
            T::TYPE_NAME
        )));
    }

    let details = state
        .mediator
        .send(UpdateCommand::<T>::new(dto).by(user.actor()), &token)
        .await?
        .ok_or_else(|| ApiError::not_found(T::TYPE_NAME, id))?;
    Ok(ok(details, format!("{} updated successfully", T::TYPE_NAME)))
}

/// DELETE /:id
pub async fn delete<T: Profile>(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    RequestToken(token): RequestToken,
    IdPath(id): IdPath,
) -> ApiResult<Envelope<bool>> {
    let deleted = state
        .mediator
        .send(DeleteCommand::<T>::new(id).by(user.actor()), &token)
        .await?;
    if !deleted {
        return Err(ApiError::not_found(T::TYPE_NAME, id));
    }
    Ok(ok(true, format!("{} deleted successfully", T::TYPE_NAME)))
}
