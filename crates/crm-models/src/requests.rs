//! Command and query request types
//!
//! Each request is generic over the entity it targets. Entity modules
//! export concrete aliases (`CreateActivityCommand = CreateCommand<Activity>`).

use std::marker::PhantomData;

use crm_core::{Defaultable, Named, PagedResult, PaginationParams, Totaled, SYSTEM_ACTOR};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};

/// A request dispatched through the mediator
pub trait Request: Send + Sync + 'static {
    type Response: Send + 'static;
}

type Marker<T> = PhantomData<fn() -> T>;

/// All active rows
#[derive(Debug, Clone, Default)]
pub struct GetAllQuery<T> {
    _entity: Marker<T>,
}

impl<T> GetAllQuery<T> {
    pub fn new() -> Self {
        Self { _entity: PhantomData }
    }
}

impl<T: Profile> Request for GetAllQuery<T> {
    type Response = Vec<ListDto<T::Dto>>;
}

/// One page of active rows
#[derive(Debug, Clone)]
pub struct GetPagedQuery<T> {
    pub pagination: PaginationParams,
    _entity: Marker<T>,
}

impl<T> GetPagedQuery<T> {
    pub fn new(pagination: PaginationParams) -> Self {
        Self {
            pagination,
            _entity: PhantomData,
        }
    }
}

impl<T: Profile> Request for GetPagedQuery<T> {
    type Response = PagedResult<ListDto<T::Dto>>;
}

#[derive(Debug, Clone)]
pub struct GetByIdQuery<T> {
    pub id: Uuid,
    _entity: Marker<T>,
}

impl<T> GetByIdQuery<T> {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            _entity: PhantomData,
        }
    }
}

impl<T: Profile> Request for GetByIdQuery<T> {
    type Response = Option<DetailsDto<T::Dto>>;
}

/// Case-insensitive lookup by the entity's unique name
#[derive(Debug, Clone)]
pub struct GetByNameQuery<T> {
    pub name: String,
    _entity: Marker<T>,
}

impl<T> GetByNameQuery<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _entity: PhantomData,
        }
    }
}

impl<T: Profile + Named> Request for GetByNameQuery<T> {
    type Response = Option<DetailsDto<T::Dto>>;
}

/// Default row of a lookup
#[derive(Debug, Clone, Default)]
pub struct GetDefaultQuery<T> {
    _entity: Marker<T>,
}

impl<T> GetDefaultQuery<T> {
    pub fn new() -> Self {
        Self { _entity: PhantomData }
    }
}

impl<T: Profile + Defaultable> Request for GetDefaultQuery<T> {
    type Response = Option<DetailsDto<T::Dto>>;
}

/// Sum of `amount` over the active rows of one parent
#[derive(Debug, Clone)]
pub struct GetTotalQuery<T> {
    pub group_id: Uuid,
    _entity: Marker<T>,
}

impl<T> GetTotalQuery<T> {
    pub fn new(group_id: Uuid) -> Self {
        Self {
            group_id,
            _entity: PhantomData,
        }
    }
}

impl<T: Profile + Totaled> Request for GetTotalQuery<T> {
    type Response = Decimal;
}

#[derive(Debug, Clone)]
pub struct CreateCommand<T: Profile> {
    pub dto: T::Dto,
    /// Audit actor
    pub actor: String,
}

impl<T: Profile> CreateCommand<T> {
    pub fn new(dto: T::Dto) -> Self {
        Self {
            dto,
            actor: SYSTEM_ACTOR.to_string(),
        }
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }
}

impl<T: Profile> Request for CreateCommand<T> {
    type Response = DetailsDto<T::Dto>;
}

#[derive(Debug, Clone)]
pub struct UpdateCommand<T: Profile> {
    pub dto: T::Dto,
    pub actor: String,
}

impl<T: Profile> UpdateCommand<T> {
    pub fn new(dto: T::Dto) -> Self {
        Self {
            dto,
            actor: SYSTEM_ACTOR.to_string(),
        }
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }
}

impl<T: Profile> Request for UpdateCommand<T> {
    type Response = Option<DetailsDto<T::Dto>>;
}

/// Soft delete
#[derive(Debug, Clone)]
pub struct DeleteCommand<T> {
    pub id: Uuid,
    pub actor: String,
    _entity: Marker<T>,
}

impl<T> DeleteCommand<T> {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            actor: SYSTEM_ACTOR.to_string(),
            _entity: PhantomData,
        }
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }
}

impl<T: Profile> Request for DeleteCommand<T> {
    type Response = bool;
}
