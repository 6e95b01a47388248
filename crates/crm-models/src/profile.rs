//! DTO projections and the explicit entity ↔ DTO mapping profile
//!
//! Three projections with increasing field sets, built by composition:
//! - `Dto`: identifier and business fields (per entity)
//! - [`ListDto`]: `Dto` plus the last-modified stamp
//! - [`DetailsDto`]: `Dto` plus the full audit block

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use crm_core::{Audit, Entity};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// List projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDto<D> {
    #[serde(flatten)]
    pub dto: D,
    pub modified_by: String,
    pub modified_date: DateTime<Utc>,
}

/// Details projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsDto<D> {
    #[serde(flatten)]
    pub dto: D,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Mapping profile between an entity and its DTO.
///
/// `from_dto(to_dto(e), e.audit)` gives back `e`.
pub trait Profile: Entity + Debug {
    type Dto: Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn to_dto(&self) -> Self::Dto;

    /// Build an entity from a DTO, attaching the given audit block
    fn from_dto(dto: Self::Dto, audit: Audit) -> Self;

    fn dto_id(dto: &Self::Dto) -> Uuid;

    fn to_list_dto(&self) -> ListDto<Self::Dto> {
        let audit = self.audit();
        ListDto {
            dto: self.to_dto(),
            modified_by: audit.modified_by.clone(),
            modified_date: audit.modified_date,
        }
    }

    fn to_details_dto(&self) -> DetailsDto<Self::Dto> {
        DetailsDto {
            dto: self.to_dto(),
            audit: self.audit().clone(),
        }
    }
}
