//! Team model
//!
//! Table: teams

use crm_core::{Audit, Entity, Named};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub lead_user_id: Option<Uuid>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Team);

impl Entity for Team {
    const TABLE_NAME: &'static str = "teams";
    const TYPE_NAME: &'static str = "Team";
}

impl Named for Team {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            lead_user_id: None,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lead_user_id: Option<Uuid>,
}

pub type TeamListDto = ListDto<TeamDto>;
pub type TeamDetailsDto = DetailsDto<TeamDto>;

impl Profile for Team {
    type Dto = TeamDto;

    fn to_dto(&self) -> TeamDto {
        TeamDto {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            lead_user_id: self.lead_user_id,
        }
    }

    fn from_dto(dto: TeamDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            lead_user_id: dto.lead_user_id,
            audit,
        }
    }

    fn dto_id(dto: &TeamDto) -> Uuid {
        dto.id
    }
}

pub type GetAllTeamsQuery = GetAllQuery<Team>;
pub type GetPagedTeamsQuery = GetPagedQuery<Team>;
pub type GetTeamByIdQuery = GetByIdQuery<Team>;
pub type GetTeamByNameQuery = GetByNameQuery<Team>;
pub type CreateTeamCommand = CreateCommand<Team>;
pub type UpdateTeamCommand = UpdateCommand<Team>;
pub type DeleteTeamCommand = DeleteCommand<Team>;
