//! Role model
//!
//! Table: roles

use crm_core::{Audit, Entity, Named};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

/// Role entity
///
/// Roles group users by responsibility (Sales Rep, Account Manager, Admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,

    /// Role name (unique)
    pub name: String,

    pub description: Option<String>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Role);

impl Entity for Role {
    const TABLE_NAME: &'static str = "roles";
    const TYPE_NAME: &'static str = "Role";
}

impl Named for Role {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Role {
    /// Create a new role
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub type RoleListDto = ListDto<RoleDto>;
pub type RoleDetailsDto = DetailsDto<RoleDto>;

impl Profile for Role {
    type Dto = RoleDto;

    fn to_dto(&self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    fn from_dto(dto: RoleDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            audit,
        }
    }

    fn dto_id(dto: &RoleDto) -> Uuid {
        dto.id
    }
}

pub type GetAllRolesQuery = GetAllQuery<Role>;
pub type GetPagedRolesQuery = GetPagedQuery<Role>;
pub type GetRoleByIdQuery = GetByIdQuery<Role>;
pub type GetRoleByNameQuery = GetByNameQuery<Role>;
pub type CreateRoleCommand = CreateCommand<Role>;
pub type UpdateRoleCommand = UpdateCommand<Role>;
pub type DeleteRoleCommand = DeleteCommand<Role>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_new() {
        let role = Role::new("Account Manager");
        assert_eq!(role.name(), "Account Manager");
        assert!(role.audit.active);
        assert!(!role.id.is_nil());
    }

    #[test]
    fn test_mapping_round_trip() {
        let mut role = Role::new("Admin");
        role.description = Some("Full access".into());
        role.audit = Audit::created("jdoe");

        let dto = role.to_dto();
        assert_eq!(Role::dto_id(&dto), role.id);

        let back = Role::from_dto(dto, role.audit.clone());
        assert_eq!(back, role);
    }
}
