//! User model
//!
//! Table: users

use crm_core::{Audit, Entity, Named};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

/// CRM user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    /// Login name (unique, case-insensitive)
    pub username: String,

    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<Uuid>,
    pub team_id: Option<Uuid>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(User);

impl Entity for User {
    const TABLE_NAME: &'static str = "users";
    const TYPE_NAME: &'static str = "User";
}

/// Users are looked up by username
impl Named for User {
    fn name(&self) -> &str {
        &self.username
    }
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            role_id: None,
            team_id: None,
            audit: Audit::default(),
        }
    }

    /// Display name, "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role_id: Option<Uuid>,
    #[serde(default)]
    pub team_id: Option<Uuid>,
}

pub type UserListDto = ListDto<UserDto>;
pub type UserDetailsDto = DetailsDto<UserDto>;

impl Profile for User {
    type Dto = UserDto;

    fn to_dto(&self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role_id: self.role_id,
            team_id: self.team_id,
        }
    }

    fn from_dto(dto: UserDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            role_id: dto.role_id,
            team_id: dto.team_id,
            audit,
        }
    }

    fn dto_id(dto: &UserDto) -> Uuid {
        dto.id
    }
}

pub type GetAllUsersQuery = GetAllQuery<User>;
pub type GetPagedUsersQuery = GetPagedQuery<User>;
pub type GetUserByIdQuery = GetByIdQuery<User>;
pub type GetUserByUsernameQuery = GetByNameQuery<User>;
pub type CreateUserCommand = CreateCommand<User>;
pub type UpdateUserCommand = UpdateCommand<User>;
pub type DeleteUserCommand = DeleteCommand<User>;
