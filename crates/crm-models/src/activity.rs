//! Activity model
//!
//! Table: activities

use chrono::{DateTime, Utc};
use crm_core::{Audit, Entity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

/// Call, meeting or task tracked against a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub activity_status_id: Option<Uuid>,
    pub company_id: Option<Uuid>,

    /// Assigned user
    pub owner_id: Option<Uuid>,

    pub due_date: Option<DateTime<Utc>>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Activity);

impl Entity for Activity {
    const TABLE_NAME: &'static str = "activities";
    const TYPE_NAME: &'static str = "Activity";
}

impl Activity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            description: None,
            activity_status_id: None,
            company_id: None,
            owner_id: None,
            due_date: None,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: Uuid,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub activity_status_id: Option<Uuid>,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

pub type ActivityListDto = ListDto<ActivityDto>;
pub type ActivityDetailsDto = DetailsDto<ActivityDto>;

impl Profile for Activity {
    type Dto = ActivityDto;

    fn to_dto(&self) -> ActivityDto {
        ActivityDto {
            id: self.id,
            subject: self.subject.clone(),
            description: self.description.clone(),
            activity_status_id: self.activity_status_id,
            company_id: self.company_id,
            owner_id: self.owner_id,
            due_date: self.due_date,
        }
    }

    fn from_dto(dto: ActivityDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            subject: dto.subject,
            description: dto.description,
            activity_status_id: dto.activity_status_id,
            company_id: dto.company_id,
            owner_id: dto.owner_id,
            due_date: dto.due_date,
            audit,
        }
    }

    fn dto_id(dto: &ActivityDto) -> Uuid {
        dto.id
    }
}

pub type GetAllActivitiesQuery = GetAllQuery<Activity>;
pub type GetPagedActivitiesQuery = GetPagedQuery<Activity>;
pub type GetActivityByIdQuery = GetByIdQuery<Activity>;
pub type CreateActivityCommand = CreateCommand<Activity>;
pub type UpdateActivityCommand = UpdateCommand<Activity>;
pub type DeleteActivityCommand = DeleteCommand<Activity>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_round_trip() {
        let mut activity = Activity::new("Quarterly review");
        activity.company_id = Some(Uuid::new_v4());
        activity.due_date = Some(crm_core::now());

        let back = Activity::from_dto(activity.to_dto(), activity.audit.clone());
        assert_eq!(back, activity);
    }

    #[test]
    fn test_dto_deserializes_with_optional_fields_missing() {
        let id = Uuid::new_v4();
        let dto: ActivityDto = serde_json::from_value(serde_json::json!({
            "id": id,
            "subject": "Call back"
        }))
        .unwrap();

        assert_eq!(dto.id, id);
        assert!(dto.company_id.is_none());
    }
}
