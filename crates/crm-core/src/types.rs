//! Common types used throughout CRM RS

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Actor recorded when no authenticated principal is available
pub const SYSTEM_ACTOR: &str = "system";

/// Current time at storage precision (microseconds)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Audit block carried by every entity.
///
/// `created_*` is written once, `modified_*` on every write, and `active`
/// is the soft-delete flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub created_by: String,
    pub created_date: DateTime<Utc>,
    pub modified_by: String,
    pub modified_date: DateTime<Utc>,
    pub active: bool,
}

impl Audit {
    /// Audit block for a freshly created row
    pub fn created(actor: impl Into<String>) -> Self {
        Self::created_at(actor, now())
    }

    pub fn created_at(actor: impl Into<String>, at: DateTime<Utc>) -> Self {
        let actor = actor.into();
        Self {
            created_by: actor.clone(),
            created_date: at,
            modified_by: actor,
            modified_date: at,
            active: true,
        }
    }

    /// Stamp a write by `actor`.
    ///
    /// The new modified date is strictly greater than the previous one even
    /// when two writes land within the same clock tick.
    pub fn touch(&mut self, actor: impl Into<String>) {
        self.touch_at(actor, now());
    }

    pub fn touch_at(&mut self, actor: impl Into<String>, at: DateTime<Utc>) {
        let floor = self.modified_date + Duration::microseconds(1);
        self.modified_by = actor.into();
        self.modified_date = at.max(floor);
    }

    /// Soft delete
    pub fn deactivate(&mut self, actor: impl Into<String>) {
        self.touch(actor);
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self::created(SYSTEM_ACTOR)
    }
}
