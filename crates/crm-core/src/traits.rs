//! Core traits shared by entities, repositories and handlers

use uuid::Uuid;

use crate::types::Audit;

/// Trait for entities that have a GUID primary key
pub trait Identifiable {
    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);

    fn has_id(&self) -> bool {
        !self.id().is_nil()
    }
}

/// Trait for entities that carry the audit block
pub trait Auditable {
    fn audit(&self) -> &Audit;

    fn audit_mut(&mut self) -> &mut Audit;

    /// Soft-delete flag
    fn is_active(&self) -> bool {
        self.audit().active
    }
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Auditable + Clone + Send + Sync + 'static {
    /// The database table name
    const TABLE_NAME: &'static str;

    /// Human-readable type name for messages ("Invoice Status")
    const TYPE_NAME: &'static str;
}

/// Entities that can be looked up by a unique, human-facing name
pub trait Named: Entity {
    fn name(&self) -> &str;
}

/// Lookup entities with a default row
pub trait Defaultable: Entity {
    fn is_default(&self) -> bool;
}

/// Entities whose amounts can be summed per parent row
pub trait Totaled: Entity {
    /// Name of the parent the total is computed for ("Invoice")
    const GROUP_NAME: &'static str;

    fn group_id(&self) -> Uuid;

    fn amount(&self) -> rust_decimal::Decimal;
}
