//! # crm-models
//!
//! Domain models for CRM RS.
//!
//! Business entities, the generic lookup entity, DTO projections with their
//! explicit mapping profiles, and the command/query request types.

pub use crm_core::traits::{Auditable, Defaultable, Entity, Identifiable, Named, Totaled};

/// Implements `Identifiable` and `Auditable` for structs with `id` and `audit` fields
macro_rules! impl_audited {
    ($($ty:ty),+ $(,)?) => {$(
        impl ::crm_core::Identifiable for $ty {
            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn set_id(&mut self, id: ::uuid::Uuid) {
                self.id = id;
            }
        }

        impl ::crm_core::Auditable for $ty {
            fn audit(&self) -> &::crm_core::Audit {
                &self.audit
            }

            fn audit_mut(&mut self) -> &mut ::crm_core::Audit {
                &mut self.audit
            }
        }
    )+};
}

pub mod profile;
pub mod requests;

pub mod activity;
pub mod company;
pub mod invoice;
pub mod lookup;
pub mod payment;
pub mod product;
pub mod quote;
pub mod role;
pub mod sales_order;
pub mod team;
pub mod user;

pub use profile::{DetailsDto, ListDto, Profile};
pub use requests::*;

pub use activity::*;
pub use company::*;
pub use invoice::*;
pub use lookup::*;
pub use payment::*;
pub use product::*;
pub use quote::*;
pub use role::*;
pub use sales_order::*;
pub use team::*;
pub use user::*;
