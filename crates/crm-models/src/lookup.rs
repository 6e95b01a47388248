//! Type/status lookup entities
//!
//! All lookups share one shape: [`Lookup<K>`] parameterized by a kind marker
//! carrying the table and display names.

use std::fmt::Debug;
use std::marker::PhantomData;

use crm_core::{Audit, Auditable, Defaultable, Entity, Identifiable};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::profile::Profile;
use crate::requests::*;

/// Marker describing one lookup table
pub trait LookupKind: Debug + Clone + Copy + Default + PartialEq + Send + Sync + Unpin + 'static {
    const TABLE_NAME: &'static str;
    const TYPE_NAME: &'static str;
}

macro_rules! lookup_kind {
    ($(#[$doc:meta])* $kind:ident, $table:literal, $type_name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct $kind;

        impl LookupKind for $kind {
            const TABLE_NAME: &'static str = $table;
            const TYPE_NAME: &'static str = $type_name;
        }
    };
}

lookup_kind!(
    /// Company classification (Customer, Prospect, Partner)
    AccountTypeKind, "account_types", "Account Type"
);
lookup_kind!(ActivityStatusKind, "activity_statuses", "Activity Status");
lookup_kind!(InvoiceStatusKind, "invoice_statuses", "Invoice Status");
lookup_kind!(PaymentMethodKind, "payment_methods", "Payment Method");
lookup_kind!(ServiceTypeKind, "service_types", "Service Type");

pub type AccountType = Lookup<AccountTypeKind>;
pub type ActivityStatus = Lookup<ActivityStatusKind>;
pub type InvoiceStatus = Lookup<InvoiceStatusKind>;
pub type PaymentMethod = Lookup<PaymentMethodKind>;
pub type ServiceType = Lookup<ServiceTypeKind>;

/// Lookup row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup<K> {
    pub id: Uuid,

    /// Short label, unique per table
    pub name: String,

    pub description: Option<String>,

    /// Display order
    pub ordinal_position: i32,

    /// Preselected value for new records
    pub is_default: bool,

    #[serde(flatten)]
    pub audit: Audit,

    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K: LookupKind> Lookup<K> {
    pub fn new(name: impl Into<String>, ordinal_position: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            ordinal_position,
            is_default: false,
            audit: Audit::default(),
            kind: PhantomData,
        }
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }
}

impl<'r, K: LookupKind> FromRow<'r, PgRow> for Lookup<K> {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            ordinal_position: row.try_get("ordinal_position")?,
            is_default: row.try_get("is_default")?,
            audit: Audit::from_row(row)?,
            kind: PhantomData,
        })
    }
}

impl<K: LookupKind> Identifiable for Lookup<K> {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl<K: LookupKind> Auditable for Lookup<K> {
    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl<K: LookupKind> Entity for Lookup<K> {
    const TABLE_NAME: &'static str = K::TABLE_NAME;
    const TYPE_NAME: &'static str = K::TYPE_NAME;
}

impl<K: LookupKind> Defaultable for Lookup<K> {
    fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Lookup DTO, shared by every lookup kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ordinal_position: i32,
    #[serde(default)]
    pub is_default: bool,
}

impl<K: LookupKind> Profile for Lookup<K> {
    type Dto = LookupDto;

    fn to_dto(&self) -> LookupDto {
        LookupDto {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            ordinal_position: self.ordinal_position,
            is_default: self.is_default,
        }
    }

    fn from_dto(dto: LookupDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            ordinal_position: dto.ordinal_position,
            is_default: dto.is_default,
            audit,
            kind: PhantomData,
        }
    }

    fn dto_id(dto: &LookupDto) -> Uuid {
        dto.id
    }
}

pub type GetAllAccountTypesQuery = GetAllQuery<AccountType>;
pub type GetAccountTypeByIdQuery = GetByIdQuery<AccountType>;
pub type GetDefaultAccountTypeQuery = GetDefaultQuery<AccountType>;
pub type CreateAccountTypeCommand = CreateCommand<AccountType>;
pub type UpdateAccountTypeCommand = UpdateCommand<AccountType>;
pub type DeleteAccountTypeCommand = DeleteCommand<AccountType>;

pub type GetAllActivityStatusesQuery = GetAllQuery<ActivityStatus>;
pub type GetActivityStatusByIdQuery = GetByIdQuery<ActivityStatus>;
pub type GetDefaultActivityStatusQuery = GetDefaultQuery<ActivityStatus>;
pub type CreateActivityStatusCommand = CreateCommand<ActivityStatus>;
pub type UpdateActivityStatusCommand = UpdateCommand<ActivityStatus>;
pub type DeleteActivityStatusCommand = DeleteCommand<ActivityStatus>;

pub type GetAllInvoiceStatusesQuery = GetAllQuery<InvoiceStatus>;
pub type GetInvoiceStatusByIdQuery = GetByIdQuery<InvoiceStatus>;
pub type GetDefaultInvoiceStatusQuery = GetDefaultQuery<InvoiceStatus>;
pub type CreateInvoiceStatusCommand = CreateCommand<InvoiceStatus>;
pub type UpdateInvoiceStatusCommand = UpdateCommand<InvoiceStatus>;
pub type DeleteInvoiceStatusCommand = DeleteCommand<InvoiceStatus>;

pub type GetAllPaymentMethodsQuery = GetAllQuery<PaymentMethod>;
pub type GetPaymentMethodByIdQuery = GetByIdQuery<PaymentMethod>;
pub type GetDefaultPaymentMethodQuery = GetDefaultQuery<PaymentMethod>;
pub type CreatePaymentMethodCommand = CreateCommand<PaymentMethod>;
pub type UpdatePaymentMethodCommand = UpdateCommand<PaymentMethod>;
pub type DeletePaymentMethodCommand = DeleteCommand<PaymentMethod>;

pub type GetAllServiceTypesQuery = GetAllQuery<ServiceType>;
pub type GetServiceTypeByIdQuery = GetByIdQuery<ServiceType>;
pub type GetDefaultServiceTypeQuery = GetDefaultQuery<ServiceType>;
pub type CreateServiceTypeCommand = CreateCommand<ServiceType>;
pub type UpdateServiceTypeCommand = UpdateCommand<ServiceType>;
pub type DeleteServiceTypeCommand = DeleteCommand<ServiceType>;
