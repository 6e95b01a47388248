//! Product model
//!
//! Table: products

use crm_core::{Audit, Entity, Named};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

/// Sellable product or service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,

    /// Stock keeping unit (unique)
    pub sku: String,

    pub unit_price: Decimal,
    pub service_type_id: Option<Uuid>,
    pub description: Option<String>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Product);

impl Entity for Product {
    const TABLE_NAME: &'static str = "products";
    const TYPE_NAME: &'static str = "Product";
}

impl Named for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Product {
    pub fn new(name: impl Into<String>, sku: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sku: sku.into(),
            unit_price,
            service_type_id: None,
            description: None,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub service_type_id: Option<Uuid>,
    #[serde(default)]
    pub description: Option<String>,
}

pub type ProductListDto = ListDto<ProductDto>;
pub type ProductDetailsDto = DetailsDto<ProductDto>;

impl Profile for Product {
    type Dto = ProductDto;

    fn to_dto(&self) -> ProductDto {
        ProductDto {
            id: self.id,
            name: self.name.clone(),
            sku: self.sku.clone(),
            unit_price: self.unit_price,
            service_type_id: self.service_type_id,
            description: self.description.clone(),
        }
    }

    fn from_dto(dto: ProductDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            sku: dto.sku,
            unit_price: dto.unit_price,
            service_type_id: dto.service_type_id,
            description: dto.description,
            audit,
        }
    }

    fn dto_id(dto: &ProductDto) -> Uuid {
        dto.id
    }
}

pub type GetAllProductsQuery = GetAllQuery<Product>;
pub type GetPagedProductsQuery = GetPagedQuery<Product>;
pub type GetProductByIdQuery = GetByIdQuery<Product>;
pub type GetProductByNameQuery = GetByNameQuery<Product>;
pub type CreateProductCommand = CreateCommand<Product>;
pub type UpdateProductCommand = UpdateCommand<Product>;
pub type DeleteProductCommand = DeleteCommand<Product>;
