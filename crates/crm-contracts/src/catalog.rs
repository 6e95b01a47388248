//! Product and lookup rules

use crm_core::ValidationErrors;
use crm_models::{Lookup, LookupDto, LookupKind, Product, ProductDto};

use crate::base::DtoRules;
use crate::rules;

impl DtoRules for Product {
    fn check(dto: &ProductDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.name, "name", "Product name", 200, errors);
        rules::require_text(&dto.sku, "sku", "SKU", 50, errors);
        rules::non_negative(dto.unit_price, "unitPrice", "Unit price", errors);
    }
}

impl<K: LookupKind> DtoRules for Lookup<K> {
    fn check(dto: &LookupDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.name, "name", &format!("{} name", K::TYPE_NAME), 50, errors);
        rules::optional_max_length(
            dto.description.as_deref(),
            "description",
            "Description",
            255,
            errors,
        );
        if dto.ordinal_position < 0 {
            errors.add("ordinalPosition", "Ordinal position cannot be negative");
        }
    }
}
