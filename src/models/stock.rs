// src/models/stock.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{db::document_store::Collection, models::record::Document};

// --- Materiais (acabados) ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    #[schema(example = "Parafuso M8")]
    pub name: String,

    #[schema(example = "150")]
    pub amount: Decimal,

    #[serde(rename = "type", alias = "tipo")]
    #[schema(example = "Fixação")]
    pub material_type: String,
}

impl Document for Material {
    const COLLECTION: Collection = Collection::Materials;
}

// --- Matérias-primas ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMaterial {
    #[schema(example = "Barra de aço")]
    pub name: String,

    #[schema(example = "100")]
    pub length: Decimal,

    #[schema(example = "5")]
    pub width: Decimal,

    #[schema(example = "20")]
    pub amount: Decimal,
}

impl Document for RawMaterial {
    const COLLECTION: Collection = Collection::RawMaterials;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn material_type_is_named_type_on_the_wire() {
        let material: Material =
            serde_json::from_value(json!({ "name": "Cola", "amount": 2, "tipo": "Adesivo" })).unwrap();
        assert_eq!(material.material_type, "Adesivo");
        assert_eq!(material.amount, Decimal::from(2));

        let out = serde_json::to_value(&material).unwrap();
        assert_eq!(out["type"], json!("Adesivo"));
    }

    #[test]
    fn raw_material_dimensions_accept_fractions() {
        let raw: RawMaterial =
            serde_json::from_value(json!({ "name": "Chapa", "length": 2.5, "width": 1, "amount": 4 }))
                .unwrap();
        assert_eq!(raw.length, Decimal::new(25, 1));
        assert_eq!(raw.width, Decimal::ONE);
    }
}
