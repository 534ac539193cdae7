// src/models/equipment.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{db::document_store::Collection, models::record::Document};

// --- Ferramentas ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Tool {
    #[schema(example = "FER-001")]
    pub code: String,

    #[schema(example = "Esmerilhadeira")]
    pub name: String,

    // Formulários antigos mandam "dataPurchase"
    #[serde(alias = "dataPurchase")]
    #[schema(example = "2024-03-15")]
    pub purchase_date: Option<NaiveDate>,

    pub observation: String,

    // Situação em texto livre (ex: "Em uso", "Manutenção")
    #[schema(example = "Em uso")]
    pub situation: String,

    #[schema(example = 2)]
    pub amount: i64,
}

impl Document for Tool {
    const COLLECTION: Collection = Collection::Tools;
}

// --- Acessórios ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Accessory {
    #[schema(example = "ACS-010")]
    pub code: String,

    #[schema(example = "Disco de corte 7\"")]
    pub name: String,

    #[serde(alias = "dataPurchase")]
    pub purchase_date: Option<NaiveDate>,

    pub observation: String,

    pub situation: String,
}

impl Document for Accessory {
    const COLLECTION: Collection = Collection::Accessories;
}
