// src/models/work_order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{db::document_store::Collection, models::record::Document};

// --- Linha de consumo registrada no fechamento ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_material_id: Option<Uuid>,
    #[schema(example = "Barra de aço")]
    pub name: String,
    #[schema(example = "5")]
    pub width: Decimal,
    #[schema(example = "100")]
    pub length: Decimal,
    #[schema(example = "3")]
    pub amount: Decimal,
    #[schema(example = "2")]
    pub hours_spent: Decimal,
}

// --- Ciclo de vida: Aberta -> Finalizada (sem reabertura) ---
// As linhas de consumo só existem na variante Closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum WorkOrderStatus {
    #[serde(rename_all = "camelCase")]
    Open {
        // Anotação livre enquanto a ordem está aberta
        #[serde(default)]
        raw_materials_note: String,
    },
    #[serde(rename_all = "camelCase")]
    Closed {
        closed_at: DateTime<Utc>,
        raw_materials_used: Vec<ConsumptionRow>,
    },
}

/// Onde o estado fica no documento gravado (escritas condicionais).
pub const STATE_POINTER: &str = "/status/state";

impl WorkOrderStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, WorkOrderStatus::Closed { .. })
    }

    /// Valor de `state` no JSON.
    pub fn state_name(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open { .. } => "open",
            WorkOrderStatus::Closed { .. } => "closed",
        }
    }
}

/// Documento da coleção `workOrders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    #[schema(example = "OS-1")]
    pub number: String,
    pub employee_id: Option<Uuid>,
    #[schema(example = "Corte")]
    pub activity_name: String,
    #[serde(default)]
    pub tool_ids: Vec<Uuid>,
    #[serde(default)]
    pub accessory_ids: Vec<Uuid>,
    #[serde(default)]
    pub materials_used: String,
    pub created_at: DateTime<Utc>,
    pub status: WorkOrderStatus,
}

impl Document for WorkOrder {
    const COLLECTION: Collection = Collection::WorkOrders;
}

/// Filtro da listagem (`?status=open|closed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum WorkOrderState {
    Open,
    Closed,
}

// --- Formulários ---

/// Campos editáveis, usados tanto na criação quanto na atualização.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkOrderPayload {
    #[schema(example = "OS-1")]
    pub number: String,
    pub employee_id: Option<Uuid>,
    #[schema(example = "Corte")]
    pub activity_name: String,
    pub tool_ids: Vec<Uuid>,
    pub accessory_ids: Vec<Uuid>,
    pub materials_used: String,
    // Só vale enquanto a ordem está aberta
    pub raw_materials_note: String,
}

/// Linha enviada no fechamento. Com `rawMaterialId`, nome e medidas
/// ausentes são preenchidos a partir da matéria-prima.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsumptionRowPayload {
    pub raw_material_id: Option<Uuid>,
    pub name: Option<String>,
    pub width: Option<Decimal>,
    pub length: Option<Decimal>,
    pub amount: Decimal,
    pub hours_spent: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CloseWorkOrderPayload {
    pub rows: Vec<ConsumptionRowPayload>,
}

// --- Visões (join feito na hora da leitura) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderView {
    pub id: Uuid,
    pub number: String,
    pub employee_id: Option<Uuid>,
    // None quando o funcionário não existe mais
    pub employee_name: Option<String>,
    pub activity_name: String,
    pub tool_ids: Vec<Uuid>,
    #[schema(example = "Esmerilhadeira, Furadeira")]
    pub tools_used: String,
    pub accessory_ids: Vec<Uuid>,
    pub accessories_used: String,
    pub materials_used: String,
    pub created_at: DateTime<Utc>,
    pub closed: bool,
    pub status: WorkOrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderBoard {
    pub open: Vec<WorkOrderView>,
    pub closed: Vec<WorkOrderView>,
}
