// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Os cards da tela de cadastros.
// Contagens batem com as listagens: documentos fora do esquema não entram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub employees: usize,
    pub tools: usize,
    pub accessories: usize,
    pub materials: usize,
    pub raw_materials: usize,
    pub open_work_orders: usize,
    pub closed_work_orders: usize,
    // Soma de hoursSpent das ordens finalizadas (satura no limite do Decimal)
    #[schema(example = "12.5")]
    pub hours_logged: Decimal,
}
