// src/services/work_order_service.rs

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Collection, DocumentStore, EntityRepository},
    models::{
        equipment::{Accessory, Tool},
        people::Employee,
        record::Record,
        stock::RawMaterial,
        work_order::{
            CloseWorkOrderPayload, ConsumptionRow, ConsumptionRowPayload, WorkOrder,
            WorkOrderBoard, WorkOrderPayload, WorkOrderState, WorkOrderStatus, WorkOrderView,
            STATE_POINTER,
        },
    },
};

// Nomes para o join na hora da leitura
struct Lookups {
    employees: HashMap<Uuid, String>,
    tools: HashMap<Uuid, String>,
    accessories: HashMap<Uuid, String>,
}

// Nome vazio cai para o código
fn label(name: &str, code: &str) -> String {
    if name.trim().is_empty() {
        code.to_string()
    } else {
        name.to_string()
    }
}

// Seleção é um conjunto: remove repetidos mantendo a ordem
fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn join_names(ids: &[Uuid], names: &HashMap<Uuid, String>) -> String {
    ids.iter()
        .filter_map(|id| names.get(id).map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone)]
pub struct WorkOrderService {
    orders: EntityRepository<WorkOrder>,
    employees: EntityRepository<Employee>,
    tools: EntityRepository<Tool>,
    accessories: EntityRepository<Accessory>,
    raw_materials: EntityRepository<RawMaterial>,
}

impl WorkOrderService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            orders: EntityRepository::new(store.clone()),
            employees: EntityRepository::new(store.clone()),
            tools: EntityRepository::new(store.clone()),
            accessories: EntityRepository::new(store.clone()),
            raw_materials: EntityRepository::new(store),
        }
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    pub async fn create(&self, payload: WorkOrderPayload) -> Result<WorkOrderView, AppError> {
        self.check_references(&payload).await?;

        let order = WorkOrder {
            number: payload.number,
            employee_id: payload.employee_id,
            activity_name: payload.activity_name,
            tool_ids: dedup(payload.tool_ids),
            accessory_ids: dedup(payload.accessory_ids),
            materials_used: payload.materials_used,
            created_at: Utc::now(),
            status: WorkOrderStatus::Open {
                raw_materials_note: payload.raw_materials_note,
            },
        };

        let record = self.orders.create(order).await?;
        tracing::info!("📋 Ordem de serviço {} aberta ({})", record.data.number, record.id);

        self.render_one(record).await
    }

    /// Sobrescreve os campos editáveis. Data de criação e estado do ciclo de
    /// vida são preservados; a anotação de matérias-primas só vale se aberta.
    pub async fn update(&self, id: Uuid, payload: WorkOrderPayload) -> Result<WorkOrderView, AppError> {
        let mut current = self.orders.find(id).await?;
        self.check_references(&payload).await?;

        // Grava só se o estado lido ainda valer; senão relê e aplica de novo.
        // O estado muda no máximo uma vez (Aberta -> Finalizada), então isso termina.
        loop {
            let expected = current.data.status.state_name();
            let order = Self::apply_edits(&payload, current.data);

            if self.orders.update_if(id, STATE_POINTER, expected, order.clone()).await? {
                return self.render_one(Record { id, data: order }).await;
            }

            tracing::debug!("Ordem de serviço {} mudou de estado durante a edição; relendo", id);
            current = self.orders.find(id).await?;
        }
    }

    fn apply_edits(payload: &WorkOrderPayload, current: WorkOrder) -> WorkOrder {
        let status = match current.status {
            WorkOrderStatus::Open { .. } => WorkOrderStatus::Open {
                raw_materials_note: payload.raw_materials_note.clone(),
            },
            closed @ WorkOrderStatus::Closed { .. } => closed,
        };

        WorkOrder {
            number: payload.number.clone(),
            employee_id: payload.employee_id,
            activity_name: payload.activity_name.clone(),
            tool_ids: dedup(payload.tool_ids.clone()),
            accessory_ids: dedup(payload.accessory_ids.clone()),
            materials_used: payload.materials_used.clone(),
            created_at: current.created_at,
            status,
        }
    }

    /// Aberta -> Finalizada. Não mexe no estoque de matérias-primas.
    pub async fn close(&self, id: Uuid, payload: CloseWorkOrderPayload) -> Result<WorkOrderView, AppError> {
        let mut existing = self.orders.find(id).await?;

        if existing.data.status.is_closed() {
            return Err(AppError::WorkOrderAlreadyClosed(id));
        }

        let rows = self.resolve_rows(payload.rows).await?;
        let row_count = rows.len();

        existing.data.status = WorkOrderStatus::Closed {
            closed_at: Utc::now(),
            raw_materials_used: rows,
        };

        // Só finaliza se ainda estiver aberta no armazenamento
        let closed = self
            .orders
            .update_if(id, STATE_POINTER, "open", existing.data.clone())
            .await?;
        if !closed {
            self.orders.find(id).await?;
            return Err(AppError::WorkOrderAlreadyClosed(id));
        }

        tracing::info!(
            "✅ Ordem de serviço {} finalizada com {} linha(s) de consumo",
            existing.data.number,
            row_count
        );

        self.render_one(existing).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.orders.delete(id).await
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub async fn get(&self, id: Uuid) -> Result<WorkOrderView, AppError> {
        let record = self.orders.find(id).await?;
        self.render_one(record).await
    }

    pub async fn list(&self, state: Option<WorkOrderState>) -> Result<Vec<WorkOrderView>, AppError> {
        let (orders, lookups) = tokio::try_join!(self.orders.list(), self.load_lookups())?;

        let views = orders
            .into_iter()
            .filter(|record| match state {
                Some(WorkOrderState::Open) => !record.data.status.is_closed(),
                Some(WorkOrderState::Closed) => record.data.status.is_closed(),
                None => true,
            })
            .map(|record| Self::render(record, &lookups))
            .collect();

        Ok(views)
    }

    /// Separa as ordens em abertas e finalizadas. Recalculado a cada chamada.
    pub async fn board(&self) -> Result<WorkOrderBoard, AppError> {
        let (closed, open): (Vec<_>, Vec<_>) =
            self.list(None).await?.into_iter().partition(|view| view.closed);

        Ok(WorkOrderBoard { open, closed })
    }

    // =========================================================================
    //  AUXILIARES
    // =========================================================================

    // Referências precisam existir na hora da escrita; exclusões posteriores são toleradas.
    async fn check_references(&self, payload: &WorkOrderPayload) -> Result<(), AppError> {
        if let Some(employee_id) = payload.employee_id {
            self.employees.find(employee_id).await?;
        }
        for tool_id in &payload.tool_ids {
            self.tools.find(*tool_id).await?;
        }
        for accessory_id in &payload.accessory_ids {
            self.accessories.find(*accessory_id).await?;
        }
        Ok(())
    }

    async fn resolve_rows(&self, rows: Vec<ConsumptionRowPayload>) -> Result<Vec<ConsumptionRow>, AppError> {
        let catalog: HashMap<Uuid, RawMaterial> = if rows.iter().any(|r| r.raw_material_id.is_some()) {
            self.raw_materials
                .list()
                .await?
                .into_iter()
                .map(|record| (record.id, record.data))
                .collect()
        } else {
            HashMap::new()
        };

        rows.into_iter()
            .map(|row| match row.raw_material_id {
                Some(raw_id) => {
                    let raw = catalog.get(&raw_id).ok_or(AppError::NotFound {
                        collection: Collection::RawMaterials.as_str(),
                        id: raw_id,
                    })?;
                    Ok(ConsumptionRow {
                        raw_material_id: Some(raw_id),
                        name: row.name.unwrap_or_else(|| raw.name.clone()),
                        width: row.width.unwrap_or(raw.width),
                        length: row.length.unwrap_or(raw.length),
                        amount: row.amount,
                        hours_spent: row.hours_spent,
                    })
                }
                // Sem matéria-prima escolhida: grava como veio (linha "em branco" é aceita)
                None => Ok(ConsumptionRow {
                    raw_material_id: None,
                    name: row.name.unwrap_or_default(),
                    width: row.width.unwrap_or_default(),
                    length: row.length.unwrap_or_default(),
                    amount: row.amount,
                    hours_spent: row.hours_spent,
                }),
            })
            .collect()
    }

    async fn load_lookups(&self) -> Result<Lookups, AppError> {
        let (employees, tools, accessories) = tokio::try_join!(
            self.employees.list(),
            self.tools.list(),
            self.accessories.list()
        )?;

        Ok(Lookups {
            employees: employees.into_iter().map(|r| (r.id, r.data.name)).collect(),
            tools: tools
                .into_iter()
                .map(|r| (r.id, label(&r.data.name, &r.data.code)))
                .collect(),
            accessories: accessories
                .into_iter()
                .map(|r| (r.id, label(&r.data.name, &r.data.code)))
                .collect(),
        })
    }

    async fn render_one(&self, record: Record<WorkOrder>) -> Result<WorkOrderView, AppError> {
        let lookups = self.load_lookups().await?;
        Ok(Self::render(record, &lookups))
    }

    fn render(record: Record<WorkOrder>, lookups: &Lookups) -> WorkOrderView {
        let order = record.data;
        WorkOrderView {
            id: record.id,
            number: order.number,
            employee_name: order
                .employee_id
                .and_then(|id| lookups.employees.get(&id).cloned()),
            employee_id: order.employee_id,
            activity_name: order.activity_name,
            tools_used: join_names(&order.tool_ids, &lookups.tools),
            tool_ids: order.tool_ids,
            accessories_used: join_names(&order.accessory_ids, &lookups.accessories),
            accessory_ids: order.accessory_ids,
            materials_used: order.materials_used,
            created_at: order.created_at,
            closed: order.status.is_closed(),
            status: order.status,
        }
    }
}
