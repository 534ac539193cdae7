// src/services/dashboard_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{DocumentStore, EntityRepository},
    models::{
        dashboard::DashboardSummary,
        equipment::{Accessory, Tool},
        people::Employee,
        stock::{Material, RawMaterial},
        work_order::{WorkOrder, WorkOrderStatus},
    },
};

#[derive(Clone)]
pub struct DashboardService {
    employees: EntityRepository<Employee>,
    tools: EntityRepository<Tool>,
    accessories: EntityRepository<Accessory>,
    materials: EntityRepository<Material>,
    raw_materials: EntityRepository<RawMaterial>,
    work_orders: EntityRepository<WorkOrder>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            employees: EntityRepository::new(store.clone()),
            tools: EntityRepository::new(store.clone()),
            accessories: EntityRepository::new(store.clone()),
            materials: EntityRepository::new(store.clone()),
            raw_materials: EntityRepository::new(store.clone()),
            work_orders: EntityRepository::new(store),
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let (employees, tools, accessories, materials, raw_materials, orders) = tokio::try_join!(
            self.employees.count(),
            self.tools.count(),
            self.accessories.count(),
            self.materials.count(),
            self.raw_materials.count(),
            self.work_orders.list(),
        )?;

        let mut open_work_orders = 0;
        let mut closed_work_orders = 0;
        let mut hours_logged = Decimal::ZERO;

        for order in &orders {
            match &order.data.status {
                WorkOrderStatus::Open { .. } => open_work_orders += 1,
                WorkOrderStatus::Closed { raw_materials_used, .. } => {
                    closed_work_orders += 1;
                    for row in raw_materials_used {
                        // Horas não têm limite na entrada: satura em vez de estourar
                        hours_logged = hours_logged.checked_add(row.hours_spent).unwrap_or_else(|| {
                            tracing::warn!("Soma de horas estourou na ordem {}; saturando", order.id);
                            if row.hours_spent.is_sign_negative() {
                                Decimal::MIN
                            } else {
                                Decimal::MAX
                            }
                        });
                    }
                }
            }
        }

        Ok(DashboardSummary {
            employees,
            tools,
            accessories,
            materials,
            raw_materials,
            open_work_orders,
            closed_work_orders,
            hours_logged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{Collection, MemoryDocumentStore},
        models::work_order::{CloseWorkOrderPayload, ConsumptionRowPayload, WorkOrderPayload},
        services::WorkOrderService,
    };

    #[tokio::test]
    async fn huge_hours_saturate_instead_of_failing() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let dashboard = DashboardService::new(store.clone());
        let orders = WorkOrderService::new(store);

        let huge = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
        let order = orders.create(WorkOrderPayload::default()).await.unwrap();
        let rows = vec![
            ConsumptionRowPayload { hours_spent: huge, ..Default::default() },
            ConsumptionRowPayload { hours_spent: huge, ..Default::default() },
        ];
        orders.close(order.id, CloseWorkOrderPayload { rows }).await.unwrap();

        let summary = dashboard.summary().await.unwrap();
        assert_eq!(summary.hours_logged, Decimal::MAX);
        assert_eq!(summary.closed_work_orders, 1);
    }

    #[tokio::test]
    async fn malformed_documents_are_not_counted() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        store
            .insert(Collection::Tools, serde_json::json!({ "amount": "muitas" }))
            .await
            .unwrap();
        let dashboard = DashboardService::new(store);

        assert_eq!(dashboard.summary().await.unwrap().tools, 0);
    }

    #[tokio::test]
    async fn summary_counts_collections_and_hours_of_closed_orders() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let dashboard = DashboardService::new(store.clone());
        let orders = WorkOrderService::new(store.clone());

        EntityRepository::<Tool>::new(store.clone())
            .create(Tool { code: "FER-1".into(), ..Default::default() })
            .await
            .unwrap();
        EntityRepository::<Material>::new(store.clone())
            .create(Material { name: "Cola".into(), ..Default::default() })
            .await
            .unwrap();

        let open = orders.create(WorkOrderPayload::default()).await.unwrap();
        let closing = orders.create(WorkOrderPayload::default()).await.unwrap();
        let row = |hours: i64| ConsumptionRowPayload {
            hours_spent: Decimal::from(hours),
            ..Default::default()
        };
        orders
            .close(closing.id, CloseWorkOrderPayload { rows: vec![row(2), row(3)] })
            .await
            .unwrap();

        let summary = dashboard.summary().await.unwrap();
        assert_eq!(summary.tools, 1);
        assert_eq!(summary.materials, 1);
        assert_eq!(summary.employees, 0);
        assert_eq!(summary.open_work_orders, 1);
        assert_eq!(summary.closed_work_orders, 1);
        assert_eq!(summary.hours_logged, Decimal::from(5));
        assert!(!open.closed);
    }
}
