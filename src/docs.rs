// src/docs.rs

use utoipa::openapi::{
    path::{HttpMethod, OperationBuilder},
    ResponseBuilder,
};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Work Orders ---
        handlers::work_orders::list_work_orders,
        handlers::work_orders::get_board,
        handlers::work_orders::get_work_order,
        handlers::work_orders::create_work_order,
        handlers::work_orders::update_work_order,
        handlers::work_orders::close_work_order,
        handlers::work_orders::delete_work_order,

        // --- Employees ---
        handlers::employees::upload_image,

        // --- Files ---
        handlers::files::download_file,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::health,
    ),
    components(
        schemas(
            // --- Cadastros ---
            models::people::Employee,
            models::equipment::Tool,
            models::equipment::Accessory,
            models::stock::Material,
            models::stock::RawMaterial,

            // --- Work Orders ---
            models::work_order::ConsumptionRow,
            models::work_order::WorkOrderStatus,
            models::work_order::WorkOrderState,
            models::work_order::WorkOrder,
            models::work_order::WorkOrderView,
            models::work_order::WorkOrderBoard,

            // --- Payloads ---
            models::work_order::WorkOrderPayload,
            models::work_order::ConsumptionRowPayload,
            models::work_order::CloseWorkOrderPayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Registry", description = "Cadastros: funcionários, ferramentas, acessórios, materiais e matérias-primas"),
        (name = "Employees", description = "Foto de perfil dos funcionários"),
        (name = "Work Orders", description = "Ordens de serviço: abertura, edição e finalização"),
        (name = "Files", description = "Arquivos enviados"),
        (name = "Dashboard", description = "Totais da tela inicial")
    ),
    modifiers(&RegistryAddon)
)]
pub struct ApiDoc;

// Os handlers de cadastro são genéricos, então as rotas entram aqui na mão.
struct RegistryAddon;

const REGISTRY_COLLECTIONS: &[(&str, &str)] = &[
    ("employees", "Employee"),
    ("tools", "Tool"),
    ("accessories", "Accessory"),
    ("materials", "Material"),
    ("raw-materials", "RawMaterial"),
];

fn operation(summary: String, responses: &[(&str, &str)]) -> utoipa::openapi::path::Operation {
    responses
        .iter()
        .fold(
            OperationBuilder::new().tag("Registry").summary(Some(summary)),
            |builder, (status, description)| {
                builder.response(*status, ResponseBuilder::new().description(*description).build())
            },
        )
        .build()
}

impl utoipa::Modify for RegistryAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for (segment, schema) in REGISTRY_COLLECTIONS {
            let collection_path = format!("/api/{}", segment);
            let item_path = format!("/api/{}/{{id}}", segment);

            openapi.paths.add_path_operation(
                &collection_path,
                vec![HttpMethod::Get],
                operation(format!("Lista {}", schema), &[("200", "Registros em ordem de criação")]),
            );
            openapi.paths.add_path_operation(
                &collection_path,
                vec![HttpMethod::Post],
                operation(
                    format!("Cria {}", schema),
                    &[("201", "Registro criado"), ("400", "Campos inválidos")],
                ),
            );
            openapi.paths.add_path_operation(
                &item_path,
                vec![HttpMethod::Get],
                operation(
                    format!("Busca {}", schema),
                    &[("200", "Registro"), ("404", "Registro não encontrado")],
                ),
            );
            openapi.paths.add_path_operation(
                &item_path,
                vec![HttpMethod::Put],
                operation(
                    format!("Sobrescreve {}", schema),
                    &[
                        ("200", "Registro atualizado"),
                        ("400", "Campos inválidos"),
                        ("404", "Registro não encontrado"),
                    ],
                ),
            );
            openapi.paths.add_path_operation(
                &item_path,
                vec![HttpMethod::Delete],
                operation(format!("Remove {}", schema), &[("204", "Registro removido (ou já inexistente)")]),
            );
        }
    }
}
