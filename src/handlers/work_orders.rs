// src/handlers/work_orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::work_order::{
        CloseWorkOrderPayload, WorkOrderBoard, WorkOrderPayload, WorkOrderState, WorkOrderView,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkOrderQuery {
    /// `open` ou `closed`; sem filtro devolve todas
    pub status: Option<WorkOrderState>,
}

// GET /api/work-orders
#[utoipa::path(
    get,
    path = "/api/work-orders",
    tag = "Work Orders",
    params(WorkOrderQuery),
    responses(
        (status = 200, description = "Ordens de serviço, em ordem de criação", body = Vec<WorkOrderView>)
    )
)]
pub async fn list_work_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<WorkOrderQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state.work_order_service
        .list(query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/work-orders/board
#[utoipa::path(
    get,
    path = "/api/work-orders/board",
    tag = "Work Orders",
    responses(
        (status = 200, description = "Ordens separadas em abertas e finalizadas", body = WorkOrderBoard)
    )
)]
pub async fn get_board(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let board = app_state.work_order_service
        .board()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(board)))
}

// GET /api/work-orders/{id}
#[utoipa::path(
    get,
    path = "/api/work-orders/{id}",
    tag = "Work Orders",
    params(("id" = Uuid, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 200, description = "Ordem de serviço", body = WorkOrderView),
        (status = 404, description = "Ordem não encontrada")
    )
)]
pub async fn get_work_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state.work_order_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// POST /api/work-orders
#[utoipa::path(
    post,
    path = "/api/work-orders",
    tag = "Work Orders",
    request_body = WorkOrderPayload,
    responses(
        (status = 201, description = "Ordem de serviço aberta", body = WorkOrderView),
        (status = 404, description = "Funcionário, ferramenta ou acessório inexistente")
    )
)]
pub async fn create_work_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<WorkOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state.work_order_service
        .create(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /api/work-orders/{id}
#[utoipa::path(
    put,
    path = "/api/work-orders/{id}",
    tag = "Work Orders",
    request_body = WorkOrderPayload,
    params(("id" = Uuid, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 200, description = "Ordem de serviço atualizada", body = WorkOrderView),
        (status = 404, description = "Ordem ou referência inexistente")
    )
)]
pub async fn update_work_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<WorkOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state.work_order_service
        .update(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// POST /api/work-orders/{id}/close
#[utoipa::path(
    post,
    path = "/api/work-orders/{id}/close",
    tag = "Work Orders",
    request_body = CloseWorkOrderPayload,
    params(("id" = Uuid, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 200, description = "Ordem finalizada com as linhas de consumo", body = WorkOrderView),
        (status = 404, description = "Ordem ou matéria-prima inexistente"),
        (status = 409, description = "Ordem já finalizada")
    )
)]
pub async fn close_work_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<CloseWorkOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state.work_order_service
        .close(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// DELETE /api/work-orders/{id}
#[utoipa::path(
    delete,
    path = "/api/work-orders/{id}",
    tag = "Work Orders",
    params(("id" = Uuid, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 204, description = "Ordem removida (ou já inexistente)")
    )
)]
pub async fn delete_work_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.work_order_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
