// src/handlers/employees.rs

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::people::Employee,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ImageUploadQuery {
    /// Nome do arquivo, sem pastas
    pub file_name: Option<String>,
}

// PUT /api/employees/{id}/image?fileName=foto.png
#[utoipa::path(
    put,
    path = "/api/employees/{id}/image",
    tag = "Employees",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    params(
        ("id" = Uuid, Path, description = "ID do funcionário"),
        ImageUploadQuery
    ),
    responses(
        (status = 200, description = "Foto salva; imageUrl atualizado", body = Employee),
        (status = 400, description = "Nome de arquivo inválido"),
        (status = 404, description = "Funcionário não encontrado")
    )
)]
pub async fn upload_image(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Query(query): Query<ImageUploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    // Sem fileName cai no mesmo erro de nome inválido
    let file_name = query.file_name
        .ok_or_else(|| AppError::InvalidFileName(String::new()).to_api_error(&locale, &app_state.i18n_store))?;

    let employee = app_state.employee_service
        .upload_image(id, &file_name, content_type, body)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employee)))
}
