// src/handlers/files.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// GET /api/files/{*path}
#[utoipa::path(
    get,
    path = "/api/files/{path}",
    tag = "Files",
    params(("path" = String, Path, description = "Caminho do arquivo, ex.: employees/{id}/foto.png")),
    responses(
        (status = 200, description = "Conteúdo do arquivo", content_type = "application/octet-stream"),
        (status = 404, description = "Arquivo não encontrado")
    )
)]
pub async fn download_file(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let object = app_state.objects
        .get(&path)
        .await
        .and_then(|found| found.ok_or(AppError::FileNotFound(path)))
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, object.content_type)],
        object.bytes,
    ))
}
