// src/handlers/registry.rs
//
// CRUD das coleções de cadastro (funcionários, ferramentas, acessórios,
// materiais e matérias-primas). Um único conjunto de handlers genéricos,
// instanciado por tipo no roteador.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    db::EntityRepository,
    middleware::i18n::Locale,
    models::record::Document,
};

fn repo<T: Document>(app_state: &AppState) -> EntityRepository<T> {
    EntityRepository::new(app_state.documents.clone())
}

// GET /api/{colecao}
pub async fn list<T: Document>(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let records = repo::<T>(&app_state)
        .list()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(records)))
}

// GET /api/{colecao}/{id}
pub async fn get<T: Document>(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = repo::<T>(&app_state)
        .find(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(record)))
}

// POST /api/{colecao}
pub async fn create<T: Document + Validate>(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<T>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let record = repo::<T>(&app_state)
        .create(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(record)))
}

// PUT /api/{colecao}/{id}
// Sobrescrita completa: campos ausentes no corpo voltam ao valor padrão.
pub async fn update<T: Document + Validate>(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<T>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let record = repo::<T>(&app_state)
        .update(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(record)))
}

// DELETE /api/{colecao}/{id}
pub async fn delete<T: Document>(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    repo::<T>(&app_state)
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
