use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro, agora com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Registro {id} não encontrado em '{collection}'")]
    NotFound { collection: &'static str, id: Uuid },

    #[error("Arquivo '{0}' não encontrado")]
    FileNotFound(String),

    #[error("Ordem de serviço {0} já finalizada")]
    WorkOrderAlreadyClosed(Uuid),

    #[error("Nome de arquivo inválido: {0}")]
    InvalidFileName(String),

    // --- Falhas de armazenamento ---
    // Para o cliente todas são a mesma coisa: "a operação no armazenamento falhou".
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de migração: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Documento malformado: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Erro de E/S no armazenamento de arquivos: {0}")]
    StorageError(#[from] std::io::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Converte o erro de domínio na resposta HTTP, já traduzida.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(key) => i18n.get(lang, key),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: i18n.get(lang, "validation_error"),
                    details: Some(json!(details)),
                }
            }
            AppError::NotFound { collection, id } => ApiError {
                status: StatusCode::NOT_FOUND,
                error: i18n.get(lang, "not_found"),
                details: Some(json!({ "collection": collection, "id": id })),
            },
            AppError::FileNotFound(path) => ApiError {
                status: StatusCode::NOT_FOUND,
                error: i18n.get(lang, "file_not_found"),
                details: Some(json!({ "path": path })),
            },
            AppError::WorkOrderAlreadyClosed(id) => ApiError {
                status: StatusCode::CONFLICT,
                error: i18n.get(lang, "work_order_already_closed"),
                details: Some(json!({ "id": id })),
            },
            AppError::InvalidFileName(name) => ApiError {
                status: StatusCode::BAD_REQUEST,
                error: i18n.get(lang, "invalid_file_name"),
                details: Some(json!({ "fileName": name })),
            },
            // Todo o resto é falha de armazenamento: loga o detalhe e devolve mensagem genérica.
            ref e => {
                tracing::error!("Falha na operação de armazenamento: {}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: i18n.get(lang, "store_error"),
                    details: None,
                }
            }
        }
    }
}

/// Corpo de erro devolvido ao cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::NotFound { collection: "tools", id: Uuid::nil() };
        let api = err.to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Registro não encontrado.");
    }

    #[test]
    fn validation_details_are_translated() {
        let mut errors = ValidationErrors::new();
        let mut e = ValidationError::new("email");
        e.message = Some("invalid_email".into());
        errors.add("email", e);

        let api = AppError::ValidationError(errors)
            .to_api_error(&Locale("en".to_string()), &I18nStore::new());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api.details,
            Some(json!({ "email": ["The e-mail address is invalid."] }))
        );
    }

    #[test]
    fn store_failures_hide_the_cause() {
        let err = AppError::StorageError(std::io::Error::other("disk on fire"));
        let api = err.to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("disk"));
        assert!(api.details.is_none());
    }

    #[test]
    fn closing_twice_is_a_conflict() {
        let api = AppError::WorkOrderAlreadyClosed(Uuid::nil())
            .to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::CONFLICT);
    }
}
