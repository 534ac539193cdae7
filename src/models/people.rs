// src/models/people.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::{db::document_store::Collection, models::record::Document};

// Campo de e-mail do formulário: vazio é aceito, preenchido precisa ser válido.
fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("invalid_email".into());
    Err(err)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    #[schema(example = "Ana Souza")]
    pub name: String,

    #[validate(custom(function = "validate_optional_email"))]
    #[schema(example = "ana@monbraz.com.br")]
    pub email: String,

    // Cargo
    #[schema(example = "Soldadora")]
    pub office: String,

    #[schema(example = "oficina, estoque")]
    pub permissions: String,

    #[schema(example = "(11) 99999-8888")]
    pub phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "http://localhost:3000/api/files/employees/3f2c/foto.png")]
    pub image_url: Option<String>,
}

impl Document for Employee {
    const COLLECTION: Collection = Collection::Employees;
}
