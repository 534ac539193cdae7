// src/db/document_store.rs

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::common::error::AppError;

/// As coleções do armazenamento de documentos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    Tools,
    Accessories,
    Materials,
    RawMaterials,
    WorkOrders,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Employees => "employees",
            Collection::Tools => "tools",
            Collection::Accessories => "accessories",
            Collection::Materials => "materials",
            Collection::RawMaterials => "rawMaterials",
            Collection::WorkOrders => "workOrders",
        }
    }
}

/// Um documento cru como está no armazenamento: id gerado + campos.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub data: Value,
}

/// Contrato do armazenamento de documentos.
///
/// Cada coleção é um mapa `id -> documento`. O esquema só é garantido pelo
/// código da aplicação; o armazenamento aceita qualquer JSON.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Todos os documentos da coleção, em ordem de criação.
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError>;

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, AppError>;

    /// Insere e devolve o id gerado pelo armazenamento.
    async fn insert(&self, collection: Collection, data: Value) -> Result<Uuid, AppError>;

    /// Sobrescreve o documento inteiro. `false` se o id não existe.
    async fn replace(&self, collection: Collection, id: Uuid, data: Value) -> Result<bool, AppError>;

    /// Sobrescreve só se o campo de texto em `pointer` (JSON Pointer, ex.:
    /// `/status/state`) ainda valer `expected`. `false` se o id não existe ou
    /// se o campo mudou desde a leitura.
    async fn replace_if(
        &self,
        collection: Collection,
        id: Uuid,
        pointer: &str,
        expected: &str,
        data: Value,
    ) -> Result<bool, AppError>;

    /// Remove o documento. `false` se já não existia.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError>;
}
