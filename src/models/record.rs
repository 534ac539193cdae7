// src/models/record.rs

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::db::document_store::Collection;

/// Tipo que mora numa coleção do armazenamento de documentos.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
}

/// Um documento com o id atribuído pelo armazenamento.
/// No JSON os campos ficam no mesmo nível do `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub data: T,
}
