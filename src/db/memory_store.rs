// src/db/memory_store.rs

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{Collection, DocumentStore, StoredDocument},
};

/// Armazenamento em memória. Usado nos testes e com `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryDocumentStore {
    // Vec preserva a ordem de criação, igual ao ORDER BY do Postgres
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn insert(&self, collection: Collection, data: Value) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .push(StoredDocument { id, data });
        Ok(id)
    }

    async fn replace(&self, collection: Collection, id: Uuid, data: Value) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id));

        match existing {
            Some(doc) => {
                doc.data = data;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_if(
        &self,
        collection: Collection,
        id: Uuid,
        pointer: &str,
        expected: &str,
        data: Value,
    ) -> Result<bool, AppError> {
        // Leitura e escrita sob o mesmo lock de escrita
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .filter(|doc| doc.data.pointer(pointer).and_then(Value::as_str) == Some(expected));

        match existing {
            Some(doc) => {
                doc.data = data;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() != before)
    }
}
