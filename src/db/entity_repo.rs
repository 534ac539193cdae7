// src/db/entity_repo.rs

use std::{marker::PhantomData, sync::Arc};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{DocumentStore, StoredDocument},
    models::record::{Document, Record},
};

/// Repositório de uma coleção: list / get / create / update / delete.
///
/// `update` sobrescreve o documento inteiro (campos omitidos voltam ao padrão)
/// e `delete` é idempotente.
pub struct EntityRepository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

// Manual: o derive exigiria `T: Clone`
impl<T> Clone for EntityRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> EntityRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, _marker: PhantomData }
    }

    fn collection_name() -> &'static str {
        T::COLLECTION.as_str()
    }

    fn decode(doc: StoredDocument) -> Result<Record<T>, AppError> {
        let data = serde_json::from_value(doc.data)?;
        Ok(Record { id: doc.id, data })
    }

    pub async fn list(&self) -> Result<Vec<Record<T>>, AppError> {
        let docs = self.store.list(T::COLLECTION).await?;

        // Documentos fora do esquema não derrubam a listagem inteira
        let records = docs
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id;
                match Self::decode(doc) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(
                            "Documento {} em '{}' ignorado: {}",
                            id,
                            Self::collection_name(),
                            e
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(records)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Record<T>>, AppError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(Self::decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Como `get`, mas ausência vira `AppError::NotFound`.
    pub async fn find(&self, id: Uuid) -> Result<Record<T>, AppError> {
        self.get(id).await?.ok_or(AppError::NotFound {
            collection: Self::collection_name(),
            id,
        })
    }

    pub async fn create(&self, data: T) -> Result<Record<T>, AppError> {
        let value = serde_json::to_value(&data)?;
        let id = self.store.insert(T::COLLECTION, value).await?;

        tracing::info!("Documento {} criado em '{}'", id, Self::collection_name());
        Ok(Record { id, data })
    }

    pub async fn update(&self, id: Uuid, data: T) -> Result<Record<T>, AppError> {
        let value = serde_json::to_value(&data)?;
        let replaced = self.store.replace(T::COLLECTION, id, value).await?;

        if !replaced {
            return Err(AppError::NotFound {
                collection: Self::collection_name(),
                id,
            });
        }

        tracing::info!("Documento {} atualizado em '{}'", id, Self::collection_name());
        Ok(Record { id, data })
    }

    /// `update` condicionado ao valor atual de um campo (ver `DocumentStore::replace_if`).
    /// `Ok(false)` quando o documento sumiu ou o campo já mudou.
    pub async fn update_if(&self, id: Uuid, pointer: &str, expected: &str, data: T) -> Result<bool, AppError> {
        let value = serde_json::to_value(&data)?;
        let replaced = self
            .store
            .replace_if(T::COLLECTION, id, pointer, expected, value)
            .await?;

        if replaced {
            tracing::info!("Documento {} atualizado em '{}'", id, Self::collection_name());
        }
        Ok(replaced)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.store.delete(T::COLLECTION, id).await?;

        if removed {
            tracing::info!("Documento {} removido de '{}'", id, Self::collection_name());
        } else {
            tracing::debug!("Documento {} já não existia em '{}'", id, Self::collection_name());
        }
        Ok(())
    }

    /// Conta só o que `list` devolve: documentos fora do esquema ficam de fora.
    pub async fn count(&self) -> Result<usize, AppError> {
        Ok(self.list().await?.len())
    }
}
