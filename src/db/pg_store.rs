// src/db/pg_store.rs

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{Collection, DocumentStore, StoredDocument},
};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Json<Value>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument { id: row.id, data: row.data.0 }
    }
}

/// Armazenamento de documentos sobre Postgres (tabela `documents`, JSONB).
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conecta ao banco e roda as migrações embutidas.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!().run(&pool).await?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data FROM documents
            WHERE collection = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StoredDocument::from))
    }

    async fn insert(&self, collection: Collection, data: Value) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(data))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn replace(&self, collection: Collection, id: Uuid, data: Value) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            "#,
        )
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(data))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_if(
        &self,
        collection: Collection,
        id: Uuid,
        pointer: &str,
        expected: &str,
        data: Value,
    ) -> Result<bool, AppError> {
        // "/status/state" -> {status,state} para o operador #>>
        let path: Vec<String> = pointer
            .trim_start_matches('/')
            .split('/')
            .map(str::to_string)
            .collect();

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2 AND data #>> $4 = $5
            "#,
        )
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(data))
            .bind(path)
            .bind(expected)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
