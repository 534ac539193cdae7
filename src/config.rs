// src/config.rs

use std::{env, sync::Arc};

use anyhow::{bail, Context};

use crate::{
    common::i18n::I18nStore,
    db::{DocumentStore, LocalObjectStore, MemoryDocumentStore, ObjectStore, PgDocumentStore},
    services::{DashboardService, EmployeeService, WorkOrderService},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: String,
    pub uploads_dir: String,
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        // Sem backend explícito: Postgres se houver DATABASE_URL, senão memória
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("STORE_BACKEND inválido: '{}' (use 'postgres' ou 'memory')", other),
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };

        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL deve ser definida quando STORE_BACKEND=postgres");
        }

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: '{}'", raw))?,
            None => 5,
        };

        Ok(Self {
            store_backend,
            database_url,
            database_max_connections,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            uploads_dir: lookup("UPLOADS_DIR").unwrap_or_else(|| "./uploads".to_string()),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub i18n_store: I18nStore,
    pub documents: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub work_order_service: WorkOrderService,
    pub employee_service: EmployeeService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let documents: Arc<dyn DocumentStore> = match (config.store_backend, &config.database_url) {
            (StoreBackend::Postgres, Some(url)) => Arc::new(
                PgDocumentStore::connect(url, config.database_max_connections)
                    .await
                    .context("Falha ao conectar no banco de dados")?,
            ),
            (StoreBackend::Postgres, None) => bail!("DATABASE_URL deve ser definida"),
            (StoreBackend::Memory, _) => {
                tracing::warn!("⚠️ Usando armazenamento em memória: os dados somem ao reiniciar");
                Arc::new(MemoryDocumentStore::new())
            }
        };

        let objects: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(
            config.uploads_dir.clone(),
            config.public_base_url.clone(),
        ));

        Ok(Self::from_stores(documents, objects))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_stores(documents: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            i18n_store: I18nStore::new(),
            work_order_service: WorkOrderService::new(documents.clone()),
            employee_service: EmployeeService::new(documents.clone(), objects.clone()),
            dashboard_service: DashboardService::new(documents.clone()),
            documents,
            objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_without_database_url() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.uploads_dir, "./uploads");
        assert_eq!(config.public_base_url, "http://localhost:3000");
    }

    #[test]
    fn database_url_selects_postgres() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/monbraz")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);

        let forced = config_from(&[
            ("DATABASE_URL", "postgres://localhost/monbraz"),
            ("STORE_BACKEND", "memory"),
        ])
        .unwrap();
        assert_eq!(forced.store_backend, StoreBackend::Memory);
    }

    #[test]
    fn bad_values_fail_fast() {
        assert!(config_from(&[("STORE_BACKEND", "postgres")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "firestore")]).is_err());
        assert!(config_from(&[("DATABASE_MAX_CONNECTIONS", "muitas")]).is_err());
    }
}
