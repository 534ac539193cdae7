// src/db/object_store.rs

use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use axum::body::Bytes;
use tokio::sync::RwLock;

use crate::common::error::AppError;

/// Um arquivo guardado no armazenamento de objetos.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: String,
}

/// "Envia bytes para um caminho, recebe uma URL para buscá-los depois."
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, path: &str, bytes: Bytes, content_type: Option<&str>) -> Result<String, AppError>;

    async fn get(&self, path: &str) -> Result<Option<StoredObject>, AppError>;
}

/// Caminho relativo, segmentos não vazios, sem `.`/`..` nem barra invertida.
pub fn validate_object_path(path: &str) -> Result<(), AppError> {
    let valid = !path.is_empty()
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidFileName(path.to_string()))
    }
}

fn public_url(base_url: &str, path: &str) -> String {
    format!("{}/api/files/{}", base_url.trim_end_matches('/'), path)
}

fn content_type_for(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

// ---
// Sistema de arquivos local
// ---

pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

// O tipo enviado no upload fica num arquivo ao lado: "<arquivo>.content-type"
fn content_type_sidecar(full_path: &Path) -> PathBuf {
    let mut sidecar = full_path.as_os_str().to_owned();
    sidecar.push(".content-type");
    PathBuf::from(sidecar)
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, path: &str, bytes: Bytes, content_type: Option<&str>) -> Result<String, AppError> {
        validate_object_path(path)?;

        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, &bytes).await?;

        let sidecar = content_type_sidecar(&full_path);
        match content_type {
            Some(content_type) => tokio::fs::write(&sidecar, content_type).await?,
            // Sem tipo: apaga o de um upload anterior para valer a extensão
            None => match tokio::fs::remove_file(&sidecar).await {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            },
        }

        tracing::debug!("Arquivo salvo em {}", full_path.display());
        Ok(public_url(&self.public_base_url, path))
    }

    async fn get(&self, path: &str) -> Result<Option<StoredObject>, AppError> {
        validate_object_path(path)?;

        let full_path = self.root.join(path);
        let bytes = match tokio::fs::read(&full_path).await {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let content_type = match tokio::fs::read_to_string(content_type_sidecar(&full_path)).await {
            Ok(stored) => stored.trim().to_string(),
            // Upload sem tipo: deduz pela extensão
            Err(e) if e.kind() == ErrorKind::NotFound => content_type_for(path).to_string(),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(StoredObject { bytes, content_type }))
    }
}

// ---
// Em memória (testes)
// ---

pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    public_base_url: String,
}

impl MemoryObjectStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, path: &str, bytes: Bytes, content_type: Option<&str>) -> Result<String, AppError> {
        validate_object_path(path)?;

        let content_type = content_type
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(path).to_string());

        self.objects
            .write()
            .await
            .insert(path.to_string(), StoredObject { bytes, content_type });

        Ok(public_url(&self.public_base_url, path))
    }

    async fn get(&self, path: &str) -> Result<Option<StoredObject>, AppError> {
        validate_object_path(path)?;
        Ok(self.objects.read().await.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_and_empty_segments() {
        assert!(validate_object_path("employees/1/foto.png").is_ok());
        assert!(validate_object_path("").is_err());
        assert!(validate_object_path("../etc/passwd").is_err());
        assert!(validate_object_path("employees//foto.png").is_err());
        assert!(validate_object_path("/abs/path").is_err());
        assert!(validate_object_path("a\\b").is_err());
    }

    #[test]
    fn content_type_comes_from_extension() {
        assert_eq!(content_type_for("a/b.PNG"), "image/png");
        assert_eq!(content_type_for("a/b.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a/b"), "application/octet-stream");
    }

    #[tokio::test]
    async fn memory_store_round_trips_bytes_and_builds_url() {
        let store = MemoryObjectStore::new("http://localhost:3000/");
        let url = store
            .put("employees/ana.png", Bytes::from_static(b"png"), Some("image/png"))
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/api/files/employees/ana.png");
        let object = store.get("employees/ana.png").await.unwrap().unwrap();
        assert_eq!(object.bytes, Bytes::from_static(b"png"));
        assert_eq!(object.content_type, "image/png");
        assert!(store.get("employees/outro.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn local_store_writes_under_root() {
        let root = std::env::temp_dir().join(format!("monbraz-objects-{}", uuid::Uuid::new_v4()));
        let store = LocalObjectStore::new(root.clone(), "http://files.local");

        let url = store
            .put("employees/42/foto.jpg", Bytes::from_static(b"jpeg"), None)
            .await
            .unwrap();
        assert_eq!(url, "http://files.local/api/files/employees/42/foto.jpg");
        assert!(root.join("employees/42/foto.jpg").exists());

        let object = store.get("employees/42/foto.jpg").await.unwrap().unwrap();
        assert_eq!(object.content_type, "image/jpeg");
        assert!(store.get("employees/42/nada.jpg").await.unwrap().is_none());

        // Tipo informado no upload vale mais que a extensão
        store
            .put("employees/42/foto", Bytes::from_static(b"png"), Some("image/png"))
            .await
            .unwrap();
        let object = store.get("employees/42/foto").await.unwrap().unwrap();
        assert_eq!(object.content_type, "image/png");
        assert_eq!(object.bytes, Bytes::from_static(b"png"));

        // Reenvio sem tipo volta para a extensão
        store
            .put("employees/42/foto", Bytes::from_static(b"raw"), None)
            .await
            .unwrap();
        let object = store.get("employees/42/foto").await.unwrap().unwrap();
        assert_eq!(object.content_type, "application/octet-stream");

        let _ = std::fs::remove_dir_all(&root);
    }
}
