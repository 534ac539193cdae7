// src/services/employee_service.rs

use std::sync::Arc;

use axum::body::Bytes;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{object_store::validate_object_path, DocumentStore, EntityRepository, ObjectStore},
    models::{people::Employee, record::Record},
};

#[derive(Clone)]
pub struct EmployeeService {
    employees: EntityRepository<Employee>,
    objects: Arc<dyn ObjectStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            employees: EntityRepository::new(store),
            objects,
        }
    }

    /// Sobe a foto para `employees/<id>/<arquivo>` e grava a URL no funcionário.
    pub async fn upload_image(
        &self,
        employee_id: Uuid,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Record<Employee>, AppError> {
        // Um único segmento: nada de subpastas no nome
        if file_name.contains('/') {
            return Err(AppError::InvalidFileName(file_name.to_string()));
        }
        validate_object_path(file_name)?;

        let mut employee = self.employees.find(employee_id).await?;

        let path = format!("employees/{}/{}", employee_id, file_name);
        let url = self.objects.put(&path, bytes, content_type).await?;

        employee.data.image_url = Some(url);
        match self.employees.update(employee_id, employee.data).await {
            Ok(record) => {
                tracing::info!("🖼️ Foto do funcionário {} salva em {}", employee_id, path);
                Ok(record)
            }
            Err(e) => {
                // O arquivo fica órfão no armazenamento
                tracing::warn!("Arquivo {} enviado, mas o funcionário não foi atualizado: {}", path, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryDocumentStore, MemoryObjectStore};

    struct Fixture {
        service: EmployeeService,
        employees: EntityRepository<Employee>,
        objects: Arc<dyn ObjectStore>,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let objects: Arc<dyn ObjectStore> = Arc::new(MemoryObjectStore::new("http://localhost:3000"));
        Fixture {
            service: EmployeeService::new(store.clone(), objects.clone()),
            employees: EntityRepository::new(store),
            objects,
        }
    }

    #[tokio::test]
    async fn upload_records_url_on_employee() {
        let fx = fixture();
        let ana = fx
            .employees
            .create(Employee { name: "Ana".into(), ..Default::default() })
            .await
            .unwrap();

        let record = fx
            .service
            .upload_image(ana.id, "foto.png", Some("image/png"), Bytes::from_static(b"png"))
            .await
            .unwrap();

        let expected = format!("http://localhost:3000/api/files/employees/{}/foto.png", ana.id);
        assert_eq!(record.data.image_url.as_deref(), Some(expected.as_str()));
        assert_eq!(record.data.name, "Ana");

        let stored = fx.employees.find(ana.id).await.unwrap();
        assert_eq!(stored.data.image_url, Some(expected));

        let object = fx
            .objects
            .get(&format!("employees/{}/foto.png", ana.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(object.content_type, "image/png");
    }

    #[tokio::test]
    async fn upload_for_missing_employee_is_not_found() {
        let fx = fixture();
        let err = fx
            .service
            .upload_image(Uuid::new_v4(), "foto.png", None, Bytes::from_static(b"png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { collection: "employees", .. }));
    }

    #[tokio::test]
    async fn file_name_must_be_a_single_segment() {
        let fx = fixture();
        let ana = fx.employees.create(Employee::default()).await.unwrap();

        for name in ["../foto.png", "a/b.png", "", ".."] {
            let err = fx
                .service
                .upload_image(ana.id, name, None, Bytes::from_static(b"x"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidFileName(_)), "{name}");
        }
    }
}
