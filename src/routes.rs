// src/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use validator::Validate;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers::{dashboard, employees, files, registry, work_orders},
    models::{
        equipment::{Accessory, Tool},
        people::Employee,
        record::Document,
        stock::{Material, RawMaterial},
    },
};

// list/create em "/" e get/update/delete em "/{id}"
fn registry_routes<T: Document + Validate>() -> Router<AppState> {
    Router::new()
        .route("/", get(registry::list::<T>).post(registry::create::<T>))
        .route(
            "/{id}",
            get(registry::get::<T>)
                .put(registry::update::<T>)
                .delete(registry::delete::<T>),
        )
}

pub fn app(app_state: AppState) -> Router {
    let employee_routes = registry_routes::<Employee>()
        .route("/{id}/image", put(employees::upload_image));

    let work_order_routes = Router::new()
        .route(
            "/",
            get(work_orders::list_work_orders).post(work_orders::create_work_order),
        )
        .route("/board", get(work_orders::get_board))
        .route(
            "/{id}",
            get(work_orders::get_work_order)
                .put(work_orders::update_work_order)
                .delete(work_orders::delete_work_order),
        )
        .route("/{id}/close", post(work_orders::close_work_order));

    Router::new()
        .route("/api/health", get(dashboard::health))
        .route("/api/dashboard/summary", get(dashboard::get_summary))
        .route("/api/files/{*path}", get(files::download_file))
        .nest("/api/employees", employee_routes)
        .nest("/api/tools", registry_routes::<Tool>())
        .nest("/api/accessories", registry_routes::<Accessory>())
        .nest("/api/materials", registry_routes::<Material>())
        .nest("/api/raw-materials", registry_routes::<RawMaterial>())
        .nest("/api/work-orders", work_order_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::{MemoryDocumentStore, MemoryObjectStore};

    fn test_app() -> Router {
        let state = AppState::from_stores(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryObjectStore::new("http://localhost:3000")),
        );
        app(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_up() {
        let app = test_app();
        let response = send(&app, "GET", "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn registry_crud_over_http() {
        let app = test_app();

        let response = send(
            &app,
            "POST",
            "/api/tools",
            Some(json!({ "code": "FER-1", "name": "Furadeira", "dataPurchase": "2024-03-15", "amount": 2 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["purchaseDate"], json!("2024-03-15"));

        let response = send(&app, "PUT", &format!("/api/tools/{}", id), Some(json!({ "name": "Parafusadeira" }))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let list = json_body(send(&app, "GET", "/api/tools", None).await).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["name"], json!("Parafusadeira"));
        assert_eq!(list[0]["code"], json!(""));

        let response = send(&app, "DELETE", &format!("/api/tools/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, "DELETE", &format!("/api/tools/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, "GET", &format!("/api/tools/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_with_localized_message() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/employees")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .body(Body::from(json!({ "name": "Ana", "email": "ana" }).to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"], json!("One or more fields are invalid."));
        assert_eq!(body["details"]["email"][0], json!("The e-mail address is invalid."));
    }

    #[tokio::test]
    async fn work_order_lifecycle_over_http() {
        let app = test_app();

        let steel = json_body(
            send(
                &app,
                "POST",
                "/api/raw-materials",
                Some(json!({ "name": "Steel Bar", "length": 100, "width": 5, "amount": 20 })),
            )
            .await,
        )
        .await;
        let ana = json_body(send(&app, "POST", "/api/employees", Some(json!({ "name": "Ana" }))).await).await;

        let response = send(
            &app,
            "POST",
            "/api/work-orders",
            Some(json!({ "number": "OS-1", "employeeId": ana["id"], "activityName": "Cut" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let order = json_body(response).await;
        assert_eq!(order["employeeName"], json!("Ana"));
        assert_eq!(order["status"]["state"], json!("open"));
        let id = order["id"].as_str().unwrap().to_string();

        let open = json_body(send(&app, "GET", "/api/work-orders?status=open", None).await).await;
        assert_eq!(open.as_array().unwrap().len(), 1);

        let close_uri = format!("/api/work-orders/{}/close", id);
        let rows = json!({ "rows": [
            { "name": "Steel Bar", "width": 5, "length": 100, "amount": 3, "hoursSpent": 2 }
        ]});
        let response = send(&app, "POST", &close_uri, Some(rows.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let closed = json_body(response).await;
        assert_eq!(closed["closed"], json!(true));
        assert_eq!(closed["status"]["rawMaterialsUsed"][0]["hoursSpent"], json!(2.0));

        let response = send(&app, "POST", &close_uri, Some(rows)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let board = json_body(send(&app, "GET", "/api/work-orders/board", None).await).await;
        assert!(board["open"].as_array().unwrap().is_empty());
        assert_eq!(board["closed"][0]["id"], json!(id));

        let steel_uri = format!("/api/raw-materials/{}", steel["id"].as_str().unwrap());
        let steel_after = json_body(send(&app, "GET", &steel_uri, None).await).await;
        assert_eq!(steel_after["amount"], json!(20.0));

        let summary = json_body(send(&app, "GET", "/api/dashboard/summary", None).await).await;
        assert_eq!(summary["closedWorkOrders"], json!(1));
        assert_eq!(summary["employees"], json!(1));
    }

    #[tokio::test]
    async fn employee_image_upload_is_served_back() {
        let app = test_app();
        let ana = json_body(send(&app, "POST", "/api/employees", Some(json!({ "name": "Ana" }))).await).await;
        let id = ana["id"].as_str().unwrap();

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/employees/{}/image?fileName=foto.png", id))
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(&b"fake-png"[..]))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let employee = json_body(response).await;
        let expected = format!("http://localhost:3000/api/files/employees/{}/foto.png", id);
        assert_eq!(employee["imageUrl"], json!(expected));

        let response = send(&app, "GET", &format!("/api/files/employees/{}/foto.png", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fake-png");

        let response = send(&app, "GET", "/api/files/employees/nada.png", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn image_upload_without_file_name_gets_a_json_error() {
        let app = test_app();
        let ana = json_body(send(&app, "POST", "/api/employees", Some(json!({ "name": "Ana" }))).await).await;

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/employees/{}/image", ana["id"].as_str().unwrap()))
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(&b"fake-png"[..]))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"], json!("Nome de arquivo inválido."));
    }
}
