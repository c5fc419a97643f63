use actix_web::{get, web, HttpResponse, Responder};
use log::warn;
use crate::model::{DatabaseStatus, HealthStatus};
use crate::server::state::AppState;
use crate::server::util::time::helper;

const SERVICE_NAME: &str = "Restaurant Server";

#[get("/api/health")]
/// liveness, never touches the database
async fn health() -> impl Responder {
    web::Json(HealthStatus {
        status: "UP".to_string(),
        timestamp: helper::epoch_millis(),
        service: SERVICE_NAME.to_string(),
    })
}

#[get("/api/db-check")]
async fn db_check(data: web::Data<AppState>) -> impl Responder {
    match data.database().check().await {
        Ok(info) => HttpResponse::Ok().json(DatabaseStatus {
            status: "UP".to_string(),
            database: "Connected".to_string(),
            catalog: Some(info.catalog),
            url: Some(info.url),
            error: None,
            timestamp: Some(helper::epoch_millis()),
        }),
        Err(e) => {
            warn!("db check failed, {}", e);
            HttpResponse::ServiceUnavailable().json(DatabaseStatus {
                status: "DOWN".to_string(),
                database: "Connection failed".to_string(),
                catalog: None,
                url: None,
                error: Some(e.to_string()),
                timestamp: Some(helper::epoch_millis()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use crate::server::repository::{DatabaseInfo, DatabaseProbe, RepositoryError};
    use crate::server::util::time::frozen;
    use super::*;

    struct Unreachable;

    #[async_trait]
    impl DatabaseProbe for Unreachable {
        async fn check(&self) -> Result<DatabaseInfo, RepositoryError> {
            Err(RepositoryError::Timeout)
        }
    }

    #[actix_web::test]
    async fn health_is_up() {
        frozen::set(1_234);
        let app = test::init_service(App::new().service(health)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let status: HealthStatus = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            status,
            HealthStatus { status: "UP".to_string(), timestamp: 1_234, service: SERVICE_NAME.to_string() }
        );
        frozen::set(0);
    }

    #[actix_web::test]
    async fn db_check_reports_catalog() {
        let app = test::init_service(App::new().app_data(web::Data::new(AppState::in_memory())).service(db_check)).await;
        let req = test::TestRequest::get().uri("/api/db-check").to_request();
        let status: DatabaseStatus = test::call_and_read_body_json(&app, req).await;
        assert!(status.is_up());
        assert_eq!(status.catalog.as_deref(), Some("memory"));
        assert_eq!(status.timestamp, Some(0));
    }

    #[actix_web::test]
    async fn db_check_reports_down() {
        let state = AppState::in_memory().with_database(Arc::new(Unreachable));
        let app = test::init_service(App::new().app_data(web::Data::new(state)).service(db_check)).await;
        let req = test::TestRequest::get().uri("/api/db-check").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        let status: DatabaseStatus = test::read_body_json(res).await;
        assert_eq!(status.status, "DOWN");
        assert_eq!(status.database, "Connection failed");
        assert_eq!(status.error.as_deref(), Some("statement timed out"));
        assert!(status.catalog.is_none() && status.url.is_none());
    }
}
