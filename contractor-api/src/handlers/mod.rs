pub mod invoices;
pub mod notifications;
pub mod projects;
pub mod revenue;

use actix_web::{web, HttpResponse};
use contractor_sync::{SyncApi, SyncError};
use shared_types::ErrorResponse;
use std::sync::Arc;

/// Shared handle to the synchronization layer, registered as app data
pub type SyncData = web::Data<Arc<dyn SyncApi>>;

/// JSON error body with the status that matches the failure
pub(crate) fn error_response(err: SyncError) -> HttpResponse {
    let body = ErrorResponse {
        error: err.to_string(),
    };

    match err {
        SyncError::NotFound { .. } => HttpResponse::NotFound().json(body),
        SyncError::Transport(_) => HttpResponse::ServiceUnavailable().json(body),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/projects", web::get().to(projects::list_projects))
        .route(
            "/api/projects/{id}/progress",
            web::patch().to(projects::update_progress),
        )
        .route("/api/invoices", web::get().to(invoices::list_invoices))
        .route(
            "/api/notifications",
            web::get().to(notifications::list_notifications),
        )
        .route("/api/revenue", web::get().to(revenue::list_revenue));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::ServerHandle;
    use actix_web::{App, HttpServer};
    use contractor_sync::{DataStore, HttpSyncApi, MockSyncApi};
    use shared_types::ProjectStatus;
    use std::time::Duration;

    /// Serves the API routes on an ephemeral port and returns the base URL
    fn start_server(api: Arc<dyn SyncApi>) -> (String, ServerHandle) {
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(api.clone()))
                .configure(configure)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        (format!("http://{addr}"), handle)
    }

    #[actix_web::test]
    async fn test_http_client_against_live_routes() {
        let store = Arc::new(DataStore::seeded());
        let (base_url, handle) = start_server(Arc::new(MockSyncApi::new(store.clone())));
        let client = HttpSyncApi::new(&base_url, Duration::from_secs(5)).unwrap();

        let projects = client.fetch_projects().await.unwrap();
        assert_eq!(projects.len(), 6);

        let err = client.update_project_progress(404, 10).await.unwrap_err();
        assert_eq!(err, SyncError::NotFound { id: 404 });

        let project = client.update_project_progress(6, 100).await.unwrap();
        assert_eq!(project.id, 6);
        assert_eq!(project.progress, 100);
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(store.projects().await[5], project);

        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn test_http_client_maps_server_errors_to_transport() {
        let store = Arc::new(DataStore::seeded());
        let (base_url, handle) =
            start_server(Arc::new(MockSyncApi::new(store).with_failure_rate(1.0)));
        let client = HttpSyncApi::new(&base_url, Duration::from_secs(5)).unwrap();

        match client.fetch_projects().await {
            Err(SyncError::Transport(message)) => assert!(message.contains("503")),
            other => panic!("expected transport error, got {other:?}"),
        }

        let err = client.update_project_progress(1, 50).await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));

        handle.stop(true).await;
    }
}
