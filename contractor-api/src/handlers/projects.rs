use actix_web::{web, HttpResponse, Result as ActixResult};
use contractor_sync::clamp_progress;
use shared_types::{ProjectsResponse, UpdateProgressRequest};
use tracing::info;

use super::{error_response, SyncData};

pub async fn list_projects(api: SyncData) -> ActixResult<HttpResponse> {
    match api.fetch_projects().await {
        Ok(projects) => Ok(HttpResponse::Ok().json(ProjectsResponse { projects })),
        Err(e) => {
            tracing::error!("Failed to fetch projects: {}", e);
            Ok(error_response(e))
        }
    }
}

pub async fn update_progress(
    api: SyncData,
    path: web::Path<i64>,
    request: web::Json<UpdateProgressRequest>,
) -> ActixResult<HttpResponse> {
    let project_id = path.into_inner();
    let progress = clamp_progress(request.progress);

    if i32::from(progress) != request.progress {
        info!(
            "Clamped progress for project {} from {} to {}",
            project_id, request.progress, progress
        );
    }

    match api.update_project_progress(project_id, progress).await {
        Ok(project) => {
            info!(
                "Project {} progress updated to {} ({})",
                project.id,
                project.progress,
                project.status.label()
            );
            Ok(HttpResponse::Ok().json(project))
        }
        Err(e) => {
            tracing::warn!("Progress update for project {} failed: {}", project_id, e);
            Ok(error_response(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::configure;
    use actix_web::{http::StatusCode, test, web, App};
    use contractor_sync::{DataStore, MockSyncApi, SyncApi};
    use serde_json::json;
    use shared_types::{ErrorResponse, Project, ProjectStatus, ProjectsResponse};
    use std::sync::Arc;

    fn api() -> Arc<dyn SyncApi> {
        Arc::new(MockSyncApi::new(Arc::new(DataStore::seeded())))
    }

    #[actix_web::test]
    async fn test_list_projects() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(api()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        let body: ProjectsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.projects.len(), 6);
        assert_eq!(body.projects[0].progress, 62);
    }

    #[actix_web::test]
    async fn test_patch_progress_completes_at_100() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(api()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/api/projects/6/progress")
            .set_json(json!({ "progress": 100 }))
            .to_request();
        let project: Project = test::call_and_read_body_json(&app, req).await;

        assert_eq!(project.progress, 100);
        assert_eq!(project.status, ProjectStatus::Completed);
    }

    #[actix_web::test]
    async fn test_patch_progress_clamps_body() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(api()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/api/projects/2/progress")
            .set_json(json!({ "progress": -40 }))
            .to_request();
        let project: Project = test::call_and_read_body_json(&app, req).await;

        assert_eq!(project.progress, 0);
        assert_eq!(project.status, ProjectStatus::InProgress);
    }

    #[actix_web::test]
    async fn test_patch_unknown_project_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(api()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/api/projects/404/progress")
            .set_json(json!({ "progress": 50 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Project not found: 404");
    }

    #[actix_web::test]
    async fn test_transport_failure_is_503() {
        let failing: Arc<dyn SyncApi> =
            Arc::new(MockSyncApi::new(Arc::new(DataStore::seeded())).with_failure_rate(1.0));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(failing))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
