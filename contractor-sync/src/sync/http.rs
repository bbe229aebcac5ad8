use super::SyncApi;
use crate::error::SyncError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared_types::{
    Invoice, InvoicesResponse, Notification, NotificationsResponse, Project, ProjectsResponse,
    RevenuePoint, RevenueResponse, UpdateProgressRequest,
};
use std::time::Duration;

/// Synchronization layer talking to `contractor-api` over its JSON endpoints
pub struct HttpSyncApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSyncApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(SyncError::Transport(format!(
                "GET {} returned {}",
                path,
                response.status()
            )));
        }

        response.json::<T>().await.map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> SyncError {
    SyncError::Transport(err.to_string())
}

#[async_trait]
impl SyncApi for HttpSyncApi {
    async fn fetch_projects(&self) -> Result<Vec<Project>, SyncError> {
        let body: ProjectsResponse = self.get_json("/api/projects").await?;
        Ok(body.projects)
    }

    async fn fetch_invoices(&self) -> Result<Vec<Invoice>, SyncError> {
        let body: InvoicesResponse = self.get_json("/api/invoices").await?;
        Ok(body.invoices)
    }

    async fn fetch_notifications(&self) -> Result<Vec<Notification>, SyncError> {
        let body: NotificationsResponse = self.get_json("/api/notifications").await?;
        Ok(body.notifications)
    }

    async fn fetch_revenue(&self) -> Result<Vec<RevenuePoint>, SyncError> {
        let body: RevenueResponse = self.get_json("/api/revenue").await?;
        Ok(body.revenue)
    }

    async fn update_project_progress(&self, id: i64, progress: u8) -> Result<Project, SyncError> {
        let response = self
            .client
            .patch(self.url(&format!("/api/projects/{id}/progress")))
            .json(&UpdateProgressRequest {
                progress: i32::from(progress),
            })
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SyncError::NotFound { id }),
            status if status.is_success() => response.json::<Project>().await.map_err(transport),
            status => Err(SyncError::Transport(format!(
                "PATCH progress for project {id} returned {status}"
            ))),
        }
    }
}
