use actix_web::{HttpResponse, Result as ActixResult};
use shared_types::NotificationsResponse;

use super::{error_response, SyncData};

pub async fn list_notifications(api: SyncData) -> ActixResult<HttpResponse> {
    match api.fetch_notifications().await {
        Ok(notifications) => Ok(HttpResponse::Ok().json(NotificationsResponse { notifications })),
        Err(e) => {
            tracing::error!("Failed to fetch notifications: {}", e);
            Ok(error_response(e))
        }
    }
}
