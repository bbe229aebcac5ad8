use actix_web::{HttpResponse, Result as ActixResult};
use shared_types::RevenueResponse;

use super::{error_response, SyncData};

pub async fn list_revenue(api: SyncData) -> ActixResult<HttpResponse> {
    match api.fetch_revenue().await {
        Ok(revenue) => Ok(HttpResponse::Ok().json(RevenueResponse { revenue })),
        Err(e) => {
            tracing::error!("Failed to fetch revenue: {}", e);
            Ok(error_response(e))
        }
    }
}
