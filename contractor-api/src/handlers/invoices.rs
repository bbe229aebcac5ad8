use actix_web::{HttpResponse, Result as ActixResult};
use shared_types::InvoicesResponse;

use super::{error_response, SyncData};

pub async fn list_invoices(api: SyncData) -> ActixResult<HttpResponse> {
    match api.fetch_invoices().await {
        Ok(invoices) => Ok(HttpResponse::Ok().json(InvoicesResponse { invoices })),
        Err(e) => {
            tracing::error!("Failed to fetch invoices: {}", e);
            Ok(error_response(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::configure;
    use actix_web::{test, web, App};
    use contractor_sync::{DataStore, MockSyncApi, SyncApi};
    use shared_types::{InvoiceStatus, InvoicesResponse};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_list_invoices_includes_dangling_reference() {
        let api: Arc<dyn SyncApi> = Arc::new(MockSyncApi::new(Arc::new(DataStore::seeded())));
        let app =
            test::init_service(App::new().app_data(web::Data::new(api)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/invoices").to_request();
        let body: InvoicesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.invoices.len(), 7);
        assert!(body.invoices.iter().any(|i| i.project_id == 99));
        assert!(body
            .invoices
            .iter()
            .any(|i| i.status == InvoiceStatus::Overdue));
    }
}
