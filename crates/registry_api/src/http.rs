//! Module used to serve the JSON API. Each submodule is specific for a route segment.

use actix_web::{HttpMessage as _, HttpRequest, Responder, Scope, error::JsonPayloadError, web};
use serde::Serialize;
use tracing_actix_web::RequestId;

use crate::{ApiErrorKind, ApiResponse, FitRequestId as _, TracedError};

use self::category::category_scope;
use self::event::event_scope;

mod category;
mod event;

/// The body of the responses to the updates, and to the rejected creations.
#[derive(Serialize)]
struct StatusResponse {
    status: String,
}

/// The actix route handler for the Not Found response of the API.
async fn not_found(req_id: RequestId) -> ApiResponse<impl Responder> {
    Err::<String, _>(ApiErrorKind::EndpointNotFound).fit(req_id)
}

/// Converts the errors of the JSON bodies that can't be read into the error response of the API.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    match req.extensions().get::<RequestId>().copied() {
        Some(request_id) => {
            TracedError::new(request_id, ApiErrorKind::InvalidPayload(err.to_string())).into()
        }
        None => err.into(),
    }
}

pub fn api_route() -> Scope {
    web::scope("/api")
        .app_data(
            web::JsonConfig::default()
                .limit(1024 * 16)
                .error_handler(json_error_handler),
        )
        .service(category_scope())
        .service(event_scope())
        .default_service(web::to(not_found))
}
