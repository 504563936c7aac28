//! The library of the event registry server.
//!
//! It contains the JSON API routes, the HTML pages and the error responses. The stores themselves
//! are in the [`registry_lib`] crate.

use tracing_actix_web::RequestId;

pub mod configure;
mod env;
mod error;
mod http;
mod pages;
mod utils;

pub use env::*;
pub use error::*;
pub use http::api_route;
pub use pages::{not_found, pages_config};
pub use utils::*;

/// The response type of the route handlers.
pub type ApiResponse<T> = Result<T, TracedError>;

/// Attaches the ID of the current request to an error, so it is included in the response.
pub trait FitRequestId<T> {
    fn fit(self, request_id: RequestId) -> ApiResponse<T>;
}

impl<T, E> FitRequestId<T> for Result<T, E>
where
    E: Into<ApiErrorKind>,
{
    fn fit(self, request_id: RequestId) -> ApiResponse<T> {
        self.map_err(|e| TracedError::new(request_id, e))
    }
}
