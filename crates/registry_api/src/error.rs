use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};
use registry_lib::error::RegistryError;
use tracing_actix_web::RequestId;

#[derive(thiserror::Error, Debug)]
#[repr(i32)] // i32 to be used with clients that don't support unsigned integers
#[rustfmt::skip]
pub enum ApiErrorKind {
    // Caution: when creating a new error, you must ensure its code isn't
    // in conflict with another one in `registry_lib::RegistryError`.

    // --------
    // --- Internal server errors
    // --------

    #[error("page rendering error: {0}")]
    Render(#[from] askama::Error) = 101,

    // ...Errors from registry_lib

    // --------
    // --- Logical errors
    // --------

    #[error("not found")]
    EndpointNotFound = 301,
    #[error("invalid request body: {0}")]
    InvalidPayload(String) = 305,

    // ...Errors from registry_lib

    #[error(transparent)]
    Lib(#[from] RegistryError),
}

impl ApiErrorKind {
    pub fn get_err_type_and_status_code(&self) -> (i32, StatusCode) {
        use ApiErrorKind as E;
        use RegistryError as LE;
        use StatusCode as S;

        match self {
            E::Render(_) => (101, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::DbError(_)) => (102, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::Internal(_)) => (103, S::INTERNAL_SERVER_ERROR),

            E::EndpointNotFound => (301, S::NOT_FOUND),
            E::Lib(LE::CategoryNotFound(_)) => (302, S::NOT_FOUND),
            E::Lib(LE::EventNotFound(_)) => (303, S::NOT_FOUND),
            E::Lib(LE::Validation(_)) => (304, S::BAD_REQUEST),
            E::InvalidPayload(_) => (305, S::BAD_REQUEST),
        }
    }

    /// Returns the message sent to the client.
    ///
    /// The details of the internal errors are only logged.
    fn public_message(&self, status_code: StatusCode) -> String {
        if status_code.is_server_error() {
            tracing::error!("{self}");
            "internal server error".to_owned()
        } else {
            self.to_string()
        }
    }
}

#[derive(Debug)]
pub struct TracedError {
    pub status_code: Option<StatusCode>,
    pub r#type: Option<i32>,
    pub request_id: RequestId,
    pub error: ApiErrorKind,
}

impl fmt::Display for TracedError {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for TracedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl TracedError {
    /// Returns the error with its type and status code, attached to the provided request.
    pub fn new<E: Into<ApiErrorKind>>(request_id: RequestId, error: E) -> Self {
        let error = error.into();
        let (r#type, status_code) = error.get_err_type_and_status_code();
        Self {
            status_code: Some(status_code),
            r#type: Some(r#type),
            request_id,
            error,
        }
    }

    fn to_err_res(&self, r#type: i32, status_code: StatusCode) -> ErrorResponse {
        ErrorResponse {
            request_id: self.request_id.to_string(),
            r#type,
            message: self.error.public_message(status_code),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub r#type: i32,
    pub message: String,
}

impl actix_web::ResponseError for TracedError {
    fn status_code(&self) -> StatusCode {
        self.status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let r#type = self.r#type.unwrap_or(103);
        let status_code = self.status_code();

        HttpResponse::build(status_code).json(self.to_err_res(r#type, status_code))
    }
}
