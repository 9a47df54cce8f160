//! Every failure leaves the API as `{success: false, error: <code>, message: <fixed text>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::service::Fault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    UnprocessableEntity,
    InternalServerError,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

/// Maps service faults onto status codes.
///
/// Read routes report internal faults as 500. Write routes (`POST /questions`,
/// `POST /questions/search`, `POST /quizzes`) report them as 422, which is what
/// existing clients of this API expect.
pub trait FaultExt<T> {
    fn on_read(self) -> Result<T, ApiError>;
    fn on_write(self) -> Result<T, ApiError>;
}

impl<T> FaultExt<T> for Result<T, Fault> {
    fn on_read(self) -> Result<T, ApiError> {
        self.map_err(|fault| classify(fault, ApiError::InternalServerError))
    }

    fn on_write(self) -> Result<T, ApiError> {
        self.map_err(|fault| classify(fault, ApiError::UnprocessableEntity))
    }
}

fn classify(fault: Fault, internal: ApiError) -> ApiError {
    match fault {
        Fault::NotFound { .. } => {
            tracing::debug!("{fault}");
            ApiError::NotFound
        }
        Fault::Validation(_) => {
            tracing::info!("{fault}");
            ApiError::UnprocessableEntity
        }
        Fault::Internal(ref error) => {
            tracing::error!(%error, "Request failed");
            internal
        }
    }
}
