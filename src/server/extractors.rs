//! Extractors whose rejections use the API error envelope instead of axum's plain-text bodies.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;

/// JSON request body. A body that is not JSON at all is a 400, JSON of the wrong shape a 422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::info!(%rejection, "Rejected request body");
                Err(match rejection {
                    JsonRejection::MissingJsonContentType(_) | JsonRejection::BytesRejection(_) => {
                        ApiError::BadRequest
                    }
                    _ => ApiError::UnprocessableEntity,
                })
            }
        }
    }
}

/// Integer id from the path; anything else addresses no resource.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Unusable path id");
                ApiError::NotFound
            })?;
        Ok(Self(id))
    }
}
