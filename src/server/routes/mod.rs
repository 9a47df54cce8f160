mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use axum::Json;
use serde::Serialize;

use super::error::ApiError;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// Body of endpoints that only report that they went through.
#[derive(Serialize)]
pub struct Success {
    success: bool,
}

impl Success {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}
