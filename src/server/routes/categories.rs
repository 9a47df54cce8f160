use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories::CategoryMap, Question},
    server::{
        app::AppState, deserializers::PageQuery, error::FaultExt, extractors::IdPath,
    },
    service,
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let categories = service::list_categories(&pool).await.on_read()?;
    Ok(Json(CategoriesBody {
        success: true,
        categories,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<CategoryQuestionsBody> {
    let found = service::questions_for_category(&pool, id, page)
        .await
        .on_read()?;
    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions: found.questions.items,
        total_questions: found.questions.total,
        current_category: found.category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
