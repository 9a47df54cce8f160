use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories::CategoryMap, NewQuestion, Question},
    server::{
        app::AppState,
        deserializers::PageQuery,
        error::FaultExt,
        extractors::{IdPath, JsonBody},
    },
    service::{self, Fault},
};

use super::{ApiResponse, Success};

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<CategoryMap>,
    // never scoped to a category on these routes
    current_category: &'static str,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<QuestionsBody> {
    let listing = service::list_questions(&pool, page).await.on_read()?;
    Ok(Json(QuestionsBody {
        success: true,
        questions: listing.questions.items,
        total_questions: listing.questions.total,
        categories: Some(listing.categories),
        current_category: "",
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(question): JsonBody<NewQuestion>,
) -> ApiResponse<Success> {
    service::create_question(&pool, &question).await.on_write()?;
    Ok(Success::ok())
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath,
) -> ApiResponse<Success> {
    service::delete_question(&pool, id).await.on_read()?;
    Ok(Success::ok())
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<QuestionsBody> {
    let term = body
        .search_term
        .ok_or_else(|| Fault::Validation("searchTerm is required".to_owned()))
        .on_write()?;
    let found = service::search_questions(&pool, &term, page)
        .await
        .on_write()?;
    Ok(Json(QuestionsBody {
        success: true,
        questions: found.items,
        total_questions: found.total,
        categories: None,
        current_category: "",
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
