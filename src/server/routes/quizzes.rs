use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::Question,
    server::{app::AppState, error::FaultExt, extractors::JsonBody},
    service::{self, QuizStrategy},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizBody {
    // an object carrying an id; a bare number is rejected
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
    #[serde(default)]
    previous_questions: Vec<i64>,
}

#[derive(Deserialize)]
struct QuizCategory {
    // category ids come back as "5" when the client took them from map keys
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizReply {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    State(strategy): State<QuizStrategy>,
    JsonBody(body): JsonBody<QuizBody>,
) -> ApiResponse<QuizReply> {
    let category = body.quiz_category.map(|c| c.id);
    let question =
        service::next_quiz_question(&pool, category, &body.previous_questions, strategy)
            .await
            .on_write()?;
    Ok(Json(QuizReply {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
