//! Listing, search and quiz selection on top of the query layer.
//!
//! Every operation re-reads storage; nothing is kept between calls.

mod pagination;

pub use pagination::{Page, Paginated, QUESTIONS_PER_PAGE};

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{self, CategoryMap};
use crate::db::queries::questions;
use crate::db::{Category, NewQuestion, Question};
use crate::telemetry::{QUIZ_EXHAUSTED_CNTR, QUIZ_SERVED_CNTR};

#[derive(Debug, thiserror::Error)]
pub enum Fault {
    #[error("{resource} {id} does not exist")]
    NotFound { resource: &'static str, id: i64 },
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("storage failure: {0}")]
    Internal(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, Fault>;

/// How a quiz question is picked among the remaining candidates.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuizStrategy {
    /// Lowest id first.
    #[default]
    First,
    Random,
}

pub struct QuestionListing {
    pub questions: Paginated<Question>,
    pub categories: CategoryMap,
}

pub struct CategoryQuestions {
    pub category: Category,
    pub questions: Paginated<Question>,
}

pub async fn list_categories(pool: &SqlitePool) -> ServiceResult<CategoryMap> {
    Ok(categories::to_map(categories::get_all_categories(pool).await?))
}

pub async fn list_questions(pool: &SqlitePool, page: Page) -> ServiceResult<QuestionListing> {
    let items = questions::get_questions_page(pool, page.limit(), page.offset()).await?;
    let total = questions::count_questions(pool).await?;
    Ok(QuestionListing {
        questions: Paginated { items, total },
        categories: list_categories(pool).await?,
    })
}

pub async fn search_questions(
    pool: &SqlitePool,
    term: &str,
    page: Page,
) -> ServiceResult<Paginated<Question>> {
    let items = questions::search_questions_page(pool, term, page.limit(), page.offset()).await?;
    let total = questions::count_matching_questions(pool, term).await?;
    tracing::debug!(term, total, "Searched questions");
    Ok(Paginated { items, total })
}

pub async fn questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
    page: Page,
) -> ServiceResult<CategoryQuestions> {
    let category = categories::get_category(pool, category_id)
        .await?
        .ok_or(Fault::NotFound {
            resource: "category",
            id: category_id,
        })?;
    let items = questions::get_questions_for_category_page(
        pool,
        category_id,
        page.limit(),
        page.offset(),
    )
    .await?;
    let total = questions::count_questions_for_category(pool, category_id).await?;
    Ok(CategoryQuestions {
        category,
        questions: Paginated { items, total },
    })
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> ServiceResult<i64> {
    let id = questions::create_question(pool, question).await?;
    tracing::info!(id, category = question.category, "Created question");
    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    if !questions::delete_question(pool, id).await? {
        return Err(Fault::NotFound {
            resource: "question",
            id,
        });
    }
    tracing::info!(id, "Deleted question");
    Ok(())
}

/// Next quiz question from `category` that is not in `previous`.
///
/// A category id of 0 (or none) means any category. `Ok(None)` once every
/// candidate has been served.
pub async fn next_quiz_question(
    pool: &SqlitePool,
    category: Option<i64>,
    previous: &[i64],
    strategy: QuizStrategy,
) -> ServiceResult<Option<Question>> {
    let category = category.filter(|id| *id != 0);
    let question = questions::pick_question(pool, category, previous, strategy).await?;

    let scope = if category.is_some() { "category" } else { "any" };
    match &question {
        Some(q) => {
            QUIZ_SERVED_CNTR.with_label_values(&[scope]).inc();
            tracing::debug!(id = q.id, scope, "Serving quiz question");
        }
        None => {
            QUIZ_EXHAUSTED_CNTR.with_label_values(&[scope]).inc();
            tracing::debug!(scope, seen = previous.len(), "Quiz exhausted");
        }
    }
    Ok(question)
}
