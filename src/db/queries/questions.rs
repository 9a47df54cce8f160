use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::service::QuizStrategy;

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    // form selects post these as "3"
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub difficulty: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub category: i64,
}

const COLUMNS: &str = "id, question, answer, category, difficulty";

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.difficulty)
    .bind(question.category)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

#[cfg(test)]
pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions WHERE questions.id = ?1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let mut conn = pool.acquire().await?;

    let affected = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    Ok(affected > 0)
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!("SELECT {COLUMNS} FROM questions ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn get_questions_page(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions ORDER BY id LIMIT ?1 OFFSET ?2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

// instr keeps the match literal: '%' and '_' in the term are not wildcards
const SEARCH_FILTER: &str = "instr(lower(question), lower(?1)) > 0";

pub async fn count_matching_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM questions WHERE {SEARCH_FILTER}"
    ))
    .bind(term)
    .fetch_one(pool)
    .await
}

pub async fn search_questions_page(
    pool: &SqlitePool,
    term: &str,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions WHERE {SEARCH_FILTER} ORDER BY id LIMIT ?2 OFFSET ?3"
    ))
    .bind(term)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_questions_for_category(pool: &SqlitePool, category: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions WHERE category = ?1")
        .bind(category)
        .fetch_one(pool)
        .await
}

pub async fn get_questions_for_category_page(
    pool: &SqlitePool,
    category: i64,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions WHERE category = ?1 ORDER BY id LIMIT ?2 OFFSET ?3"
    ))
    .bind(category)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn pick_question(
    pool: &SqlitePool,
    category: Option<i64>,
    exclude: &[i64],
    strategy: QuizStrategy,
) -> sqlx::Result<Option<Question>> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM questions WHERE 1 = 1"));
    if let Some(category) = category {
        builder.push(" AND category = ");
        builder.push_bind(category);
    }
    if !exclude.is_empty() {
        // one bind for the whole list, SQLite caps the number of variables
        let ids = serde_json::to_string(exclude).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        builder.push(" AND id NOT IN (SELECT value FROM json_each(");
        builder.push_bind(ids);
        builder.push("))");
    }
    builder.push(match strategy {
        QuizStrategy::First => " ORDER BY id",
        QuizStrategy::Random => " ORDER BY RANDOM()",
    });
    builder.push(" LIMIT 1");

    builder.build_query_as::<Question>().fetch_optional(pool).await
}

// existing ids are overwritten, nothing is deleted
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, difficulty, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                difficulty = excluded.difficulty,
                category = excluded.category
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.difficulty)
        .bind(question.category)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
