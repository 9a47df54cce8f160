//! CSV bulk transfer of categories and questions.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: PathBuf, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: PathBuf) -> anyhow::Result<Vec<T>> {
    let file =
        std::fs::File::open(&path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Bad record in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(path)?
    }
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Exporting to {}",
        path.display()
    );
    write_to(path.join(CATEGORIES_FILE), categories)?;
    write_to(path.join(QUESTIONS_FILE), questions)?;
    Ok(())
}

/// Upserts by id; rows missing from the files are left alone.
pub async fn import_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(path.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(path.join(QUESTIONS_FILE))?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Importing from {}",
        path.display()
    );
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::questions::{create_question, tests::new_question};
    use crate::db::test_pool;

    #[tokio::test]
    async fn export_then_import_into_fresh_db() {
        let source = test_pool().await;
        create_question(&source, &new_question("Who wrote Hamlet?", 2))
            .await
            .unwrap();
        create_question(&source, &new_question("Capital, of France?", 3))
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        export_data(&source, dir.path()).await.unwrap();
        assert!(dir.path().join(CATEGORIES_FILE).is_file());

        let target = test_pool().await;
        import_data(&target, dir.path()).await.unwrap();
        assert_eq!(
            get_all_questions(&target).await.unwrap(),
            get_all_questions(&source).await.unwrap()
        );
    }

    #[tokio::test]
    async fn import_reads_type_header() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CATEGORIES_FILE), "id,type\n7,Music\n").unwrap();
        std::fs::write(
            dir.path().join(QUESTIONS_FILE),
            "id,question,answer,category,difficulty\n1,La Bamba?,Ritchie Valens,7,2\n",
        )
        .unwrap();

        let pool = test_pool().await;
        import_data(&pool, dir.path()).await.unwrap();

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories.last().unwrap().kind, "Music");
        let questions = get_all_questions(&pool).await.unwrap();
        assert_eq!(questions[0].answer, "Ritchie Valens");
        assert_eq!(questions[0].difficulty, 2);
    }

    #[tokio::test]
    async fn import_fails_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool().await;
        assert!(import_data(&pool, dir.path()).await.is_err());
    }
}
