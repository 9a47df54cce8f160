use serde::{Deserialize, Deserializer};

use crate::service::Page;

// query strings carry the page as text; anything that is not an integer means the first page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<Page, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(Page::new)
        .unwrap_or_default())
}

#[derive(Deserialize, Default)]
pub struct PageQuery {
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_page")]
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn page_of(uri: &str) -> i64 {
        let uri: Uri = uri.parse().unwrap();
        let Query(query) = Query::<PageQuery>::try_from_uri(&uri).unwrap();
        query.page.number()
    }

    #[test]
    fn missing_page_is_first() {
        assert_eq!(page_of("/questions"), 1);
    }

    #[test]
    fn numeric_page_is_used() {
        assert_eq!(page_of("/questions?page=3"), 3);
    }

    #[test]
    fn garbage_falls_back_to_first() {
        assert_eq!(page_of("/questions?page=two"), 1);
        assert_eq!(page_of("/questions?page="), 1);
    }

    #[test]
    fn non_positive_is_clamped() {
        assert_eq!(page_of("/questions?page=0"), 1);
        assert_eq!(page_of("/questions?page=-4"), 1);
    }
}
