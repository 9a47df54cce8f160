//! Page arithmetic for the listing endpoints.

/// Questions per page, fixed for every listing.
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// A 1-indexed page of `QUESTIONS_PER_PAGE` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    /// Pages below 1 are clamped to the first page.
    pub fn new(page: i64) -> Self {
        Self(page.max(1))
    }

    #[cfg(test)]
    pub fn number(&self) -> i64 {
        self.0
    }

    pub fn limit(&self) -> i64 {
        QUESTIONS_PER_PAGE
    }

    /// SQL OFFSET; saturates so absurd page numbers just land past the end.
    pub fn offset(&self) -> i64 {
        (self.0 - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

/// Items of one page plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
}
