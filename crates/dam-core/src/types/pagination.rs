//! Limit/offset pagination for asset queries.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 20;

/// Limit/offset window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of items on the page (at least 1).
    limit: u32,
    /// Number of items skipped before the page starts.
    offset: u64,
}

impl Pagination {
    /// Create a pagination window. The limit must be at least 1.
    pub fn from_limit_and_offset(limit: u32, offset: u64) -> Result<Self, AppError> {
        if limit == 0 {
            return Err(AppError::validation("Pagination limit must be at least 1"));
        }
        Ok(Self { limit, offset })
    }

    /// Return the `LIMIT` value.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Return the `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Apply the window to an iterator of already ordered items.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total_items: u64,
    /// The window that produced this page.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Create a page.
    pub fn new(items: Vec<T>, total_items: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total_items,
            pagination,
        }
    }

    /// Whether more items follow this page.
    pub fn has_next(&self) -> bool {
        self.pagination.offset() + (self.items.len() as u64) < self.total_items
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let page = Pagination::default();
        assert_eq!(page.limit(), 20);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(Pagination::from_limit_and_offset(0, 0).is_err());
    }

    #[test]
    fn test_apply_window() {
        let page = Pagination::from_limit_and_offset(2, 1).expect("valid");
        assert_eq!(page.apply(1..=5), vec![2, 3]);
    }

    #[test]
    fn test_has_next() {
        let window = Pagination::from_limit_and_offset(2, 0).expect("valid");
        let page = Page::new(vec![1, 2], 3, window);
        assert!(page.has_next());
        let window = Pagination::from_limit_and_offset(2, 2).expect("valid");
        let last = Page::new(vec![3], 3, window);
        assert!(!last.has_next());
    }
}
