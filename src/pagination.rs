use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// `?page=&limit=` as accepted by listing endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Items skipped before this page; saturates for out-of-range pages
    pub fn offset(&self) -> usize {
        to_usize(self.page.saturating_sub(1).saturating_mul(self.limit))
    }

    pub fn total_pages(&self, total: usize) -> u64 {
        (total as u64).div_ceil(self.limit)
    }

    /// Slice of `items` covered by this page
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(to_usize(self.limit))
            .collect()
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

impl From<PageQuery> for Page {
    fn from(q: PageQuery) -> Self {
        Page::new(q.page.unwrap_or(DEFAULT_PAGE), q.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = Page::from(PageQuery::default());
        assert_eq!(page, Page { page: 1, limit: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(1, 10);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
    }

    #[test]
    fn test_apply_second_page() {
        let page = Page::new(2, 3);
        assert_eq!(page.apply((1..=8).collect()), vec![4, 5, 6]);
        assert!(Page::new(5, 3).apply((1..=8).collect::<Vec<_>>()).is_empty());
    }

    #[test]
    fn test_zero_values_clamped() {
        let page = Page::new(0, 0);
        assert_eq!(page, Page { page: 1, limit: 1 });
    }

    #[test]
    fn test_huge_page_is_empty() {
        let page = Page::from(PageQuery {
            page: Some(u64::MAX),
            limit: Some(10),
        });
        assert_eq!(page.offset(), usize::MAX);
        assert!(page.apply(vec![1, 2, 3]).is_empty());

        let page = Page::new(2, u64::MAX);
        assert!(page.apply(vec![1, 2, 3]).is_empty());
        assert_eq!(page.total_pages(3), 1);
    }
}
