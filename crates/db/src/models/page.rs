//! Pagination envelope returned by the list endpoints.

use serde::Serialize;

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub last_page: i64,
    pub total: i64,
}

impl<T> Page<T> {
    /// Assemble a page from fetched rows and the filtered match count.
    ///
    /// `last_page` is the ceiling of `total / per_page` and never drops
    /// below 1, so an empty result still reads as page 1 of 1. A request
    /// past the end yields empty `data` with the real `total`.
    pub fn new(data: Vec<T>, current_page: i64, per_page: i64, total: i64) -> Self {
        let last_page = ((total + per_page - 1) / per_page).max(1);
        Self {
            data,
            current_page,
            last_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 1, 10, 25);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.total, 25);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        let page: Page<i32> = Page::new(Vec::new(), 3, 10, 30);
        assert_eq!(page.last_page, 3);
    }

    #[test]
    fn empty_result_is_one_page() {
        let page: Page<i32> = Page::new(Vec::new(), 1, 10, 0);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn past_the_end_keeps_requested_page() {
        let page: Page<i32> = Page::new(Vec::new(), 9, 10, 12);
        assert_eq!(page.current_page, 9);
        assert_eq!(page.last_page, 2);
    }
}
