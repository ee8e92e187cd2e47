use serde::{Deserialize, Serialize};

/// Requested page of a listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of items skipped before this page. Capped at `i64::MAX` so it
    /// stays a valid SQL `OFFSET`; pages past the end come back empty.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .min(i64::MAX as u64)
    }
}

/// One page of results plus the total item count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_to_first_page() {
        let request = PageRequest::new(0, 10);
        assert_eq!(request.page, 1);
        assert_eq!(request.offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let request = PageRequest::new(u64::MAX, 10);
        assert_eq!(request.offset(), i64::MAX as u64);
        assert_eq!(PageRequest::new(2, u64::MAX).offset(), i64::MAX as u64);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(1, 10), 21);
        assert_eq!(page.total_pages(), 3);
    }
}
