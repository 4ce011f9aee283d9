//! Page arithmetic for the students listing.

use serde::{Deserialize, Serialize};

/// Fixed number of students per page.
pub const PAGE_SIZE: u32 = 10;

/// A validated, 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Returns `None` for page 0 or a zero limit.
    pub fn new(page: u32, limit: u32) -> Option<Self> {
        (page >= 1 && limit >= 1).then_some(Self { page, limit })
    }

    /// Request for `page` with the standard page size.
    pub fn page(page: u32) -> Option<Self> {
        Self::new(page, PAGE_SIZE)
    }

    pub fn number(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// `ceil(count / limit)`; zero rows means zero pages.
    pub fn total_pages(&self, count: i64) -> i64 {
        total_pages(count, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
        }
    }
}

/// `ceil(count / limit)` for non-negative counts.
pub fn total_pages(count: i64, limit: u32) -> i64 {
    let limit = i64::from(limit.max(1));
    (count.max(0) + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_offset() {
        assert_eq!(PageRequest::default().offset(), 0);
        assert_eq!(PageRequest::page(1).unwrap().offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageRequest::page(3).unwrap().offset(), 20);
        assert_eq!(PageRequest::new(4, 25).unwrap().offset(), 75);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(PageRequest::page(0).is_none());
        assert!(PageRequest::new(1, 0).is_none());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn total_pages_matches_ceiling_division() {
        for count in 0..=105_i64 {
            let expected = (count as f64 / PAGE_SIZE as f64).ceil() as i64;
            assert_eq!(PageRequest::default().total_pages(count), expected);
        }
    }
}
