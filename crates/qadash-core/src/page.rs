//! Pagination over the filtered, sorted sequence

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page cursor with a fixed page size.
///
/// The page number is always kept within `[1, page_count(total)]`, where an
/// empty sequence still has one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: usize,
    size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Page {
    /// Start at page 1. A zero size is raised to 1.
    pub fn new(size: usize) -> Self {
        Self {
            number: 1,
            size: size.max(1),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of pages needed for `total` items (at least 1).
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.size).max(1)
    }

    /// Jump to `number`, clamped into range. Returns the resulting page.
    pub fn set(&mut self, number: usize, total: usize) -> usize {
        self.number = number.clamp(1, self.page_count(total));
        self.number
    }

    pub fn next(&mut self, total: usize) -> usize {
        self.set(self.number.saturating_add(1), total)
    }

    pub fn prev(&mut self, total: usize) -> usize {
        self.set(self.number.saturating_sub(1), total)
    }

    pub fn first(&mut self) {
        self.number = 1;
    }

    pub fn last(&mut self, total: usize) -> usize {
        self.set(usize::MAX, total)
    }

    /// Re-clamp after the sequence length changed.
    pub fn clamp(&mut self, total: usize) -> usize {
        self.set(self.number, total)
    }

    /// Index range of the current page within a sequence of `total` items.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.number - 1).saturating_mul(self.size).min(total);
        let end = start.saturating_add(self.size).min(total);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let page = Page::new(10);
        assert_eq!(page.page_count(0), 1);
        assert_eq!(page.page_count(10), 1);
        assert_eq!(page.page_count(11), 2);
        assert_eq!(page.page_count(25), 3);
    }

    #[test]
    fn test_set_clamps_into_range() {
        let mut page = Page::new(10);
        assert_eq!(page.set(3, 25), 3);
        assert_eq!(page.set(4, 25), 3);
        assert_eq!(page.set(0, 25), 1);
        assert_eq!(page.set(7, 0), 1);
    }

    #[test]
    fn test_next_prev_stay_in_bounds() {
        let mut page = Page::new(10);
        assert_eq!(page.prev(25), 1);
        assert_eq!(page.next(25), 2);
        assert_eq!(page.next(25), 3);
        assert_eq!(page.next(25), 3);
        assert_eq!(page.last(25), 3);
        page.first();
        assert_eq!(page.number(), 1);
    }

    #[test]
    fn test_range_for_partial_last_page() {
        let mut page = Page::new(10);
        page.set(3, 25);
        assert_eq!(page.range(25), 20..25);
        page.first();
        assert_eq!(page.range(25), 0..10);
        assert_eq!(page.range(0), 0..0);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut page = Page::new(10);
        page.set(3, 25);
        assert_eq!(page.clamp(12), 2);
        assert_eq!(page.range(12), 10..12);
    }

    #[test]
    fn test_zero_size_is_raised() {
        assert_eq!(Page::new(0).size(), 1);
    }
}
