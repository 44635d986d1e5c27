use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of a sequence plus the page count it was cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'s, T> {
    pub visible: &'s [T],
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Slice `[(page-1)*size, page*size)` of `sequence`, clamped to its bounds.
/// Pages past the end yield an empty slice; page 0 is treated as page 1.
pub fn paginate<T>(sequence: &[T], page_size: NonZeroUsize, current_page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let start = current_page.max(1).saturating_sub(1).saturating_mul(size).min(sequence.len());
    let end = start.saturating_add(size).min(sequence.len());
    Page {
        visible: &sequence[start..end],
        total_pages: total_pages(sequence.len(), page_size),
    }
}

/// Page size and 1-based current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: NonZeroUsize,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl Pagination {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page_size, current_page: 1 }
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, total_pages: usize) {
        if total_pages == 0 {
            return;
        }
        self.current_page = (self.current_page + 1).min(total_pages);
    }

    /// Jumps to page `n` when it exists. Returns whether the page changed
    /// or was already current; out-of-range requests are ignored.
    pub fn go_to(&mut self, n: usize, total_pages: usize) -> bool {
        if n >= 1 && n <= total_pages {
            self.current_page = n;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pulls the current page back inside `[1, max(total_pages, 1)]`.
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn empty_sequence_has_no_pages() {
        let empty: [u8; 0] = [];
        let page = paginate(&empty, size(5), 1);
        assert!(page.visible.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn last_page_may_be_short() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(&items, size(5), 3);
        assert_eq!(page.visible, &[11, 12]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (1..=7).collect();
        let page = paginate(&items, size(5), 4);
        assert!(page.visible.is_empty());
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut pagination = Pagination::new(size(5));
        pagination.previous();
        assert_eq!(pagination.current_page(), 1);
        pagination.next(0);
        assert_eq!(pagination.current_page(), 1);
        pagination.next(2);
        pagination.next(2);
        assert_eq!(pagination.current_page(), 2);
        assert!(!pagination.go_to(3, 2));
        assert!(!pagination.go_to(0, 2));
        assert_eq!(pagination.current_page(), 2);
        assert!(pagination.go_to(1, 2));
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn clamp_pulls_back_into_range() {
        let mut pagination = Pagination::new(size(5));
        pagination.go_to(4, 4);
        pagination.clamp(2);
        assert_eq!(pagination.current_page(), 2);
        pagination.clamp(0);
        assert_eq!(pagination.current_page(), 1);
    }
}
