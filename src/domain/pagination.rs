//! Fixed-size paging of an ordered result list.
//!
//! Page numbers are 1-based. [`paginate`] never clamps the page number; callers that
//! take page numbers from user input should run them through [`clamp_page`] first.

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Items on page `page` (1-based) of `page_size` items each.
///
/// Page 0, a page past the end, or a zero page size yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// `ceil(total / page_size)`; zero when `page_size` is zero.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Bring a requested page into `1..=page_count` (1 when there are no pages).
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Page numbers offered as direct links: the first `max_links` pages.
pub fn page_links(page_count: usize, max_links: usize) -> Vec<usize> {
    (1..=page_count.min(max_links)).collect()
}

/// One page of a result list plus the numbers needed to describe it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub number: usize,
    pub size: usize,
    pub total: usize,
    pub items: Vec<T>,
}

impl<T: Clone> Page<T> {
    pub fn of(items: &[T], number: usize, size: usize) -> Self {
        Self {
            number,
            size,
            total: items.len(),
            items: paginate(items, number, size).to_vec(),
        }
    }
}

impl<T> Page<T> {
    pub fn page_count(&self) -> usize {
        page_count(self.total, self.size)
    }

    /// Global serial number (1-based) of the item at `index` on this page.
    pub fn row_number(&self, index: usize) -> usize {
        self.number.saturating_sub(1) * self.size + index + 1
    }

    /// `(first, last)` serial numbers shown, or `None` for an empty page.
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.row_number(0), self.row_number(self.items.len() - 1)))
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.page_count()
    }
}
