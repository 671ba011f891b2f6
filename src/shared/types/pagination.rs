use std::ops::Range;

/// Requested page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: usize,
    pub page_size: usize,
}

impl PaginationParams {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// Number of pages needed for `total` items. Zero items means zero pages.
    pub fn total_pages(&self, total: usize) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        total.div_ceil(self.page_size)
    }

    /// Clamp the page into `[1, total_pages]`.
    ///
    /// With no pages at all the page is 1 and the view is empty.
    pub fn clamp(self, total: usize) -> Self {
        let last = self.total_pages(total).max(1);
        Self {
            page: self.page.clamp(1, last),
            page_size: self.page_size,
        }
    }

    /// Index range of the page within a collection of `total` items.
    /// Assumes the params are already clamped.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page.saturating_sub(1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }
}

/// Visible slice of a collection plus page bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<'a, T> PageView<'a, T> {
    /// Build the clamped view of `items` for `params`. `page_size` must be non-zero.
    pub fn new(items: &'a [T], params: PaginationParams) -> Self {
        let total = items.len();
        let params = params.clamp(total);
        let total_pages = params.total_pages(total);

        Self {
            items: &items[params.range(total)],
            total,
            page: params.page,
            page_size: params.page_size,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first visible item, 0 when empty
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }
}
