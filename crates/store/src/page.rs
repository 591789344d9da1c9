//! Paging types for the listing queries.

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Creates a request for the given zero-based page. A size of zero
    /// is clamped to one.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// One page of results plus the totals needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    page: usize,
    size: usize,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Builds a page from the already-sliced items and the total match
    /// count before slicing.
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, yielding its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.size as u64)
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        (self.page as u64 + 1) >= self.total_pages().max(1)
    }

    /// Maps the page contents, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
