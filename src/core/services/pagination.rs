use crate::core::errors::{ActivityError, Result};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One window over an ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number that was requested.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// Never less than 1, even for an empty sequence.
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based position of the first item on this page, or 0 when empty.
    pub fn first_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }
}

/// Number of pages needed for `len` items, with a floor of one page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size).max(1)
}

/// Slice `[(page-1)*page_size, page*page_size)` out of `items`, clamped
/// to its bounds. Pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Result<Page<'_, T>> {
    if page == 0 {
        return Err(ActivityError::validation("page must be 1 or greater"));
    }
    if page_size == 0 {
        return Err(ActivityError::validation("page size must be 1 or greater"));
    }

    let start = (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| ActivityError::validation("page number is too large"))?;

    let window = if start < items.len() {
        let end = start.saturating_add(page_size).min(items.len());
        &items[start..end]
    } else {
        &items[..0]
    };

    Ok(Page {
        items: window,
        page,
        page_size,
        total_items: items.len(),
        total_pages: total_pages(items.len(), page_size),
    })
}
