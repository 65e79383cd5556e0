use serde::Serialize;

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// One page of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    /// The requested page clamped into `1..=total_pages`.
    pub safe_page: usize,
}

/// Number of pages for `len` items; an empty set still has one page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Clamps a requested page (possibly zero, negative or past the end).
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = i64::try_from(total_pages.max(1)).unwrap_or(i64::MAX);
    // Within 1..=last, so the cast back cannot truncate.
    requested.clamp(1, last) as usize
}

/// Slices out the requested page.
pub fn paginate<T: Clone>(items: &[T], requested: i64, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let safe_page = clamp_page(requested, total_pages);

    let start = (safe_page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        total_pages,
        safe_page,
    }
}
