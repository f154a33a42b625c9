/// One 1-based page of `items`. Page 0, a zero page size, or a page past
/// the end yields an empty list.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }

    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return Vec::new(),
    };
    let end = start.saturating_add(page_size).min(items.len());

    items[start..end].to_vec()
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
