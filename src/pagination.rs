//! Page arithmetic for the member table.
//!
//! Pages are 1-based. An empty list still has a single (empty) page so that
//! "Page 1 of 1" is always a valid position.

/// Number of rows shown per page.
pub const PAGE_SIZE: usize = 10;

pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

pub fn clamp_page(page: usize, len: usize) -> usize {
    page.clamp(1, page_count(len))
}

/// Half-open index range of `page` within a list of `len` rows.
pub fn page_bounds(page: usize, len: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(len);
    let end = start.saturating_add(PAGE_SIZE).min(len);
    (start, end)
}

pub fn page_len(page: usize, len: usize) -> usize {
    let (start, end) = page_bounds(page, len);
    end - start
}

pub fn has_prev(page: usize) -> bool {
    page > 1
}

/// Next is available while the current page does not reach the end of the list.
pub fn has_next(page: usize, len: usize) -> bool {
    page.saturating_mul(PAGE_SIZE) < len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up_and_never_drops_below_one() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
        assert_eq!(page_count(46), 5);
    }

    #[test]
    fn bounds_cover_a_partial_last_page() {
        assert_eq!(page_bounds(1, 46), (0, 10));
        assert_eq!(page_bounds(5, 46), (40, 46));
        assert_eq!(page_len(5, 46), 6);
        assert_eq!(page_bounds(6, 46), (46, 46));
        assert_eq!(page_bounds(1, 0), (0, 0));
    }

    #[test]
    fn next_and_prev_availability() {
        assert!(!has_prev(1));
        assert!(has_prev(2));
        assert!(has_next(1, 11));
        assert!(!has_next(1, 10));
        assert!(!has_next(2, 20));
        assert!(!has_next(1, 0));
    }

    #[test]
    fn clamp_keeps_page_in_range() {
        assert_eq!(clamp_page(0, 30), 1);
        assert_eq!(clamp_page(9, 30), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }
}
