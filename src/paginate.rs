//! Reverse-numbered pagination planning.
//!
//! The upstream lists news newest-first but numbers its archive pages the
//! other way around: the main category page (`/{slug}.htm`) holds the
//! newest batch, and `/{slug}/{n}.htm` counts down from the second-newest
//! batch (highest `n`) to the oldest (`n = 1`). Callers address items with
//! a forward `(index, count)` window over the newest-first sequence; this
//! module turns such a window into the exact set of pages to pull and the
//! cut to apply to their concatenated rows.
//!
//! Historical deployments carried two subtly disagreeing renditions of
//! this arithmetic. The planner below is the corrected unification, pinned
//! by the boundary tests at the bottom of the file.

use serde::{Deserialize, Serialize};

/// Items per upstream listing page. Fixed by the CMS, not configurable.
pub const PAGE_SIZE: usize = 10;

/// Fetch-and-slice recipe for one listing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationPlan {
    /// Reverse page numbers to fetch after the main page, newest first.
    pub pages_to_fetch: Vec<u32>,

    /// Whether the already-fetched main page contributes rows.
    pub keep_main: bool,

    /// Window start within the concatenated rows.
    pub slice_start: usize,

    /// Window end (exclusive). The concatenation may legitimately fall
    /// short of it when the feed runs out.
    pub slice_end: usize,
}

impl PaginationPlan {
    /// A plan that fetches nothing and yields nothing.
    fn empty() -> Self {
        Self {
            pages_to_fetch: Vec::new(),
            keep_main: false,
            slice_start: 0,
            slice_end: 0,
        }
    }
}

/// Compute the fetch plan for `count` items starting at `index`
/// (0 = most recent).
///
/// `max_page` is the total page count including the main page. Logical
/// 0-based page `p` (0 = the main page) lives at upstream reverse number
/// `max_page - p`, so logical page 1 is the highest numbered archive page
/// and holds items strictly older than the main page, newer than logical
/// page 2.
pub fn plan_pages(page_size: usize, max_page: u32, index: usize, count: usize) -> PaginationPlan {
    if count == 0 || page_size == 0 || max_page == 0 {
        return PaginationPlan::empty();
    }

    let first = index / page_size;
    let last = ((index + count - 1) / page_size).min(max_page as usize - 1);
    if last < first {
        // The window starts beyond everything the upstream has.
        return PaginationPlan::empty();
    }

    let keep_main = first == 0;
    let pages_to_fetch = (first.max(1)..=last).map(|p| max_page - p as u32).collect();
    let slice_start = index - first * page_size;

    PaginationPlan {
        pages_to_fetch,
        keep_main,
        slice_start,
        slice_end: slice_start + count,
    }
}

/// Cut the requested window out of the concatenated rows.
///
/// Shorter-than-requested input yields a shorter window, never an error.
pub fn window<T>(mut items: Vec<T>, plan: &PaginationPlan) -> Vec<T> {
    if plan.slice_start >= items.len() {
        return Vec::new();
    }
    items.truncate(plan.slice_end.min(items.len()));
    items.split_off(plan.slice_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_window_inside_main_page_fetches_nothing() {
        let plan = plan_pages(10, 1, 0, 10);
        assert_eq!(
            plan,
            PaginationPlan {
                pages_to_fetch: vec![],
                keep_main: true,
                slice_start: 0,
                slice_end: 10,
            }
        );
    }

    #[test]
    fn test_small_window_with_offset_still_fits_main_page() {
        let plan = plan_pages(10, 40, 3, 5);
        assert!(plan.pages_to_fetch.is_empty());
        assert!(plan.keep_main);
        assert_eq!((plan.slice_start, plan.slice_end), (3, 8));
    }

    #[test]
    fn test_boundary_index_15_count_10_fetches_exactly_two_pages() {
        let plan = plan_pages(10, 9, 15, 10);
        assert_eq!(plan.pages_to_fetch, vec![8, 7]);
        assert!(!plan.keep_main);
        assert_eq!((plan.slice_start, plan.slice_end), (5, 15));
    }

    #[test]
    fn test_count_larger_than_one_page_forces_multi_page_fetch() {
        let plan = plan_pages(10, 9, 0, 25);
        assert_eq!(plan.pages_to_fetch, vec![8, 7]);
        assert!(plan.keep_main);
        assert_eq!((plan.slice_start, plan.slice_end), (0, 25));
    }

    #[test]
    fn test_window_straddling_main_and_second_page() {
        let plan = plan_pages(10, 5, 3, 10);
        assert_eq!(plan.pages_to_fetch, vec![4]);
        assert!(plan.keep_main);
        assert_eq!((plan.slice_start, plan.slice_end), (3, 13));
    }

    #[test]
    fn test_reverse_numbers_descend_toward_older_pages() {
        let plan = plan_pages(10, 20, 35, 30);
        // Logical pages 3..=6 map onto reverse numbers 17 down to 14.
        assert_eq!(plan.pages_to_fetch, vec![17, 16, 15, 14]);
        assert!(plan
            .pages_to_fetch
            .windows(2)
            .all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_index_beyond_feed_yields_empty_plan() {
        let plan = plan_pages(10, 3, 100, 10);
        assert_eq!(plan, PaginationPlan::empty());
    }

    #[test]
    fn test_window_clipped_to_last_existing_page() {
        // 3 pages total; a window reaching past the oldest page only plans
        // through reverse number 1.
        let plan = plan_pages(10, 3, 15, 30);
        assert_eq!(plan.pages_to_fetch, vec![2, 1]);
        assert_eq!((plan.slice_start, plan.slice_end), (5, 35));
    }

    #[test]
    fn test_last_item_of_the_feed() {
        let plan = plan_pages(10, 3, 29, 5);
        assert_eq!(plan.pages_to_fetch, vec![1]);
        assert!(!plan.keep_main);
        assert_eq!((plan.slice_start, plan.slice_end), (9, 14));
    }

    #[test]
    fn test_zero_count_plans_nothing() {
        assert_eq!(plan_pages(10, 5, 0, 0), PaginationPlan::empty());
    }

    #[test]
    fn test_window_cut_exact() {
        let plan = plan_pages(10, 9, 15, 10);
        let rows: Vec<usize> = (10..30).collect(); // logical pages 1 and 2
        assert_eq!(window(rows, &plan), (15..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_shorter_when_feed_runs_out() {
        let plan = plan_pages(10, 3, 15, 30);
        let rows: Vec<usize> = (10..28).collect(); // oldest page is short
        assert_eq!(window(rows, &plan), (15..28).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_empty_when_start_past_rows() {
        let plan = plan_pages(10, 3, 29, 5);
        let rows: Vec<usize> = (0..4).collect(); // oldest page shorter than expected
        assert!(window(rows, &plan).is_empty());
    }
}
