use serde::Serialize;

use crate::domain::envelope::PageMeta;

/// Pages shown on each side of the current page.
const WINDOW: u32 = 2;

/// Page buttons to render for `current` out of `total` pages.
///
/// `None` marks an ellipsis. Pages 1 and `total` are always present; the
/// window `current - 2 ..= current + 2` is clipped to `[2, total - 1]`.
/// Nothing is rendered for a single page.
pub fn compute_visible_pages(current: u32, total: u32) -> Vec<Option<u32>> {
    if total <= 1 {
        return vec![];
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(WINDOW).max(2);
    let end = current.saturating_add(WINDOW).min(total - 1);

    let mut pages = vec![Some(1)];
    if start > 2 {
        pages.push(None);
    }
    pages.extend((start..=end).map(Some));
    if end < total - 1 {
        pages.push(None);
    }
    pages.push(Some(total));

    pages
}

/// Everything a pagination bar needs to render.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationView {
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub first_item: u64,
    pub last_item: u64,
    pub pages: Vec<Option<u32>>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

impl PaginationView {
    /// Returns `None` when the result fits on one page.
    pub fn new(meta: &PageMeta, per_page: u32) -> Option<Self> {
        if meta.total_pages <= 1 {
            return None;
        }

        let page = meta.page.clamp(1, meta.total_pages);
        let per_page = u64::from(per_page);
        let first_item = (u64::from(page) - 1) * per_page + 1;
        let last_item = (u64::from(page) * per_page).min(meta.total);

        Some(Self {
            page,
            total_pages: meta.total_pages,
            total_items: meta.total,
            first_item,
            last_item,
            pages: compute_visible_pages(page, meta.total_pages),
            previous: (page > 1).then(|| page - 1),
            next: (page < meta.total_pages).then(|| page + 1),
        })
    }

    /// The page to navigate to, or `None` when `page` is out of range.
    pub fn target(&self, page: u32) -> Option<u32> {
        (1..=self.total_pages).contains(&page).then_some(page)
    }

    /// "Showing X to Y of Z results".
    pub fn summary(&self) -> String {
        format!(
            "Hiển thị {} đến {} của {} kết quả",
            self.first_item, self.last_item, self.total_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_around_current_page() {
        assert_eq!(
            compute_visible_pages(7, 20),
            vec![
                Some(1),
                None,
                Some(5),
                Some(6),
                Some(7),
                Some(8),
                Some(9),
                None,
                Some(20)
            ]
        );
    }

    #[test]
    fn near_edges_no_ellipsis() {
        assert_eq!(
            compute_visible_pages(1, 5),
            vec![Some(1), Some(2), Some(3), None, Some(5)]
        );
        assert_eq!(
            compute_visible_pages(3, 5),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
        assert_eq!(compute_visible_pages(2, 2), vec![Some(1), Some(2)]);
    }

    #[test]
    fn single_page_renders_nothing() {
        assert!(compute_visible_pages(1, 1).is_empty());
        assert!(compute_visible_pages(1, 0).is_empty());
    }

    #[test]
    fn invariants_hold_for_all_inputs() {
        for total in 2..30 {
            for current in 1..=total {
                let pages = compute_visible_pages(current, total);
                assert_eq!(pages.first(), Some(&Some(1)));
                assert_eq!(pages.last(), Some(&Some(total)));
                assert!(pages.contains(&Some(current)));

                let numbers: Vec<u32> = pages.iter().flatten().copied().collect();
                assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
                assert!(pages.windows(2).all(|pair| pair[0].is_some() || pair[1].is_some()));
                for pair in pages.windows(2) {
                    if let [Some(a), Some(b)] = pair {
                        assert_eq!(b - a, 1, "gap without ellipsis in {pages:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn huge_page_counts_do_not_overflow() {
        let pages = compute_visible_pages(u32::MAX - 1, u32::MAX);
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(u32::MAX)));
        assert!(pages.contains(&None));

        let last = compute_visible_pages(u32::MAX, u32::MAX);
        assert_eq!(last.last(), Some(&Some(u32::MAX)));
    }

    #[test]
    fn view_reports_range_and_neighbours() {
        let meta = PageMeta {
            total: 25,
            page: 3,
            total_pages: 3,
        };
        let view = PaginationView::new(&meta, 10).unwrap();
        assert_eq!(view.first_item, 21);
        assert_eq!(view.last_item, 25);
        assert_eq!(view.previous, Some(2));
        assert_eq!(view.next, None);
        assert_eq!(view.summary(), "Hiển thị 21 đến 25 của 25 kết quả");
        assert_eq!(view.target(4), None);
        assert_eq!(view.target(0), None);
        assert_eq!(view.target(1), Some(1));
    }

    #[test]
    fn view_hidden_for_single_page() {
        let meta = PageMeta {
            total: 4,
            page: 1,
            total_pages: 1,
        };
        assert!(PaginationView::new(&meta, 10).is_none());
    }
}
