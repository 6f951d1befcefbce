// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Client-side search and pagination over a fetched collection.

/// Page sizes offered in the table footer.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

/// Search/paging state; derived data only, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: 10,
        }
    }
}

impl ViewState {
    /// New search term; always returns to the first page.
    pub fn set_search(&mut self, term: String) {
        self.search = term;
        self.page = 1;
    }

    /// New page size; always returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }

    /// Jump to a page within `1..=max(1, total_pages)`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Pull the page back in range after the collection shrank.
    pub fn clamp(&mut self, total_pages: usize) {
        self.page = self.page.min(total_pages.max(1));
    }

    /// Lowercased search needle used by the matchers. Whitespace is part of
    /// the term.
    pub fn needle(&self) -> String {
        self.search.to_lowercase()
    }
}

/// One page of filtered rows plus the totals needed by the footer.
#[derive(Debug)]
pub struct PageSlice<'a, T> {
    pub rows: Vec<&'a T>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
}

pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Filter `items` with `matches(item, needle)` and cut out the current page.
///
/// The slice is `[(page-1)*size, min(page*size, total))`; a page past the end
/// yields no rows rather than wrapping.
pub fn visible_rows<'a, T>(
    items: &'a [T],
    view: &ViewState,
    matches: impl Fn(&T, &str) -> bool,
) -> PageSlice<'a, T> {
    let needle = view.needle();
    let filtered: Vec<&T> = items.iter().filter(|item| matches(item, &needle)).collect();
    let total = filtered.len();
    let size = view.page_size.max(1);
    let start = view.page.saturating_sub(1).saturating_mul(size).min(total);
    let end = view.page.saturating_mul(size).min(total);

    PageSlice {
        rows: filtered[start..end].to_vec(),
        total,
        total_pages: total_pages(total, size),
        page: view.page,
    }
}

/// Every filtered row across all pages (used for export).
pub fn filtered_rows<'a, T>(
    items: &'a [T],
    view: &ViewState,
    matches: impl Fn(&T, &str) -> bool,
) -> Vec<&'a T> {
    let needle = view.needle();
    items.iter().filter(|item| matches(item, &needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        (0..25)
            .map(|i| {
                if i < 15 {
                    format!("Drama {i}")
                } else {
                    format!("Comedy {i}")
                }
            })
            .collect()
    }

    fn contains(item: &String, needle: &str) -> bool {
        item.to_lowercase().contains(needle)
    }

    #[test]
    fn search_resets_page_and_pages_through_filtered_rows() {
        let items = names();
        let mut view = ViewState {
            page: 3,
            ..Default::default()
        };

        view.set_search("DRAMA".into());
        assert_eq!(view.page, 1);

        let first = visible_rows(&items, &view, contains);
        assert_eq!(first.total, 15);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.rows[0], "Drama 0");
        assert_eq!(first.rows[9], "Drama 9");

        view.go_to(2, first.total_pages);
        let second = visible_rows(&items, &view, contains);
        assert_eq!(second.rows.len(), 5);
        assert_eq!(second.rows[4], "Drama 14");
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_search_term() {
        let items = vec!["Drama".to_string(), "Melodrama Extra".to_string()];
        let mut view = ViewState::default();

        view.set_search("drama ".into());
        let rows = filtered_rows(&items, &view, contains);
        assert_eq!(rows, vec![&items[1]]);

        view.set_search("Drama".into());
        assert_eq!(filtered_rows(&items, &view, contains).len(), 2);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut view = ViewState {
            page: 4,
            ..Default::default()
        };
        view.set_page_size(25);
        assert_eq!((view.page, view.page_size), (1, 25));
    }

    #[test]
    fn page_past_end_is_empty_until_clamped() {
        let items = names();
        let view = ViewState {
            page: 9,
            ..Default::default()
        };
        let slice = visible_rows(&items, &view, contains);
        assert!(slice.rows.is_empty());

        let mut view = view;
        view.clamp(slice.total_pages);
        assert_eq!(view.page, 3);
        assert_eq!(visible_rows(&items, &view, contains).rows.len(), 5);
    }

    #[test]
    fn empty_collection_keeps_page_one() {
        let items: Vec<String> = Vec::new();
        let mut view = ViewState::default();
        let slice = visible_rows(&items, &view, contains);
        assert_eq!((slice.total, slice.total_pages), (0, 0));
        view.clamp(slice.total_pages);
        assert_eq!(view.page, 1);
        view.go_to(5, 0);
        assert_eq!(view.page, 1);
    }
}
