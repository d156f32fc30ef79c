//! Pagination state and `Link` header parsing

use regex::Regex;
use std::sync::LazyLock;

/// Provider-imposed ceiling on items per page
pub const MAX_PER_PAGE: usize = 100;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]+)>;\s*rel="([^"]+)""#).expect("valid link regex"));
static PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\?|&)page=(\d*)").expect("valid page regex"));

/// Per-fetch pagination state, kept apart from the caller's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Items still wanted across the remaining pages
    pub remaining: usize,
    /// Page to request next; `None` once the provider reports no more pages
    pub next_page: Option<u32>,
}

impl PageState {
    pub fn new(limit: usize) -> Self {
        Self {
            remaining: limit,
            next_page: Some(1),
        }
    }

    /// Next `(page, per_page)` to request, or `None` when done.
    pub fn next_request(&self) -> Option<(u32, usize)> {
        if self.remaining == 0 {
            return None;
        }
        self.next_page
            .map(|page| (page, self.remaining.min(MAX_PER_PAGE)))
    }

    /// Record a fetched page: how many items it carried and the `Link`
    /// header it came with.
    pub fn advance(&mut self, received: usize, link: Option<&str>) {
        self.remaining = self.remaining.saturating_sub(received);
        self.next_page = link.and_then(next_page);
    }
}

/// Page number of the `rel="next"` entry of a `Link` header.
pub fn next_page(link: &str) -> Option<u32> {
    LINK_RE
        .captures_iter(link)
        .filter(|c| &c[2] == "next")
        .filter_map(|c| {
            PAGE_RE
                .captures(&c[1])
                .and_then(|p| p[1].parse::<u32>().ok())
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = r#"<https://api.github.com/search/repositories?page=2&per_page=100&q=cli>; rel="next", <https://api.github.com/search/repositories?page=10&per_page=100&q=cli>; rel="last""#;

    #[test]
    fn test_next_page_from_link() {
        assert_eq!(next_page(LINK), Some(2));
    }

    #[test]
    fn test_next_page_first_parameter() {
        let link = r#"<https://api.github.com/search/repositories?page=3>; rel="next""#;
        assert_eq!(next_page(link), Some(3));
    }

    #[test]
    fn test_no_next_relation() {
        let link = r#"<https://api.github.com/search/repositories?page=1&q=cli>; rel="prev", <https://api.github.com/search/repositories?page=1&q=cli>; rel="first""#;
        assert_eq!(next_page(link), None);
        assert_eq!(next_page(""), None);
    }

    #[test]
    fn test_per_page_not_mistaken_for_page() {
        let link = r#"<https://h/search?q=x&per_page=50>; rel="next""#;
        assert_eq!(next_page(link), None);
    }

    #[test]
    fn test_page_sizes_are_capped() {
        let mut state = PageState::new(250);
        assert_eq!(state.next_request(), Some((1, 100)));
        state.advance(100, Some(r#"<https://h/s?page=2>; rel="next""#));
        assert_eq!(state.next_request(), Some((2, 100)));
        state.advance(100, Some(r#"<https://h/s?page=3>; rel="next""#));
        assert_eq!(state.next_request(), Some((3, 50)));
        state.advance(50, Some(r#"<https://h/s?page=4>; rel="next""#));
        assert_eq!(state.next_request(), None);
    }

    #[test]
    fn test_missing_next_stops_with_items_remaining() {
        let mut state = PageState::new(500);
        state.advance(20, None);
        assert_eq!(state.remaining, 480);
        assert_eq!(state.next_request(), None);
    }
}
