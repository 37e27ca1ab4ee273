use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pages shown on each side of the current page.
pub const DEFAULT_DELTA: usize = 2;

/// A single control in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// 1-based page label.
    Page(usize),
    Ellipsis,
}

/// Compute the window of page controls around `current_page` (0-based).
///
/// ```rust
/// use trend_common::{window, PageToken::*};
///
/// assert_eq!(
///     window(5, 20, 2),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Page(7), Page(8), Ellipsis, Page(20)]
/// );
/// assert!(window(0, 1, 2).is_empty());
/// ```
pub fn window(current_page: usize, total_pages: usize, delta: usize) -> Vec<PageToken> {
    use PageToken::*;

    if total_pages <= 1 {
        return Vec::new();
    }

    // labels are 1-based from here on
    let current = current_page.saturating_add(1);
    let start = current.saturating_sub(delta).max(2);
    let end = current.saturating_add(delta).min(total_pages - 1);

    let mut tokens = vec![Page(1)];
    if current.saturating_sub(delta) > 2 {
        tokens.push(Ellipsis);
    }
    tokens.extend((start..=end).map(Page));
    if current.saturating_add(delta) < total_pages - 1 {
        tokens.push(Ellipsis);
    }
    tokens.push(Page(total_pages));
    tokens
}

////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported page size {0}; expected one of 10, 20, 50, 100")]
pub struct InvalidPageSize(pub String);

/// Rows per page; the closed set offered by the page-size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Ten,
    #[default]
    Twenty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [Self::Ten, Self::Twenty, Self::Fifty, Self::Hundred];

    pub fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| InvalidPageSize(value.to_string()))
    }
}

impl FromStr for PageSize {
    type Err = InvalidPageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map_err(|_| InvalidPageSize(s.to_string()))
            .and_then(Self::try_from)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Change requested through the pagination bar. The bar only reports these;
/// applying them (and deciding whether a size change resets the page) is up
/// to the owner of the query state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Page(usize),
    Size(PageSize),
}

/// Pagination bar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: PageSize,
    pub total_elements: usize,
}

impl Pagination {
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn tokens(&self) -> Vec<PageToken> {
        window(self.current_page, self.total_pages, DEFAULT_DELTA)
    }

    /// Guard for every page change: same page, negative or past-the-end
    /// requests are dropped without complaint.
    pub fn request_page(&self, page: i64) -> Option<PageEvent> {
        let page = usize::try_from(page).ok()?;
        if page >= self.total_pages || page == self.current_page {
            return None;
        }
        Some(PageEvent::Page(page))
    }

    /// A numeric control was clicked; `label` is 1-based.
    pub fn click(&self, label: usize) -> Option<PageEvent> {
        self.request_page(signed(label).saturating_sub(1))
    }

    pub fn previous(&self) -> Option<PageEvent> {
        self.request_page(signed(self.current_page).saturating_sub(1))
    }

    pub fn next(&self) -> Option<PageEvent> {
        self.request_page(signed(self.current_page).saturating_add(1))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    pub fn change_size(&self, size: PageSize) -> PageEvent {
        PageEvent::Size(size)
    }

    /// 1-based `(first, last)` item numbers of the current page.
    pub fn item_range(&self) -> (usize, usize) {
        let size = self.page_size.get();
        let first = self.current_page.saturating_mul(size).saturating_add(1);
        let last = self
            .current_page
            .saturating_add(1)
            .saturating_mul(size)
            .min(self.total_elements);
        (first, last)
    }
}

// pages past i64::MAX can never be valid, so they saturate there
fn signed(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}
