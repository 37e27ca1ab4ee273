use crate::pagination::{PageEvent, PageSize};

/// Everything that decides which page of stocks is on screen. Any change to
/// it means a refetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub page: usize,
    pub size: PageSize,
    pub search_query: String,
    pub selected_exchange: String,
}

/// The single request a [`QueryState`] resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    Search {
        query: String,
        page: usize,
        size: PageSize,
    },
    Exchange {
        exchange: String,
        page: usize,
        size: PageSize,
    },
    All {
        page: usize,
        size: PageSize,
    },
}

impl ListRequest {
    pub fn size(&self) -> PageSize {
        match self {
            Self::Search { size, .. } | Self::Exchange { size, .. } | Self::All { size, .. } => {
                *size
            }
        }
    }
}

impl QueryState {
    /// Search beats the exchange filter, which beats the plain listing.
    pub fn request(&self) -> ListRequest {
        let query = self.search_query.trim();
        let exchange = self.selected_exchange.trim();

        if !query.is_empty() {
            ListRequest::Search {
                query: query.to_string(),
                page: self.page,
                size: self.size,
            }
        } else if !exchange.is_empty() {
            ListRequest::Exchange {
                exchange: exchange.to_string(),
                page: self.page,
                size: self.size,
            }
        } else {
            ListRequest::All {
                page: self.page,
                size: self.size,
            }
        }
    }

    // The setters below report whether anything changed, so callers only
    // refetch on a real change.

    pub fn set_search(&mut self, query: &str) -> bool {
        let changed = self.search_query != query || self.page != 0;
        self.search_query = query.to_string();
        self.page = 0;
        changed
    }

    pub fn set_exchange(&mut self, exchange: &str) -> bool {
        let changed = self.selected_exchange != exchange || self.page != 0;
        self.selected_exchange = exchange.to_string();
        self.page = 0;
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = !self.search_query.is_empty()
            || !self.selected_exchange.is_empty()
            || self.page != 0;
        self.search_query.clear();
        self.selected_exchange.clear();
        self.page = 0;
        changed
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Changing the size goes back to the first page, so the current page
    /// can never point past the end of the new page count.
    pub fn set_size(&mut self, size: PageSize) -> bool {
        let changed = self.size != size || self.page != 0;
        self.size = size;
        self.page = 0;
        changed
    }

    pub fn apply(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::Page(page) => self.set_page(page),
            PageEvent::Size(size) => self.set_size(size),
        }
    }
}
