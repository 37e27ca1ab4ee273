use trend_client::prelude::*;
use trend_common::{ListRequest, PageEvent, PageResult, Pagination, QueryState, Stock};

use crate::notice::Notice;
use crate::router::Route;

pub const FETCH_FAILED: &str = "Failed to fetch stocks";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Error,
}

/// Issued per fetch; only the most recently issued ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What became of a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    /// A newer fetch was started after this one; its result was dropped.
    Stale,
    /// The requested page lies past the end; the query now points at the
    /// last page and has to be fetched again.
    Clamped,
    Redirect(Route),
}

/// State behind the stocks list: the query, the page on screen, and the
/// loading state of the fetch that produced it.
///
/// Overlapping fetches resolve as "last started wins": [`begin`] hands out a
/// fresh [`Ticket`] and [`complete`] drops any result that does not carry the
/// latest one, however late or early it arrives. [`refresh`] awaits its
/// fetch before returning, so the interactive session never has two in
/// flight; the guard matters to callers driving `begin`/`complete` from
/// concurrent tasks.
///
/// The page on screen always satisfies `page < total_pages` once loaded: a
/// page past the end, from the command line or a shrinking result set, is
/// clamped to the last page and fetched again.
///
/// [`begin`]: ListController::begin
/// [`complete`]: ListController::complete
/// [`refresh`]: ListController::refresh
#[derive(Debug)]
pub struct ListController {
    query: QueryState,
    page: PageResult<Stock>,
    state: LoadState,
    exchanges: Vec<String>,
    latest: u64,
    notices: Vec<Notice>,
}

impl ListController {
    pub fn new(query: QueryState) -> Self {
        Self {
            query,
            page: PageResult::default(),
            state: LoadState::Loading,
            exchanges: Vec::new(),
            latest: 0,
            notices: Vec::new(),
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.page.items
    }

    pub fn total_elements(&self) -> usize {
        self.page.total_elements
    }

    pub fn exchanges(&self) -> &[String] {
        &self.exchanges
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.query.page,
            total_pages: self.page.total_pages,
            page_size: self.query.size,
            total_elements: self.page.total_elements,
        }
    }

    /// Start a fetch for the current query.
    pub fn begin(&mut self) -> (Ticket, ListRequest) {
        self.latest += 1;
        self.state = LoadState::Loading;
        (Ticket(self.latest), self.query.request())
    }

    /// Land the result of the fetch started with `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<PageResult<Stock>, ApiError>,
    ) -> Outcome {
        if ticket.0 != self.latest {
            log::debug!("dropping stale stocks page (ticket {} < {})", ticket.0, self.latest);
            return Outcome::Stale;
        }

        match result {
            Ok(page) if page.total_pages > 0 && self.query.page >= page.total_pages => {
                log::debug!(
                    "page {} is past the last of {}; clamping",
                    self.query.page,
                    page.total_pages
                );
                self.query.set_page(page.total_pages - 1);
                self.page = page;
                Outcome::Clamped
            }
            Ok(page) => {
                self.page = page;
                self.state = LoadState::Loaded;
                Outcome::Applied
            }
            Err(ApiError::Unauthorized { redirect }) => {
                self.page.items.clear();
                self.state = LoadState::Error;
                Outcome::Redirect(redirect.parse().unwrap_or(Route::Login))
            }
            Err(e) => {
                log::error!("Error fetching stocks: {e}");
                self.page.items.clear();
                self.state = LoadState::Error;
                self.notices.push(Notice::error(FETCH_FAILED));
                Outcome::Failed
            }
        }
    }

    /// Fetch the current query, following any clamp to the last page.
    pub async fn refresh<A: StocksApi + Sync>(&mut self, api: &A) -> Outcome {
        loop {
            let (ticket, request) = self.begin();
            let result = api.fetch_page(&request).await;
            match self.complete(ticket, result) {
                // the page only ever moves down, so this terminates
                Outcome::Clamped => continue,
                outcome => return outcome,
            }
        }
    }

    /// First load: the exchange picker, then the first page.
    pub async fn mount<A: StocksApi + Sync>(&mut self, api: &A) -> Outcome {
        match api.get_exchanges().await {
            Ok(exchanges) => self.exchanges = exchanges,
            Err(e) => log::error!("Error fetching exchanges: {e}"),
        }
        self.refresh(api).await
    }

    // Each of these returns whether the query changed, i.e. whether a
    // refetch is due.

    pub fn apply(&mut self, event: PageEvent) -> bool {
        self.query.apply(event)
    }

    pub fn search(&mut self, query: &str) -> bool {
        self.query.set_search(query)
    }

    pub fn filter_exchange(&mut self, exchange: &str) -> bool {
        self.query.set_exchange(exchange)
    }

    pub fn clear_filters(&mut self) -> bool {
        self.query.clear_filters()
    }

    /// Route for the 1-based `row` on screen; rows without a symbol go nowhere.
    pub fn open_row(&self, row: usize) -> Option<Route> {
        let stock = self.page.items.get(row.checked_sub(1)?)?;
        match stock.symbol() {
            "" => None,
            symbol => Some(Route::detail(symbol)),
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
