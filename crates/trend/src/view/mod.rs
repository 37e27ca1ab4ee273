//! Plain-text renderings of each route. Every function here returns the
//! string to print; nothing writes to the terminal directly.

pub mod detail;
pub mod pagination;
pub mod table;

use colored::Colorize;
use trend_common::{format, Stock};

use crate::controller::{ListController, LoadState};
use table::Column;

pub const LOADING: &str = "Loading stocks...";
pub const EMPTY: &str = "No stocks found. Try adjusting your filters.";
pub const LOGIN_HINT: &str = "Session expired. Sign in again with `trend login <TOKEN>`.";

pub fn stock_columns() -> Vec<Column<Stock>> {
    vec![
        Column {
            label: "Symbol",
            cell: |s| s.symbol().to_string(),
            emphasis: true,
        },
        Column {
            label: "Company Name",
            cell: |s| s.company_name.clone().unwrap_or_default(),
            emphasis: false,
        },
        Column {
            label: "Exchange",
            cell: |s| s.exchange.clone().unwrap_or_default(),
            emphasis: false,
        },
        Column {
            label: "Sector",
            cell: |s| s.sector.clone().unwrap_or_else(|| format::NOT_AVAILABLE.to_string()),
            emphasis: false,
        },
        Column {
            label: "Market Cap",
            cell: |s| format::market_cap(s.market_cap),
            emphasis: false,
        },
        Column {
            label: "Last Price",
            cell: |s| format::price(s.current_price),
            emphasis: false,
        },
    ]
}

/// `Showing 20 of 57 stocks matching "app" from NASDAQ`
pub fn summary(shown: usize, total: usize, search: &str, exchange: &str) -> String {
    let mut line = format!("Showing {shown} of {total} stocks");
    if !search.trim().is_empty() {
        line.push_str(&format!(" matching \"{}\"", search.trim()));
    }
    if !exchange.is_empty() {
        line.push_str(&format!(" from {exchange}"));
    }
    line
}

fn filters(list: &ListController) -> String {
    let query = list.query();
    let search = match query.search_query.trim() {
        "" => "-",
        q => q,
    };
    let exchange = match query.selected_exchange.as_str() {
        "" => "All Exchanges",
        x => x,
    };
    let mut line = format!("Search: {search}    Exchange: {exchange}");
    if !list.exchanges().is_empty() {
        line.push_str(&format!("    ({})", list.exchanges().join(", ")).dimmed().to_string());
    }
    line
}

/// The `/` route: filters, summary, table and pagination.
pub fn render_list(list: &ListController) -> String {
    let query = list.query();
    let mut sections = vec![
        "Stocks List".bold().to_string(),
        filters(list),
        summary(
            list.stocks().len(),
            list.total_elements(),
            &query.search_query,
            &query.selected_exchange,
        ),
        table::render(
            &stock_columns(),
            list.stocks(),
            list.state() == LoadState::Loading,
            EMPTY,
        ),
    ];

    let bar = pagination::render(&list.pagination());
    if !bar.is_empty() {
        sections.push(bar);
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trend_common::{PageResult, QueryState};

    #[test]
    fn summary_mentions_active_filters() {
        assert_eq!(summary(20, 57, "", ""), "Showing 20 of 57 stocks");
        assert_eq!(
            summary(3, 3, " app ", "NASDAQ"),
            "Showing 3 of 3 stocks matching \"app\" from NASDAQ"
        );
    }

    #[test]
    fn stock_row_cells() {
        let stock = Stock {
            symbol: Some("AAPL".to_string()),
            company_name: Some("Apple Inc.".to_string()),
            exchange: Some("NASDAQ".to_string()),
            market_cap: Some(2.5e12),
            current_price: Some(189.5),
            ..Default::default()
        };
        let cells: Vec<String> = stock_columns().iter().map(|c| (c.cell)(&stock)).collect();
        assert_eq!(
            cells,
            vec!["AAPL", "Apple Inc.", "NASDAQ", "N/A", "$2500.00B", "$189.50"]
        );
    }

    #[test]
    fn list_page_layout() {
        colored::control::set_override(false);
        let mut list = ListController::new(QueryState::default());
        let (ticket, _) = list.begin();
        list.complete(
            ticket,
            Ok(PageResult {
                items: vec![Stock {
                    symbol: Some("AAPL".to_string()),
                    ..Default::default()
                }],
                total_pages: 1,
                total_elements: 1,
            }),
        );

        let page = render_list(&list);
        assert!(page.starts_with("Stocks List\n\nSearch: -    Exchange: All Exchanges"));
        assert!(page.contains("Showing 1 of 1 stocks"));
        assert!(page.contains("1  AAPL"));
        assert!(!page.contains("results"));
    }

    #[test]
    fn empty_list_message() {
        colored::control::set_override(false);
        let mut list = ListController::new(QueryState::default());
        let (ticket, _) = list.begin();
        list.complete(ticket, Ok(PageResult::default()));
        assert!(render_list(&list).ends_with(EMPTY));
    }
}
