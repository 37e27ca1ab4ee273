use serde_json::Value;
use trend_client::prelude::*;
use trend_common::{PriceHistoryEntry, Stock};

use crate::router::Route;

pub const LOAD_FAILED: &str = "Failed to load stock data. Please try again.";

/// Rows of price history the detail view shows.
pub const HISTORY_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct StockDetail {
    pub stock: Stock,
    pub history: Vec<PriceHistoryEntry>,
    pub analytics: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<StockDetail>),
    NotFound { symbol: String },
    Error { message: String },
    Redirect(Route),
}

/// Load everything `/stock/:symbol` shows.
///
/// The stock comes first since history and analytics are keyed by its id;
/// those two are then fetched together. A failed history fails the view, a
/// failed analytics call only leaves its panel out.
pub async fn load<A: StocksApi + Sync>(api: &A, symbol: &str) -> DetailState {
    let stock = match api.get_stock_by_symbol(symbol).await {
        Ok(Some(stock)) => stock,
        Ok(None) => {
            return DetailState::NotFound {
                symbol: symbol.to_string(),
            }
        }
        Err(e) => return failed(e),
    };

    let Some(id) = stock.id else {
        log::warn!("[{symbol}] stock has no id; skipping history and analytics");
        return DetailState::Loaded(Box::new(StockDetail {
            stock,
            history: Vec::new(),
            analytics: None,
        }));
    };

    let history_params = HistoryParams::default();
    let (history, analytics) = futures::join!(
        api.get_stock_history(id, &history_params),
        api.get_stock_analytics(id),
    );

    let history = match history {
        Ok(history) => history,
        Err(e) => return failed(e),
    };
    let analytics = match analytics {
        Ok(Value::Null) => None,
        Ok(analytics) => Some(analytics),
        Err(e) => {
            log::warn!("[{symbol}] analytics unavailable: {e}");
            None
        }
    };

    DetailState::Loaded(Box::new(StockDetail {
        stock,
        history,
        analytics,
    }))
}

fn failed(e: ApiError) -> DetailState {
    match e {
        ApiError::Unauthorized { redirect } => {
            DetailState::Redirect(redirect.parse().unwrap_or(Route::Login))
        }
        e => {
            log::error!("Error fetching stock data: {e}");
            DetailState::Error {
                message: LOAD_FAILED.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{stock, FakeApi};
    use trend_client::StatusCode;

    #[test]
    fn unauthorized_becomes_redirect() {
        assert_eq!(
            failed(ApiError::Unauthorized {
                redirect: LOGIN_PATH,
            }),
            DetailState::Redirect(Route::Login)
        );
    }

    #[test]
    fn other_errors_become_inline_panel() {
        let state = failed(ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        });
        assert_eq!(
            state,
            DetailState::Error {
                message: LOAD_FAILED.to_string()
            }
        );
    }

    fn api() -> FakeApi {
        FakeApi {
            stocks: vec![stock(1, "AAPL", "NASDAQ")],
            history: vec![PriceHistoryEntry {
                date: Some("2024-03-01".to_string()),
                closing_price: Some(179.66),
                volume: Some(73_563_082.0),
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn loads_stock_history_and_analytics() {
        let DetailState::Loaded(detail) = load(&api(), "AAPL").await else {
            panic!("expected a loaded detail");
        };
        assert_eq!(detail.stock.symbol(), "AAPL");
        assert_eq!(detail.history.len(), 1);
        assert!(detail.analytics.is_some());
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        assert_eq!(
            load(&api(), "ZZZZ").await,
            DetailState::NotFound {
                symbol: "ZZZZ".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_history_fails_the_view() {
        let api = FakeApi {
            failing_history: true,
            ..api()
        };
        assert_eq!(
            load(&api, "AAPL").await,
            DetailState::Error {
                message: LOAD_FAILED.to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_analytics_is_tolerated() {
        let api = FakeApi {
            failing_analytics: true,
            ..api()
        };
        let DetailState::Loaded(detail) = load(&api, "AAPL").await else {
            panic!("expected a loaded detail");
        };
        assert_eq!(detail.analytics, None);
        assert_eq!(detail.history.len(), 1);
    }

    #[tokio::test]
    async fn expired_session_redirects() {
        let api = FakeApi {
            unauthorized: true,
            ..api()
        };
        assert_eq!(load(&api, "AAPL").await, DetailState::Redirect(Route::Login));
    }
}
